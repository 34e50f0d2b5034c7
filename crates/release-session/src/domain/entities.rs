//! # Domain Entities
//!
//! Allotments, roster entries, and the pending-release snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_objects::{Amount, BudgetKind};

/// Internal numeric allotment identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllotmentId(pub u64);

impl fmt::Display for AllotmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal numeric beneficiary identifier (database row id).
///
/// Never used for scan matching; see [`BeneficiaryCode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeneficiaryId(pub u64);

impl fmt::Display for BeneficiaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable beneficiary code, the string encoded on the physical barcode.
///
/// This is the only key a scan is matched against. Comparison is exact
/// after trimming, ignoring case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeneficiaryCode(String);

impl BeneficiaryCode {
    /// Create a code, trimming surrounding whitespace.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    /// Derive a code from the decimal form of a numeric id.
    ///
    /// For sources whose rows carry no separate barcode field.
    pub fn from_id(id: BeneficiaryId) -> Self {
        Self(id.0.to_string())
    }

    /// Code as printed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive exact comparison against a scanned value.
    pub fn matches(&self, scanned: &str) -> bool {
        let scanned = scanned.trim();
        !self.0.is_empty()
            && self
                .0
                .chars()
                .flat_map(char::to_lowercase)
                .eq(scanned.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for BeneficiaryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allotment a release session operates on. Immutable for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllotmentRef {
    /// Allotment id.
    pub id: AllotmentId,
    /// Project name shown to the operator.
    pub project_name: String,
    /// Funding company.
    #[serde(default)]
    pub company: String,
    /// Responsible department.
    #[serde(default)]
    pub department: String,
    /// Source of fund.
    #[serde(default)]
    pub source_of_fund: String,
    /// Total budget, display only.
    pub total_budget: Amount,
}

impl AllotmentRef {
    /// Budget kind, derived from the total budget.
    pub fn budget_kind(&self) -> BudgetKind {
        self.total_budget.kind()
    }

    /// Formatted total budget.
    pub fn total_budget_text(&self) -> String {
        self.total_budget.budget_text()
    }
}

impl fmt::Display for AllotmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.project_name)
    }
}

/// One endorsed beneficiary assigned to the allotment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Internal row id, used for ledger writes.
    pub beneficiary_id: BeneficiaryId,
    /// Barcode value, used for scan matching.
    pub code: BeneficiaryCode,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Barangay of residence.
    pub barangay: String,
    /// Sector classification.
    pub classification: String,
    /// Computed share; kind follows the allotment's budget kind.
    pub share: Amount,
    /// Release flag. Only ever goes false -> true.
    pub released: bool,
}

impl RosterEntry {
    /// "First Last", trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Formatted share.
    pub fn share_text(&self) -> String {
        self.share.share_text()
    }
}

/// Entry awaiting operator confirmation, with display fields frozen at
/// match time so a roster reload does not change the dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRelease {
    /// Row id to write on confirm.
    pub beneficiary_id: BeneficiaryId,
    /// Matched code.
    pub code: BeneficiaryCode,
    /// Display name snapshot.
    pub name: String,
    /// Barangay snapshot.
    pub barangay: String,
    /// Classification snapshot.
    pub classification: String,
    /// Share text snapshot.
    pub share_text: String,
}

impl PendingRelease {
    /// Snapshot a roster entry.
    pub fn capture(entry: &RosterEntry) -> Self {
        Self {
            beneficiary_id: entry.beneficiary_id,
            code: entry.code.clone(),
            name: entry.display_name(),
            barangay: entry.barangay.clone(),
            classification: entry.classification.clone(),
            share_text: entry.share_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;

    fn entry() -> RosterEntry {
        RosterEntry {
            beneficiary_id: BeneficiaryId(7),
            code: BeneficiaryCode::new("BENE-007"),
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            barangay: "San Isidro".to_string(),
            classification: "Senior Citizen".to_string(),
            share: Amount::money(Money::from_centavos(150_000)),
            released: false,
        }
    }

    #[test]
    fn test_code_matches_ignoring_case() {
        let code = BeneficiaryCode::new("BENE-001");
        assert!(code.matches("bene-001"));
        assert!(code.matches("  BENE-001 "));
        assert!(!code.matches("BENE-0011"));
        assert!(!code.matches("BENE-002"));
    }

    #[test]
    fn test_empty_code_never_matches() {
        let code = BeneficiaryCode::new("   ");
        assert!(!code.matches(""));
    }

    #[test]
    fn test_code_from_id() {
        let code = BeneficiaryCode::from_id(BeneficiaryId(42));
        assert_eq!(code.as_str(), "42");
        assert!(code.matches("42"));
    }

    #[test]
    fn test_display_name_trims_missing_parts() {
        let mut e = entry();
        assert_eq!(e.display_name(), "Maria Santos");
        e.first_name.clear();
        assert_eq!(e.display_name(), "Santos");
    }

    #[test]
    fn test_pending_snapshot() {
        let pending = PendingRelease::capture(&entry());
        assert_eq!(pending.code.as_str(), "BENE-007");
        assert_eq!(pending.name, "Maria Santos");
        assert_eq!(pending.share_text, "₱ 1,500.00");
    }
}
