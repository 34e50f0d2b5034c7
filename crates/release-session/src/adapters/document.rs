//! # Ledger Document
//!
//! Serializable snapshot of allotments and their assignment rows, shared by
//! the in-memory and JSON-file ledgers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AllotmentId, AllotmentRef, Amount, BeneficiaryCode, BeneficiaryId, LedgerError, RosterEntry,
};

/// Beneficiary validation status. Only `Endorsed` rows reach a roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeneficiaryStatus {
    /// Approved for distribution.
    Endorsed,
    /// Awaiting validation.
    #[default]
    Pending,
    /// Rejected by validators.
    Rejected,
}

fn default_classification() -> String {
    "None".to_string()
}

/// One (allotment, beneficiary) assignment with its share and release flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// Allotment the beneficiary is assigned to.
    pub allotment_id: AllotmentId,
    /// Beneficiary row id.
    pub beneficiary_id: BeneficiaryId,
    /// Barcode value. When absent, the decimal id is the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<BeneficiaryCode>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Barangay.
    #[serde(default)]
    pub barangay: String,
    /// Classification; "None" when unset.
    #[serde(default = "default_classification")]
    pub classification: String,
    /// Validation status.
    #[serde(default)]
    pub status: BeneficiaryStatus,
    /// Share computed for this assignment.
    pub share: Amount,
    /// Release flag.
    #[serde(default)]
    pub released: bool,
    /// When the release was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
}

impl AssignmentRow {
    /// Code used for scan matching.
    pub fn effective_code(&self) -> BeneficiaryCode {
        self.code
            .clone()
            .unwrap_or_else(|| BeneficiaryCode::from_id(self.beneficiary_id))
    }

    /// Roster view of this row.
    pub fn to_roster_entry(&self) -> RosterEntry {
        RosterEntry {
            beneficiary_id: self.beneficiary_id,
            code: self.effective_code(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            barangay: self.barangay.clone(),
            classification: self.classification.clone(),
            share: self.share.clone(),
            released: self.released,
        }
    }
}

/// Whole ledger contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Known allotments.
    #[serde(default)]
    pub allotments: Vec<AllotmentRef>,
    /// Assignment rows across all allotments.
    #[serde(default)]
    pub assignments: Vec<AssignmentRow>,
}

impl LedgerDocument {
    fn ensure_allotment(&self, allotment: AllotmentId) -> Result<(), LedgerError> {
        if self.allotments.iter().any(|a| a.id == allotment) {
            Ok(())
        } else {
            Err(LedgerError::AllotmentNotFound(allotment))
        }
    }

    fn row(&self, allotment: AllotmentId, beneficiary: BeneficiaryId) -> Option<&AssignmentRow> {
        self.assignments
            .iter()
            .find(|r| r.allotment_id == allotment && r.beneficiary_id == beneficiary)
    }

    /// Allotments ordered by id.
    pub fn allotments(&self) -> Vec<AllotmentRef> {
        let mut list = self.allotments.clone();
        list.sort_by_key(|a| a.id);
        list
    }

    /// Endorsed assignments of an allotment.
    pub fn roster(&self, allotment: AllotmentId) -> Result<Vec<RosterEntry>, LedgerError> {
        self.ensure_allotment(allotment)?;
        Ok(self
            .assignments
            .iter()
            .filter(|r| r.allotment_id == allotment && r.status == BeneficiaryStatus::Endorsed)
            .map(AssignmentRow::to_roster_entry)
            .collect())
    }

    /// Release flag of one assignment.
    pub fn is_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<bool, LedgerError> {
        self.ensure_allotment(allotment)?;
        self.row(allotment, beneficiary)
            .map(|r| r.released)
            .ok_or(LedgerError::NotAssigned {
                allotment,
                beneficiary,
            })
    }

    /// Set the release flag. Returns true when this call flipped it.
    pub fn mark_released(
        &mut self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
        at: DateTime<Utc>,
    ) -> Result<bool, LedgerError> {
        self.ensure_allotment(allotment)?;
        let row = self
            .assignments
            .iter_mut()
            .find(|r| r.allotment_id == allotment && r.beneficiary_id == beneficiary)
            .ok_or(LedgerError::NotAssigned {
                allotment,
                beneficiary,
            })?;
        if row.released {
            return Ok(false);
        }
        row.released = true;
        row.released_at = Some(at);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;

    fn document() -> LedgerDocument {
        LedgerDocument {
            allotments: vec![AllotmentRef {
                id: AllotmentId(1),
                project_name: "Cash Aid".to_string(),
                company: String::new(),
                department: String::new(),
                source_of_fund: String::new(),
                total_budget: Amount::money(Money::from_pesos(10_000)),
            }],
            assignments: vec![
                AssignmentRow {
                    allotment_id: AllotmentId(1),
                    beneficiary_id: BeneficiaryId(10),
                    code: None,
                    first_name: "Ella".to_string(),
                    last_name: "Torres".to_string(),
                    barangay: "San Roque".to_string(),
                    classification: "None".to_string(),
                    status: BeneficiaryStatus::Endorsed,
                    share: Amount::money(Money::from_pesos(5_000)),
                    released: false,
                    released_at: None,
                },
                AssignmentRow {
                    allotment_id: AllotmentId(1),
                    beneficiary_id: BeneficiaryId(11),
                    code: Some(BeneficiaryCode::new("BENE-011")),
                    first_name: "James".to_string(),
                    last_name: "Bautista".to_string(),
                    barangay: "Poblacion".to_string(),
                    classification: "None".to_string(),
                    status: BeneficiaryStatus::Pending,
                    share: Amount::money(Money::from_pesos(5_000)),
                    released: false,
                    released_at: None,
                },
            ],
        }
    }

    #[test]
    fn test_roster_only_endorsed() {
        let roster = document().roster(AllotmentId(1)).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].code.as_str(), "10");
    }

    #[test]
    fn test_unknown_allotment() {
        let err = document().roster(AllotmentId(9)).unwrap_err();
        assert!(matches!(err, LedgerError::AllotmentNotFound(AllotmentId(9))));
    }

    #[test]
    fn test_mark_released_flips_once() {
        let mut doc = document();
        let now = Utc::now();
        assert!(doc.mark_released(AllotmentId(1), BeneficiaryId(10), now).unwrap());
        assert!(!doc.mark_released(AllotmentId(1), BeneficiaryId(10), now).unwrap());
        assert!(doc.is_released(AllotmentId(1), BeneficiaryId(10)).unwrap());
    }

    #[test]
    fn test_mark_unassigned_fails() {
        let mut doc = document();
        let err = doc
            .mark_released(AllotmentId(1), BeneficiaryId(99), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotAssigned { .. }));
    }

    #[test]
    fn test_row_defaults_from_json() {
        let row: AssignmentRow = serde_json::from_str(
            r#"{
                "allotment_id": 1,
                "beneficiary_id": 5,
                "first_name": "Mark",
                "last_name": "Navarro",
                "share": {"kind": "in_kind", "quantity": 25, "unit": "kg"}
            }"#,
        )
        .unwrap();
        assert_eq!(row.classification, "None");
        assert_eq!(row.status, BeneficiaryStatus::Pending);
        assert!(!row.released);
        assert_eq!(row.effective_code().as_str(), "5");
    }
}
