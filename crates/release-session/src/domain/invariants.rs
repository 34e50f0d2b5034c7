//! # Domain Invariants
//!
//! Rules every loaded roster must satisfy.

use std::collections::HashSet;

use super::entities::{AllotmentRef, BeneficiaryId, RosterEntry};
use super::errors::ReleaseError;

/// Every share must be denominated like the allotment budget.
///
/// Exactly one of amount / quantity+unit is guaranteed by [`Amount`]
/// itself; this checks that it is the right one.
///
/// [`Amount`]: super::value_objects::Amount
pub fn invariant_share_matches_budget(
    allotment: &AllotmentRef,
    entries: &[RosterEntry],
) -> Result<(), ReleaseError> {
    let expected = allotment.budget_kind();
    match entries.iter().find(|e| e.share.kind() != expected) {
        Some(bad) => Err(ReleaseError::RosterInvariant(format!(
            "share of {} is {:?} but allotment {} budget is {:?}",
            bad.code,
            bad.share.kind(),
            allotment.id,
            expected
        ))),
        None => Ok(()),
    }
}

/// `released` never goes back to false within a session.
///
/// Entries seen released before the reload are forced back to released;
/// returns the ids that had to be repaired.
pub fn invariant_release_monotonic(
    previous: &[RosterEntry],
    next: &mut [RosterEntry],
) -> Vec<BeneficiaryId> {
    let released_before: HashSet<BeneficiaryId> = previous
        .iter()
        .filter(|e| e.released)
        .map(|e| e.beneficiary_id)
        .collect();

    let mut repaired = Vec::new();
    for entry in next.iter_mut() {
        if !entry.released && released_before.contains(&entry.beneficiary_id) {
            entry.released = true;
            repaired.push(entry.beneficiary_id);
        }
    }
    repaired
}
