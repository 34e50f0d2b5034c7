//! # In-Memory Ledger
//!
//! Ledger backed by a [`LedgerDocument`] behind a `parking_lot::RwLock`.
//! Used by the demo desk and the test suites. Failure switches let tests
//! simulate an unreachable backend, and [`InMemoryReleaseLedger::release_externally`]
//! stands in for a second terminal writing the same ledger.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::document::{AssignmentRow, LedgerDocument};
use crate::domain::{AllotmentId, AllotmentRef, BeneficiaryId, LedgerError, RosterEntry};
use crate::ports::{AllotmentDirectory, ReleaseLedger};

/// Shared in-memory release ledger.
#[derive(Debug, Default)]
pub struct InMemoryReleaseLedger {
    document: RwLock<LedgerDocument>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    mark_calls: AtomicUsize,
    transitions: AtomicUsize,
}

impl InMemoryReleaseLedger {
    /// Ledger seeded with a document.
    pub fn new(document: LedgerDocument) -> Self {
        Self {
            document: RwLock::new(document),
            ..Self::default()
        }
    }

    /// Add an allotment.
    pub fn with_allotment(self, allotment: AllotmentRef) -> Self {
        self.document.write().allotments.push(allotment);
        self
    }

    /// Add an assignment row.
    pub fn with_assignment(self, row: AssignmentRow) -> Self {
        self.document.write().assignments.push(row);
        self
    }

    /// Make `list_assigned` and `is_released` fail with `Unavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `mark_released` fail with `Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `mark_released` calls that reached storage.
    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    /// Number of rows flipped from unreleased to released.
    pub fn transitions(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    /// Flip a release flag the way another terminal would, bypassing
    /// failure switches and counters.
    pub fn release_externally(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<bool, LedgerError> {
        self.document
            .write()
            .mark_released(allotment, beneficiary, Utc::now())
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> LedgerDocument {
        self.document.read().clone()
    }

    fn check_reads(&self) -> Result<(), LedgerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("ledger reads disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReleaseLedger for InMemoryReleaseLedger {
    async fn list_assigned(&self, allotment: AllotmentId) -> Result<Vec<RosterEntry>, LedgerError> {
        self.check_reads()?;
        self.document.read().roster(allotment)
    }

    async fn is_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<bool, LedgerError> {
        self.check_reads()?;
        self.document.read().is_released(allotment, beneficiary)
    }

    async fn mark_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("ledger writes disabled".to_string()));
        }
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        let flipped = self
            .document
            .write()
            .mark_released(allotment, beneficiary, Utc::now())?;
        if flipped {
            self.transitions.fetch_add(1, Ordering::SeqCst);
        }
        debug!(%allotment, %beneficiary, flipped, "mark_released");
        Ok(())
    }
}

#[async_trait]
impl AllotmentDirectory for InMemoryReleaseLedger {
    async fn list_allotments(&self) -> Result<Vec<AllotmentRef>, LedgerError> {
        self.check_reads()?;
        Ok(self.document.read().allotments())
    }
}
