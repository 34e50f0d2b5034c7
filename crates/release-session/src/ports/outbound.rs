//! # Outbound Ports
//!
//! Traits for what the engine depends on: the release ledger, the allotment
//! directory, and the UI's input hook.

use async_trait::async_trait;

use crate::domain::{AllotmentId, AllotmentRef, BeneficiaryId, LedgerError, RosterEntry};

/// Persistent release ledger - outbound port.
///
/// Both operations are expected to be atomic at the storage layer. Other
/// terminals may write concurrently.
#[async_trait]
pub trait ReleaseLedger: Send + Sync {
    /// Endorsed beneficiaries assigned to an allotment, with shares and
    /// release flags. Order is not guaranteed.
    async fn list_assigned(&self, allotment: AllotmentId) -> Result<Vec<RosterEntry>, LedgerError>;

    /// Current release flag, read from storage.
    async fn is_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<bool, LedgerError>;

    /// Set the release flag. Setting it twice is not an error.
    async fn mark_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<(), LedgerError>;
}

/// Allotment listing - outbound port.
///
/// Feeds the project picker the operator opens a session from.
#[async_trait]
pub trait AllotmentDirectory: Send + Sync {
    /// All allotments, ordered by id.
    async fn list_allotments(&self) -> Result<Vec<AllotmentRef>, LedgerError>;
}

/// Window/terminal-level input hook - outbound port.
///
/// While installed, every keystroke is routed to the release session
/// before anything else sees it. Callers must pair each `install` with one
/// `uninstall`; [`CaptureGuard`] enforces that.
///
/// [`CaptureGuard`]: crate::application::CaptureGuard
pub trait InputCapture: Send + Sync {
    /// Start routing input to the session.
    fn install(&mut self);

    /// Stop routing input to the session.
    fn uninstall(&mut self);
}

// =============================================================================
// Test Double
// =============================================================================

/// Input capture that only counts install/uninstall calls.
#[derive(Clone, Debug, Default)]
pub struct CountingCapture {
    /// Number of `install` calls.
    pub installs: usize,
    /// Number of `uninstall` calls.
    pub uninstalls: usize,
}

impl CountingCapture {
    /// Whether installs and uninstalls are unbalanced.
    pub fn is_active(&self) -> bool {
        self.installs > self.uninstalls
    }
}

impl InputCapture for CountingCapture {
    fn install(&mut self) {
        self.installs += 1;
    }

    fn uninstall(&mut self) {
        self.uninstalls += 1;
    }
}
