//! # Domain Errors
//!
//! Error types for the release session engine.

use thiserror::Error;

use super::entities::{AllotmentId, BeneficiaryId};
use super::value_objects::SessionState;

/// Errors raised by ledger and directory adapters.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The allotment is unknown to the ledger.
    #[error("Allotment not found: {0}")]
    AllotmentNotFound(AllotmentId),

    /// No assignment row exists for this beneficiary on this allotment.
    #[error("Beneficiary {beneficiary} is not assigned to allotment {allotment}")]
    NotAssigned {
        /// Allotment looked up
        allotment: AllotmentId,
        /// Beneficiary looked up
        beneficiary: BeneficiaryId,
    },

    /// Storage backend could not be reached or failed mid-operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be decoded.
    #[error("Corrupt ledger data: {0}")]
    Corrupt(String),

    /// Filesystem error from a file-backed ledger.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Corrupt(err.to_string())
    }
}

/// Release session error types.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Scanned code matches no roster entry.
    #[error("Scan not found: {0}")]
    ScanNotFound(String),

    /// Scanned code matches an entry that was already released.
    #[error("Already released: {0}")]
    AlreadyReleased(String),

    /// Loading the roster from the ledger failed.
    #[error("Failed to load roster for allotment {allotment}: {source}")]
    RosterLoad {
        /// Allotment whose roster was requested
        allotment: AllotmentId,
        /// Underlying ledger failure
        #[source]
        source: LedgerError,
    },

    /// Persisting a release failed; the confirmation is still pending.
    #[error("Failed to record release for {code}: {source}")]
    LedgerWrite {
        /// Code of the pending beneficiary
        code: String,
        /// Underlying ledger failure
        #[source]
        source: LedgerError,
    },

    /// A roster row broke a data-model invariant.
    #[error("Roster invariant violated: {0}")]
    RosterInvariant(String),

    /// Operation not permitted in the current state.
    #[error("Operation '{operation}' not allowed in state {state:?}")]
    InvalidState {
        /// Operation attempted
        operation: &'static str,
        /// State the controller was in
        state: SessionState,
    },

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
