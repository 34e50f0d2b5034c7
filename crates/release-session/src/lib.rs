//! # Release Session
//!
//! Scan/confirm engine for releasing allotment shares to beneficiaries.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! An operator picks an allotment and opens a release session. From then on
//! every keystroke is captured: a barcode scanner types a beneficiary code
//! and terminates it with Enter (or Tab). A matching, unreleased beneficiary
//! is held pending until the operator confirms with Enter or cancels with
//! Escape. Confirmation writes the release flag to the shared ledger exactly
//! once, even when another terminal released the same beneficiary first.
//!
//! ## Session States
//!
//! | State | Input | Exits |
//! |-------|-------|-------|
//! | `Closed` | not captured | `open_session` |
//! | `Open` | buffered into the scan accumulator | scan hit, `close_session` |
//! | `AwaitingConfirmation` | Enter / Escape only | confirm, cancel, `close_session` |
//!
//! ## Module Structure
//!
//! ```text
//! release-session/
//! ├── domain/          # Codes, roster entries, amounts, outcomes, errors
//! ├── algorithms/      # Scan accumulator, sorted/paged roster
//! ├── ports/           # ReleaseSessionApi (inbound), ledger + capture (outbound)
//! ├── application/     # ReleaseSessionController, notifications, capture guard
//! ├── adapters/        # In-memory and JSON file ledgers
//! └── config.rs        # ReleaseSessionConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    AssignmentRow, BeneficiaryStatus, InMemoryReleaseLedger, JsonFileLedger, LedgerDocument,
};
pub use algorithms::{Roster, RosterPage, ScanAccumulator};
pub use application::{CaptureGuard, NotificationChannel, ReleaseSessionController, SessionView};
pub use config::ReleaseSessionConfig;
pub use domain::{
    AllotmentId, AllotmentRef, Amount, BeneficiaryCode, BeneficiaryId, BudgetKind,
    ConfirmOutcome, InputEvent, InputOutcome, Key, LedgerError, Money, Notification,
    PendingRelease, Progress, ReleaseError, RosterEntry, ScanOutcome, SessionState, Severity,
    invariant_release_monotonic, invariant_share_matches_budget,
};
pub use ports::{
    AllotmentDirectory, CountingCapture, InputCapture, ReleaseLedger, ReleaseSessionApi,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
