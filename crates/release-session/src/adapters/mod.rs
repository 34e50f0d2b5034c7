//! # Adapters
//!
//! Ledger implementations: an in-memory ledger for demos and tests, and a
//! JSON file ledger that several terminals can share.

pub mod document;
pub mod in_memory;
pub mod json_file;

pub use document::{AssignmentRow, BeneficiaryStatus, LedgerDocument};
pub use in_memory::InMemoryReleaseLedger;
pub use json_file::JsonFileLedger;
