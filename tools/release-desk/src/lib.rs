//! Release Desk: terminal front-end for allotment releases.
//!
//! An operator picks an allotment, then scans beneficiary barcodes. Each
//! match opens a confirmation dialog; Enter records the release in the
//! shared ledger, Esc cancels.
//!
//! ## Architecture
//!
//! The desk is a thin shell around `release_session`: it translates
//! crossterm key presses into engine input events, owns the terminal input
//! hook the engine installs for a session, and renders the engine's
//! session view.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  RELEASE DESK   Project: Rice Subsidy   Budget: 250 kg   3/10   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  SCAN  > BENE-0004                          ✓ Scan success ...  │
//! │  BENEFICIARIES                                                  │
//! │  Code       Name              Barangay   Share     Status       │
//! │  BENE-0010  Danilo Aquino     San Isidro 25 kg     Pending      │
//! │  ...                                                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Found 10 records  Page 1/2          ███████░░░ Released: 3/10  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod capture;
pub mod config;
pub mod demo;
pub mod domain;
pub mod ui;

pub use capture::TerminalCapture;
pub use config::{load_config, DeskConfig};
pub use domain::{App, AppState, DeskController};
