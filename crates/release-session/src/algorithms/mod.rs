//! # Algorithms Module
//!
//! Pure building blocks used by the session controller.

pub mod roster;
pub mod scan_accumulator;

pub use roster::{Roster, RosterPage};
pub use scan_accumulator::ScanAccumulator;
