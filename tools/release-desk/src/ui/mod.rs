//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Main layout orchestration
//! - `picker.rs`: Allotment list + project details
//! - `release_panel.rs`: Scan box, roster table, progress
//! - `widgets/`: Toast, confirmation dialog, help overlay

mod layout;
mod picker;
mod release_panel;

pub mod widgets;

pub use layout::render;
