//! Domain module - application state and key translation.

mod app;
mod keymap;

pub use app::{App, AppState, DeskController};
pub use keymap::{is_interrupt, to_input_event};
