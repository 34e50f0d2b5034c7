//! Terminal input hook for release sessions.
//!
//! While installed, the app routes every key press to the session
//! controller instead of its own shortcuts. On terminals that support the
//! kitty keyboard protocol the hook also asks for disambiguated escape
//! codes, so a scanner's Tab or Enter never arrives as a Ctrl chord.

use std::io;

use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::execute;
use release_session::InputCapture;
use tracing::{debug, warn};

/// Input hook owned by the session controller.
#[derive(Debug, Default)]
pub struct TerminalCapture {
    routing: bool,
    enhance_keyboard: bool,
    enhanced: bool,
}

impl TerminalCapture {
    /// Hook that only flips routing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook that also pushes keyboard enhancement flags while installed.
    pub fn with_keyboard_enhancement(enhance: bool) -> Self {
        Self {
            enhance_keyboard: enhance,
            ..Self::default()
        }
    }

    /// Whether key presses belong to the session.
    pub fn is_routing(&self) -> bool {
        self.routing
    }
}

impl InputCapture for TerminalCapture {
    fn install(&mut self) {
        self.routing = true;
        if self.enhance_keyboard {
            match execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            ) {
                Ok(()) => self.enhanced = true,
                Err(e) => warn!("Could not enable keyboard enhancement: {}", e),
            }
        }
        debug!(enhanced = self.enhanced, "Terminal capture installed");
    }

    fn uninstall(&mut self) {
        self.routing = false;
        if self.enhanced {
            if let Err(e) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                warn!("Could not restore keyboard mode: {}", e);
            }
            self.enhanced = false;
        }
        debug!("Terminal capture removed");
    }
}
