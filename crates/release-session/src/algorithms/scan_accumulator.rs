//! # Scan Accumulator
//!
//! Assembles keyboard-wedge scanner output into complete codes.
//!
//! A scanner types the barcode as a fast burst of characters and ends it
//! with Enter (some models send Tab). The accumulator only buffers; whether
//! input should reach it at all is decided by the controller.

use crate::domain::Key;

/// Character buffer that flushes on a terminator key.
#[derive(Clone, Debug, Default)]
pub struct ScanAccumulator {
    buffer: String,
    tab_terminates: bool,
}

impl ScanAccumulator {
    /// Create an accumulator. `tab_terminates` makes Tab flush like Enter.
    pub fn new(tab_terminates: bool) -> Self {
        Self {
            buffer: String::new(),
            tab_terminates,
        }
    }

    /// Append one character. Control characters are dropped.
    pub fn on_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.buffer.push(ch);
        }
    }

    /// Append a text composition verbatim (minus control characters).
    pub fn on_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.on_char(ch);
        }
    }

    /// Whether `key` completes a scan.
    pub fn is_terminator(&self, key: Key) -> bool {
        match key {
            Key::Enter => true,
            Key::Tab => self.tab_terminates,
            _ => false,
        }
    }

    /// Handle a key. On a terminator the buffer is cleared and the trimmed
    /// code returned, unless it was empty. Other keys leave the buffer as is.
    pub fn on_terminator(&mut self, key: Key) -> Option<String> {
        if !self.is_terminator(key) {
            return None;
        }
        let raw = std::mem::take(&mut self.buffer);
        let code = raw.trim();
        if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        }
    }

    /// Remove the last buffered character, for hand-typed corrections.
    pub fn pop(&mut self) -> Option<char> {
        self.buffer.pop()
    }

    /// Discard buffered characters.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Characters typed since the last flush or reset.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_enter_flushes_trimmed_code() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_text(" BENE-001 ");
        assert_eq!(acc.on_terminator(Key::Enter), Some("BENE-001".to_string()));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let mut acc = ScanAccumulator::new(true);
        assert_eq!(acc.on_terminator(Key::Enter), None);

        acc.on_text("   ");
        assert_eq!(acc.on_terminator(Key::Enter), None);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_tab_terminates_only_when_enabled() {
        let mut acc = ScanAccumulator::new(false);
        acc.on_text("ABC");
        assert_eq!(acc.on_terminator(Key::Tab), None);
        assert_eq!(acc.as_str(), "ABC");

        let mut acc = ScanAccumulator::new(true);
        acc.on_text("ABC");
        assert_eq!(acc.on_terminator(Key::Tab), Some("ABC".to_string()));
    }

    #[test]
    fn test_non_terminators_keep_buffer() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_text("12");
        assert_eq!(acc.on_terminator(Key::Escape), None);
        assert_eq!(acc.on_terminator(Key::Other), None);
        assert_eq!(acc.as_str(), "12");
    }

    #[test]
    fn test_punctuation_kept_verbatim() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_text("a/B-9.x#ñ");
        assert_eq!(acc.on_terminator(Key::Enter), Some("a/B-9.x#ñ".to_string()));
    }

    #[test]
    fn test_control_chars_dropped() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_text("AB\r\n\tC");
        assert_eq!(acc.as_str(), "ABC");
    }

    #[test]
    fn test_reset_clears() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_char('X');
        acc.reset();
        assert!(acc.is_empty());
        assert_eq!(acc.on_terminator(Key::Enter), None);
    }

    #[test]
    fn test_pop_removes_last_char() {
        let mut acc = ScanAccumulator::new(true);
        acc.on_text("BENE-0019");
        assert_eq!(acc.pop(), Some('9'));
        acc.on_char('8');
        assert_eq!(acc.on_terminator(Key::Enter), Some("BENE-0018".to_string()));
        assert_eq!(acc.pop(), None);
    }

    proptest! {
        #[test]
        fn prop_no_code_without_terminator(
            text in "[ -~]{0,40}",
            keys in proptest::collection::vec(
                prop_oneof![Just(Key::Escape), Just(Key::Backspace), Just(Key::Up), Just(Key::Other)],
                0..8,
            ),
        ) {
            let mut acc = ScanAccumulator::new(true);
            for ch in text.chars() {
                acc.on_char(ch);
                for key in &keys {
                    prop_assert_eq!(acc.on_terminator(*key), None);
                }
            }
            prop_assert_eq!(acc.as_str(), text.as_str());
        }

        #[test]
        fn prop_flush_returns_trimmed_buffer(text in "[!-~][ -~]{0,30}[!-~]") {
            let mut acc = ScanAccumulator::new(true);
            acc.on_text(&format!("  {text}  "));
            prop_assert_eq!(acc.on_terminator(Key::Enter), Some(text));
            prop_assert!(acc.is_empty());
        }
    }
}
