//! # Input Capture Guard
//!
//! Owns the UI's input hook for the lifetime of a session.

use tracing::debug;

use crate::ports::InputCapture;

/// Installs the hook at most once and always removes it, on release or on
/// drop.
#[derive(Debug)]
pub struct CaptureGuard<C: InputCapture> {
    capture: C,
    installed: bool,
}

impl<C: InputCapture> CaptureGuard<C> {
    /// Wrap a hook; nothing is installed yet.
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            installed: false,
        }
    }

    /// Install the hook. Returns false if it was already installed.
    pub fn acquire(&mut self) -> bool {
        if self.installed {
            return false;
        }
        self.capture.install();
        self.installed = true;
        debug!("Input capture installed");
        true
    }

    /// Remove the hook. Returns false if it was not installed.
    pub fn release(&mut self) -> bool {
        if !self.installed {
            return false;
        }
        self.capture.uninstall();
        self.installed = false;
        debug!("Input capture removed");
        true
    }

    /// Whether the hook is currently installed.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// The wrapped hook.
    pub fn inner(&self) -> &C {
        &self.capture
    }
}

impl<C: InputCapture> Drop for CaptureGuard<C> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CountingCapture;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_acquire_is_idempotent() {
        let mut guard = CaptureGuard::new(CountingCapture::default());
        assert!(guard.acquire());
        assert!(!guard.acquire());
        assert_eq!(guard.inner().installs, 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut guard = CaptureGuard::new(CountingCapture::default());
        assert!(!guard.release());
        guard.acquire();
        assert!(guard.release());
        assert!(!guard.release());
        assert_eq!(guard.inner().uninstalls, 1);
    }

    struct SharedCounter(Arc<AtomicUsize>);

    impl InputCapture for SharedCounter {
        fn install(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn uninstall(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_drop_uninstalls() {
        let active = Arc::new(AtomicUsize::new(0));
        {
            let mut guard = CaptureGuard::new(SharedCounter(Arc::clone(&active)));
            guard.acquire();
            assert_eq!(active.load(Ordering::SeqCst), 1);
        }
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }
}
