//! # Notification Channel
//!
//! One toast at a time, auto-cleared after a fixed lifetime.
//!
//! Every `show` replaces the expiry token of the previous toast, so an old
//! timer that wakes late finds its token cancelled and leaves the newer
//! toast alone. The token check and the clear happen under the same lock
//! that `show` takes to swap tokens.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{Notification, Severity};

#[derive(Debug, Default)]
struct ChannelState {
    current: Option<Notification>,
    expiry: Option<CancellationToken>,
    issued: u64,
    auto_clears: u64,
}

/// Shared handle to the live notification. Clones observe the same toast.
#[derive(Clone, Debug)]
pub struct NotificationChannel {
    inner: Arc<Mutex<ChannelState>>,
    ttl: Duration,
}

impl NotificationChannel {
    /// Create a channel whose toasts live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelState::default())),
            ttl,
        }
    }

    /// Show a toast, superseding the current one and its timer.
    ///
    /// Returns the expiry token id of the new toast.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let token = CancellationToken::new();
        let message = message.into();

        let id = {
            let mut state = self.inner.lock();
            if let Some(previous) = state.expiry.replace(token.clone()) {
                previous.cancel();
            }
            state.issued += 1;
            let id = state.issued;
            state.current = Some(Notification {
                message,
                severity,
                expiry_token: id,
            });
            id
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(expire_after(Arc::clone(&self.inner), token, self.ttl, id));
            }
            Err(_) => warn!(token = id, "No async runtime; notification will not auto-clear"),
        }

        id
    }

    /// Hide the current toast now and cancel its timer.
    pub fn clear(&self) {
        let mut state = self.inner.lock();
        if let Some(token) = state.expiry.take() {
            token.cancel();
        }
        state.current = None;
    }

    /// Live toast, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner.lock().current.clone()
    }

    /// Whether a toast is visible.
    pub fn is_visible(&self) -> bool {
        self.inner.lock().current.is_some()
    }

    /// How many toasts were cleared by their timer.
    pub fn auto_clear_count(&self) -> u64 {
        self.inner.lock().auto_clears
    }
}

async fn expire_after(
    inner: Arc<Mutex<ChannelState>>,
    token: CancellationToken,
    ttl: Duration,
    id: u64,
) {
    tokio::select! {
        _ = token.cancelled() => {
            debug!(token = id, "Notification expiry superseded");
        }
        _ = tokio::time::sleep(ttl) => {
            let mut state = inner.lock();
            if token.is_cancelled() {
                return;
            }
            state.current = None;
            state.expiry = None;
            state.auto_clears += 1;
            debug!(token = id, "Notification expired");
        }
    }
}
