//! # Inbound Ports
//!
//! API trait defining what a release session can do.

use async_trait::async_trait;

use crate::application::SessionView;
use crate::domain::{
    AllotmentRef, ConfirmOutcome, InputEvent, InputOutcome, ReleaseError, ScanOutcome,
    SessionState,
};

/// Release session API - inbound port.
///
/// All calls are serialized by the caller; implementations hold no locks.
#[async_trait]
pub trait ReleaseSessionApi: Send {
    /// Load the roster for `allotment` and start accepting scans.
    async fn open_session(&mut self, allotment: AllotmentRef) -> Result<(), ReleaseError>;

    /// End the session from any state without committing anything.
    fn close_session(&mut self);

    /// Feed one raw input event from the UI.
    async fn handle_input(&mut self, event: InputEvent) -> InputOutcome;

    /// Match a completed code against the roster.
    fn submit_scan(&mut self, scanned: &str) -> ScanOutcome;

    /// Commit the pending release.
    async fn confirm(&mut self) -> Result<ConfirmOutcome, ReleaseError>;

    /// Drop the pending release. Returns false when nothing was pending.
    fn cancel(&mut self) -> bool;

    /// Full roster reload while a session is live.
    async fn refresh_roster(&mut self) -> Result<(), ReleaseError>;

    /// Current state.
    fn state(&self) -> SessionState;

    /// Everything the UI renders.
    fn view(&self) -> SessionView<'_>;
}
