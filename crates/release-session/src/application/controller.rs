//! # Release Session Controller
//!
//! The scan/confirm state machine.
//!
//! ```text
//!            open_session                 scan matches unreleased entry
//! Closed ─────────────────→ Open ───────────────────────────────→ AwaitingConfirmation
//!   ↑                        │ ↑                                          │
//!   └──── close_session ─────┘ └──────── confirm (committed) / cancel ────┘
//! ```
//!
//! Closing is allowed from any state and never commits. A failed ledger
//! write keeps the controller in `AwaitingConfirmation` so the operator can
//! retry without scanning again.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::capture::CaptureGuard;
use super::notification::NotificationChannel;
use super::view::SessionView;
use crate::algorithms::{Roster, RosterPage, ScanAccumulator};
use crate::config::ReleaseSessionConfig;
use crate::domain::{
    invariant_release_monotonic, invariant_share_matches_budget, AllotmentId, AllotmentRef,
    ConfirmOutcome, InputEvent, InputOutcome, Key, LedgerError, PendingRelease, Progress,
    ReleaseError, RosterEntry, ScanOutcome, SessionState, Severity,
};
use crate::ports::{InputCapture, ReleaseLedger, ReleaseSessionApi};

/// Data that exists only while a session is open.
#[derive(Debug)]
struct ActiveSession {
    id: Uuid,
    allotment: AllotmentRef,
    roster: Roster,
}

/// Match result, computed before any state is mutated.
enum Lookup {
    Missing,
    Released(RosterEntry),
    Unreleased(RosterEntry),
}

/// Release session controller - implements [`ReleaseSessionApi`].
pub struct ReleaseSessionController<L: ReleaseLedger + ?Sized, C: InputCapture> {
    config: ReleaseSessionConfig,
    ledger: Arc<L>,
    capture: CaptureGuard<C>,
    notifications: NotificationChannel,
    state: SessionState,
    session: Option<ActiveSession>,
    accumulator: ScanAccumulator,
    scan_input: String,
    pending: Option<PendingRelease>,
}

impl<L: ReleaseLedger + ?Sized, C: InputCapture> ReleaseSessionController<L, C> {
    /// Create a controller in `Closed` state.
    pub fn new(config: ReleaseSessionConfig, ledger: Arc<L>, capture: C) -> Self {
        let notifications = NotificationChannel::new(config.notification_ttl());
        let accumulator = ScanAccumulator::new(config.tab_terminates);
        Self {
            config,
            ledger,
            capture: CaptureGuard::new(capture),
            notifications,
            state: SessionState::Closed,
            session: None,
            accumulator,
            scan_input: String::new(),
            pending: None,
        }
    }

    /// Handle to the toast channel, for rendering.
    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReleaseSessionConfig {
        &self.config
    }

    /// Roster of the open session.
    pub fn roster(&self) -> Option<&Roster> {
        self.session.as_ref().map(|s| &s.roster)
    }

    /// One page of the roster table, using the configured page size.
    pub fn roster_page(&self, page: usize) -> Option<RosterPage<'_>> {
        self.roster().map(|r| r.page(page, self.config.page_size))
    }

    /// Allotment of the open session.
    pub fn allotment(&self) -> Option<&AllotmentRef> {
        self.session.as_ref().map(|s| &s.allotment)
    }

    /// Entry awaiting confirmation.
    pub fn pending(&self) -> Option<&PendingRelease> {
        self.pending.as_ref()
    }

    /// Text shown in the scan box.
    pub fn scan_input(&self) -> &str {
        &self.scan_input
    }

    /// Whether no scan is being typed. The scan box may still show the
    /// last rejected code.
    pub fn is_buffer_empty(&self) -> bool {
        self.accumulator.is_empty()
    }

    /// Released / total for the open session.
    pub fn progress(&self) -> Progress {
        self.roster().map(Roster::progress).unwrap_or_default()
    }

    /// Whether the input hook is installed.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_installed()
    }

    /// The input hook.
    pub fn capture(&self) -> &C {
        self.capture.inner()
    }

    /// Fetch, validate and order the roster. `previous` is the roster this
    /// session last saw, used to keep released flags one-way.
    async fn load_roster(
        &self,
        allotment: &AllotmentRef,
        previous: &[RosterEntry],
    ) -> Result<Roster, ReleaseError> {
        let mut entries = self
            .ledger
            .list_assigned(allotment.id)
            .await
            .map_err(|source| ReleaseError::RosterLoad {
                allotment: allotment.id,
                source,
            })?;

        invariant_share_matches_budget(allotment, &entries)?;

        for id in invariant_release_monotonic(previous, &mut entries) {
            warn!(
                allotment_id = %allotment.id,
                beneficiary_id = %id,
                "Ledger reported a released beneficiary as unreleased; keeping it released"
            );
        }

        Ok(Roster::new(entries))
    }

    /// Leave confirmation and go back to scanning with a clean buffer.
    fn resume_scanning(&mut self) {
        self.pending = None;
        self.accumulator.reset();
        self.scan_input.clear();
        self.state = SessionState::Open;
    }

    fn lookup(&self, scanned: &str) -> Lookup {
        match self.roster().and_then(|r| r.find_by_code(scanned)) {
            None => Lookup::Missing,
            Some(entry) if entry.released => Lookup::Released(entry.clone()),
            Some(entry) => Lookup::Unreleased(entry.clone()),
        }
    }

    /// Write the release unless the ledger already has it.
    async fn record_release(
        &self,
        allotment: AllotmentId,
        pending: &PendingRelease,
    ) -> Result<ConfirmOutcome, LedgerError> {
        if self
            .ledger
            .is_released(allotment, pending.beneficiary_id)
            .await?
        {
            return Ok(ConfirmOutcome::AlreadyRecorded(pending.code.clone()));
        }
        self.ledger
            .mark_released(allotment, pending.beneficiary_id)
            .await?;
        Ok(ConfirmOutcome::Released(pending.code.clone()))
    }

    fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    fn handle_scanning_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Text(text) => {
                self.accumulator.on_text(&text);
                self.scan_input = self.accumulator.as_str().to_string();
                InputOutcome::Buffered
            }
            InputEvent::Key(Key::Backspace) if !self.scan_input.is_empty() => {
                if self.accumulator.pop().is_some() {
                    self.scan_input = self.accumulator.as_str().to_string();
                } else {
                    self.scan_input.clear();
                }
                InputOutcome::Buffered
            }
            InputEvent::Key(key) if self.accumulator.is_terminator(key) => {
                match self.accumulator.on_terminator(key) {
                    Some(code) => InputOutcome::Scanned(self.submit_scan(&code)),
                    None => {
                        self.scan_input.clear();
                        InputOutcome::Scanned(ScanOutcome::Empty)
                    }
                }
            }
            InputEvent::Key(_) => InputOutcome::PassThrough,
        }
    }

    async fn handle_confirmation_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Key(Key::Enter) => match self.confirm().await {
                Ok(outcome) => InputOutcome::Confirmed(outcome),
                Err(_) => InputOutcome::ConfirmFailed,
            },
            InputEvent::Key(Key::Escape) => {
                self.cancel();
                InputOutcome::Cancelled
            }
            _ => InputOutcome::Swallowed,
        }
    }
}

#[async_trait]
impl<L: ReleaseLedger + ?Sized, C: InputCapture> ReleaseSessionApi
    for ReleaseSessionController<L, C>
{
    async fn open_session(&mut self, allotment: AllotmentRef) -> Result<(), ReleaseError> {
        if self.state != SessionState::Closed {
            return Err(ReleaseError::InvalidState {
                operation: "open_session",
                state: self.state,
            });
        }

        let roster = match self.load_roster(&allotment, &[]).await {
            Ok(roster) => roster,
            Err(e) => {
                error!(allotment_id = %allotment.id, "Failed to open release session: {}", e);
                self.notifications.show(e.to_string(), Severity::Error);
                return Err(e);
            }
        };

        let id = Uuid::new_v4();
        info!(
            session_id = %id,
            allotment_id = %allotment.id,
            project = %allotment.project_name,
            roster_size = roster.len(),
            "Release session opened"
        );

        self.accumulator.reset();
        self.scan_input.clear();
        self.pending = None;
        self.notifications.clear();
        self.session = Some(ActiveSession {
            id,
            allotment,
            roster,
        });
        self.capture.acquire();
        self.state = SessionState::Open;
        Ok(())
    }

    fn close_session(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        if let Some(pending) = self.pending.take() {
            debug!(code = %pending.code, "Discarding pending release on close");
        }
        self.accumulator.reset();
        self.scan_input.clear();
        self.capture.release();

        if let Some(session) = self.session.take() {
            info!(
                session_id = %session.id,
                allotment_id = %session.allotment.id,
                "{}",
                session.roster.progress()
            );
        }
        self.state = SessionState::Closed;
    }

    async fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        match self.state {
            SessionState::Closed => InputOutcome::PassThrough,
            SessionState::Open => self.handle_scanning_input(event),
            SessionState::AwaitingConfirmation => self.handle_confirmation_input(event).await,
        }
    }

    fn submit_scan(&mut self, scanned: &str) -> ScanOutcome {
        if self.state != SessionState::Open {
            return ScanOutcome::Ignored;
        }
        self.accumulator.reset();

        let raw = scanned.trim();
        if raw.is_empty() {
            return ScanOutcome::Empty;
        }
        self.scan_input = raw.to_string();

        match self.lookup(raw) {
            Lookup::Missing => {
                warn!(session_id = ?self.session_id(), code = %raw, "Scan not found");
                let err = ReleaseError::ScanNotFound(raw.to_string());
                self.notifications.show(err.to_string(), Severity::Error);
                ScanOutcome::NotFound(raw.to_string())
            }
            Lookup::Released(entry) => {
                warn!(session_id = ?self.session_id(), code = %raw, "Scan of already released beneficiary");
                let err = ReleaseError::AlreadyReleased(raw.to_string());
                self.notifications.show(err.to_string(), Severity::Warning);
                ScanOutcome::AlreadyReleased(entry.code)
            }
            Lookup::Unreleased(entry) => {
                debug!(session_id = ?self.session_id(), code = %entry.code, "Scan matched; awaiting confirmation");
                self.pending = Some(PendingRelease::capture(&entry));
                self.accumulator.reset();
                self.state = SessionState::AwaitingConfirmation;
                self.notifications
                    .show(format!("Scan success: {raw}"), Severity::Success);
                ScanOutcome::Accepted(entry.code)
            }
        }
    }

    async fn confirm(&mut self) -> Result<ConfirmOutcome, ReleaseError> {
        let (pending, allotment) = match (&self.state, &self.pending, &self.session) {
            (SessionState::AwaitingConfirmation, Some(pending), Some(session)) => {
                (pending.clone(), session.allotment.clone())
            }
            _ => {
                return Err(ReleaseError::InvalidState {
                    operation: "confirm",
                    state: self.state,
                })
            }
        };

        let outcome = match self.record_release(allotment.id, &pending).await {
            Ok(outcome) => outcome,
            Err(source) => {
                let err = ReleaseError::LedgerWrite {
                    code: pending.code.to_string(),
                    source,
                };
                error!(
                    allotment_id = %allotment.id,
                    beneficiary_id = %pending.beneficiary_id,
                    "{}",
                    err
                );
                self.notifications.show(err.to_string(), Severity::Error);
                return Err(err);
            }
        };

        match &outcome {
            ConfirmOutcome::Released(code) => info!(
                session_id = ?self.session_id(),
                allotment_id = %allotment.id,
                code = %code,
                "Release recorded"
            ),
            ConfirmOutcome::AlreadyRecorded(code) => info!(
                session_id = ?self.session_id(),
                allotment_id = %allotment.id,
                code = %code,
                "Release already recorded by another terminal"
            ),
        }

        self.resume_scanning();

        let previous = self
            .roster()
            .map(|r| r.entries().to_vec())
            .unwrap_or_default();
        match self.load_roster(&allotment, &previous).await {
            Ok(roster) => {
                if let Some(session) = self.session.as_mut() {
                    session.roster = roster;
                }
                let message = match &outcome {
                    ConfirmOutcome::Released(code) => format!("Released to ID {code}"),
                    ConfirmOutcome::AlreadyRecorded(code) => {
                        format!("Already recorded as released: {code}")
                    }
                };
                self.notifications.show(message, Severity::Success);
            }
            Err(e) => {
                warn!(allotment_id = %allotment.id, "Roster reload after release failed: {}", e);
                if let Some(session) = self.session.as_mut() {
                    session.roster.mark_released(pending.beneficiary_id);
                }
                self.notifications.show(
                    format!("Released {}, but roster refresh failed", pending.code),
                    Severity::Warning,
                );
            }
        }

        Ok(outcome)
    }

    fn cancel(&mut self) -> bool {
        if self.state != SessionState::AwaitingConfirmation {
            return false;
        }
        if let Some(pending) = &self.pending {
            debug!(code = %pending.code, "Release cancelled");
        }
        self.resume_scanning();
        true
    }

    async fn refresh_roster(&mut self) -> Result<(), ReleaseError> {
        let Some(session) = self.session.as_ref() else {
            return Err(ReleaseError::InvalidState {
                operation: "refresh_roster",
                state: self.state,
            });
        };
        let allotment = session.allotment.clone();
        let previous = session.roster.entries().to_vec();

        match self.load_roster(&allotment, &previous).await {
            Ok(roster) => {
                if let Some(session) = self.session.as_mut() {
                    session.roster = roster;
                }
                Ok(())
            }
            Err(e) => {
                error!(allotment_id = %allotment.id, "Roster refresh failed: {}", e);
                self.notifications.show(e.to_string(), Severity::Error);
                Err(e)
            }
        }
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn view(&self) -> SessionView<'_> {
        SessionView {
            state: self.state,
            allotment: self.allotment(),
            scan_input: &self.scan_input,
            notification: self.notifications.current(),
            pending: self.pending.as_ref(),
            progress: self.progress(),
            roster: self.roster().map(Roster::entries).unwrap_or(&[]),
        }
    }
}

impl<L: ReleaseLedger + ?Sized, C: InputCapture> Drop for ReleaseSessionController<L, C> {
    fn drop(&mut self) {
        self.notifications.clear();
    }
}
