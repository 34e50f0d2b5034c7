//! Application state management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use release_session::{
    AllotmentDirectory, AllotmentRef, InputOutcome, ReleaseLedger, ReleaseSessionApi,
    ReleaseSessionConfig, ReleaseSessionController, RosterPage, ScanOutcome, SessionState,
};
use tracing::{debug, info, warn};

use super::keymap::{is_interrupt, to_input_event};
use crate::capture::TerminalCapture;

/// Session controller as the desk uses it.
pub type DeskController = ReleaseSessionController<dyn ReleaseLedger, TerminalCapture>;

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Project picker.
    #[default]
    Picker,
    /// Release session screen.
    Release,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// View to go back to when help closes.
    help_return: AppState,
    /// Release session engine.
    pub controller: DeskController,
    /// Source of the picker list.
    directory: Arc<dyn AllotmentDirectory>,
    /// Allotments shown in the picker.
    pub allotments: Vec<AllotmentRef>,
    /// Highlighted picker row.
    pub selected: usize,
    /// Roster table page (1-based).
    pub page: usize,
    /// Error message to display (if any).
    pub error_message: Option<String>,
    /// Last time the allotment list was loaded.
    pub last_refresh: Option<DateTime<Utc>>,
}

impl App {
    /// Create a new application instance.
    pub fn new(
        config: ReleaseSessionConfig,
        ledger: Arc<dyn ReleaseLedger>,
        directory: Arc<dyn AllotmentDirectory>,
        capture: TerminalCapture,
    ) -> Self {
        Self {
            state: AppState::Picker,
            help_return: AppState::Picker,
            controller: ReleaseSessionController::new(config, ledger, capture),
            directory,
            allotments: Vec::new(),
            selected: 0,
            page: 1,
            error_message: None,
            last_refresh: None,
        }
    }

    /// Reload the picker list.
    pub async fn reload_allotments(&mut self) {
        match self.directory.list_allotments().await {
            Ok(list) => {
                debug!(count = list.len(), "Allotments loaded");
                self.allotments = list;
                self.selected = self.selected.min(self.allotments.len().saturating_sub(1));
                self.error_message = None;
                self.last_refresh = Some(Utc::now());
            }
            Err(e) => {
                warn!("Failed to list allotments: {}", e);
                self.error_message = Some(format!("Allotments: {}", e));
            }
        }
    }

    /// Handle keyboard input.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if is_interrupt(&key) {
            self.quit();
            return;
        }
        match self.state {
            AppState::Picker => self.handle_picker_key(key).await,
            AppState::Release => self.handle_release_key(key).await,
            AppState::Help => {
                // Any key closes help
                self.state = self.help_return;
            }
            AppState::Quit => {}
        }
    }

    async fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload_allotments().await,
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => self.open_selected().await,
            _ => {}
        }
    }

    async fn handle_release_key(&mut self, key: KeyEvent) {
        if !self.controller.capture().is_routing() {
            self.handle_session_shortcut(key).await;
            return;
        }
        match self.controller.handle_input(to_input_event(&key)).await {
            InputOutcome::PassThrough => self.handle_session_shortcut(key).await,
            InputOutcome::Scanned(ScanOutcome::Accepted(_)) => self.follow_pending(),
            _ => {}
        }
    }

    /// Keys the session did not consume.
    async fn handle_session_shortcut(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_session(),
            KeyCode::PageUp | KeyCode::Up => {
                self.page = self.current_page_number().saturating_sub(1).max(1)
            }
            KeyCode::PageDown | KeyCode::Down => self.page = self.current_page_number() + 1,
            KeyCode::F(5) => {
                if let Err(e) = self.controller.refresh_roster().await {
                    debug!("Manual refresh failed: {}", e);
                }
            }
            KeyCode::F(1) => self.open_help(),
            _ => {}
        }
        if let Some(page) = self.roster_page() {
            self.page = page.page;
        }
    }

    /// Open a release session for the highlighted allotment.
    pub async fn open_selected(&mut self) {
        let Some(allotment) = self.allotments.get(self.selected).cloned() else {
            return;
        };
        let project = allotment.project_name.clone();
        match self.controller.open_session(allotment).await {
            Ok(()) => {
                info!(project = %project, "Release screen opened");
                self.page = 1;
                self.error_message = None;
                self.state = AppState::Release;
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Close the session and return to the picker.
    pub fn close_session(&mut self) {
        self.controller.close_session();
        self.state = AppState::Picker;
    }

    /// Reload the roster while the operator is idle between scans, so
    /// releases from other desks show up.
    pub async fn refresh_if_idle(&mut self) {
        if self.state != AppState::Release || self.controller.state() != SessionState::Open {
            return;
        }
        if self.controller.is_buffer_empty() {
            if let Err(e) = self.controller.refresh_roster().await {
                debug!("Background refresh failed: {}", e);
            }
        }
    }

    /// Current roster page, clamped.
    pub fn roster_page(&self) -> Option<RosterPage<'_>> {
        self.controller.roster_page(self.page)
    }

    fn current_page_number(&self) -> usize {
        self.roster_page().map(|p| p.page).unwrap_or(1)
    }

    /// Jump to the page holding the entry awaiting confirmation.
    fn follow_pending(&mut self) {
        let page_size = self.controller.config().page_size.max(1);
        let position = self.controller.pending().and_then(|pending| {
            self.controller
                .roster()
                .and_then(|roster| roster.position(pending.beneficiary_id))
        });
        if let Some(position) = position {
            self.page = position / page_size + 1;
        }
    }

    fn open_help(&mut self) {
        self.help_return = self.state;
        self.state = AppState::Help;
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        if self.allotments.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.allotments.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.allotments.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.allotments.len();
    }

    /// Close any session and stop the main loop.
    pub fn quit(&mut self) {
        self.controller.close_session();
        self.state = AppState::Quit;
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}
