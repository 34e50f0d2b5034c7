//! # Session View
//!
//! Read-only snapshot of everything the release screen renders.

use crate::domain::{
    AllotmentRef, BeneficiaryId, Notification, PendingRelease, Progress, RosterEntry,
    SessionState,
};

/// What the UI needs to draw the release session.
#[derive(Clone, Debug)]
pub struct SessionView<'a> {
    /// Current state.
    pub state: SessionState,
    /// Allotment of the open session.
    pub allotment: Option<&'a AllotmentRef>,
    /// Characters typed so far, or the last completed scan.
    pub scan_input: &'a str,
    /// Live toast.
    pub notification: Option<Notification>,
    /// Confirmation dialog contents.
    pub pending: Option<&'a PendingRelease>,
    /// Released / total.
    pub progress: Progress,
    /// Roster in display order; empty when closed.
    pub roster: &'a [RosterEntry],
}

impl SessionView<'_> {
    /// "Project: {name}", empty when closed.
    pub fn project_text(&self) -> String {
        self.allotment
            .map(|a| format!("Project: {}", a.project_name))
            .unwrap_or_default()
    }

    /// "Budget: {total}", empty when closed.
    pub fn budget_text(&self) -> String {
        self.allotment
            .map(|a| format!("Budget: {}", a.total_budget_text()))
            .unwrap_or_default()
    }

    /// "Released: x/y".
    pub fn progress_text(&self) -> String {
        self.progress.to_string()
    }

    /// Row to highlight: the entry awaiting confirmation.
    pub fn highlighted(&self) -> Option<BeneficiaryId> {
        self.pending.map(|p| p.beneficiary_id)
    }

    /// Whether the confirmation dialog should be shown.
    pub fn is_confirming(&self) -> bool {
        self.state == SessionState::AwaitingConfirmation
    }
}
