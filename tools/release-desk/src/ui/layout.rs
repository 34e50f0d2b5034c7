//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  RELEASE DESK v0.1.0   Project: ...   Budget: ...   Released x/y│
//! ├─────────────────────────────────────────────────────────────────┤
//! │  picker  or  scan box + roster table                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  [Enter] Open   [↑↓] Select   [R] Reload   [Q] Quit   [?] Help  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use release_session::ReleaseSessionApi;

use crate::domain::{App, AppState};

use super::{picker, release_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    let view_state = match app.state {
        AppState::Help => app_underlying_state(app),
        state => state,
    };

    render_header(frame, main_chunks[0], app);
    match view_state {
        AppState::Release => release_panel::render(frame, main_chunks[1], app),
        _ => picker::render(frame, main_chunks[1], app),
    }
    render_footer(frame, main_chunks[2], view_state);

    let view = app.controller.view();
    if view.is_confirming() {
        widgets::render_confirm_dialog(frame, &view);
    }
    if let Some(notification) = &view.notification {
        widgets::render_toast(frame, main_chunks[1], notification);
    }

    // Render help overlay if active
    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

/// While help is open, draw whichever screen is behind it.
fn app_underlying_state(app: &App) -> AppState {
    if app.controller.state().captures_input() {
        AppState::Release
    } else {
        AppState::Picker
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.controller.view();
    let mut spans = vec![
        Span::styled(
            " RELEASE DESK ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("v{} ", release_session::VERSION),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if view.allotment.is_some() {
        spans.push(Span::styled(
            format!(" {} ", view.project_text()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {} ", view.budget_text())));
        spans.push(Span::styled(
            format!(" {} ", view.progress_text()),
            Style::default().fg(Color::Green),
        ));
    } else if let Some(err) = &app.error_message {
        spans.push(Span::styled(
            format!(" ⚠ {} ", err),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(time) = app.last_refresh {
        spans.push(Span::styled(
            format!(" Loaded: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the footer with keyboard shortcuts for the current screen.
fn render_footer(frame: &mut Frame, area: Rect, state: AppState) {
    let binds: &[(&str, &str)] = match state {
        AppState::Release => &[
            ("[Scan]", " Enter/Tab ends code  "),
            ("[Enter]", " Confirm  "),
            ("[Esc]", " Cancel/Close  "),
            ("[PgUp/PgDn]", " Page  "),
            ("[F5]", " Refresh  "),
            ("[F1]", " Help  "),
        ],
        _ => &[
            ("[↑↓]", " Select  "),
            ("[Enter]", " Open  "),
            ("[R]", " Reload  "),
            ("[Q]", " Quit  "),
            ("[?]", " Help  "),
        ],
    };

    let keybinds: Vec<Span> = binds
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*label),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::TerminalCapture;
    use crate::demo::demo_document;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use release_session::{InMemoryReleaseLedger, ReleaseSessionConfig};
    use std::sync::Arc;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    async fn demo_app() -> App {
        let ledger = Arc::new(InMemoryReleaseLedger::new(demo_document()));
        let mut app = App::new(
            ReleaseSessionConfig::default(),
            ledger.clone(),
            ledger,
            TerminalCapture::new(),
        );
        app.reload_allotments().await;
        app
    }

    #[tokio::test]
    async fn test_picker_lists_projects() {
        let app = demo_app().await;
        let text = screen_text(&app);
        assert!(text.contains("RELEASE DESK"));
        assert!(text.contains("Rice Subsidy Program"));
    }

    #[tokio::test]
    async fn test_release_screen_shows_dialog() {
        let mut app = demo_app().await;
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).await;
        for c in "BENE-0001".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .await;
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).await;

        let text = screen_text(&app);
        assert!(text.contains("Released: 2/10"));
        assert!(text.contains("CONFIRM RELEASE"));
        assert!(text.contains("Maria Santos"));
    }
}
