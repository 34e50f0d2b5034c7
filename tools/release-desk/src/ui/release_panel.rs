//! Release screen.
//!
//! ```text
//! ┌ SCAN ─────────────────────────────────────────────┐
//! │ > BENE-00_                                        │
//! ├ BENEFICIARIES ────────────────────────────────────┤
//! │ Code       Name            Barangay   Share  ...  │
//! ├───────────────────────────────────────────────────┤
//! │ Found 10 records   Page 1/2   ██████░░░░ 3/10     │
//! └───────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use release_session::{ReleaseSessionApi, SessionState};

use crate::domain::App;

/// Render the release screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scan box
            Constraint::Min(6),    // Roster table
            Constraint::Length(3), // Paging + progress
        ])
        .split(area);

    render_scan_box(frame, chunks[0], app);
    render_roster(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
}

fn render_scan_box(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.controller.view();
    let (hint, color) = match view.state {
        SessionState::AwaitingConfirmation => ("confirm or cancel the pending release", Color::Yellow),
        _ => ("scan a beneficiary code", Color::Green),
    };

    let mut spans = vec![Span::styled("> ", Style::default().fg(color))];
    if view.scan_input.is_empty() {
        spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            view.scan_input.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" SCAN ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(paragraph, area);
}

fn render_roster(frame: &mut Frame, area: Rect, app: &App) {
    let highlighted = app.controller.view().highlighted();
    let rows: Vec<Row> = app
        .roster_page()
        .map(|page| page.entries)
        .unwrap_or(&[])
        .iter()
        .map(|entry| {
            let (status, status_color) = if entry.released {
                ("✓ Released", Color::Green)
            } else {
                ("Pending", Color::DarkGray)
            };
            let style = if Some(entry.beneficiary_id) == highlighted {
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(entry.code.to_string()),
                Cell::from(entry.display_name()),
                Cell::from(entry.barangay.clone()),
                Cell::from(entry.classification.clone()),
                Cell::from(entry.share_text()),
                Cell::from(Span::styled(status, Style::default().fg(status_color))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(11),
    ];

    let header = Row::new(vec!["Code", "Name", "Barangay", "Classification", "Share", "Status"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" BENEFICIARIES ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let paging = app
        .roster_page()
        .map(|page| format!(" {}   Page {}/{}", page.found_text(), page.page, page.total_pages))
        .unwrap_or_default();
    let paragraph = Paragraph::new(paging).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, chunks[0]);

    let progress = app.controller.progress();
    let ratio = if progress.total == 0 {
        0.0
    } else {
        progress.released as f64 / progress.total as f64
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(progress.to_string());
    frame.render_widget(gauge, chunks[1]);
}
