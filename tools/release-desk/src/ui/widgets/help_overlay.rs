//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

fn bind(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(text),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "RELEASE DESK HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        heading("Project picker"),
        Line::raw(""),
        bind("  ↑/↓     ", "Select allotment"),
        bind("  Enter   ", "Open release session"),
        bind("  R       ", "Reload allotments"),
        bind("  Q       ", "Quit"),
        Line::raw(""),
        heading("Release session"),
        Line::raw(""),
        bind("  (scan)  ", "Scanner types the code and ends it with Enter or Tab"),
        bind("  Enter   ", "Release to the pending beneficiary"),
        bind("  Esc     ", "Cancel the pending release, or close the session"),
        bind("  PgUp/Dn ", "Page through the roster"),
        bind("  F5      ", "Reload the roster from the ledger"),
        bind("  F1      ", "Toggle this help"),
        bind("  Ctrl+C  ", "Quit from anywhere"),
        Line::raw(""),
        Line::from(Span::styled(
            "Letters typed during a session always go to the scan box.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}
