//! Toast notification, pinned to the top-right of the body.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use release_session::{Notification, Severity};

fn severity_style(severity: Severity) -> (Color, &'static str) {
    match severity {
        Severity::Info => (Color::Cyan, "ℹ"),
        Severity::Success => (Color::Green, "✓"),
        Severity::Warning => (Color::Yellow, "⚠"),
        Severity::Error => (Color::Red, "✗"),
    }
}

/// Render the live toast inside `area`.
pub fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    let (color, icon) = severity_style(notification.severity);
    let width = (notification.message.chars().count() as u16 + 6)
        .min(area.width)
        .max(12.min(area.width));
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, toast_area);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::styled(
            notification.message.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(paragraph, toast_area);
}
