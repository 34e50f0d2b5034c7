//! Confirmation dialog shown while a release is pending.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use release_session::SessionView;

use super::centered_rect;

/// Render the pending release as a centered dialog.
pub fn render_confirm_dialog(frame: &mut Frame, view: &SessionView<'_>) {
    let Some(pending) = view.pending else {
        return;
    };
    let popup_area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, popup_area);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let text = vec![
        Line::from(Span::styled(
            pending.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![label("Code:           "), Span::raw(pending.code.to_string())]),
        Line::from(vec![label("Barangay:       "), Span::raw(pending.barangay.clone())]),
        Line::from(vec![label("Classification: "), Span::raw(pending.classification.clone())]),
        Line::from(vec![
            label("Share:          "),
            Span::styled(pending.share_text.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Release   "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text).centered().block(
        Block::default()
            .title(" CONFIRM RELEASE ")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, popup_area);
}
