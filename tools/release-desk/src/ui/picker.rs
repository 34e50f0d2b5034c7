//! Project picker: allotment list + details of the highlighted one.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use release_session::{AllotmentRef, BudgetKind};

use crate::domain::App;

/// Render the picker.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Allotment list
            Constraint::Percentage(45), // Details
        ])
        .split(area);

    render_list(frame, chunks[0], app);
    render_details(frame, chunks[1], app.allotments.get(app.selected));
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .allotments
        .iter()
        .enumerate()
        .map(|(i, allotment)| {
            let kind_color = match allotment.budget_kind() {
                BudgetKind::Money => Color::Green,
                BudgetKind::InKind => Color::Magenta,
            };
            let line_style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<4}", allotment.id.0), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} ", allotment.project_name)),
                Span::styled(allotment.total_budget_text(), Style::default().fg(kind_color)),
            ]))
            .style(line_style)
        })
        .collect();

    let title = if items.is_empty() {
        " ALLOTMENTS (none) "
    } else {
        " ALLOTMENTS "
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

fn render_details(frame: &mut Frame, area: Rect, allotment: Option<&AllotmentRef>) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let text = match allotment {
        Some(a) => vec![
            Line::from(Span::styled(
                a.project_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(vec![label("Company:     "), Span::raw(a.company.clone())]),
            Line::from(vec![label("Department:  "), Span::raw(a.department.clone())]),
            Line::from(vec![label("Fund source: "), Span::raw(a.source_of_fund.clone())]),
            Line::from(vec![label("Budget:      "), Span::raw(a.total_budget_text())]),
            Line::raw(""),
            Line::from(Span::styled(
                "Press Enter to start releasing",
                Style::default().fg(Color::Yellow),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "No allotment selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" DETAILS ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}
