// Detail panel: name, round, pick, position, college, notes for the
// selected record. Shows a hint until the first selection.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::roster::detail::PlayerDetail;
use crate::tui::ViewState;

/// Render the detail panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Details");

    let detail = match state.board.detail() {
        Some(detail) if state.board.regions().details => detail,
        _ => {
            let hint = if state.board.list_entries().is_empty() {
                ""
            } else {
                "  Pick a player from the list and press Enter."
            };
            let paragraph = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            detail.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for (label, value) in detail_rows(detail) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::Gray)),
            Span::styled(value.to_string(), Style::default().fg(Color::White)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Labelled rows under the name heading.
pub fn detail_rows(detail: &PlayerDetail) -> [(&'static str, &str); 5] {
    [
        ("Round", detail.round.as_str()),
        ("Pick", detail.pick.as_str()),
        ("Position", detail.position.as_str()),
        ("College", detail.college.as_str()),
        ("Notes", detail.notes.as_str()),
    ]
}
