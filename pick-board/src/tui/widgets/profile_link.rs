// Profile link row: "View ESPN profile" or "View profile" with the URL.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if !state.board.regions().link {
        return;
    }
    let Some(link) = state.board.detail().and_then(|d| d.profile.as_ref()) else {
        return;
    };

    let line = Line::from(vec![
        Span::styled(
            link.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": "),
        Span::styled(
            link.url.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Links"));
    frame.render_widget(paragraph, area);
}
