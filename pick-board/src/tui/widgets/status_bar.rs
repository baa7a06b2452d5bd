// Status bar widget: board title, load state, player count.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] | [load state or player count] | [source]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let spans = vec![
        Span::styled(
            format!(" {} ", state.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled(load_state_text(state), Style::default().fg(Color::White)),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Middle section of the status bar.
pub fn load_state_text(state: &ViewState) -> String {
    if state.loading {
        return format!("Loading {}...", state.source_name);
    }
    if state.board.alert().is_some() {
        return format!("{} unavailable", state.source_name);
    }
    let count = state.board.list_entries().len();
    let noun = if count == 1 { "player" } else { "players" };
    format!("{count} {noun} from {}", state.source_name)
}
