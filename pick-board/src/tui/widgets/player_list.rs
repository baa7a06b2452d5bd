// Sidebar player list: one row per roster record, in load order.
//
// Visible until the first selection. The highlighted row follows
// `ViewState::list_cursor`; Enter activates it.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the player list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let entries = state.board.list_entries();
    let block = Block::default().borders(Borders::ALL).title("Players");

    if entries.is_empty() {
        let text = if state.loading {
            "  Loading..."
        } else {
            "  No players loaded."
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|label| ListItem::new(label.as_str()))
        .collect();

    let list = List::new(items)
        .block(block.title(format!("Players ({})", entries.len())))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let cursor = state.list_cursor.min(entries.len() - 1);
    let mut list_state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
