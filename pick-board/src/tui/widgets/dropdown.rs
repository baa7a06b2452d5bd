// Dropdown selector: a one-line bar showing the current option and, when
// open, a popup listing the placeholder plus one option per record.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Most options shown at once in the popup.
const MAX_POPUP_ROWS: u16 = 12;

/// Render the closed selector bar.
pub fn render_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let options = state.board.dropdown_options();
    let label = options
        .get(state.board.dropdown_choice())
        .map(|o| o.label.as_str())
        .unwrap_or_default();

    let border_color = if state.dropdown_open {
        Color::Yellow
    } else {
        Color::Gray
    };
    let paragraph = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
        Span::styled("  \u{25be}", Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title("Player"),
    );
    frame.render_widget(paragraph, area);
}

/// Render the open option list just below `anchor`, clipped to `screen`.
pub fn render_popup(frame: &mut Frame, anchor: Rect, screen: Rect, state: &ViewState) {
    let area = popup_area(anchor, screen, state.board.dropdown_options().len());
    if area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = state
        .board
        .dropdown_options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == 0 {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(option.label.clone(), style))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default().with_selected(Some(state.dropdown_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Popup rectangle: same x and width as the bar, starting on the row below
/// it, tall enough for `option_count` rows (plus borders) up to the limit.
pub fn popup_area(anchor: Rect, screen: Rect, option_count: usize) -> Rect {
    let top = anchor.y.saturating_add(anchor.height).min(screen.bottom());
    let wanted = u16::try_from(option_count)
        .unwrap_or(u16::MAX)
        .min(MAX_POPUP_ROWS)
        .saturating_add(2);
    let height = wanted.min(screen.bottom().saturating_sub(top));
    Rect::new(anchor.x, top, anchor.width, height)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
