// Help bar widget: key hints for the current interaction mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(state: &ViewState) -> &'static str {
    if state.board.alert().is_some() {
        " Enter/Esc:Dismiss | Ctrl+C:Quit"
    } else if state.dropdown_open {
        " \u{2191}/\u{2193}:Choose | Enter:Select | Esc:Close"
    } else if state.board.regions().sidebar {
        " \u{2191}/\u{2193}:Move | Enter:Show player | q:Quit"
    } else {
        " d/Enter:Choose player | q:Quit"
    }
}
