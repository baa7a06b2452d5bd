// Photo panel: the terminal cannot draw the image, so it shows the alt text
// and the image URL.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let photo = match state.board.photo() {
        Some(photo) if state.board.regions().photo => photo,
        _ => return,
    };

    let lines = vec![
        Line::styled(photo.alt.clone(), Style::default().fg(Color::White)),
        Line::styled(
            photo.url.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Photo"));
    frame.render_widget(paragraph, area);
}
