// TUI roster browser: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` wrapping the `Board` controller. The loader
// task pushes one `UiUpdate` over an mpsc channel; the TUI applies it,
// handles keys synchronously, and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use crate::board::Board;
use crate::protocol::{UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the board plus cursor and popup state that only matters
/// for terminal interaction.
pub struct ViewState {
    pub board: Board,
    /// Title shown in the status bar.
    pub title: String,
    /// Short name of the roster source, for the status bar.
    pub source_name: String,
    /// True until the loader reports success or failure.
    pub loading: bool,
    /// Highlighted row in the sidebar list.
    pub list_cursor: usize,
    /// Whether the dropdown's option popup is open.
    pub dropdown_open: bool,
    /// Highlighted option in the open dropdown (0 is the placeholder).
    pub dropdown_cursor: usize,
}

impl ViewState {
    pub fn new(title: impl Into<String>, source_name: impl Into<String>) -> Self {
        ViewState {
            board: Board::new(),
            title: title.into(),
            source_name: source_name.into(),
            loading: true,
            list_cursor: 0,
            dropdown_open: false,
            dropdown_cursor: 0,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new("Draft Picks", "")
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::RosterLoaded(roster) => {
            state.board.show_roster(*roster);
            state.loading = false;
            state.list_cursor = 0;
        }
        UiUpdate::LoadFailed { file_name } => {
            state.board.show_load_failure(&file_name);
            state.loading = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen. Overlays (dropdown popup, alert) are drawn
/// last so they sit on top.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.board.regions());

    widgets::status_bar::render(frame, layout.status_bar, state);
    if let Some(area) = layout.sidebar {
        widgets::player_list::render(frame, area, state);
    }
    if let Some(area) = layout.dropdown {
        widgets::dropdown::render_bar(frame, area, state);
    }
    widgets::details::render(frame, layout.details, state);
    widgets::photo::render(frame, layout.photo, state);
    if let Some(area) = layout.link {
        widgets::profile_link::render(frame, area, state);
    }
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.dropdown_open {
        if let Some(anchor) = layout.dropdown {
            widgets::dropdown::render_popup(frame, anchor, frame.area(), state);
        }
    }
    if let Some(message) = state.board.alert() {
        widgets::alert::render(frame, frame.area(), message);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // The loader sends once and drops its sender; stop polling after that so
    // select! does not spin on a closed channel.
    let mut ui_open = true;

    let result = loop {
        tokio::select! {
            update = ui_rx.recv(), if ui_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => ui_open = false,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(UserCommand::Quit) = input::handle_key(key_event, &mut view_state) {
                            info!("Quit requested");
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws
                    }
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::test_support::buffer_contains;
    use super::*;
    use crate::roster::{Record, Roster};

    fn roster() -> Roster {
        Roster {
            headers: vec!["Player".into(), "Position".into()],
            records: vec![
                [("Player", "Will Howard"), ("Position", "QB")]
                    .into_iter()
                    .collect::<Record>(),
                [("Player", ""), ("Position", "")].into_iter().collect(),
            ],
        }
    }

    fn draw(state: &ViewState) -> ratatui::Terminal<ratatui::backend::TestBackend> {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        terminal
    }

    #[test]
    fn view_state_starts_loading() {
        let state = ViewState::new("Steelers", "Steeler Picks.csv");
        assert!(state.loading);
        assert_eq!(state.list_cursor, 0);
        assert!(!state.dropdown_open);
        assert!(state.board.list_entries().is_empty());
    }

    #[test]
    fn roster_loaded_populates_board() {
        let mut state = ViewState::default();
        state.list_cursor = 5;
        apply_ui_update(&mut state, UiUpdate::RosterLoaded(Box::new(roster())));
        assert!(!state.loading);
        assert_eq!(state.list_cursor, 0);
        assert_eq!(state.board.list_entries(), &["Will Howard (QB)", "Player 2"]);
        assert!(state.board.regions().photo);
    }

    #[test]
    fn load_failed_raises_alert() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::LoadFailed {
                file_name: "Steeler Picks.csv".into(),
            },
        );
        assert!(!state.loading);
        assert!(state.board.alert().unwrap().contains("Steeler Picks.csv"));
        assert!(state.board.list_entries().is_empty());
    }

    #[test]
    fn render_frame_before_load() {
        let state = ViewState::new("Steelers", "Steeler Picks.csv");
        let terminal = draw(&state);
        assert!(buffer_contains(terminal.backend().buffer(), "Loading"));
    }

    #[test]
    fn render_frame_shows_list_then_details() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::RosterLoaded(Box::new(roster())));
        let terminal = draw(&state);
        assert!(buffer_contains(terminal.backend().buffer(), "Will Howard (QB)"));
        assert!(buffer_contains(terminal.backend().buffer(), "Player 2"));

        state.board.select(0);
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "View ESPN profile"));
        assert!(buffer_contains(buffer, "Select a player..."));
    }

    #[test]
    fn render_frame_with_alert_and_popup() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::RosterLoaded(Box::new(roster())));
        state.board.select(1);
        state.dropdown_open = true;
        state.dropdown_cursor = 2;
        draw(&state);

        let mut failed = ViewState::default();
        apply_ui_update(
            &mut failed,
            UiUpdate::LoadFailed {
                file_name: "Steeler Picks.csv".into(),
            },
        );
        let terminal = draw(&failed);
        assert!(buffer_contains(terminal.backend().buffer(), "Failed to load"));
    }
}
