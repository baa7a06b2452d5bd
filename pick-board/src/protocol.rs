// Messages exchanged between the loader task and the TUI.

use crate::roster::Roster;

/// Updates pushed from the loader task to the TUI render loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The CSV loaded and parsed; the list and dropdown can be built.
    RosterLoaded(Box<Roster>),
    /// The CSV could not be fetched or parsed. `file_name` is the short name
    /// shown in the alert.
    LoadFailed { file_name: String },
}

/// Requests produced by key handling that the TUI loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}
