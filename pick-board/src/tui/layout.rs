// Screen layout: panel arrangement and sizing.
//
// Before the first selection:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +----------------+---------------------------------+
// | Sidebar (35%)  | Details / hint (fill)           |
// | player list    +---------------------------------+
// |                | Photo (4 rows)                  |
// +----------------+---------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// After it the sidebar is gone and the main column takes the full width,
// with the dropdown bar on top and the link row under the photo.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::board::Regions;

/// Height of the dropdown selector bar (borders + one line).
pub const DROPDOWN_HEIGHT: u16 = 3;
/// Height of the photo panel (borders + alt text + URL).
pub const PHOTO_HEIGHT: u16 = 4;
/// Height of the profile link panel.
pub const LINK_HEIGHT: u16 = 3;

/// Resolved screen areas. Hidden regions have no area.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Player list; `None` once the sidebar has collapsed.
    pub sidebar: Option<Rect>,
    /// Dropdown selector bar; `None` until the first selection.
    pub dropdown: Option<Rect>,
    pub details: Rect,
    pub photo: Rect,
    /// Profile link row; `None` when the record has no link.
    pub link: Option<Rect>,
    pub help_bar: Rect,
}

/// Build the layout for the current region visibility.
pub fn build_layout(area: Rect, regions: Regions) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    let show_sidebar = regions.sidebar && !regions.main_expanded;
    let (sidebar, main) = if show_sidebar {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(middle);
        (Some(horizontal[0]), horizontal[1])
    } else {
        (None, middle)
    };

    let mut constraints = Vec::with_capacity(4);
    if regions.dropdown {
        constraints.push(Constraint::Length(DROPDOWN_HEIGHT));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(PHOTO_HEIGHT));
    if regions.link {
        constraints.push(Constraint::Length(LINK_HEIGHT));
    }
    let main_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(main);

    let mut next = 0;
    let dropdown = if regions.dropdown {
        next += 1;
        Some(main_sections[0])
    } else {
        None
    };
    let details = main_sections[next];
    let photo = main_sections[next + 1];
    let link = regions.link.then(|| main_sections[next + 2]);

    AppLayout {
        status_bar,
        sidebar,
        dropdown,
        details,
        photo,
        link,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
