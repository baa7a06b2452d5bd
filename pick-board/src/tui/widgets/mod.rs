// TUI widget modules for each screen region.

pub mod alert;
pub mod details;
pub mod dropdown;
pub mod help_bar;
pub mod photo;
pub mod player_list;
pub mod profile_link;
pub mod status_bar;
