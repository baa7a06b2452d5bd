// Presentation controller for the roster browser.
//
// `Board` owns the loaded roster, the list and dropdown entries, the current
// selection, and the visibility of every screen region. The TUI only reads
// it; all state transitions happen through its methods.

use tracing::{debug, info};

use crate::roster::detail::{entry_label, resolve_detail, Photo, PlayerDetail, PLACEHOLDER_OPTION};
use crate::roster::{Record, Roster};

/// One `<option>` of the dropdown selector. The placeholder has an empty
/// value; every other option's value is the record index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        SelectOption {
            value: String::new(),
            label: PLACEHOLDER_OPTION.to_string(),
        }
    }
}

/// Which screen regions are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub sidebar: bool,
    pub dropdown: bool,
    pub details: bool,
    pub photo: bool,
    pub link: bool,
    /// Main content takes the full width once the sidebar is gone.
    pub main_expanded: bool,
}

impl Default for Regions {
    fn default() -> Self {
        Regions {
            sidebar: true,
            dropdown: false,
            details: false,
            photo: false,
            link: false,
            main_expanded: false,
        }
    }
}

/// Message shown in the blocking alert when the roster cannot be loaded.
pub fn load_failure_message(file_name: &str) -> String {
    format!("Failed to load {file_name}. Ensure the file exists at the project root.")
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    roster: Roster,
    list: Vec<String>,
    dropdown: Vec<SelectOption>,
    /// Index into `dropdown` of the option the selector currently shows.
    dropdown_choice: usize,
    selected: Option<usize>,
    detail: Option<PlayerDetail>,
    photo: Option<Photo>,
    regions: Regions,
    alert: Option<String>,
}

impl Board {
    pub fn new() -> Self {
        Board {
            dropdown: vec![SelectOption::placeholder()],
            ..Default::default()
        }
    }

    // -- List/selector rendering --

    /// Replace the list and dropdown contents with one entry per record, in
    /// load order, then show the team logo in the photo region.
    pub fn show_roster(&mut self, roster: Roster) {
        self.list.clear();
        self.dropdown.clear();
        self.dropdown.push(SelectOption::placeholder());
        self.dropdown_choice = 0;

        for (idx, record) in roster.iter().enumerate() {
            let label = entry_label(record, idx);
            self.dropdown.push(SelectOption {
                value: idx.to_string(),
                label: label.clone(),
            });
            self.list.push(label);
        }
        self.roster = roster;

        self.photo = Some(Photo::team_logo());
        self.regions.photo = true;
        info!("Rendered {} roster entries", self.list.len());
    }

    /// Record a load failure. Nothing is rendered beyond the alert.
    pub fn show_load_failure(&mut self, file_name: &str) {
        self.alert = Some(load_failure_message(file_name));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // -- Detail presenter --

    /// Activate the record at `index` (list click). Out-of-range indices are
    /// ignored. Returns whether a record was selected.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(record) = self.roster.get(index) else {
            debug!("Ignoring selection of missing record {index}");
            return false;
        };
        let detail = resolve_detail(record);
        debug!("Selected record {index}: {}", detail.name);

        self.regions.details = true;
        self.regions.dropdown = true;
        if self.regions.sidebar {
            self.regions.sidebar = false;
            self.regions.main_expanded = true;
        }

        self.photo = Some(detail.photo.clone());
        self.regions.photo = true;
        self.regions.link = detail.profile.is_some();

        self.selected = Some(index);
        self.detail = Some(detail);
        true
    }

    /// Dropdown change event. A value that does not parse as a record index
    /// (the placeholder) is ignored.
    pub fn change_dropdown(&mut self, value: &str) -> bool {
        if let Some(pos) = self.dropdown.iter().position(|o| o.value == value) {
            self.dropdown_choice = pos;
        }
        match value.parse::<usize>() {
            Ok(index) => self.select(index),
            Err(_) => false,
        }
    }

    // -- Read access for rendering --

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn list_entries(&self) -> &[String] {
        &self.list
    }

    pub fn dropdown_options(&self) -> &[SelectOption] {
        &self.dropdown
    }

    pub fn dropdown_choice(&self) -> usize {
        self.dropdown_choice
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|idx| self.roster.get(idx))
    }

    pub fn detail(&self) -> Option<&PlayerDetail> {
        self.detail.as_ref()
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn regions(&self) -> Regions {
        self.regions
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
