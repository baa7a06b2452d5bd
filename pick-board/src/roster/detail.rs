// Display values for the list, the dropdown, and the detail panel.

use super::lookup::{self, DEFAULT_PHOTO_ALT, DEFAULT_PHOTO_URL};
use super::{Field, Record};

/// First dropdown option, shown before the user picks anyone.
pub const PLACEHOLDER_OPTION: &str = "Select a player...";

pub const ESPN_PROFILE_LABEL: &str = "View ESPN profile";
pub const DIRECT_PROFILE_LABEL: &str = "View profile";

/// Image reference for the photo region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub url: String,
    pub alt: String,
}

impl Photo {
    /// The team logo shown before any selection.
    pub fn team_logo() -> Self {
        Photo {
            url: DEFAULT_PHOTO_URL.to_string(),
            alt: DEFAULT_PHOTO_ALT.to_string(),
        }
    }
}

/// Where a profile link came from; decides its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    /// Static ESPN table keyed by player name.
    Espn,
    /// A ProfileURL/Profile column on the record.
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub url: String,
    pub origin: ProfileOrigin,
}

impl ProfileLink {
    pub fn label(&self) -> &'static str {
        match self.origin {
            ProfileOrigin::Espn => ESPN_PROFILE_LABEL,
            ProfileOrigin::Column => DIRECT_PROFILE_LABEL,
        }
    }
}

/// Everything the detail presenter writes for one selected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDetail {
    pub name: String,
    pub round: String,
    pub pick: String,
    pub position: String,
    pub college: String,
    pub notes: String,
    pub photo: Photo,
    /// `None` hides the link region.
    pub profile: Option<ProfileLink>,
}

/// List/dropdown label for the record at 0-based `index`.
///
/// "Name (Position)" when a position is present, "Name" otherwise; records
/// without a name become "Player N" with N counted from 1.
pub fn entry_label(record: &Record, index: usize) -> String {
    let name = match record.field(Field::Name) {
        Some(name) => name.to_string(),
        None => format!("Player {}", index + 1),
    };
    let position = record.field_or_empty(Field::Position);
    if position.is_empty() {
        name
    } else {
        format!("{name} ({position})")
    }
}

/// Photo precedence: a URL column on the record, then the static headshot
/// table, then the team logo.
pub fn resolve_photo(record: &Record) -> Photo {
    let name = record.field(Field::Name);
    let url = record
        .field(Field::Photo)
        .or_else(|| name.and_then(lookup::photo_for))
        .unwrap_or(DEFAULT_PHOTO_URL);
    Photo {
        url: url.to_string(),
        alt: format!("{} photo", name.unwrap_or("Player")),
    }
}

/// Profile precedence: the static ESPN table (even if the record has its
/// own URL), then a ProfileURL/Profile column.
pub fn resolve_profile(record: &Record) -> Option<ProfileLink> {
    if let Some(url) = record.field(Field::Name).and_then(lookup::profile_for) {
        return Some(ProfileLink {
            url: url.to_string(),
            origin: ProfileOrigin::Espn,
        });
    }
    record.field(Field::Profile).map(|url| ProfileLink {
        url: url.to_string(),
        origin: ProfileOrigin::Column,
    })
}

/// Resolve all display values for one record. Never fails; missing columns
/// become empty strings.
pub fn resolve_detail(record: &Record) -> PlayerDetail {
    PlayerDetail {
        name: record.field(Field::Name).unwrap_or("Unknown").to_string(),
        round: record.field_or_empty(Field::Round).to_string(),
        pick: record.field_or_empty(Field::Pick).to_string(),
        position: record.field_or_empty(Field::Position).to_string(),
        college: record.field_or_empty(Field::College).to_string(),
        notes: record.field_or_empty(Field::Notes).to_string(),
        photo: resolve_photo(record),
        profile: resolve_profile(record),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
