// Static name-keyed tables for headshots and ESPN profile pages.
//
// Used only when a record carries no photo/profile column of its own.

/// Shown before any selection and for players with no photo source.
pub const DEFAULT_PHOTO_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/d/de/Pittsburgh_Steelers_logo.svg/2560px-Pittsburgh_Steelers_logo.svg.png";

pub const DEFAULT_PHOTO_ALT: &str = "Pittsburgh Steelers logo";

/// Headshot URLs keyed by exact player name.
pub const PHOTO_BY_NAME: &[(&str, &str)] = &[
    (
        "Derrick Harmon",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4682980.png&w=350&h=254",
    ),
    (
        "Kaleb Johnson",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4819231.png&w=350&h=254",
    ),
    (
        "Jack Sawyer",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4431590.png&w=350&h=254",
    ),
    (
        "Yahya Black",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4430947.png&w=350&h=254",
    ),
    (
        "Will Howard",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4429955.png&w=350&h=254",
    ),
    (
        "Carson Bruener",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4429490.png&w=350&h=254",
    ),
    (
        "Donte Kent",
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4608004.png&w=350&h=254",
    ),
];

/// ESPN player pages keyed by exact player name.
pub const PROFILE_BY_NAME: &[(&str, &str)] = &[
    (
        "Derrick Harmon",
        "https://www.espn.com/nfl/player/_/id/4682980/derrick-harmon",
    ),
    (
        "Kaleb Johnson",
        "https://www.espn.com/nfl/player/_/id/4819231/kaleb-johnson",
    ),
    (
        "Jack Sawyer",
        "https://www.espn.com/nfl/player/_/id/4431590/jack-sawyer",
    ),
    (
        "Yahya Black",
        "https://www.espn.com/nfl/player/_/id/4430947/yahya-black",
    ),
    (
        "Will Howard",
        "https://www.espn.com/nfl/player/_/id/4429955/will-howard",
    ),
    (
        "Carson Bruener",
        "https://www.espn.com/nfl/player/_/id/4429490/carson-bruener",
    ),
    (
        "Donte Kent",
        "https://www.espn.com/nfl/player/_/id/4608004/donte-kent",
    ),
];

fn find(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, url)| *url)
}

/// Headshot URL for an exact player name.
pub fn photo_for(name: &str) -> Option<&'static str> {
    find(PHOTO_BY_NAME, name)
}

/// ESPN profile URL for an exact player name.
pub fn profile_for(name: &str) -> Option<&'static str> {
    find(PROFILE_BY_NAME, name)
}
