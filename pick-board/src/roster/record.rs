// A single CSV row and the logical fields read from it.
//
// Source files disagree on column names ("Player" vs "Name", "Round" vs
// "Rnd", ...). Each logical `Field` carries an ordered alias list and a
// lookup mode; `first_match` is the only place that walks aliases.

/// One parsed CSV row: column name -> cell value, in header order.
///
/// A column missing from a short row is absent; a present but blank cell is
/// stored as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. If the column already exists the earlier value wins
    /// on lookup.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Raw cell value for an exact (case-sensitive) column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resolve a logical field through its alias list.
    pub fn field(&self, field: Field) -> Option<&str> {
        first_match(self, field.aliases(), field.lookup())
    }

    /// Resolve a logical field, defaulting to `""`.
    pub fn field_or_empty(&self, field: Field) -> &str {
        self.field(field).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// How an alias list decides that a column "has" a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The first column that exists wins, even if its cell is blank.
    Present,
    /// Blank cells are skipped and the search continues.
    NonEmpty,
}

/// Logical display fields and the column aliases that feed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Round,
    Pick,
    Position,
    College,
    Notes,
    Photo,
    Profile,
}

impl Field {
    /// Column names checked for this field, in priority order.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["Player", "Name"],
            Field::Round => &["Round", "Rnd"],
            Field::Pick => &["Ovr_Pick_No", "Pick"],
            Field::Position => &["Position", "Pos"],
            Field::College => &["College"],
            Field::Notes => &["Notes"],
            Field::Photo => &["Photo", "ImageURL", "Picture", "Image"],
            Field::Profile => &["ProfileURL", "Profile"],
        }
    }

    pub fn lookup(self) -> Lookup {
        match self {
            Field::Name | Field::Photo | Field::Profile => Lookup::NonEmpty,
            Field::Round | Field::Pick | Field::Position | Field::College | Field::Notes => {
                Lookup::Present
            }
        }
    }
}

/// Return the value of the first alias that satisfies `mode`.
pub fn first_match<'a>(record: &'a Record, aliases: &[&str], mode: Lookup) -> Option<&'a str> {
    for alias in aliases {
        match (record.get(alias), mode) {
            (Some(value), Lookup::Present) => return Some(value),
            (Some(value), Lookup::NonEmpty) if !value.is_empty() => return Some(value),
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
