// Roster data: CSV records, alias-based field lookup, static name tables,
// and detail resolution for a single selected record.

pub mod detail;
pub mod loader;
pub mod lookup;
pub mod record;

pub use record::{Field, Record};

/// The loaded dataset: header row plus one record per data row, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}
