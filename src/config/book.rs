use super::types::{RateTable, TierList};
use serde::{Serialize, Deserialize};
use std::collections::HashSet;

/// Ordered collection of rate tables, looked up by name.
///
/// Lookup is by name, so names must be unique; duplicates registered through
/// [`TariffBook::add_table`] are suffixed rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffBook {
    tables: Vec<RateTable>,

    // Ephemeral state for uniqueness checks (Not serialized, rebuilt on load)
    #[serde(skip)]
    used_names: HashSet<String>,
}

impl TariffBook {
    pub fn new() -> Self { Self::default() }

    /// Builds a book from already-assembled tables, re-running the
    /// unique-name enforcement on each.
    pub fn from_tables(tables: impl IntoIterator<Item = RateTable>) -> Self {
        let mut book = Self::new();
        for table in tables {
            book.add_table(table.name, table.tiers);
        }
        book
    }

    /// Rebuilds the `used_names` set after deserialization.
    pub fn rebuild_name_cache(&mut self) {
        self.used_names = self.tables.iter().map(|t| t.name.clone()).collect();
    }

    /// Registers a table. If the name is already taken, a numeric suffix is
    /// appended (`name_1`, `name_2`, ...). Returns the name actually used.
    pub fn add_table(&mut self, name: impl Into<String>, tiers: TierList) -> String {
        let original = name.into();
        let mut candidate = original.clone();
        let mut counter = 1;

        while self.used_names.contains(&candidate) {
            candidate = format!("{}_{}", original, counter);
            counter += 1;
        }
        self.used_names.insert(candidate.clone());

        self.tables.push(RateTable { name: candidate.clone(), tiers });
        candidate
    }

    pub fn get(&self, name: &str) -> Option<&RateTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn tables(&self) -> &[RateTable] { &self.tables }

    pub fn len(&self) -> usize { self.tables.len() }
    pub fn is_empty(&self) -> bool { self.tables.is_empty() }
}
