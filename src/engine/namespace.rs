use crate::config::DatasetEntry;
use std::collections::HashMap;

/// Key under which the raw consumption quantity is published.
pub const CONSUMPTION: &str = "Consumption";

/// Namespace key for a dataset entry.
pub fn dataset_key(entry: &DatasetEntry) -> String {
    format!("{}_{}", entry.group, entry.name)
}

/// The flat set of named numeric values available to formulas at one point
/// in a pipeline run.
///
/// Built fresh for every run and grown only by [`Namespace::bind`] as charge
/// results land, so a formula can only ever see raw inputs and charges
/// declared before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: HashMap<String, f64>,
}

impl Namespace {
    /// Seeds the raw variables: `Consumption` plus one key per dataset
    /// entry. A duplicate dataset key keeps the last entry's value.
    pub fn seed(consumption: f64, dataset: &[DatasetEntry]) -> Self {
        let mut values = HashMap::with_capacity(dataset.len() + 1);
        values.insert(CONSUMPTION.to_string(), consumption);
        for entry in dataset {
            values.insert(dataset_key(entry), entry.value);
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Binds a computed charge result for later charges to reference.
    pub fn bind(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Lenient numeric parsing for host-supplied text fields: anything that is
/// not a number reads as 0.
pub fn parse_quantity(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}
