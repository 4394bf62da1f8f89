//! Ordered record of one pipeline run.

use serde::{Serialize, Deserialize};

/// Result of a single charge.
///
/// `Invalid` is the visible sentinel for a formula that failed to parse or
/// evaluate; it contributes 0 to totals and to later charges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChargeValue {
    Amount(f64),
    Invalid,
}

impl ChargeValue {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ChargeValue::Amount(v) => Some(*v),
            ChargeValue::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ChargeValue::Invalid)
    }

    /// Contribution to the grand total. Invalid entries count as 0, and so
    /// does a NaN amount (a 0/0 formula), matching the display convention.
    pub fn total_contribution(&self) -> f64 {
        match self {
            ChargeValue::Amount(v) if v.is_nan() => 0.0,
            ChargeValue::Amount(v) => *v,
            ChargeValue::Invalid => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub name: String,
    pub value: ChargeValue,
}

/// The output of a pipeline run: one line per charge, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillLedger {
    lines: Vec<ChargeLine>,
}

impl BillLedger {
    pub fn new() -> Self { Self::default() }

    pub(crate) fn record(&mut self, name: &str, value: ChargeValue) {
        self.lines.push(ChargeLine { name: name.to_string(), value });
    }

    pub fn lines(&self) -> &[ChargeLine] { &self.lines }

    pub fn get(&self, name: &str) -> Option<ChargeValue> {
        self.lines.iter().find(|l| l.name == name).map(|l| l.value)
    }

    /// Sum of all numeric values; invalid entries contribute 0.
    pub fn grand_total(&self) -> f64 {
        self.lines.iter().map(|l| l.value.total_contribution()).sum()
    }
}
