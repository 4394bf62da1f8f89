use serde::{Serialize, Deserialize};
use smallvec::SmallVec;

/// One bracket of a rate table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tier {
    /// Width of the bracket in consumption units. The final tier of a table
    /// is the open-ended overflow bracket and never reads this field.
    #[serde(default)]
    pub range_width: f64,
    pub unit_value: f64,
}

/// Most tables carry a handful of brackets; keep them inline.
pub type TierList = SmallVec<[Tier; 4]>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateTable {
    pub name: String,
    pub tiers: TierList,
}

/// Closed variant: how a charge is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChargeKind {
    RateTable {
        rate_table_name: String,
        /// Namespace key the consumption quantity is read from.
        input_name: String,
    },
    Formula {
        formula: String,
    },
}

/// A named computed quantity. Charges evaluate in declaration order; a
/// formula may reference any charge declared before it by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub name: String,
    #[serde(flatten)]
    pub kind: ChargeKind,
}

/// Exposed to formulas under the key `"<group>_<name>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub group: String,
    pub name: String,
    pub value: f64,
}

/// Complete configuration as exchanged with a host editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub dataset: Vec<DatasetEntry>,
    #[serde(default)]
    pub rate_tables: Vec<RateTable>,
    #[serde(default)]
    pub charges: Vec<Charge>,
}
