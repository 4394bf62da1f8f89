pub mod book;
pub mod types;

pub use book::TariffBook;
pub use types::{BillingConfig, Charge, ChargeKind, DatasetEntry, RateTable, Tier, TierList};
