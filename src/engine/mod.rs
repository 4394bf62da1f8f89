pub mod allocator;
pub mod ledger;
pub mod namespace;
pub mod pipeline;

pub use ledger::{BillLedger, ChargeLine, ChargeValue};
pub use namespace::{parse_quantity, Namespace};
pub use pipeline::ChargePipeline;

use crate::config::{BillingConfig, Charge, DatasetEntry, TariffBook};

/// Evaluates the full charge list against one consumption reading.
pub fn evaluate_bill(
    book: &TariffBook,
    charges: &[Charge],
    dataset: &[DatasetEntry],
    consumption: f64,
) -> BillLedger {
    ChargePipeline::new(book, charges).run(consumption, dataset)
}

/// Convenience entry point for hosts that hold a [`BillingConfig`] as a
/// single structure.
pub fn evaluate_config(config: &BillingConfig, consumption: f64) -> BillLedger {
    let book = TariffBook::from_tables(config.rate_tables.iter().cloned());
    evaluate_bill(&book, &config.charges, &config.dataset, consumption)
}
