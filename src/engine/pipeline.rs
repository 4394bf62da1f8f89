//! A synchronous, single-threaded charge pipeline.

use crate::config::{Charge, ChargeKind, DatasetEntry, TariffBook};
use crate::engine::allocator;
use crate::engine::ledger::{BillLedger, ChargeValue};
use crate::engine::namespace::Namespace;
use crate::formula;
use tracing::debug;

/// Single-pass reducer over the ordered charge list.
///
/// The run is a pure function of `(charges, book, dataset, consumption)`:
/// a fresh namespace is built per run, grown one charge at a time, and
/// discarded with the run. The pipeline is total by construction — unknown
/// tables and inputs allocate 0, and a failed formula records `Invalid`
/// while later charges see 0 in its place.
pub struct ChargePipeline<'a> {
    book: &'a TariffBook,
    charges: &'a [Charge],
}

impl<'a> ChargePipeline<'a> {
    pub fn new(book: &'a TariffBook, charges: &'a [Charge]) -> Self {
        Self { book, charges }
    }

    pub fn run(&self, consumption: f64, dataset: &[DatasetEntry]) -> BillLedger {
        let mut namespace = Namespace::seed(consumption, dataset);
        let mut ledger = BillLedger::new();

        for charge in self.charges {
            let value = match &charge.kind {
                ChargeKind::RateTable { rate_table_name, input_name } => {
                    let quantity = namespace.get(input_name).unwrap_or(0.0);
                    let amount = match self.book.get(rate_table_name) {
                        Some(table) => allocator::allocate(&table.tiers, quantity),
                        None => {
                            debug!(
                                charge = %charge.name,
                                table = %rate_table_name,
                                "unknown rate table, allocating 0"
                            );
                            0.0
                        }
                    };
                    ChargeValue::Amount(amount)
                }
                ChargeKind::Formula { formula: text } => {
                    match formula::evaluate(text, &namespace) {
                        Ok(amount) => ChargeValue::Amount(amount),
                        Err(err) => {
                            debug!(charge = %charge.name, %err, "formula is invalid");
                            ChargeValue::Invalid
                        }
                    }
                }
            };

            // Invalid merges as 0 so later charges are unaffected; a raw
            // amount merges as-is, NaN included.
            let merged = match value {
                ChargeValue::Amount(v) => v,
                ChargeValue::Invalid => 0.0,
            };
            namespace.bind(&charge.name, merged);
            ledger.record(&charge.name, value);
        }

        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Tier, TierList};
    use crate::engine::ledger::ChargeValue;
    use smallvec::smallvec;

    fn formula_charge(name: &str, formula: &str) -> Charge {
        Charge {
            name: name.into(),
            kind: ChargeKind::Formula { formula: formula.into() },
        }
    }

    fn rate_table_charge(name: &str, table: &str, input: &str) -> Charge {
        Charge {
            name: name.into(),
            kind: ChargeKind::RateTable {
                rate_table_name: table.into(),
                input_name: input.into(),
            },
        }
    }

    fn water_book() -> TariffBook {
        let mut book = TariffBook::new();
        let tiers: TierList = smallvec![
            Tier { range_width: 10.0, unit_value: 5.0 },
            Tier { range_width: 0.0, unit_value: 2.0 },
        ];
        book.add_table("Water", tiers);
        book
    }

    #[test]
    fn rate_table_charge_reads_consumption_from_the_namespace() {
        let book = water_book();
        let charges = [rate_table_charge("Water Charge", "Water", "Consumption")];

        let ledger = ChargePipeline::new(&book, &charges).run(23.0, &[]);
        assert_eq!(ledger.get("Water Charge"), Some(ChargeValue::Amount(31.0)));
        assert_eq!(ledger.grand_total(), 31.0);
    }

    #[test]
    fn chained_formulas_see_earlier_results() {
        let book = TariffBook::new();
        let charges = [
            formula_charge("charge1", "<Consumption> * 2"),
            formula_charge("charge2", "<charge1> + 1"),
        ];

        let ledger = ChargePipeline::new(&book, &charges).run(5.0, &[]);
        assert_eq!(ledger.get("charge1"), Some(ChargeValue::Amount(10.0)));
        assert_eq!(ledger.get("charge2"), Some(ChargeValue::Amount(11.0)));
        assert_eq!(ledger.grand_total(), 21.0);
    }

    #[test]
    fn invalid_formula_records_sentinel_and_merges_zero() {
        let book = TariffBook::new();
        let charges = [
            formula_charge("broken", "<x> +"),
            formula_charge("after", "<broken> + 7"),
        ];

        let ledger = ChargePipeline::new(&book, &charges).run(0.0, &[]);
        assert_eq!(ledger.get("broken"), Some(ChargeValue::Invalid));
        // The failed charge reads as 0 downstream.
        assert_eq!(ledger.get("after"), Some(ChargeValue::Amount(7.0)));
        assert_eq!(ledger.grand_total(), 7.0);
    }

    #[test]
    fn forward_reference_is_invalid_not_fatal() {
        let book = TariffBook::new();
        let charges = [
            formula_charge("first", "<second> * 2"),
            formula_charge("second", "1 + 1"),
        ];

        let ledger = ChargePipeline::new(&book, &charges).run(0.0, &[]);
        assert_eq!(ledger.get("first"), Some(ChargeValue::Invalid));
        assert_eq!(ledger.get("second"), Some(ChargeValue::Amount(2.0)));
    }

    #[test]
    fn unknown_rate_table_allocates_zero() {
        let book = TariffBook::new();
        let charges = [rate_table_charge("Water Charge", "NoSuchTable", "Consumption")];

        let ledger = ChargePipeline::new(&book, &charges).run(23.0, &[]);
        assert_eq!(ledger.get("Water Charge"), Some(ChargeValue::Amount(0.0)));
    }

    #[test]
    fn missing_input_variable_reads_as_zero() {
        let book = water_book();
        let charges = [rate_table_charge("Water Charge", "Water", "NoSuchInput")];

        let ledger = ChargePipeline::new(&book, &charges).run(23.0, &[]);
        assert_eq!(ledger.get("Water Charge"), Some(ChargeValue::Amount(0.0)));
    }

    #[test]
    fn dataset_entries_feed_rate_table_inputs() {
        let book = water_book();
        let dataset = [DatasetEntry {
            group: "Sewer".into(),
            name: "Usage".into(),
            value: 23.0,
        }];
        let charges = [rate_table_charge("Sewer Charge", "Water", "Sewer_Usage")];

        let ledger = ChargePipeline::new(&book, &charges).run(0.0, &dataset);
        assert_eq!(ledger.get("Sewer Charge"), Some(ChargeValue::Amount(31.0)));
    }

    #[test]
    fn mixed_pipeline_matches_hand_computation() {
        let book = water_book();
        let dataset = [DatasetEntry {
            group: "Meter Charge".into(),
            name: "3/4\" or 20mm".into(),
            value: 2.0,
        }];
        let charges = [
            rate_table_charge("Water Charge", "Water", "Consumption"),
            formula_charge("Meter", "<Meter Charge_3/4\" or 20mm>"),
            formula_charge("Tax", "(<Water Charge> + <Meter>) * 0.1"),
        ];

        let ledger = ChargePipeline::new(&book, &charges).run(23.0, &dataset);
        let tax = (31.0_f64 + 2.0) * 0.1;
        assert_eq!(ledger.get("Water Charge"), Some(ChargeValue::Amount(31.0)));
        assert_eq!(ledger.get("Meter"), Some(ChargeValue::Amount(2.0)));
        assert_eq!(ledger.get("Tax"), Some(ChargeValue::Amount(tax)));
        assert_eq!(ledger.grand_total(), 31.0 + 2.0 + tax);
    }

    #[test]
    fn identical_inputs_produce_identical_output() {
        let book = water_book();
        let dataset = [DatasetEntry { group: "A".into(), name: "x".into(), value: 4.0 }];
        let charges = [
            rate_table_charge("Water Charge", "Water", "Consumption"),
            formula_charge("Tax", "<Water Charge> * 0.1"),
            formula_charge("broken", "<nope> *"),
        ];

        let pipeline = ChargePipeline::new(&book, &charges);
        let first = pipeline.run(23.0, &dataset);
        let second = pipeline.run(23.0, &dataset);
        assert_eq!(first, second);
    }
}
