use crate::analysis::lint;
use crate::config::{BillingConfig, Charge, ChargeKind, DatasetEntry, TariffBook, Tier, TierList};
use crate::display;
use crate::engine::{self, parse_quantity};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Staged billing configuration plus evaluation entry points for the host
/// editor. Mutating builder methods mirror the editor's add actions; every
/// `evaluate` call is a fresh, self-contained pipeline run.
#[pyclass(name = "_BillingEngine")]
#[derive(Debug, Clone, Default)]
pub struct PyBillingEngine {
    book: TariffBook,
    charges: Vec<Charge>,
    dataset: Vec<DatasetEntry>,
}

#[pymethods]
impl PyBillingEngine {
    #[new]
    pub fn new() -> Self { Self::default() }

    /// Replaces the staged state with a full JSON configuration in the
    /// editor's persisted shape.
    pub fn load_config_json(&mut self, raw: &str) -> PyResult<()> {
        let config: BillingConfig =
            serde_json::from_str(raw).map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.book = TariffBook::from_tables(config.rate_tables);
        self.charges = config.charges;
        self.dataset = config.dataset;
        Ok(())
    }

    /// Tiers are `(range_width, unit_value)` pairs; the last pair is the
    /// overflow bracket. Returns the registered (possibly suffixed) name.
    pub fn add_rate_table(&mut self, name: String, tiers: Vec<(f64, f64)>) -> String {
        let tiers: TierList = tiers
            .into_iter()
            .map(|(range_width, unit_value)| Tier { range_width, unit_value })
            .collect();
        self.book.add_table(name, tiers)
    }

    pub fn add_rate_table_charge(&mut self, name: String, rate_table_name: String, input_name: String) {
        self.charges.push(Charge {
            name,
            kind: ChargeKind::RateTable { rate_table_name, input_name },
        });
    }

    pub fn add_formula_charge(&mut self, name: String, formula: String) {
        self.charges.push(Charge { name, kind: ChargeKind::Formula { formula } });
    }

    pub fn add_dataset_entry(&mut self, group: String, name: String, value: f64) {
        self.dataset.push(DatasetEntry { group, name, value });
    }

    /// Evaluates the staged configuration. Consumption arrives in string
    /// form, as the editor holds it, and is parsed leniently (non-numeric
    /// reads as 0). Returns the ordered `(name, value)` lines — `None` for
    /// an invalid formula — and the grand total.
    pub fn evaluate(&self, consumption: &str) -> (Vec<(String, Option<f64>)>, f64) {
        let ledger = engine::evaluate_bill(
            &self.book,
            &self.charges,
            &self.dataset,
            parse_quantity(consumption),
        );
        let lines = ledger
            .lines()
            .iter()
            .map(|line| (line.name.clone(), line.value.amount()))
            .collect();
        (lines, ledger.grand_total())
    }

    /// Plain-text statement with fixed 2-decimal amounts.
    pub fn statement(&self, consumption: &str) -> String {
        let ledger = engine::evaluate_bill(
            &self.book,
            &self.charges,
            &self.dataset,
            parse_quantity(consumption),
        );
        display::format_statement(&ledger)
    }

    /// Advisory findings for the staged configuration, one string each.
    pub fn lint(&self) -> Vec<String> {
        lint::check(&self.book, &self.charges, &self.dataset)
            .iter()
            .map(|d| d.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_stage_and_evaluate() {
        let mut eng = PyBillingEngine::new();
        eng.add_rate_table("Water".into(), vec![(10.0, 5.0), (0.0, 2.0)]);
        eng.add_rate_table_charge("Water Charge".into(), "Water".into(), "Consumption".into());
        eng.add_formula_charge("Tax".into(), "<Water Charge> * 0.1".into());

        let (lines, total) = eng.evaluate("23");
        assert_eq!(lines[0], ("Water Charge".to_string(), Some(31.0)));
        assert_eq!(lines[1], ("Tax".to_string(), Some(31.0 * 0.1)));
        assert_eq!(total, 31.0 + 31.0 * 0.1);
        assert!(eng.lint().is_empty());
    }

    #[test]
    fn invalid_formula_surfaces_as_none() {
        let mut eng = PyBillingEngine::new();
        eng.add_formula_charge("broken".into(), "<x> +".into());

        let (lines, total) = eng.evaluate("not a number");
        assert_eq!(lines[0], ("broken".to_string(), None));
        assert_eq!(total, 0.0);
        assert_eq!(eng.lint().len(), 1);
    }

    #[test]
    fn json_config_loads() {
        let mut eng = PyBillingEngine::new();
        eng.load_config_json(
            r#"{"charges":[{"name":"Flat","type":"formula","formula":"4.2"}]}"#,
        )
        .unwrap();

        let (lines, total) = eng.evaluate("0");
        assert_eq!(lines[0], ("Flat".to_string(), Some(4.2)));
        assert_eq!(total, 4.2);

        assert!(eng.load_config_json("not json").is_err());
    }
}
