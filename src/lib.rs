//! Billing calculation engine: tiered rate-table allocation, arithmetic
//! formula evaluation, and the ordered charge pipeline that ties them
//! together. The editing UI and its persistence live in the host; this crate
//! accepts plain configuration structures and returns a bill ledger.

pub mod analysis;
pub mod bindings;
pub mod config;
pub mod display;
pub mod engine;
pub mod formula;

pub use config::{BillingConfig, Charge, ChargeKind, DatasetEntry, RateTable, TariffBook, Tier};
pub use engine::{evaluate_bill, evaluate_config, BillLedger, ChargeLine, ChargePipeline, ChargeValue};
pub use formula::FormulaError;

use bindings::python::PyBillingEngine;
use pyo3::prelude::*;

/// A simple function to confirm the Rust core is callable from Python.
#[pyfunction]
fn rust_core_version() -> &'static str {
    "0.2.0"
}

/// This function defines the `tariff._core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    m.add_class::<PyBillingEngine>()?;
    Ok(())
}
