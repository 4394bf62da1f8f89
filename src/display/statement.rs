//! Plain-text statement rendering for the host display.

use crate::engine::{BillLedger, ChargeValue};
use std::fmt::Write;

/// Sentinel shown for a charge whose formula could not be evaluated.
pub const INVALID_SENTINEL: &str = "- invalid -";

const TOTAL_LABEL: &str = "Total";

/// One line per charge in declaration order, amounts at fixed 2-decimal
/// precision, followed by the grand total.
pub fn format_statement(ledger: &BillLedger) -> String {
    let name_width = ledger
        .lines()
        .iter()
        .map(|line| line.name.len())
        .max()
        .unwrap_or(0)
        .max(TOTAL_LABEL.len());

    let mut out = String::new();
    for line in ledger.lines() {
        match line.value {
            ChargeValue::Amount(amount) => {
                let _ = writeln!(out, "{:<name_width$}  {:>12.2}", line.name, amount);
            }
            ChargeValue::Invalid => {
                let _ = writeln!(out, "{:<name_width$}  {:>12}", line.name, INVALID_SENTINEL);
            }
        }
    }
    let _ = writeln!(out, "{:<name_width$}  {:>12.2}", TOTAL_LABEL, ledger.grand_total());
    out
}
