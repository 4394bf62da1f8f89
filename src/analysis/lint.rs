//! Advisory configuration checks.
//!
//! The engine itself never rejects configuration: unknown tables allocate 0
//! and broken formulas record an invalid sentinel. This lint walks the same
//! configuration and names everything the engine would paper over, so a host
//! editor can surface the problems next to the live output. It collects all
//! findings rather than stopping at the first.

use crate::config::{Charge, ChargeKind, DatasetEntry, TariffBook};
use crate::engine::namespace;
use crate::formula;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    UnknownRateTable { charge: String, table: String },
    MalformedFormula { charge: String, detail: String },
    /// Covers typos, forward references and self references alike: the
    /// variable is not resolvable at the charge's position in the order.
    UnresolvedVariable { charge: String, variable: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownRateTable { charge, table } => {
                write!(f, "charge '{}': rate table '{}' is not defined", charge, table)
            }
            Diagnostic::MalformedFormula { charge, detail } => {
                write!(f, "charge '{}': formula is malformed: {}", charge, detail)
            }
            Diagnostic::UnresolvedVariable { charge, variable } => {
                write!(
                    f,
                    "charge '{}': variable '<{}>' is not resolvable at this position",
                    charge, variable
                )
            }
        }
    }
}

/// Walks the charges in declaration order, tracking which names each one can
/// legally see, and reports every reference that will degrade to 0 or to the
/// invalid sentinel at evaluation time.
pub fn check(book: &TariffBook, charges: &[Charge], dataset: &[DatasetEntry]) -> Vec<Diagnostic> {
    let mut findings = Vec::new();

    // Names visible at the current position: raw inputs, then one more
    // charge name after each step. Mirrors the pipeline's namespace growth.
    let mut visible: HashSet<String> = HashSet::new();
    visible.insert(namespace::CONSUMPTION.to_string());
    for entry in dataset {
        visible.insert(namespace::dataset_key(entry));
    }

    for charge in charges {
        match &charge.kind {
            ChargeKind::RateTable { rate_table_name, input_name } => {
                if book.get(rate_table_name).is_none() {
                    findings.push(Diagnostic::UnknownRateTable {
                        charge: charge.name.clone(),
                        table: rate_table_name.clone(),
                    });
                }
                if !visible.contains(input_name.as_str()) {
                    findings.push(Diagnostic::UnresolvedVariable {
                        charge: charge.name.clone(),
                        variable: input_name.clone(),
                    });
                }
            }
            ChargeKind::Formula { formula: text } => match formula::parse(text) {
                Ok(expr) => {
                    for variable in expr.variables() {
                        if !visible.contains(variable) {
                            findings.push(Diagnostic::UnresolvedVariable {
                                charge: charge.name.clone(),
                                variable: variable.to_string(),
                            });
                        }
                    }
                }
                Err(err) => findings.push(Diagnostic::MalformedFormula {
                    charge: charge.name.clone(),
                    detail: err.to_string(),
                }),
            },
        }
        visible.insert(charge.name.clone());
    }

    findings
}
