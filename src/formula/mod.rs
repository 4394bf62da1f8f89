//! The charge formula language: numeric literals, `+ - * / %`, parentheses,
//! unary minus, and `<Name>`-delimited variables.

pub mod error;
pub mod eval;
pub mod parser;
pub mod token;

pub use error::FormulaError;
pub use eval::evaluate;
pub use parser::{parse, BinOp, Expr};
pub use token::{tokenize, Token};
