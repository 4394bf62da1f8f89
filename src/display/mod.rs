pub mod statement;

pub use statement::{format_statement, INVALID_SENTINEL};
