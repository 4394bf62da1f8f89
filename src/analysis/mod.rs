pub mod lint;

pub use lint::Diagnostic;
