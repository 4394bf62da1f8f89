use thiserror::Error;

/// Any way a formula can fail to produce a number. Every variant is
/// non-fatal: the pipeline records the charge as invalid and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Unexpected character '{ch}' at offset {at}")]
    UnexpectedChar { ch: char, at: usize },
    #[error("Unterminated variable token starting at offset {at}")]
    UnterminatedVariable { at: usize },
    #[error("Malformed number '{text}'")]
    MalformedNumber { text: String },
    #[error("Unexpected token '{found}'")]
    UnexpectedToken { found: String },
    #[error("Expected ')'")]
    MissingCloseParen,
    #[error("Unexpected end of formula")]
    UnexpectedEnd,
    #[error("Unknown variable '<{0}>'")]
    UnknownVariable(String),
}
