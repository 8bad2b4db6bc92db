/// Error types for parsing, expression evaluation and shelf sessions
use thiserror::Error;

/// Validation failures raised while turning text into a matrix or point list
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid 3×3 matrix")]
    InvalidMatrix,

    #[error("invalid sign matrix: must be 3×3")]
    SignShape,

    #[error("sign matrix: non-numeric values")]
    SignNonNumeric,

    /// Entry rounds to something other than -1, 0 or 1
    #[error("sign matrix: only -1, 0 or 1 allowed (row {row}, col {col} is {value})")]
    SignOutOfDomain { row: usize, col: usize, value: f64 },

    #[error("the result matrix is empty")]
    EmptyPoints,

    #[error("invalid result matrix format")]
    InvalidPointsFormat,

    #[error("each row must have 3 numbers (Nx3)")]
    PointRowWidth,
}

/// Errors produced by an expression evaluator
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: &'static str,
        got: usize,
    },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("{0}")]
    Domain(String),
}

/// Errors surfaced by a [`crate::session::ShelfSession`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShelfError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("apply a matrix first")]
    NotApplied,
}
