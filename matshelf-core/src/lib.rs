/// Matshelf Core Library - Matrix parsing, transforms and result checking
///
/// This library provides the stateless core of the shelf visualization:
/// reading matrices from free-form text, applying a 3×3 transform to shelf
/// positions and comparing the outcome against an expected answer.

pub mod compare;
pub mod config;
pub mod error;
pub mod expr;
pub mod format;
pub mod matrix;
pub mod parse;
pub mod report;
pub mod session;
pub mod shelf;
pub mod transform;
pub mod value;

// Re-export commonly used types
pub use compare::{compare_points, Comparison, Mismatch, DEFAULT_TOLERANCE};
pub use config::{ConfigError, ShelfConfig};
pub use error::{EvalError, ParseError, ShelfError};
pub use expr::{ExpressionEvaluator, MathEvaluator};
pub use matrix::{Matrix3x3, PointList, SignMatrix};
pub use parse::{parse_matrix, parse_points, parse_sign_matrix, Dialect, MatrixParser};
pub use report::{Report, Tone};
pub use session::{Applied, ShelfSession};
pub use shelf::{ShelfBox, ShelfLayout};
pub use transform::Transform;
pub use value::Value;
