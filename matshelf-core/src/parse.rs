/// Text to matrix parsing through an ordered chain of input dialects
///
/// Each dialect is an independent, stateless attempt. The first one that
/// reads something wins and its value is validated; later dialects are
/// not consulted even if that validation fails.
use crate::error::ParseError;
use crate::expr::{ExpressionEvaluator, MathEvaluator};
use crate::matrix::{Matrix3x3, PointList, SignMatrix};
use crate::value::{coerce_text, Value};

/// A textual input format, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// JSON array of arrays
    Json,
    /// Math expression handed to the evaluator
    Expression,
    /// Rows split on newlines/semicolons, cells on commas/whitespace
    Rows,
}

impl Dialect {
    pub const ORDER: [Dialect; 3] = [Dialect::Json, Dialect::Expression, Dialect::Rows];
}

/// Parser for matrices, sign matrices and point lists.
///
/// The expression evaluator is an optional collaborator; without one the
/// expression dialect never matches.
pub struct MatrixParser {
    evaluator: Option<Box<dyn ExpressionEvaluator>>,
}

impl MatrixParser {
    /// A parser with no expression evaluator
    pub fn new() -> Self {
        Self { evaluator: None }
    }

    pub fn with_evaluator<E>(evaluator: E) -> Self
    where
        E: ExpressionEvaluator + 'static,
    {
        Self {
            evaluator: Some(Box::new(evaluator)),
        }
    }

    /// Run a single dialect on already-trimmed text
    pub fn attempt(&self, dialect: Dialect, text: &str) -> Option<Value> {
        let value = match dialect {
            Dialect::Json => serde_json::from_str::<serde_json::Value>(text)
                .ok()
                .map(Value::from),
            Dialect::Expression => {
                let evaluator = self.evaluator.as_ref()?;
                match evaluator.evaluate(text) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::debug!(error = %e, "expression dialect rejected input");
                        None
                    }
                }
            }
            Dialect::Rows => read_rows(text),
        };
        value.filter(Value::is_truthy)
    }

    /// Read text with the first dialect that yields something
    pub fn read(&self, text: &str) -> Option<Value> {
        let text = text.trim();
        Dialect::ORDER.iter().find_map(|&dialect| {
            let value = self.attempt(dialect, text)?;
            tracing::debug!(?dialect, "input accepted");
            Some(value)
        })
    }

    /// Parse a 3×3 matrix of finite numbers
    pub fn parse_matrix(&self, text: &str) -> Result<Matrix3x3, ParseError> {
        let value = self.read(text).ok_or(ParseError::InvalidMatrix)?;
        Matrix3x3::from_value(&value)
    }

    /// Parse a 3×3 sign matrix with entries rounding to -1, 0 or 1
    pub fn parse_sign_matrix(&self, text: &str) -> Result<SignMatrix, ParseError> {
        let value = self.read(text).ok_or(ParseError::SignShape)?;
        SignMatrix::from_value(&value)
    }

    /// Parse a non-empty N×3 list of points
    pub fn parse_points(&self, text: &str) -> Result<PointList, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyPoints);
        }
        let value = self.read(text).ok_or(ParseError::InvalidPointsFormat)?;
        PointList::from_value(&value)
    }
}

impl Default for MatrixParser {
    /// A parser backed by the built-in [`MathEvaluator`]
    fn default() -> Self {
        Self::with_evaluator(MathEvaluator)
    }
}

fn read_rows(text: &str) -> Option<Value> {
    let rows: Vec<Value> = text
        .split(|c: char| c == '\n' || c == ';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            Value::List(
                row.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| Value::Scalar(coerce_text(token)))
                    .collect(),
            )
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(Value::List(rows))
    }
}

/// Parse a 3×3 matrix with the default parser
pub fn parse_matrix(text: &str) -> Result<Matrix3x3, ParseError> {
    MatrixParser::default().parse_matrix(text)
}

/// Parse a sign matrix with the default parser
pub fn parse_sign_matrix(text: &str) -> Result<SignMatrix, ParseError> {
    MatrixParser::default().parse_sign_matrix(text)
}

/// Parse an N×3 point list with the default parser
pub fn parse_points(text: &str) -> Result<PointList, ParseError> {
    MatrixParser::default().parse_points(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use proptest::prelude::*;

    const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    /// Evaluator that always fails, standing in for a missing capability
    struct Refusing;

    impl ExpressionEvaluator for Refusing {
        fn evaluate(&self, input: &str) -> Result<Value, EvalError> {
            Err(EvalError::Syntax(input.to_string()))
        }
    }

    #[test]
    fn test_dialect_order() {
        let parser = MatrixParser::default();
        assert!(parser.attempt(Dialect::Json, "[[1,2,3]]").is_some());
        assert!(parser.attempt(Dialect::Json, "1 2 3").is_none());
        assert!(parser.attempt(Dialect::Expression, "[1,2,3]").is_some());
        assert!(parser.attempt(Dialect::Expression, "1 2 3").is_none());
        assert!(parser.attempt(Dialect::Rows, "1 2 3").is_some());
    }

    #[test]
    fn test_falsy_results_fall_through() {
        let parser = MatrixParser::default();
        assert!(parser.attempt(Dialect::Json, "0").is_none());
        assert!(parser.attempt(Dialect::Json, "null").is_none());
        assert!(parser.attempt(Dialect::Expression, "1 - 1").is_none());
    }

    #[test]
    fn test_parse_identity_all_dialects() {
        let parser = MatrixParser::default();
        for text in [
            "[[1,0,0],[0,1,0],[0,0,1]]",
            "identity(3)",
            "[1, 0, 0; 0, 1, 0; 0, 0, 1]",
            "1,0,0;0,1,0;0,0,1",
            "1 0 0\n0 1 0\n0 0 1",
        ] {
            assert_eq!(parser.parse_matrix(text).unwrap().rows(), IDENTITY, "{text}");
        }
    }

    #[test]
    fn test_multiline_bracket_matrix() {
        let m = parse_matrix("[1, 0, 0;\n 0, 1, 0;\n 0, 0, 1]").unwrap();
        assert_eq!(m.rows(), IDENTITY);
        let points = parse_points("[1.2, -1.2, 0;\n 0, 0, 1]").unwrap();
        assert_eq!(points.to_rows(), vec![[1.2, -1.2, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_deeply_nested_input_is_an_error() {
        for n in [100, 400, 5000] {
            let text = format!("{}1{}", "(".repeat(n), ")".repeat(n));
            assert!(parse_points(&text).is_err(), "{n}");
            assert_eq!(parse_matrix(&text), Err(ParseError::InvalidMatrix), "{n}");
        }
        assert!(parse_points(&format!("{}1", "- ".repeat(5000))).is_err());
    }

    #[test]
    fn test_expression_without_evaluator() {
        let bare = MatrixParser::new();
        assert_eq!(bare.parse_matrix("identity(3)"), Err(ParseError::InvalidMatrix));

        let refusing = MatrixParser::with_evaluator(Refusing);
        assert_eq!(refusing.parse_matrix("identity(3)"), Err(ParseError::InvalidMatrix));
        assert!(refusing.parse_matrix("1 0 0; 0 1 0; 0 0 1").is_ok());
    }

    #[test]
    fn test_first_success_is_final() {
        // JSON reads a flat list; the rows dialect is never consulted
        assert_eq!(
            parse_points("[1, 2, 3]"),
            Err(ParseError::PointRowWidth)
        );
        assert_eq!(parse_points("5"), Err(ParseError::InvalidPointsFormat));
    }

    #[test]
    fn test_matrix_errors() {
        assert_eq!(parse_matrix(""), Err(ParseError::InvalidMatrix));
        assert_eq!(parse_matrix("1 2 3; 4 5 6"), Err(ParseError::InvalidMatrix));
        assert_eq!(parse_matrix("1 2 x; 4 5 6; 7 8 9"), Err(ParseError::InvalidMatrix));
        assert_eq!(parse_matrix("[[1,2,3],[4,5,6],[7,8]]"), Err(ParseError::InvalidMatrix));
    }

    #[test]
    fn test_json_strings_are_numbers() {
        let m = parse_matrix(r#"[["1","0","0"],[0,1,0],[0,0,"1"]]"#).unwrap();
        assert_eq!(m.rows(), IDENTITY);
    }

    #[test]
    fn test_sign_matrix_text() {
        let z = parse_sign_matrix("1,-1,0;0,1,-1;-1,0,1").unwrap();
        assert_eq!(z.rows(), &[[1, -1, 0], [0, 1, -1], [-1, 0, 1]]);

        assert!(matches!(
            parse_sign_matrix("2,0,0;0,0,0;0,0,0"),
            Err(ParseError::SignOutOfDomain { .. })
        ));
        assert_eq!(parse_sign_matrix(""), Err(ParseError::SignShape));
        assert_eq!(parse_sign_matrix("1 0 0; 0 a 0; 0 0 1"), Err(ParseError::SignNonNumeric));
        assert_eq!(parse_sign_matrix("[[0.5,0,0],[0,0,0],[0,0,0]]").unwrap().get(0, 0), 1);
    }

    #[test]
    fn test_point_errors() {
        assert_eq!(parse_points("   "), Err(ParseError::EmptyPoints));
        assert_eq!(parse_points("[]"), Err(ParseError::InvalidPointsFormat));
        assert_eq!(parse_points("1 2 3\n4 5"), Err(ParseError::PointRowWidth));
        assert_eq!(parse_points("1 2 3\n4 5 6").unwrap().len(), 2);
        assert_eq!(parse_points("1 -2 -3").unwrap().to_rows(), vec![[1.0, -2.0, -3.0]]);
    }

    proptest! {
        #[test]
        fn dialects_agree(cells in prop::array::uniform9(-1000i32..1000)) {
            let values: Vec<f64> = cells.iter().map(|&c| c as f64 / 100.0).collect();
            let row = |r: usize| values[r * 3..r * 3 + 3]
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>();

            let json = format!(
                "[[{}],[{}],[{}]]",
                row(0).join(","), row(1).join(","), row(2).join(",")
            );
            let expression = format!(
                "[{}; {}; {}]",
                row(0).join(", "), row(1).join(", "), row(2).join(", ")
            );
            let rows = format!(
                "{}\n{}\n{}",
                row(0).join(" "), row(1).join(" "), row(2).join(" ")
            );

            let parser = MatrixParser::default();
            let from_json = parser.parse_matrix(&json).unwrap();
            prop_assert_eq!(parser.parse_matrix(&expression).unwrap(), from_json);
            prop_assert_eq!(parser.parse_matrix(&rows).unwrap(), from_json);
        }
    }
}
