/// Tolerance comparison of two N×3 point lists
use serde::Serialize;

use crate::format::{format_number, summarize_mismatches, MISMATCH_PREVIEW};
use crate::matrix::PointList;

/// Default absolute per-cell tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// A single cell whose values differ by more than the tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub expected: f64,
    pub actual: f64,
    pub diff: f64,
}

/// Outcome of comparing an expected list against an actual one.
///
/// A failed comparison is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    Match { tolerance: f64 },
    RowCountMismatch { expected: usize, actual: usize },
    Mismatched { mismatches: Vec<Mismatch> },
}

impl Comparison {
    pub fn is_ok(&self) -> bool {
        matches!(self, Comparison::Match { .. })
    }

    /// Every cell over tolerance, empty for the other variants
    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Comparison::Mismatched { mismatches } => mismatches,
            _ => &[],
        }
    }

    /// Human-readable verdict listing at most `preview` mismatches
    pub fn message(&self, preview: usize) -> String {
        match self {
            Comparison::Match { tolerance } => {
                format!("Match! (tol={})", format_number(*tolerance))
            }
            Comparison::RowCountMismatch { expected, actual } => {
                format!("Row count differs: expected {}, actual {}", expected, actual)
            }
            Comparison::Mismatched { mismatches } => summarize_mismatches(mismatches, preview),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message(MISMATCH_PREVIEW))
    }
}

/// Compare `expected` against `actual` cell by cell.
///
/// Differences equal to `tolerance` pass; mismatches are collected in
/// row-major order.
pub fn compare_points(expected: &PointList, actual: &PointList, tolerance: f64) -> Comparison {
    if expected.len() != actual.len() {
        return Comparison::RowCountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        };
    }

    let mut mismatches = Vec::new();
    for (row, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        for col in 0..3 {
            let diff = (e[col] - a[col]).abs();
            if diff > tolerance {
                mismatches.push(Mismatch {
                    row,
                    col,
                    expected: e[col],
                    actual: a[col],
                    diff,
                });
            }
        }
    }

    tracing::trace!(rows = expected.len(), mismatches = mismatches.len(), "compared points");

    if mismatches.is_empty() {
        Comparison::Match { tolerance }
    } else {
        Comparison::Mismatched { mismatches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn points(rows: &[[f64; 3]]) -> PointList {
        PointList::from(rows.to_vec())
    }

    #[test]
    fn test_identical_lists_match() {
        let a = points(&[[1.0, 2.0, 3.0], [-4.0, 0.5, 9.0]]);
        let result = compare_points(&a, &a, DEFAULT_TOLERANCE);
        assert!(result.is_ok());
        assert_eq!(result.message(3), "Match! (tol=0.01)");
    }

    #[test]
    fn test_row_count_mismatch() {
        let expected = points(&[[0.0; 3]]);
        let actual = points(&[[0.0; 3], [0.0; 3]]);
        let result = compare_points(&expected, &actual, DEFAULT_TOLERANCE);
        assert_eq!(
            result,
            Comparison::RowCountMismatch {
                expected: 1,
                actual: 2
            }
        );
        assert!(result.mismatches().is_empty());
        assert_eq!(result.to_string(), "Row count differs: expected 1, actual 2");
    }

    #[test]
    fn test_single_cell_mismatch() {
        let expected = points(&[[0.0, 0.0, 0.0]]);
        let actual = points(&[[0.0, 0.0, 0.02]]);
        let result = compare_points(&expected, &actual, DEFAULT_TOLERANCE);
        let mismatches = result.mismatches();
        assert_eq!(mismatches.len(), 1);
        assert_eq!((mismatches[0].row, mismatches[0].col), (0, 2));
        assert_relative_eq!(mismatches[0].diff, 0.02);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let expected = points(&[[0.0, 0.0, 0.0]]);
        let at_tolerance = points(&[[0.0, 0.01, 0.0]]);
        assert!(compare_points(&expected, &at_tolerance, 0.01).is_ok());

        let above = points(&[[0.0, 0.0101, 0.0]]);
        assert_eq!(compare_points(&expected, &above, 0.01).mismatches().len(), 1);
    }

    #[test]
    fn test_mismatch_order_is_row_major() {
        let expected = points(&[[0.0; 3], [0.0; 3]]);
        let actual = points(&[[0.0, 1.0, 1.0], [1.0, 0.0, 0.0]]);
        let cells: Vec<_> = compare_points(&expected, &actual, DEFAULT_TOLERANCE)
            .mismatches()
            .iter()
            .map(|m| (m.row, m.col))
            .collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_full_list_is_kept() {
        let expected = points(&[[0.0; 3], [0.0; 3]]);
        let actual = points(&[[1.0; 3], [1.0; 3]]);
        let result = compare_points(&expected, &actual, DEFAULT_TOLERANCE);
        assert_eq!(result.mismatches().len(), 6);
        assert!(result.message(3).ends_with(" …"));
    }
}
