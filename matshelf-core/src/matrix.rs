/// Validated matrix and point-list types
use nalgebra::{Matrix3, Vector3};

use crate::error::ParseError;
use crate::format::js_round;
use crate::value::Value;

/// A 3×3 matrix of finite reals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3(pub Matrix3<f64>);

impl Matrix3x3 {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build from row-major rows
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self(Matrix3::from_row_slice(&flat))
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.0;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Validate a parsed value: 3 rows of 3 finite numbers
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let rows = value.as_list().ok_or(ParseError::InvalidMatrix)?;
        if rows.len() != 3 {
            return Err(ParseError::InvalidMatrix);
        }
        let mut out = [[0.0; 3]; 3];
        for (slot, row) in out.iter_mut().zip(rows) {
            *slot = row.as_triple().ok_or(ParseError::InvalidMatrix)?;
        }
        Ok(Self::from_rows(out))
    }
}

impl From<Matrix3<f64>> for Matrix3x3 {
    fn from(m: Matrix3<f64>) -> Self {
        Self(m)
    }
}

/// A 3×3 grid of -1, 0 or 1 flags deciding which shelf slots hold a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignMatrix([[i8; 3]; 3]);

impl SignMatrix {
    /// Build from already-valid signs.
    ///
    /// Returns `None` if any entry is outside {-1, 0, 1}.
    pub fn new(rows: [[i8; 3]; 3]) -> Option<Self> {
        rows.iter()
            .flatten()
            .all(|v| (-1..=1).contains(v))
            .then_some(Self(rows))
    }

    pub fn rows(&self) -> &[[i8; 3]; 3] {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.0[row][col]
    }

    /// Validate a parsed value.
    ///
    /// Entries are rounded half-up first and only then checked against
    /// {-1, 0, 1}, so 0.5 is accepted as 1 and -1.5 as -1.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let rows = value
            .as_list()
            .filter(|rows| rows.len() == 3)
            .ok_or(ParseError::SignShape)?;
        let mut grid = Vec::with_capacity(3);
        for row in rows {
            let cells = row
                .as_list()
                .filter(|cells| cells.len() == 3)
                .ok_or(ParseError::SignShape)?;
            grid.push(cells);
        }

        let mut out = [[0i8; 3]; 3];
        for (i, cells) in grid.into_iter().enumerate() {
            for (j, cell) in cells.iter().enumerate() {
                let v = cell.as_number();
                if !v.is_finite() {
                    return Err(ParseError::SignNonNumeric);
                }
                let r = js_round(v);
                if !(r == -1.0 || r == 0.0 || r == 1.0) {
                    return Err(ParseError::SignOutOfDomain {
                        row: i,
                        col: j,
                        value: v,
                    });
                }
                out[i][j] = r as i8;
            }
        }
        Ok(Self(out))
    }
}

/// An ordered list of 3-component points (N×3)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointList(pub Vec<Vector3<f64>>);

impl PointList {
    pub fn new(points: Vec<Vector3<f64>>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector3<f64>> {
        self.0.iter()
    }

    pub fn to_rows(&self) -> Vec<[f64; 3]> {
        self.0.iter().map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Validate a parsed value: a non-empty list of rows with 3 finite numbers each
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let rows = value
            .as_list()
            .filter(|rows| !rows.is_empty())
            .ok_or(ParseError::InvalidPointsFormat)?;
        rows.iter()
            .map(|row| {
                row.as_triple()
                    .map(Vector3::from)
                    .ok_or(ParseError::PointRowWidth)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<[f64; 3]>> for PointList {
    fn from(rows: Vec<[f64; 3]>) -> Self {
        Self(rows.into_iter().map(Vector3::from).collect())
    }
}
