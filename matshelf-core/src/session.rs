/// A shelf session: apply a sign matrix and transform, then check an answer
use crate::compare::{compare_points, Comparison};
use crate::config::ShelfConfig;
use crate::error::ShelfError;
use crate::format::{format_matrix, format_positions};
use crate::matrix::{Matrix3x3, PointList, SignMatrix};
use crate::parse::MatrixParser;
use crate::shelf::{ShelfBox, ShelfLayout};
use crate::transform::Transform;

/// Everything produced by one apply action
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub signs: SignMatrix,
    pub transform: Matrix3x3,
    pub boxes: Vec<ShelfBox>,
    /// Box positions on the sign shelf
    pub before: PointList,
    /// `transform · before`, in the same order
    pub after: PointList,
}

pub struct ShelfSession {
    parser: MatrixParser,
    layout: ShelfLayout,
    config: ShelfConfig,
    last: Option<Applied>,
}

impl ShelfSession {
    pub fn new(config: ShelfConfig) -> Self {
        Self::with_parser(MatrixParser::default(), config)
    }

    pub fn with_parser(parser: MatrixParser, config: ShelfConfig) -> Self {
        Self {
            parser,
            layout: ShelfLayout::new(config.shelf_unit),
            config,
            last: None,
        }
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    pub fn layout(&self) -> &ShelfLayout {
        &self.layout
    }

    /// The most recent successful apply, if any
    pub fn last(&self) -> Option<&Applied> {
        self.last.as_ref()
    }

    /// Parse both inputs, place the boxes and move them through the transform.
    ///
    /// On error the previously applied state is kept as it was.
    pub fn apply(&mut self, signs_text: &str, matrix_text: &str) -> Result<&Applied, ShelfError> {
        let signs = self.parser.parse_sign_matrix(signs_text)?;
        let boxes = self.layout.boxes_from_signs(&signs);
        let transform = self.parser.parse_matrix(matrix_text)?;

        let before = ShelfLayout::positions(&boxes);
        let after = Transform::apply_all(&transform, &before);
        tracing::debug!(boxes = boxes.len(), "applied transform");

        Ok(self.last.insert(Applied {
            signs,
            transform,
            boxes,
            before,
            after,
        }))
    }

    /// Compare an expected answer with the last applied result
    pub fn compare(&self, expected_text: &str) -> Result<Comparison, ShelfError> {
        let applied = self.last.as_ref().ok_or(ShelfError::NotApplied)?;
        let expected = self.parser.parse_points(expected_text)?;
        Ok(compare_points(&expected, &applied.after, self.config.tolerance))
    }

    /// Text rendering of the last applied transform
    pub fn matrix_text(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|a| format_matrix(&a.transform, self.config.matrix_precision))
    }

    /// HTML before/after table for the last applied transform
    pub fn positions_html(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|a| format_positions(&a.before, &a.after, self.config.table_precision))
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ShelfSession {
    fn default() -> Self {
        Self::new(ShelfConfig::default())
    }
}
