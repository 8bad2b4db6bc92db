/// Session configuration loaded from JSON
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::compare::DEFAULT_TOLERANCE;
use crate::format::{MATRIX_PRECISION, MISMATCH_PREVIEW, TABLE_PRECISION};
use crate::shelf::DEFAULT_UNIT;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a shelf session; missing fields take their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Absolute per-cell tolerance when comparing results
    pub tolerance: f64,
    /// Spacing between shelf slots
    pub shelf_unit: f64,
    pub matrix_precision: i32,
    pub table_precision: i32,
    /// Mismatches listed in a verdict before eliding the rest
    pub mismatch_preview: usize,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            shelf_unit: DEFAULT_UNIT,
            matrix_precision: MATRIX_PRECISION,
            table_precision: TABLE_PRECISION,
            mismatch_preview: MISMATCH_PREVIEW,
        }
    }
}

impl ShelfConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if !self.shelf_unit.is_finite() || self.shelf_unit <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "shelf_unit must be positive, got {}",
                self.shelf_unit
            )));
        }
        for (name, precision) in [
            ("matrix_precision", self.matrix_precision),
            ("table_precision", self.table_precision),
        ] {
            if !(0..=10).contains(&precision) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between 0 and 10, got {}",
                    name, precision
                )));
            }
        }
        Ok(())
    }
}
