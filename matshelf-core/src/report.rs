/// Front-end facing verdicts for a compare action
use serde::Serialize;

use crate::compare::Comparison;
use crate::error::ShelfError;

/// How a verdict should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Mismatch,
    /// Input could not be read, or nothing was applied yet
    Warning,
}

impl Tone {
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Success => "#7dffa7",
            Tone::Mismatch => "#ff9b7d",
            Tone::Warning => "#ffd27d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub ok: bool,
    pub message: String,
    pub tone: Tone,
}

impl Report {
    pub fn from_outcome(outcome: &Result<Comparison, ShelfError>, preview: usize) -> Self {
        match outcome {
            Ok(comparison) => Self {
                ok: comparison.is_ok(),
                message: comparison.message(preview),
                tone: if comparison.is_ok() {
                    Tone::Success
                } else {
                    Tone::Mismatch
                },
            },
            Err(e) => Self {
                ok: false,
                message: e.to_string(),
                tone: Tone::Warning,
            },
        }
    }
}
