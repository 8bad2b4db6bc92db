/// Number rounding and text/HTML rendering of matrices, positions and mismatches
use nalgebra::Vector3;

use crate::compare::Mismatch;
use crate::matrix::{Matrix3x3, PointList};

/// Decimals used when printing a matrix
pub const MATRIX_PRECISION: i32 = 3;
/// Decimals used in the before/after positions table
pub const TABLE_PRECISION: i32 = 2;
/// How many mismatches a summary lists before eliding the rest
pub const MISMATCH_PREVIEW: usize = 3;

/// Round half-up (toward positive infinity), e.g. `-2.5` becomes `-2`
pub fn js_round(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to `d` decimal places: `js_round(n * 10^d) / 10^d`
pub fn round(n: f64, d: i32) -> f64 {
    let scale = 10f64.powi(d);
    js_round(n * scale) / scale
}

/// Shortest decimal text for a number, printing negative zero as `0`.
///
/// Always positional: `1e21` prints all its digits and `1e-7` as `0.0000001`,
/// never in exponent form.
pub fn format_number(n: f64) -> String {
    format!("{}", n + 0.0)
}

fn format_vector(v: &Vector3<f64>, precision: i32) -> String {
    v.iter()
        .map(|x| format_number(round(*x, precision)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a matrix as right-aligned columns, one row per line
pub fn format_matrix(m: &Matrix3x3, precision: i32) -> String {
    m.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:>6}", format_number(round(*v, precision))))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// HTML table listing each point before and after the transform
pub fn format_positions(before: &PointList, after: &PointList, precision: i32) -> String {
    let rows: String = before
        .iter()
        .zip(after.iter())
        .enumerate()
        .map(|(i, (b, a))| {
            format!(
                "<tr><td>{}</td><td>[{}]</td><td>→</td><td>[{}]</td></tr>",
                i,
                format_vector(b, precision),
                format_vector(a, precision)
            )
        })
        .collect();

    format!(
        "<table style=\"width:100%;border-collapse:collapse\">\n    \
         <thead><tr><th>#</th><th>Before</th><th></th><th>After</th></tr></thead>\n    \
         <tbody>{}</tbody></table>",
        rows
    )
}

/// One-line summary of the first `limit` mismatches, with ` …` if more exist
pub fn summarize_mismatches(mismatches: &[Mismatch], limit: usize) -> String {
    let shown = mismatches
        .iter()
        .take(limit)
        .map(|m| {
            format!(
                "row {}, col {}: exp={:.3} vs got={:.3} (Δ={:.3})",
                m.row, m.col, m.expected, m.actual, m.diff
            )
        })
        .collect::<Vec<_>>()
        .join(" • ");
    let more = if mismatches.len() > limit { " …" } else { "" };
    format!("No match: {}{}", shown, more)
}
