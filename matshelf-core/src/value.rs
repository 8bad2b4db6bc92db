/// Dialect-neutral numeric values read from user text
use serde_json::Value as Json;

/// A scalar or a nested list of values.
///
/// Scalars are already coerced to `f64` and may be NaN when the source text
/// was not numeric; validation decides what to do with those.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    List(Vec<Value>),
}

impl Value {
    /// Build a two-level list from rows of numbers
    pub fn from_rows<R, I>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = f64>,
    {
        Value::List(
            rows.into_iter()
                .map(|row| Value::List(row.into_iter().map(Value::Scalar).collect()))
                .collect(),
        )
    }

    /// Whether a dialect result counts as "something was read".
    ///
    /// Lists always do; scalars only when non-zero and not NaN.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Scalar(x) => *x != 0.0 && !x.is_nan(),
            Value::List(_) => true,
        }
    }

    /// Numeric coercion of a single cell.
    ///
    /// A list cell collapses like a one-element array would: empty is 0,
    /// a single element is that element, anything longer is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Scalar(x) => *x,
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [only] => only.as_number(),
                _ => f64::NAN,
            },
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            Value::Scalar(_) => None,
        }
    }

    /// Read a row of exactly three finite numbers
    pub fn as_triple(&self) -> Option<[f64; 3]> {
        let cells = self.as_list()?;
        if cells.len() != 3 {
            return None;
        }
        let mut out = [0.0; 3];
        for (slot, cell) in out.iter_mut().zip(cells) {
            let v = cell.as_number();
            if !v.is_finite() {
                return None;
            }
            *slot = v;
        }
        Some(out)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Scalar(0.0),
            Json::Bool(b) => Value::Scalar(if b { 1.0 } else { 0.0 }),
            Json::Number(n) => Value::Scalar(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::Scalar(coerce_text(&s)),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(_) => Value::Scalar(f64::NAN),
        }
    }
}

/// Convert a text token to a number the way a browser's `Number(str)` does.
///
/// Blank text is 0, `Infinity` is accepted, `0x`/`0o`/`0b` prefixes are
/// integer literals and everything else must be a plain decimal literal.
pub fn coerce_text(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf"/"nan" spellings that a browser rejects
    if s.bytes().any(|b| matches!(b, b'i' | b'I' | b'n' | b'N')) {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}
