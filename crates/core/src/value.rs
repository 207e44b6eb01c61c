//! Field value helpers shared by the rule checks.
//!
//! Records are plain `serde_json` maps; these helpers define how the
//! engine views a field value: blankness, numeric and integer readings
//! (JSON numbers or numeric strings), character-counted length, and
//! ISO-8601 date recognition for cross-field comparisons.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde_json::Value;

/// The unit of data being validated: a field-name → value map.
///
/// Owned by the caller; the engine only ever reads it.
pub type Record = serde_json::Map<String, Value>;

/// True when the field is missing or explicitly null.
pub fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// True when the field is missing, null, or a whitespace-only string.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Numeric reading of a value: JSON numbers directly, strings via parse.
pub fn number_view(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integer reading of a value. A JSON float like `10.0` is not an
/// integer even though it is numerically whole.
pub fn integer_view(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Length of a value for the length rule: character count for strings,
/// element count for arrays, zero when nil.
pub fn length_view(value: Option<&Value>) -> Option<usize> {
    match value {
        None | Some(Value::Null) => Some(0),
        Some(Value::String(s)) => Some(s.chars().count()),
        Some(Value::Array(items)) => Some(items.len()),
        _ => None,
    }
}

/// ISO-8601 (`YYYY-MM-DD`) date reading of a string value.
pub fn date_view(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

/// Equality used by set membership: exact JSON equality, with `1` and
/// `1.0` additionally treated as equal when both sides are numeric.
pub fn value_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (number_view(a), number_view(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Ordering between two field values, when one exists.
///
/// Numbers compare numerically, strings that both parse as ISO dates
/// compare as dates, remaining strings lexicographically, booleans as
/// `false < true`. Mixed types do not compare.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (number_view(a), number_view(b)) {
        return x.partial_cmp(&y);
    }
    if let (Some(x), Some(y)) = (date_view(a), date_view(b)) {
        return Some(x.cmp(&y));
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Human-facing rendering of a value for error messages: strings bare,
/// everything else as JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
