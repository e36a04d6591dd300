//! Lenient value coercion
//!
//! Record ids may be numbers or strings, and query parameters arrive as
//! text. Comparisons are done on the canonical string form of a value and
//! numeric parameters are parsed permissively: anything that is not a
//! number yields `None` instead of an error.

use serde_json::{Number, Value};

/// Canonical string form of a JSON value.
///
/// Integral floats render without a fractional part so that `25`, `25.0`
/// and `"25"` all compare equal.
pub fn to_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_key(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_key).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_key(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // -0 and 0 share a key
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Whether a value counts as present for a required field.
///
/// `null`, `false`, `0`, NaN and the empty string are absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric value of a JSON value, `None` when it is not a number.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => parse_number(&to_key(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Parse text as a number.
///
/// Surrounding whitespace is ignored, blank text is zero, `0x`/`0o`/`0b`
/// prefixes select a radix and `Infinity` is accepted with an optional sign.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// JSON number for a finite float, preferring the integer representation.
pub fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return Some(Value::Number(Number::from(n as i64)));
    }
    Number::from_f64(n).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_equates_numbers_and_strings() {
        assert_eq!(to_key(&json!(25)), "25");
        assert_eq!(to_key(&json!(25.0)), "25");
        assert_eq!(to_key(&json!("25")), "25");
        assert_eq!(to_key(&json!(1.5)), "1.5");
        assert_eq!(to_key(&json!(["a", "b"])), "a,b");
    }

    #[test]
    fn test_presence() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!("0")));
        assert!(is_present(&json!(7)));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("0x1f"), Some(31.0));
        assert_eq!(parse_number("-2.5"), Some(-2.5));
        assert_eq!(parse_number("12px"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!("42")), Some(42.0));
        assert_eq!(to_number(&json!(true)), Some(1.0));
        assert_eq!(to_number(&json!({"a": 1})), None);
        assert_eq!(to_number(&json!(["7"])), Some(7.0));
    }

    #[test]
    fn test_number_value_prefers_integers() {
        assert_eq!(number_value(999.0), Some(json!(999)));
        assert_eq!(number_value(1.25), Some(json!(1.25)));
        assert_eq!(number_value(f64::NAN), None);
    }
}
