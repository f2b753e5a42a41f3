//! Input coercion and bag maintenance
//!
//! Coercion happens immediately on change, not at submit time, so the bag
//! always holds values of the type the schema declared.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Number, Value};

use crate::fields::{AttributeField, FieldType};

/// Lenient float parse matching browser `parseFloat` semantics: the longest
/// valid numeric prefix is taken, and anything without a leading digit
/// (including the empty string) parses to 0.
pub fn parse_float_lenient(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let mut end = 0;
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
        end = i;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
            end = i;
        }
    }
    if saw_digit && i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Coerce raw text input into the typed value stored in the bag.
///
/// Booleans never pass through here; the toggle stores a bool directly.
pub fn coerce_text_input(field_type: &FieldType, raw: &str) -> Value {
    match field_type {
        FieldType::Number => {
            let n = parse_float_lenient(raw);
            Value::Number(Number::from_f64(n).unwrap_or_else(|| Number::from(0)))
        }
        // Text, Select, Date, Textarea and unrecognized types all store the
        // raw string; the date input already produces YYYY-MM-DD.
        _ => Value::String(raw.to_string()),
    }
}

/// Normalize a stored date value for display in a date input.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` strings; anything else
/// (including non-strings) displays as empty rather than erroring.
pub fn normalize_date(value: &Value) -> String {
    let Some(s) = value.as_str() else {
        return String::new();
    };
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(s) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    String::new()
}

/// Text shown in an input buffer for an existing bag value.
pub fn value_to_input_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JS-style truthiness for rendering the boolean toggle from a value that
/// may predate the schema (old assets can hold strings or numbers here).
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Replace the bag with the parse of the raw-JSON editor buffer.
///
/// Best-effort by design: a parse failure (or a non-object parse) leaves
/// the bag unchanged and reports `false`. The last valid parse wins; the
/// user never sees an error while typing incomplete JSON.
pub fn apply_raw_json(bag: &mut Map<String, Value>, text: &str) -> bool {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => {
            *bag = map;
            true
        }
        _ => false,
    }
}

/// Fresh bag for a newly selected CI type, seeded with the new field
/// list's schema defaults. Keys entered under the previous type are
/// dropped.
pub fn seed_defaults(fields: &[AttributeField]) -> Map<String, Value> {
    let mut bag = Map::new();
    for field in fields {
        if let Some(default) = &field.default_value {
            bag.insert(field.key.clone(), default.clone());
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_float_lenient_matches_parse_float() {
        assert_eq!(parse_float_lenient("42"), 42.0);
        assert_eq!(parse_float_lenient("42.5"), 42.5);
        assert_eq!(parse_float_lenient("-3.25"), -3.25);
        assert_eq!(parse_float_lenient("42abc"), 42.0);
        assert_eq!(parse_float_lenient("  7"), 7.0);
        assert_eq!(parse_float_lenient("1e3"), 1000.0);
        assert_eq!(parse_float_lenient("1e"), 1.0);
        assert_eq!(parse_float_lenient(""), 0.0);
        assert_eq!(parse_float_lenient("abc"), 0.0);
        assert_eq!(parse_float_lenient("."), 0.0);
        assert_eq!(parse_float_lenient("-"), 0.0);
    }

    #[test]
    fn number_input_coerces_to_json_number() {
        assert_eq!(coerce_text_input(&FieldType::Number, "42"), json!(42.0));
        assert_eq!(coerce_text_input(&FieldType::Number, "nope"), json!(0.0));
        assert_eq!(coerce_text_input(&FieldType::Number, ""), json!(0.0));
    }

    #[test]
    fn text_like_inputs_stay_strings() {
        assert_eq!(coerce_text_input(&FieldType::Text, "web-01"), json!("web-01"));
        assert_eq!(coerce_text_input(&FieldType::Textarea, "a\nb"), json!("a\nb"));
        assert_eq!(
            coerce_text_input(&FieldType::Other("geo_point".into()), "1,2"),
            json!("1,2")
        );
    }

    #[test]
    fn date_normalization() {
        assert_eq!(normalize_date(&json!("2024-03-01T10:30:00Z")), "2024-03-01");
        assert_eq!(normalize_date(&json!("2024-03-01")), "2024-03-01");
        assert_eq!(normalize_date(&json!("not a date")), "");
        assert_eq!(normalize_date(&json!(42)), "");
    }

    #[test]
    fn truthiness_follows_js_rules() {
        assert!(truthy(&json!(true)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("yes")));
        assert!(!truthy(&json!(0)));
        assert!(truthy(&json!(1.5)));
        assert!(!truthy(&Value::Null));
    }

    #[test]
    fn invalid_json_leaves_bag_at_last_valid_parse() {
        let mut bag = Map::new();
        assert!(apply_raw_json(&mut bag, r#"{"a": 1}"#));
        assert_eq!(bag.get("a"), Some(&json!(1)));

        // Mid-typing garbage is swallowed.
        assert!(!apply_raw_json(&mut bag, r#"{"a":"#));
        assert_eq!(bag.get("a"), Some(&json!(1)));

        // Non-object JSON is also rejected.
        assert!(!apply_raw_json(&mut bag, "3"));
        assert_eq!(bag.len(), 1);

        assert!(apply_raw_json(&mut bag, r#"{"b": true}"#));
        assert!(bag.get("a").is_none());
        assert_eq!(bag.get("b"), Some(&json!(true)));
    }

    #[test]
    fn type_switch_seeds_new_defaults_only() {
        use crate::fields::{AttributeField, FieldType};
        let new_fields = vec![
            AttributeField {
                key: "env".into(),
                field_type: FieldType::Text,
                label: "Env".into(),
                required: false,
                options: None,
                default_value: Some(json!("dev")),
            },
            AttributeField {
                key: "hostname".into(),
                field_type: FieldType::Text,
                label: "Hostname".into(),
                required: false,
                options: None,
                default_value: None,
            },
        ];
        let bag = seed_defaults(&new_fields);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("env"), Some(&json!("dev")));
    }
}
