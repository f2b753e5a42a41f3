//! Type inference for the free-form attribute editor
//!
//! The CI type editor lets admins enter key/value rows as text; the value's
//! shape decides its stored type. Precedence is fixed and order matters for
//! ambiguous inputs:
//!
//! 1. empty string        -> String
//! 2. JSON bracket check  -> Json   (`{...}` or `[...]`)
//! 3. boolean literal     -> Boolean (exactly `true` / `false`)
//! 4. numeric parse       -> Number (full f64 parse)
//! 5. fallback            -> String
//!
//! So `"true"` infers Boolean but `"True"` stays a String, and `"42"`
//! infers Number before the string fallback can claim it.

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    String,
    Number,
    Boolean,
    Json,
}

impl InferredType {
    /// Badge text shown next to the value input.
    pub fn label(&self) -> &'static str {
        match self {
            InferredType::String => "string",
            InferredType::Number => "number",
            InferredType::Boolean => "boolean",
            InferredType::Json => "json",
        }
    }
}

/// One key/value row in the attribute editor.
#[derive(Debug, Clone, Default)]
pub struct AttributeRow {
    pub key: String,
    pub value: String,
}

/// Classify a raw value string. See the module docs for the precedence.
pub fn classify(raw: &str) -> InferredType {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return InferredType::String;
    }
    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return InferredType::Json;
    }
    if trimmed == "true" || trimmed == "false" {
        return InferredType::Boolean;
    }
    if trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
        return InferredType::Number;
    }
    InferredType::String
}

/// Coerce a raw value string according to its classification.
///
/// Bracketed text that fails to parse as JSON is kept as a string rather
/// than rejected.
pub fn coerce_classified(raw: &str, inferred: InferredType) -> Value {
    let trimmed = raw.trim();
    match inferred {
        InferredType::Number => {
            let n = trimmed.parse::<f64>().unwrap_or(0.0);
            Value::Number(Number::from_f64(n).unwrap_or_else(|| Number::from(0)))
        }
        InferredType::Boolean => Value::Bool(trimmed == "true"),
        InferredType::Json => {
            serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        InferredType::String => Value::String(raw.to_string()),
    }
}

/// Build the attribute bag from editor rows. Rows with an empty key or an
/// empty value are skipped; later rows overwrite earlier duplicates.
pub fn build_attribute_bag(rows: &[AttributeRow]) -> Map<String, Value> {
    let mut bag = Map::new();
    for row in rows {
        if row.key.is_empty() || row.value.is_empty() {
            continue;
        }
        let value = coerce_classified(&row.value, classify(&row.value));
        bag.insert(row.key.clone(), value);
    }
    bag
}

/// Editor rows for an existing attribute bag, for the edit dialog.
pub fn rows_from_bag(bag: &Map<String, Value>) -> Vec<AttributeRow> {
    bag.iter()
        .map(|(key, value)| AttributeRow {
            key: key.clone(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn precedence_for_ambiguous_inputs() {
        assert_eq!(classify("true"), InferredType::Boolean);
        assert_eq!(classify("True"), InferredType::String);
        assert_eq!(classify("false"), InferredType::Boolean);
        assert_eq!(classify("42"), InferredType::Number);
        assert_eq!(classify("-0.5"), InferredType::Number);
        assert_eq!(classify("[1, 2]"), InferredType::Json);
        assert_eq!(classify("{\"a\": 1}"), InferredType::Json);
        assert_eq!(classify(""), InferredType::String);
        assert_eq!(classify("hello"), InferredType::String);
    }

    #[test]
    fn json_bracket_check_beats_numeric_parse() {
        // "[1]" would never parse as a number, but "{}" vs "" ordering is
        // the interesting part: brackets are checked before anything else.
        assert_eq!(classify("[]"), InferredType::Json);
        assert_eq!(classify("{}"), InferredType::Json);
    }

    #[test]
    fn coercion_produces_typed_values() {
        assert_eq!(coerce_classified("42", InferredType::Number), json!(42.0));
        assert_eq!(coerce_classified("true", InferredType::Boolean), json!(true));
        assert_eq!(
            coerce_classified("{\"a\":1}", InferredType::Json),
            json!({"a": 1})
        );
        // Bracketed but malformed: kept as the raw string.
        assert_eq!(
            coerce_classified("{oops}", InferredType::Json),
            json!("{oops}")
        );
    }

    #[test]
    fn bag_skips_incomplete_rows() {
        let rows = vec![
            AttributeRow { key: "cpu".into(), value: "4".into() },
            AttributeRow { key: "".into(), value: "ignored".into() },
            AttributeRow { key: "ignored".into(), value: "".into() },
            AttributeRow { key: "managed".into(), value: "true".into() },
        ];
        let bag = build_attribute_bag(&rows);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get("cpu"), Some(&json!(4.0)));
        assert_eq!(bag.get("managed"), Some(&json!(true)));
    }

    #[test]
    fn rows_round_trip_display_strings() {
        let mut bag = Map::new();
        bag.insert("name".into(), json!("db-01"));
        bag.insert("cores".into(), json!(8));
        bag.insert("tags".into(), json!(["a", "b"]));
        let rows = rows_from_bag(&bag);
        assert_eq!(rows[0].value, "db-01");
        assert_eq!(rows[1].value, "8");
        assert_eq!(rows[2].value, "[\"a\",\"b\"]");
    }
}
