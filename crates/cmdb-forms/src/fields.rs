//! Schema-to-field derivation

use cmdb_types::CiType;
use serde_json::{Map, Value};

/// Input control class for a derived field.
///
/// Unrecognized schema type strings are preserved in `Other` and render as a
/// plain text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Select,
    Date,
    Textarea,
    Other(String),
}

impl FieldType {
    fn from_schema_type(declared: Option<&str>) -> Self {
        match declared.unwrap_or("string") {
            "string" => FieldType::Text,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "select" => FieldType::Select,
            "date" => FieldType::Date,
            "textarea" => FieldType::Textarea,
            other => FieldType::Other(other.to_string()),
        }
    }
}

/// One renderable form field, derived from a single schema property.
///
/// This is a view object owned by the form instance; it is rebuilt from the
/// CI type whenever the selected type changes and discarded when the form
/// closes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeField {
    pub key: String,
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub default_value: Option<Value>,
}

impl AttributeField {
    /// String fields whose key mentions "email" get an email input.
    pub fn wants_email_input(&self) -> bool {
        self.key.contains("email")
    }

    /// Whether this field renders as a select control.
    pub fn has_options(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// Humanize a schema key into a label: first character upper-cased,
/// underscores in the remainder replaced by spaces.
///
/// `ip_address` becomes `Ip address`.
pub fn humanize_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut label: String = first.to_uppercase().collect();
            label.push_str(&chars.as_str().replace('_', " "));
            label
        }
    }
}

/// Derive the ordered field list from a CI type's attribute schema.
///
/// Returns an empty list when the type has no usable schema (no `schema`
/// bag or no `properties`); the form then falls back to the raw-JSON
/// editor. Iteration order is the schema object's key insertion order.
/// Malformed property entries never error; they degrade to text fields.
pub fn derive_fields(ci_type: &CiType) -> Vec<AttributeField> {
    let Some(schema) = ci_type.schema() else {
        return Vec::new();
    };
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(key, prop)| AttributeField {
            key: key.clone(),
            field_type: FieldType::from_schema_type(prop.get("type").and_then(Value::as_str)),
            label: prop
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| humanize_key(key)),
            required: required.contains(&key.as_str()),
            options: prop.get("enum").and_then(Value::as_array).map(|opts| {
                opts.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            default_value: prop.get("default").cloned(),
        })
        .collect()
}

/// The value a field should display: the bag's value when the key is
/// present (an explicit `""`, `0` or `false` wins), else the schema
/// default, else empty. A stored JSON `null` counts as absent.
pub fn display_value(bag: &Map<String, Value>, field: &AttributeField) -> Value {
    if let Some(value) = bag.get(&field.key) {
        if !value.is_null() {
            return value.clone();
        }
    }
    if let Some(default) = &field.default_value {
        return default.clone();
    }
    Value::String(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ci_type(attributes: Value) -> CiType {
        serde_json::from_value(json!({
            "id": "t1",
            "name": "Server",
            "attributes": attributes,
        }))
        .unwrap()
    }

    #[test]
    fn one_field_per_property_with_required_membership() {
        let t = ci_type(json!({
            "schema": {
                "properties": {
                    "hostname": {"type": "string"},
                    "cpu_cores": {"type": "number"},
                    "monitored": {"type": "boolean"},
                },
                "required": ["hostname"],
            }
        }));
        let fields = derive_fields(&t);
        assert_eq!(fields.len(), 3);
        assert!(fields[0].required);
        assert!(!fields[1].required);
        assert!(!fields[2].required);
    }

    #[test]
    fn fields_keep_schema_insertion_order() {
        let t = ci_type(json!({
            "schema": {
                "properties": {
                    "zeta": {"type": "string"},
                    "alpha": {"type": "string"},
                    "mid": {"type": "string"},
                },
            }
        }));
        let fields = derive_fields(&t);
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn label_prefers_title_else_humanizes_key() {
        let t = ci_type(json!({
            "schema": {
                "properties": {
                    "ip_address": {"type": "string"},
                    "os": {"type": "string", "title": "Operating System"},
                },
            }
        }));
        let fields = derive_fields(&t);
        assert_eq!(fields[0].label, "Ip address");
        assert_eq!(fields[1].label, "Operating System");
    }

    #[test]
    fn missing_type_defaults_to_text_and_unknown_is_preserved() {
        let t = ci_type(json!({
            "schema": {
                "properties": {
                    "plain": {},
                    "weird": {"type": "geo_point"},
                },
            }
        }));
        let fields = derive_fields(&t);
        assert_eq!(fields[0].field_type, FieldType::Text);
        assert_eq!(fields[1].field_type, FieldType::Other("geo_point".into()));
    }

    #[test]
    fn no_schema_or_no_properties_yields_empty_list() {
        assert!(derive_fields(&ci_type(json!({}))).is_empty());
        assert!(derive_fields(&ci_type(json!({"schema": {}}))).is_empty());
        assert!(derive_fields(&ci_type(json!({"schema": "not-an-object"}))).is_empty());
    }

    #[test]
    fn enum_becomes_options() {
        let t = ci_type(json!({
            "schema": {
                "properties": {
                    "env": {"type": "string", "enum": ["prod", "dev"]},
                },
                "required": ["env"],
            }
        }));
        let fields = derive_fields(&t);
        assert_eq!(fields.len(), 1);
        let f = &fields[0];
        assert_eq!(f.key, "env");
        assert_eq!(f.field_type, FieldType::Text);
        assert_eq!(f.label, "Env");
        assert!(f.required);
        assert_eq!(f.options.as_deref(), Some(&["prod".to_string(), "dev".to_string()][..]));
        assert!(f.has_options());
    }

    #[test]
    fn explicit_empty_or_zero_beats_default() {
        let field = AttributeField {
            key: "cpu_cores".into(),
            field_type: FieldType::Number,
            label: "Cpu cores".into(),
            required: false,
            options: None,
            default_value: Some(json!(8)),
        };
        let mut bag = Map::new();
        bag.insert("cpu_cores".into(), json!(0));
        assert_eq!(display_value(&bag, &field), json!(0));

        bag.insert("cpu_cores".into(), json!(""));
        assert_eq!(display_value(&bag, &field), json!(""));

        bag.remove("cpu_cores");
        assert_eq!(display_value(&bag, &field), json!(8));

        bag.insert("cpu_cores".into(), Value::Null);
        assert_eq!(display_value(&bag, &field), json!(8));
    }

    #[test]
    fn email_input_heuristic() {
        let field = AttributeField {
            key: "owner_email".into(),
            field_type: FieldType::Text,
            label: "Owner email".into(),
            required: false,
            options: None,
            default_value: None,
        };
        assert!(field.wants_email_input());
    }
}
