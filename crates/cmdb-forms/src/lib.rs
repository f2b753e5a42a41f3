//! Dynamic attribute form engine
//!
//! Turns a CI type's JSON-Schema-like attribute schema into a renderable
//! field list, coerces raw input back into typed attribute values, and
//! builds the create/update payloads. Rendering lives in the console crate;
//! everything here is plain data transformation so it can be tested without
//! a UI.
//!
//! ```text
//! CiType.attributes.schema
//!        │ derive_fields
//!        ▼
//! Vec<AttributeField> ──► input controls (console crate)
//!        │                      │ on-change
//!        ▼                      ▼
//! display_value ◄──── attribute bag (Map<String, Value>)
//!                              │ build_create / build_update
//!                              ▼
//!                      request payloads
//! ```

pub mod fields;
pub mod infer;
pub mod input;
pub mod submit;

pub use fields::{derive_fields, display_value, humanize_key, AttributeField, FieldType};
pub use infer::{build_attribute_bag, classify, coerce_classified, rows_from_bag, AttributeRow, InferredType};
pub use input::{apply_raw_json, coerce_text_input, normalize_date, parse_float_lenient, seed_defaults, truthy, value_to_input_string};
pub use submit::{build_create, build_update, validate_submission, FormError};
