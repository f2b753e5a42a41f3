//! CI type and CI asset API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A CI type: the template describing a class of configuration items.
///
/// `attributes` is a free-form bag; when the type defines a custom-field
/// schema it lives under `attributes.schema` in a JSON-Schema-like shape:
/// `{ properties: {key -> {type, title?, default?, enum?}}, required: [key] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CiType {
    /// The attribute schema bag, if this type declares one.
    pub fn schema(&self) -> Option<&Value> {
        let schema = self.attributes.get("schema")?;
        schema.is_object().then_some(schema)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCiTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub attributes: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCiTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub attributes: Value,
}

/// A CI asset as returned by `/ci-assets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiAssetResponse {
    pub id: String,
    pub ci_type_id: String,
    #[serde(default)]
    pub ci_type_name: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCiAssetRequest {
    pub ci_type_id: String,
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// Update payload; the CI type is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateCiAssetRequest {
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// Query parameters for `GET /ci-assets`
#[derive(Debug, Clone, Default)]
pub struct CiAssetFilter {
    pub search: Option<String>,
    pub ci_type_id: Option<String>,
    pub name: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
