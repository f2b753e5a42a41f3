//! Relationship type API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, optionally bidirectional edge type definable between CI types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub from_ci_type_id: Option<String>,
    #[serde(default)]
    pub to_ci_type_id: Option<String>,
    pub is_bidirectional: bool,
    #[serde(default)]
    pub reverse_name: Option<String>,
    #[serde(default)]
    pub attributes_schema: Value,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationship_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRelationshipTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_ci_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_ci_type_id: Option<String>,
    pub is_bidirectional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateRelationshipTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_ci_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_ci_type_id: Option<String>,
    pub is_bidirectional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_name: Option<String>,
}

/// Query parameters for `GET /relationship-types`
#[derive(Debug, Clone, Default)]
pub struct RelationshipTypeFilter {
    pub search: Option<String>,
    pub is_bidirectional: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
