//! Lifecycle type and state API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lifecycle type: a named sequence of states assignable to CI types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// A single state within a lifecycle type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleState {
    pub id: String,
    pub lifecycle_type_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: String,
    pub order_index: i32,
    #[serde(default)]
    pub is_initial_state: bool,
    #[serde(default)]
    pub is_terminal_state: bool,
}

/// Lifecycle type with its states, as returned by `GET /lifecycle-types/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleTypeResponse {
    #[serde(flatten)]
    pub lifecycle_type: LifecycleType,
    #[serde(default)]
    pub states: Vec<LifecycleState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLifecycleTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateLifecycleTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLifecycleStateRequest {
    pub lifecycle_type_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub order_index: i32,
    pub is_initial_state: bool,
    pub is_terminal_state: bool,
}
