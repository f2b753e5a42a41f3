//! Shared API Types for the CMDB console
//!
//! This crate is the single source of truth for all types crossing the HTTP
//! boundary between the console and the CMDB backend.
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in pages
//! 2. Wire field names follow the backend (snake_case, `totalPages` is the
//!    one camelCase holdout in the paginated envelope)
//! 3. IDs cross the boundary as strings

pub mod ci;
pub mod graph;
pub mod lifecycle;
pub mod relationship;

use serde::{Deserialize, Serialize};

pub use ci::*;
pub use graph::*;
pub use lifecycle::*;
pub use relationship::*;

// ============================================================================
// RESPONSE ENVELOPES
// ============================================================================

/// Standard response envelope: `{ success, data, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

// ============================================================================
// AUTH
// ============================================================================

/// Authenticated user as returned by `/auth/login` and `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Response from `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_envelope_decodes_camel_case_total_pages() {
        let json = r#"{"data":[],"total":42,"page":2,"limit":20,"totalPages":3}"#;
        let page: Paginated<User> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn api_response_message_is_optional() {
        let json = r#"{"success":true,"data":{"id":"u1","email":"a@b.c","name":"A","role":"admin"}}"#;
        let resp: ApiResponse<User> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
        assert_eq!(resp.data.role, "admin");
    }
}
