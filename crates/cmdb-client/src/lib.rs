//! API client for the CMDB backend
//!
//! One shared client instance per app: cloning is cheap and clones share
//! the bearer token, so a login on one clone authenticates them all.
//! Endpoint methods unwrap the backend's `{success, data, message}`
//! envelope and return domain types from `cmdb-types`.

pub mod config;
pub mod error;
pub mod query;

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use cmdb_types::{
    ApiResponse, AuthResponse, CiAssetFilter, CiAssetResponse, CiType, CreateCiAssetRequest,
    CreateCiTypeRequest, CreateLifecycleStateRequest, CreateLifecycleTypeRequest,
    CreateRelationshipTypeRequest, GraphData, GraphNode, LifecycleState, LifecycleTypeResponse,
    LoginRequest, Paginated, RegisterRequest, RelationshipType, RelationshipTypeFilter,
    UpdateCiAssetRequest, UpdateCiTypeRequest, UpdateLifecycleTypeRequest,
    UpdateRelationshipTypeRequest, User,
};

pub use config::Config;
pub use error::ApiError;
use error::error_message;
use query::Query;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    pub fn clear_token(&self) {
        self.set_token(None);
    }

    fn bearer(&self) -> Option<String> {
        self.token.read().ok().and_then(|g| g.clone())
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let req = match self.bearer() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body, status.as_u16()),
            });
        }

        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.get(&url)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.post(&url).json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.put(&url).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let _: serde_json::Value = self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    // =========================================================================
    // CI TYPES
    // =========================================================================

    pub async fn list_ci_types(&self, limit: Option<u32>) -> Result<Vec<CiType>, ApiError> {
        let mut q = Query::new();
        q.push_opt("limit", limit);
        let resp: ApiResponse<Vec<CiType>> = self.get(&format!("/ci-types{}", q.build())).await?;
        unwrap_envelope(resp)
    }

    pub async fn create_ci_type(&self, req: &CreateCiTypeRequest) -> Result<CiType, ApiError> {
        let resp: ApiResponse<CiType> = self.post("/ci-types", req).await?;
        unwrap_envelope(resp)
    }

    pub async fn update_ci_type(
        &self,
        id: &str,
        req: &UpdateCiTypeRequest,
    ) -> Result<CiType, ApiError> {
        let resp: ApiResponse<CiType> = self.put(&format!("/ci-types/{id}"), req).await?;
        unwrap_envelope(resp)
    }

    pub async fn delete_ci_type(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/ci-types/{id}")).await
    }

    // =========================================================================
    // CI ASSETS
    // =========================================================================

    pub async fn list_ci_assets(
        &self,
        filter: &CiAssetFilter,
    ) -> Result<Paginated<CiAssetResponse>, ApiError> {
        let mut q = Query::new();
        q.push_opt("search", filter.search.as_deref());
        q.push_opt("ci_type_id", filter.ci_type_id.as_deref());
        q.push_opt("name", filter.name.as_deref());
        q.push_opt("created_after", filter.created_after.as_deref());
        q.push_opt("created_before", filter.created_before.as_deref());
        q.push_opt("limit", filter.limit);
        q.push_opt("offset", filter.offset);
        self.get(&format!("/ci-assets{}", q.build())).await
    }

    pub async fn create_ci_asset(
        &self,
        req: &CreateCiAssetRequest,
    ) -> Result<CiAssetResponse, ApiError> {
        let resp: ApiResponse<CiAssetResponse> = self.post("/ci-assets", req).await?;
        unwrap_envelope(resp)
    }

    pub async fn update_ci_asset(
        &self,
        id: &str,
        req: &UpdateCiAssetRequest,
    ) -> Result<CiAssetResponse, ApiError> {
        let resp: ApiResponse<CiAssetResponse> = self.put(&format!("/ci-assets/{id}"), req).await?;
        unwrap_envelope(resp)
    }

    pub async fn delete_ci_asset(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/ci-assets/{id}")).await
    }

    // =========================================================================
    // RELATIONSHIP TYPES
    // =========================================================================

    pub async fn list_relationship_types(
        &self,
        filter: &RelationshipTypeFilter,
    ) -> Result<Paginated<RelationshipType>, ApiError> {
        let mut q = Query::new();
        q.push_opt("search", filter.search.as_deref());
        q.push_opt("is_bidirectional", filter.is_bidirectional);
        q.push_opt("limit", filter.limit);
        q.push_opt("offset", filter.offset);
        self.get(&format!("/relationship-types{}", q.build())).await
    }

    pub async fn create_relationship_type(
        &self,
        req: &CreateRelationshipTypeRequest,
    ) -> Result<RelationshipType, ApiError> {
        let resp: ApiResponse<RelationshipType> = self.post("/relationship-types", req).await?;
        unwrap_envelope(resp)
    }

    pub async fn update_relationship_type(
        &self,
        id: &str,
        req: &UpdateRelationshipTypeRequest,
    ) -> Result<RelationshipType, ApiError> {
        let resp: ApiResponse<RelationshipType> =
            self.put(&format!("/relationship-types/{id}"), req).await?;
        unwrap_envelope(resp)
    }

    pub async fn delete_relationship_type(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/relationship-types/{id}")).await
    }

    // =========================================================================
    // LIFECYCLES
    // =========================================================================

    pub async fn list_lifecycle_types(&self) -> Result<Vec<LifecycleTypeResponse>, ApiError> {
        let resp: ApiResponse<Vec<LifecycleTypeResponse>> = self.get("/lifecycle-types").await?;
        unwrap_envelope(resp)
    }

    pub async fn get_lifecycle_type(&self, id: &str) -> Result<LifecycleTypeResponse, ApiError> {
        let resp: ApiResponse<LifecycleTypeResponse> =
            self.get(&format!("/lifecycle-types/{id}")).await?;
        unwrap_envelope(resp)
    }

    pub async fn create_lifecycle_type(
        &self,
        req: &CreateLifecycleTypeRequest,
    ) -> Result<LifecycleTypeResponse, ApiError> {
        let resp: ApiResponse<LifecycleTypeResponse> = self.post("/lifecycle-types", req).await?;
        unwrap_envelope(resp)
    }

    pub async fn update_lifecycle_type(
        &self,
        id: &str,
        req: &UpdateLifecycleTypeRequest,
    ) -> Result<LifecycleTypeResponse, ApiError> {
        let resp: ApiResponse<LifecycleTypeResponse> =
            self.put(&format!("/lifecycle-types/{id}"), req).await?;
        unwrap_envelope(resp)
    }

    pub async fn delete_lifecycle_type(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/lifecycle-types/{id}")).await
    }

    pub async fn create_lifecycle_state(
        &self,
        req: &CreateLifecycleStateRequest,
    ) -> Result<LifecycleState, ApiError> {
        let resp: ApiResponse<LifecycleState> = self.post("/lifecycle-states", req).await?;
        unwrap_envelope(resp)
    }

    pub async fn delete_lifecycle_state(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/lifecycle-states/{id}")).await
    }

    // =========================================================================
    // GRAPH
    // =========================================================================

    pub async fn graph_data(
        &self,
        limit: u32,
        ci_type: Option<&str>,
    ) -> Result<GraphData, ApiError> {
        let mut q = Query::new();
        q.push("limit", limit);
        q.push_opt("ci_type", ci_type);
        let resp: ApiResponse<GraphData> = self.get(&format!("/graph/data{}", q.build())).await?;
        unwrap_envelope(resp)
    }

    pub async fn graph_search(&self, term: &str, limit: u32) -> Result<Vec<GraphNode>, ApiError> {
        let mut q = Query::new();
        q.push("q", term);
        q.push("limit", limit);
        let resp: ApiResponse<Vec<GraphNode>> =
            self.get(&format!("/graph/search{}", q.build())).await?;
        unwrap_envelope(resp)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/register", req).await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        let resp: ApiResponse<User> = self.get("/auth/me").await?;
        unwrap_envelope(resp)
    }
}

/// A 2xx envelope can still report failure; surface its message.
fn unwrap_envelope<T>(resp: ApiResponse<T>) -> Result<T, ApiError> {
    if resp.success {
        Ok(resp.data)
    } else {
        Err(ApiError::Backend(
            resp.message.unwrap_or_else(|| "request failed".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_types::ApiResponse;

    #[test]
    fn envelope_failure_carries_message() {
        let resp: ApiResponse<Vec<CiType>> = ApiResponse {
            success: false,
            data: Vec::new(),
            message: Some("backend said no".to_string()),
        };
        let err = unwrap_envelope(resp).unwrap_err();
        assert_eq!(err.to_string(), "backend said no");
    }

    #[test]
    fn envelope_success_passes_data_through() {
        let resp: ApiResponse<u32> = ApiResponse {
            success: true,
            data: 7,
            message: None,
        };
        assert_eq!(unwrap_envelope(resp).unwrap(), 7);
    }

    #[test]
    fn token_is_shared_across_clones() {
        let client = ApiClient::new(&Config::default());
        let clone = client.clone();
        client.set_token(Some("tok".to_string()));
        assert_eq!(clone.bearer().as_deref(), Some("tok"));
        clone.clear_token();
        assert!(client.bearer().is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&Config {
            base_url: "http://localhost:3000/api/v1/".to_string(),
        });
        assert_eq!(client.base_url, "http://localhost:3000/api/v1");
    }
}
