//! Client configuration

/// Where the backend lives. `CMDB_API_URL` overrides the default local
/// development address; the value should include the API prefix.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

impl Config {
    pub fn from_env() -> Self {
        let base_url = std::env::var("CMDB_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
