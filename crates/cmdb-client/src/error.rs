//! Client error taxonomy
//!
//! Transport failures and non-2xx responses both surface as toast text in
//! the console; a 401 is fatal to the session and handled separately by the
//! caller (clear stored auth, route to login).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Http { status: u16, message: String },

    /// HTTP 401. The session is over; retrying is pointless.
    #[error("Session expired. Please log in again.")]
    Unauthorized,

    /// 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Backend(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Best error text for a non-2xx body: JSON `message` or `error` field if
/// present, else a generic status line.
pub fn error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    format!("HTTP {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_then_error_field() {
        assert_eq!(error_message(r#"{"message":"name taken"}"#, 409), "name taken");
        assert_eq!(error_message(r#"{"error":"bad id"}"#, 400), "bad id");
        assert_eq!(
            error_message(r#"{"message":"first","error":"second"}"#, 400),
            "first"
        );
    }

    #[test]
    fn falls_back_to_status_line() {
        assert_eq!(error_message("<html>oops</html>", 502), "HTTP 502");
        assert_eq!(error_message("", 500), "HTTP 500");
        assert_eq!(error_message(r#"{"message":""}"#, 500), "HTTP 500");
    }
}
