//! Console pages
//!
//! Each page owns its list state, in-flight request slots and dialogs. The
//! app routes between pages and reacts to the events they emit.

pub mod assets;
pub mod ci_types;
pub mod graph;
pub mod lifecycles;
pub mod login;
pub mod relationships;

use cmdb_client::ApiError;

use crate::state::Toasts;

/// Out-of-band signals a page sends up to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The backend rejected the session token; the app must log out.
    AuthExpired,
}

/// Toast an API error, or escalate a 401 to the app.
pub fn report_error(err: &ApiError, toasts: &mut Toasts) -> Option<PageEvent> {
    if matches!(err, ApiError::Unauthorized) {
        return Some(PageEvent::AuthExpired);
    }
    toasts.error(err.to_string());
    None
}

/// Debounce window for search boxes; typing restarts the clock.
pub const SEARCH_DEBOUNCE_SECS: f64 = 0.3;
