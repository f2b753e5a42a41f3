//! Persistent session stores
//!
//! Two explicit stores own what survives a restart: the auth session and the
//! UI preferences. Each serializes to its own JSON file under the platform
//! config directory with a version tag; a mismatched or unreadable file is
//! discarded and replaced with defaults rather than migrated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use cmdb_types::User;

const STORE_VERSION: u32 = 1;
const APP_DIR: &str = "cmdb-console";

fn store_path(file: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(file))
}

fn load_store<T: for<'de> Deserialize<'de>>(file: &str) -> Option<T> {
    let path = store_path(file)?;
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(file, error = %e, "discarding unreadable store");
            None
        }
    }
}

fn save_store<T: Serialize>(file: &str, store: &T) {
    let Some(path) = store_path(file) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(file, error = %e, "cannot create store directory");
            return;
        }
    }
    match serde_json::to_string_pretty(store) {
        Ok(text) => {
            if let Err(e) = std::fs::write(&path, text) {
                warn!(file, error = %e, "cannot write store");
            }
        }
        Err(e) => warn!(file, error = %e, "cannot serialize store"),
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Bearer token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStore {
    pub version: u32,
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            token: None,
            user: None,
        }
    }
}

impl AuthStore {
    const FILE: &'static str = "auth.json";

    pub fn load() -> Self {
        load_store::<Self>(Self::FILE)
            .filter(|s| s.version == STORE_VERSION)
            .unwrap_or_default()
    }

    pub fn save(&self) {
        save_store(Self::FILE, self);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_session(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
        self.save();
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.save();
    }
}

// =============================================================================
// PREFERENCES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefsStore {
    pub version: u32,
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl Default for PrefsStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            theme: Theme::System,
            sidebar_open: true,
        }
    }
}

impl PrefsStore {
    const FILE: &'static str = "prefs.json";

    pub fn load() -> Self {
        load_store::<Self>(Self::FILE)
            .filter(|s| s.version == STORE_VERSION)
            .unwrap_or_default()
    }

    pub fn save(&self) {
        save_store(Self::FILE, self);
    }

    pub fn apply_theme(&self, ctx: &egui::Context) {
        match self.theme {
            Theme::Light => ctx.set_visuals(egui::Visuals::light()),
            Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
            Theme::System => {}
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_store_round_trips() {
        let store = AuthStore {
            version: STORE_VERSION,
            token: Some("tok".to_string()),
            user: None,
        };
        let json = serde_json::to_string(&store).unwrap();
        let back: AuthStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token.as_deref(), Some("tok"));
        assert!(back.is_authenticated());
    }

    #[test]
    fn version_mismatch_is_discarded() {
        let json = r#"{"version": 99, "token": "tok", "user": null}"#;
        let store: AuthStore = serde_json::from_str(json).unwrap();
        // load() applies the same filter
        let kept = Some(store).filter(|s| s.version == STORE_VERSION);
        assert!(kept.is_none());
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), r#""dark""#);
    }

    #[test]
    fn clear_removes_token_and_user() {
        let mut store = AuthStore::default();
        store.token = Some("tok".to_string());
        store.token = None;
        store.user = None;
        assert!(!store.is_authenticated());
    }
}
