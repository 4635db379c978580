//! Application state
//!
//! [`AppState`] is the single aggregate the store owns: the credential, the
//! mini-apps, the active selection, the theme and the model list.

mod mini_app;
mod persisted;
mod theme;

pub use mini_app::{MiniApp, MiniAppDraft};
pub use persisted::DeserializationError;
pub use theme::{ParseThemeError, Theme};

use crate::catalog::{self, ModelOption};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete snapshot of user settings and mini-app definitions
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// API credential, if one has been entered
    pub api_key: Option<String>,

    /// Whether the credential is written to storage
    pub save_api_key: bool,

    /// Mini-apps in creation order
    pub mini_apps: Vec<MiniApp>,

    /// Currently selected mini-app; may name an app that was since deleted
    pub active_mini_app_id: Option<String>,

    /// Theme preference
    pub theme: Theme,

    /// Model options offered when creating or editing mini-apps
    pub models: Vec<ModelOption>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api_key: None,
            save_api_key: true,
            mini_apps: Vec::new(),
            active_mini_app_id: None,
            theme: Theme::Light,
            models: catalog::model_options(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("save_api_key", &self.save_api_key)
            .field("mini_apps", &self.mini_apps)
            .field("active_mini_app_id", &self.active_mini_app_id)
            .field("theme", &self.theme)
            .field("models", &self.models)
            .finish()
    }
}

impl AppState {
    /// Get a mini-app by exact id
    #[must_use]
    pub fn mini_app(&self, id: &str) -> Option<&MiniApp> {
        self.mini_apps.iter().find(|app| app.id == id)
    }

    /// Find a mini-app by exact id, or by an unambiguous id prefix
    #[must_use]
    pub fn find_mini_app(&self, id_or_prefix: &str) -> Option<&MiniApp> {
        if id_or_prefix.is_empty() {
            return None;
        }
        if let Some(app) = self.mini_app(id_or_prefix) {
            return Some(app);
        }

        let mut matches = self
            .mini_apps
            .iter()
            .filter(|app| app.id.starts_with(id_or_prefix));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    /// The active mini-app, if the selection names one that still exists
    #[must_use]
    pub fn active_mini_app(&self) -> Option<&MiniApp> {
        self.active_mini_app_id
            .as_deref()
            .and_then(|id| self.mini_app(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_apps(ids: &[&str]) -> AppState {
        AppState {
            mini_apps: ids
                .iter()
                .map(|id| MiniAppDraft::new(format!("App {id}")).into_mini_app((*id).to_string(), "m"))
                .collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn test_defaults() {
        let state = AppState::default();
        assert!(state.api_key.is_none());
        assert!(state.save_api_key);
        assert!(state.mini_apps.is_empty());
        assert!(state.active_mini_app_id.is_none());
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.models, catalog::model_options());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let state = AppState {
            api_key: Some("sk-very-secret".to_string()),
            ..AppState::default()
        };
        let debug = format!("{state:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_find_mini_app_by_prefix() {
        let state = state_with_apps(&["abc123", "abd456", "xyz"]);

        assert_eq!(state.find_mini_app("xyz").map(|a| a.id.as_str()), Some("xyz"));
        assert_eq!(state.find_mini_app("abc").map(|a| a.id.as_str()), Some("abc123"));
        // Ambiguous prefix
        assert!(state.find_mini_app("ab").is_none());
        assert!(state.find_mini_app("").is_none());
        assert!(state.find_mini_app("nope").is_none());
    }

    #[test]
    fn test_active_mini_app_ignores_dangling_id() {
        let mut state = state_with_apps(&["a"]);
        state.active_mini_app_id = Some("a".to_string());
        assert_eq!(state.active_mini_app().map(|a| a.id.as_str()), Some("a"));

        state.active_mini_app_id = Some("deleted".to_string());
        assert!(state.active_mini_app().is_none());
    }
}
