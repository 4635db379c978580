//! Persisted representation of the application state
//!
//! Loading merges whatever fields the blob carries over the defaults, one field
//! at a time. A field with an unexpected shape keeps its default without
//! taking the rest of the blob down with it; a malformed entry inside
//! `miniApps` or `models` is skipped on its own. Saving drops the `apiKey`
//! field entirely when the user asked not to keep the key.

use super::{AppState, MiniApp, Theme};
use crate::catalog::{self, ModelOption};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

const API_KEY_FIELD: &str = "apiKey";

/// The persisted blob is present but is not a JSON object
#[derive(Debug, thiserror::Error)]
#[error("failed to parse persisted state")]
pub struct DeserializationError(#[from] serde_json::Error);

/// Fields recovered from a blob; `None` means "keep the default"
#[derive(Debug, Default)]
struct PersistedState {
    api_key: Option<String>,
    save_api_key: Option<bool>,
    mini_apps: Option<Vec<MiniApp>>,
    active_mini_app_id: Option<String>,
    theme: Option<Theme>,
    models: Option<Vec<ModelOption>>,
}

impl PersistedState {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        Self {
            api_key: field(&mut fields, API_KEY_FIELD),
            save_api_key: field(&mut fields, "saveApiKey"),
            mini_apps: list(&mut fields, "miniApps"),
            active_mini_app_id: field(&mut fields, "activeMiniAppId"),
            theme: field(&mut fields, "theme"),
            models: list(&mut fields, "models"),
        }
    }

    /// Overlay present fields on `defaults`; an absent or empty model list
    /// becomes the built-in catalog.
    fn merge_over(self, defaults: AppState) -> AppState {
        let models = match self.models {
            Some(models) if !models.is_empty() => models,
            _ => catalog::model_options(),
        };

        AppState {
            api_key: self.api_key.or(defaults.api_key),
            save_api_key: self.save_api_key.unwrap_or(defaults.save_api_key),
            mini_apps: self.mini_apps.unwrap_or(defaults.mini_apps),
            active_mini_app_id: self.active_mini_app_id.or(defaults.active_mini_app_id),
            theme: self.theme.unwrap_or(defaults.theme),
            models,
        }
    }
}

/// Take one field; `null`, absent or malformed all read as `None`
fn field<T: DeserializeOwned>(fields: &mut Map<String, Value>, name: &'static str) -> Option<T> {
    let value = fields.remove(name)?;
    match serde_json::from_value::<Option<T>>(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(field = name, error = %e, "Ignoring malformed persisted field");
            None
        }
    }
}

/// Take an array field, skipping entries that do not parse
fn list<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    name: &'static str,
) -> Option<Vec<T>> {
    match fields.remove(name)? {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        warn!(field = name, index, error = %e, "Skipping malformed persisted entry");
                        None
                    }
                })
                .collect(),
        ),
        _ => {
            warn!(field = name, "Ignoring persisted field that is not an array");
            None
        }
    }
}

impl AppState {
    /// Rebuild state from a persisted blob, merged over the defaults.
    ///
    /// A blob holding `null` yields the defaults. Fields with an unexpected
    /// shape keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializationError`] if the blob is not valid JSON or is
    /// not an object.
    pub fn from_blob(blob: &str) -> Result<Self, DeserializationError> {
        let persisted = match serde_json::from_str::<Value>(blob)? {
            Value::Null => PersistedState::default(),
            value => PersistedState::from_fields(serde_json::from_value(value)?),
        };
        Ok(persisted.merge_over(Self::default()))
    }

    /// Serialize the state for persistence, omitting `apiKey` when
    /// `save_api_key` is off.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if !self.save_api_key
            && let Value::Object(fields) = &mut value
        {
            fields.remove(API_KEY_FIELD);
        }
        serde_json::to_string_pretty(&value)
    }
}
