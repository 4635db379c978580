//! Built-in model options
//!
//! The catalog is what a fresh install offers, and what consumers fall back to
//! whenever the user's own model list is missing or empty.

use serde::{Deserialize, Serialize};

/// A selectable model backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOption {
    /// Identifier sent to the backend
    #[serde(rename = "value")]
    pub identifier: String,

    /// Label shown to the user
    pub label: String,
}

impl ModelOption {
    /// Create a model option from an identifier and a label
    #[must_use]
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
        }
    }

    /// Whether either field is blank once surrounding whitespace is ignored
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.identifier.trim().is_empty() || self.label.trim().is_empty()
    }
}

const BUILTIN: [(&str, &str); 3] = [
    ("gemini-3-flash-preview", "Gemini 3 Flash Preview"),
    ("gemini-3-pro-preview", "Gemini 3 Pro Preview"),
    ("gemini-2.5-pro", "Gemini 2.5 Pro"),
];

/// Identifier of the default model (the first catalog entry)
pub const DEFAULT_MODEL: &str = BUILTIN[0].0;

/// The built-in model options, in display order
#[must_use]
pub fn model_options() -> Vec<ModelOption> {
    BUILTIN
        .iter()
        .map(|(identifier, label)| ModelOption::new(*identifier, *label))
        .collect()
}

/// The given models, or the built-in catalog when the list is empty
#[must_use]
pub fn models_or_catalog(models: &[ModelOption]) -> Vec<ModelOption> {
    if models.is_empty() {
        model_options()
    } else {
        models.to_vec()
    }
}

/// Model assigned to a mini-app created without one.
///
/// This is the first entry's identifier, or [`DEFAULT_MODEL`] when the list is
/// empty or its first identifier is blank.
#[must_use]
pub fn default_model_for(models: &[ModelOption]) -> &str {
    models
        .first()
        .map(|option| option.identifier.as_str())
        .filter(|identifier| !identifier.is_empty())
        .unwrap_or(DEFAULT_MODEL)
}
