//! Mini-app definitions

use serde::{Deserialize, Serialize};

/// A user-defined bundle of a name, a model and a system prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniApp {
    /// Opaque identifier assigned by the store
    pub id: String,

    /// Display name
    pub name: String,

    /// Model identifier; not checked against the model list
    #[serde(default)]
    pub model: String,

    /// System prompt, possibly empty
    #[serde(default)]
    pub system_prompt: String,
}

impl MiniApp {
    /// First eight characters of the id, for display
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }
}

/// A mini-app that has not been given an id yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiniAppDraft {
    /// Display name
    pub name: String,

    /// Model identifier; empty means "use the default model"
    pub model: String,

    /// System prompt, possibly empty
    pub system_prompt: String,
}

impl MiniAppDraft {
    /// Start a draft with the given name, no model and no prompt
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Turn the draft into a mini-app, using `fallback_model` if no model was chosen
    pub(crate) fn into_mini_app(self, id: String, fallback_model: &str) -> MiniApp {
        let model = if self.model.is_empty() {
            fallback_model.to_string()
        } else {
            self.model
        };

        MiniApp {
            id,
            name: self.name,
            model,
            system_prompt: self.system_prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_mini_app_keeps_chosen_model() {
        let app = MiniAppDraft::new("Writer")
            .with_model("m2")
            .with_system_prompt("Be terse")
            .into_mini_app("id-1".to_string(), "m1");

        assert_eq!(app.id, "id-1");
        assert_eq!(app.name, "Writer");
        assert_eq!(app.model, "m2");
        assert_eq!(app.system_prompt, "Be terse");
    }

    #[test]
    fn test_into_mini_app_substitutes_fallback() {
        let app = MiniAppDraft::new("Writer").into_mini_app("id-1".to_string(), "m1");
        assert_eq!(app.model, "m1");
        assert!(app.system_prompt.is_empty());
    }

    #[test]
    fn test_short_id() {
        let app = MiniAppDraft::new("x").into_mini_app("0123456789abcdef".to_string(), "m");
        assert_eq!(app.short_id(), "01234567");

        let short = MiniAppDraft::new("x").into_mini_app("abc".to_string(), "m");
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn test_missing_optional_fields_deserialize() -> Result<(), Box<dyn std::error::Error>> {
        let app: MiniApp = serde_json::from_str(r#"{"id":"a","name":"Legacy"}"#)?;
        assert!(app.model.is_empty());
        assert!(app.system_prompt.is_empty());
        Ok(())
    }

    #[test]
    fn test_serializes_camel_case() -> Result<(), Box<dyn std::error::Error>> {
        let app = MiniAppDraft::new("x")
            .with_system_prompt("p")
            .into_mini_app("a".to_string(), "m");
        let json = serde_json::to_value(&app)?;
        assert_eq!(json["systemPrompt"], "p");
        Ok(())
    }
}
