//! Create/edit form for a single mini-app

use super::FormError;
use crate::app_state::{AppState, MiniApp, MiniAppDraft};
use crate::catalog::{self, ModelOption};
use crate::store::StateStore;

/// Working copy of a mini-app being created or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniAppForm {
    /// Name as typed
    pub name: String,

    /// Selected model identifier
    pub model: String,

    /// System prompt as typed
    pub system_prompt: String,

    editing: Option<MiniApp>,
}

impl MiniAppForm {
    /// Blank form preselecting the first configured model
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            name: String::new(),
            model: catalog::default_model_for(&state.models).to_string(),
            system_prompt: String::new(),
            editing: None,
        }
    }

    /// Form seeded from an existing mini-app
    #[must_use]
    pub fn edit(app: &MiniApp) -> Self {
        Self {
            name: app.name.clone(),
            model: app.model.clone(),
            system_prompt: app.system_prompt.clone(),
            editing: Some(app.clone()),
        }
    }

    /// The app being edited, if any
    #[must_use]
    pub const fn editing(&self) -> Option<&MiniApp> {
        self.editing.as_ref()
    }

    /// Models to offer in the picker.
    ///
    /// When editing an app whose model is no longer listed, that model is
    /// appended so the current choice stays selectable.
    #[must_use]
    pub fn model_choices(&self, state: &AppState) -> Vec<ModelOption> {
        let mut choices = catalog::models_or_catalog(&state.models);
        if let Some(app) = &self.editing
            && !choices.iter().any(|option| option.identifier == app.model)
        {
            choices.push(ModelOption::new(
                app.model.clone(),
                format!("{} (existing)", app.model),
            ));
        }
        choices
    }

    /// Create or update the mini-app, returning its id
    ///
    /// # Errors
    ///
    /// Returns [`FormError::BlankName`] if the name is blank; the store is
    /// untouched in that case.
    pub fn submit(self, store: &mut StateStore) -> Result<String, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::BlankName);
        }
        let system_prompt = self.system_prompt.trim().to_string();

        let id = match self.editing {
            Some(app) => {
                let id = app.id.clone();
                store.update_mini_app(MiniApp {
                    name: name.to_string(),
                    model: self.model,
                    system_prompt,
                    ..app
                });
                id
            }
            None => store.add_mini_app(
                MiniAppDraft::new(name)
                    .with_model(self.model)
                    .with_system_prompt(system_prompt),
            ),
        };
        Ok(id)
    }
}
