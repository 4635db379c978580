//! Credential and model list form

use super::FormError;
use crate::app_state::AppState;
use crate::catalog::{self, ModelOption};
use crate::store::StateStore;

/// Working copy of the credential and model settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Key as typed; blank means "no key"
    pub api_key: String,

    /// Whether the key should be written to storage
    pub save_api_key: bool,

    /// Model rows being edited
    pub models: Vec<ModelOption>,
}

impl SettingsForm {
    /// Seed the form from a snapshot
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self {
            api_key: state.api_key.clone().unwrap_or_default(),
            save_api_key: state.save_api_key,
            models: catalog::models_or_catalog(&state.models),
        }
    }

    /// Append an empty model row
    pub fn add_model_row(&mut self) {
        self.models.push(ModelOption::new("", ""));
    }

    /// Edit one model row. Returns `false` if the row does not exist.
    pub fn update_model_row(
        &mut self,
        index: usize,
        identifier: Option<&str>,
        label: Option<&str>,
    ) -> bool {
        let Some(row) = self.models.get_mut(index) else {
            return false;
        };
        if let Some(identifier) = identifier {
            row.identifier = identifier.to_string();
        }
        if let Some(label) = label {
            row.label = label.to_string();
        }
        true
    }

    /// Remove a model row
    pub fn remove_model_row(&mut self, index: usize) -> Option<ModelOption> {
        (index < self.models.len()).then(|| self.models.remove(index))
    }

    /// Replace the rows with the built-in catalog
    pub fn reset_models(&mut self) {
        self.models = catalog::model_options();
    }

    /// Whether the form differs from `state`
    #[must_use]
    pub fn is_changed(&self, state: &AppState) -> bool {
        self.api_key != state.api_key.as_deref().unwrap_or_default()
            || self.save_api_key != state.save_api_key
            || self.models != state.models
    }

    /// Check the model rows
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoModels`] for an empty list and
    /// [`FormError::BlankModelField`] for the first row with a blank field.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.models.is_empty() {
            return Err(FormError::NoModels);
        }
        match self.models.iter().position(ModelOption::is_blank) {
            Some(index) => Err(FormError::BlankModelField { row: index + 1 }),
            None => Ok(()),
        }
    }

    /// Validate, then write the models and the credential to the store
    ///
    /// # Errors
    ///
    /// Returns the validation error; the store is untouched in that case.
    pub fn submit(self, store: &mut StateStore) -> Result<(), FormError> {
        self.validate()?;

        let key = self.api_key.trim();
        let api_key = (!key.is_empty()).then(|| key.to_string());

        store.set_models(self.models);
        store.set_api_key(api_key, self.save_api_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_state_falls_back_to_catalog() {
        let state = AppState {
            models: Vec::new(),
            ..AppState::default()
        };
        let form = SettingsForm::from_state(&state);
        assert_eq!(form.models, catalog::model_options());
        assert!(form.api_key.is_empty());
        assert!(form.save_api_key);
    }

    #[test]
    fn test_row_editing() {
        let mut form = SettingsForm::from_state(&AppState::default());
        form.add_model_row();
        let last = form.models.len() - 1;

        assert!(form.update_model_row(last, Some("local"), None));
        assert!(form.update_model_row(last, None, Some("Local")));
        assert!(!form.update_model_row(99, Some("x"), None));
        assert_eq!(form.models[last], ModelOption::new("local", "Local"));

        assert_eq!(
            form.remove_model_row(0).map(|m| m.identifier),
            Some(catalog::DEFAULT_MODEL.to_string())
        );
        assert!(form.remove_model_row(99).is_none());

        form.reset_models();
        assert_eq!(form.models, catalog::model_options());
    }

    #[test]
    fn test_validate() {
        let mut form = SettingsForm::from_state(&AppState::default());
        assert_eq!(form.validate(), Ok(()));

        form.add_model_row();
        assert_eq!(form.validate(), Err(FormError::BlankModelField { row: 4 }));

        form.models.clear();
        assert_eq!(form.validate(), Err(FormError::NoModels));
    }

    #[test]
    fn test_is_changed() {
        let state = AppState::default();
        let mut form = SettingsForm::from_state(&state);
        assert!(!form.is_changed(&state));

        form.api_key = "sk".to_string();
        assert!(form.is_changed(&state));

        form.api_key.clear();
        form.save_api_key = false;
        assert!(form.is_changed(&state));
    }

    #[test]
    fn test_submit_trims_key() -> Result<(), FormError> {
        let mut store = StateStore::open(MemoryStorage::new());
        let mut form = SettingsForm::from_state(store.state());
        form.api_key = "  sk-123  ".to_string();
        form.save_api_key = false;
        form.models = vec![ModelOption::new("m1", "M1")];
        form.submit(&mut store)?;

        let state = store.state();
        assert_eq!(state.api_key.as_deref(), Some("sk-123"));
        assert!(!state.save_api_key);
        assert_eq!(state.models, vec![ModelOption::new("m1", "M1")]);
        Ok(())
    }

    #[test]
    fn test_submit_blank_key_clears_it() -> Result<(), FormError> {
        let mut store = StateStore::open(MemoryStorage::new());
        store.set_api_key(Some("old".to_string()), true);

        let mut form = SettingsForm::from_state(store.state());
        form.api_key = "   ".to_string();
        form.submit(&mut store)?;

        assert!(store.state().api_key.is_none());
        Ok(())
    }

    #[test]
    fn test_submit_invalid_leaves_store_untouched() {
        let storage = MemoryStorage::new();
        let mut store = StateStore::open(storage.clone());
        let mut form = SettingsForm::from_state(store.state());
        form.api_key = "sk".to_string();
        form.models.clear();

        assert_eq!(form.submit(&mut store), Err(FormError::NoModels));
        assert!(store.state().api_key.is_none());
        assert_eq!(storage.writes(), 0);
    }
}
