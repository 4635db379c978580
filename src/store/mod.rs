//! The application state store
//!
//! [`StateStore`] is the single writer of [`AppState`]. Every mutation swaps in
//! a new snapshot and writes it through the [`PersistenceAdapter`] before
//! returning; readers hold [`Arc`] snapshots that never change under them.

mod builder;
mod ids;

pub use builder::StoreBuilder;
pub use ids::{IdGenerator, UuidIds};

use crate::app_state::{AppState, MiniApp, MiniAppDraft, Theme};
use crate::appearance::{
    PreferenceCallback, SubscriptionId, SystemPreferenceObserver, ThemeSideEffect,
};
use crate::catalog::{self, ModelOption};
use crate::storage::{PersistenceAdapter, StorageError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the application state and keeps storage and appearance in sync with it
pub struct StateStore {
    state: Arc<AppState>,
    storage: Box<dyn PersistenceAdapter>,
    theme_effect: Arc<dyn ThemeSideEffect>,
    system: Arc<dyn SystemPreferenceObserver>,
    ids: Box<dyn IdGenerator>,
    subscription: Option<SubscriptionId>,
    storage_error: Option<StorageError>,
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .field("subscription", &self.subscription)
            .field("storage_error", &self.storage_error)
            .finish_non_exhaustive()
    }
}

impl StateStore {
    /// Start configuring a store over `storage`
    #[must_use]
    pub fn builder(storage: impl PersistenceAdapter + 'static) -> StoreBuilder {
        StoreBuilder::new(storage)
    }

    /// Open a store over `storage` with default collaborators
    #[must_use]
    pub fn open(storage: impl PersistenceAdapter + 'static) -> Self {
        Self::builder(storage).build()
    }

    fn initialize(
        storage: Box<dyn PersistenceAdapter>,
        theme_effect: Arc<dyn ThemeSideEffect>,
        system: Arc<dyn SystemPreferenceObserver>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let (state, storage_error) = match load_state(storage.as_ref()) {
            Ok(state) => (state, None),
            Err(e) => {
                warn!(error = ?e, "Failed to load persisted state, using defaults");
                (AppState::default(), Some(e))
            }
        };
        let mut store = Self {
            state: Arc::new(state),
            storage,
            theme_effect,
            system,
            ids,
            subscription: None,
            storage_error,
        };
        store.apply_theme();
        store
    }

    /// Cheap handle to the current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Borrow the current state
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Take the most recent storage failure, if any.
    ///
    /// Covers the initial load and every write since the last call. A load
    /// failure means the store started from defaults, and the next mutation
    /// will replace whatever the adapter still holds.
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    /// Set the credential and whether it is written to storage
    pub fn set_api_key(&mut self, api_key: Option<String>, save: bool) {
        self.commit(|state| {
            state.api_key = api_key;
            state.save_api_key = save;
        });
    }

    /// Replace the model list. An empty list is ignored.
    pub fn set_models(&mut self, models: Vec<ModelOption>) {
        if models.is_empty() {
            debug!("Ignoring empty model list");
            return;
        }
        self.commit(|state| state.models = models);
    }

    /// Append a mini-app and make it active, returning its new id.
    ///
    /// A draft without a model gets the first configured model.
    pub fn add_mini_app(&mut self, draft: MiniAppDraft) -> String {
        let id = self.ids.next_id();
        let app = draft.into_mini_app(id.clone(), catalog::default_model_for(&self.state.models));
        debug!(id = %app.id, model = %app.model, "Adding mini-app");

        self.commit(|state| {
            state.active_mini_app_id = Some(app.id.clone());
            state.mini_apps.push(app);
        });
        id
    }

    /// Replace every mini-app with the same id. Unknown ids are ignored.
    pub fn update_mini_app(&mut self, app: MiniApp) {
        if self.state.mini_app(&app.id).is_none() {
            debug!(id = %app.id, "Ignoring update for unknown mini-app");
            return;
        }
        self.commit(|state| {
            for slot in state.mini_apps.iter_mut().filter(|slot| slot.id == app.id) {
                slot.clone_from(&app);
            }
        });
    }

    /// Remove every mini-app with this id. Unknown ids are ignored.
    ///
    /// The active selection is left alone, even when it names the removed app.
    pub fn delete_mini_app(&mut self, id: &str) {
        if self.state.mini_app(id).is_none() {
            debug!(id, "Ignoring delete for unknown mini-app");
            return;
        }
        self.commit(|state| state.mini_apps.retain(|app| app.id != id));
    }

    /// Select a mini-app by id, or clear the selection. The id is not checked.
    pub fn set_active_mini_app_id(&mut self, id: Option<String>) {
        self.commit(|state| state.active_mini_app_id = id);
    }

    /// Change the theme and re-apply the appearance
    pub fn set_theme(&mut self, theme: Theme) {
        self.commit(|state| state.theme = theme);
        self.apply_theme();
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut AppState)) {
        // Copies only when a reader still holds the previous snapshot
        mutate(Arc::make_mut(&mut self.state));
        self.persist();
    }

    fn persist(&mut self) {
        let blob = match self.state.to_blob() {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Failed to serialize state");
                return;
            }
        };
        if let Err(e) = self.storage.save(&blob) {
            warn!(error = ?e, "Failed to persist state");
            self.storage_error = Some(e);
        }
    }

    fn apply_theme(&mut self) {
        let theme = self.state.theme;
        self.theme_effect
            .apply(theme.is_dark(self.system.prefers_dark()));

        if theme.follows_system() {
            self.watch_system_preference();
        } else {
            self.release_subscription();
        }
    }

    fn watch_system_preference(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let effect = Arc::clone(&self.theme_effect);
        let callback: PreferenceCallback =
            Arc::new(move |prefers_dark: bool| effect.apply(Theme::System.is_dark(prefers_dark)));
        let id = self.system.subscribe(callback);
        debug!(subscription = id.get(), "Watching system theme preference");
        self.subscription = Some(id);
    }

    fn release_subscription(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.system.unsubscribe(id);
            debug!(subscription = id.get(), "Stopped watching system theme preference");
        }
    }
}

impl Drop for StateStore {
    fn drop(&mut self) {
        self.release_subscription();
    }
}

fn load_state(storage: &dyn PersistenceAdapter) -> Result<AppState, StorageError> {
    let state = match storage.load()? {
        Some(blob) => match AppState::from_blob(&blob) {
            Ok(state) => {
                debug!(
                    mini_apps = state.mini_apps.len(),
                    models = state.models.len(),
                    "Loaded persisted state"
                );
                state
            }
            Err(e) => {
                warn!(error = ?e, "Persisted state is malformed, using defaults");
                AppState::default()
            }
        },
        None => {
            debug!("No persisted state, using defaults");
            AppState::default()
        }
    };
    Ok(state)
}
