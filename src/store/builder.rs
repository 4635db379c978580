//! Store construction

use super::{IdGenerator, StateStore, UuidIds};
use crate::appearance::{SystemPreference, SystemPreferenceObserver, ThemeSideEffect};
use crate::storage::PersistenceAdapter;
use std::fmt;
use std::sync::Arc;

/// Collects the collaborators of a [`StateStore`].
///
/// Anything not supplied falls back to a default: no visible theme side
/// effect, a light system preference that never changes, and random UUID ids.
pub struct StoreBuilder {
    storage: Box<dyn PersistenceAdapter>,
    theme_effect: Arc<dyn ThemeSideEffect>,
    system: Arc<dyn SystemPreferenceObserver>,
    ids: Box<dyn IdGenerator>,
}

impl fmt::Debug for StoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreBuilder").finish_non_exhaustive()
    }
}

impl StoreBuilder {
    /// Builder over `storage` with default collaborators
    #[must_use]
    pub fn new(storage: impl PersistenceAdapter + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            theme_effect: Arc::new(|_: bool| {}),
            system: Arc::new(SystemPreference::default()),
            ids: Box::new(UuidIds),
        }
    }

    /// Side effect invoked whenever the effective appearance is (re)applied
    #[must_use]
    pub fn theme_effect(mut self, effect: impl ThemeSideEffect + 'static) -> Self {
        self.theme_effect = Arc::new(effect);
        self
    }

    /// Source of the system dark/light preference
    #[must_use]
    pub fn system_preference(mut self, observer: impl SystemPreferenceObserver + 'static) -> Self {
        self.system = Arc::new(observer);
        self
    }

    /// Generator for new mini-app ids
    #[must_use]
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Load persisted state, apply the theme and return the store
    #[must_use]
    pub fn build(self) -> StateStore {
        StateStore::initialize(self.storage, self.theme_effect, self.system, self.ids)
    }
}
