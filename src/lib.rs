//! Promptlet - local settings store for prompt mini-apps
//!
//! Promptlet keeps an API credential, a list of model options, user-defined
//! mini-apps and a theme preference in one durable snapshot. The
//! [`StateStore`] owns that snapshot, writes it through a pluggable storage
//! adapter after every change and keeps the applied appearance in sync with
//! the theme.

pub mod app_state;
pub mod appearance;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod paths;
pub mod storage;
pub mod store;

pub use app_state::{AppState, MiniApp, MiniAppDraft, Theme};
pub use catalog::ModelOption;
pub use config::Config;
pub use forms::{FormError, MiniAppForm, SettingsForm};
pub use storage::{FileStorage, MemoryStorage};
pub use store::{StateStore, StoreBuilder};
