//! Form logic for editing settings and mini-apps
//!
//! Forms hold a working copy, validate it, and only then call the store. The
//! store itself accepts anything; rejecting bad input is the form's job.

mod mini_app;
mod settings;

pub use mini_app::MiniAppForm;
pub use settings::SettingsForm;

/// Validation failures reported before the store is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The model list is empty
    #[error("add at least one model option")]
    NoModels,

    /// A model row has a blank identifier or label
    #[error("model value and label cannot be empty (row {row})")]
    BlankModelField {
        /// One-based row number
        row: usize,
    },

    /// The mini-app name is blank
    #[error("mini-app name cannot be empty")]
    BlankName,
}
