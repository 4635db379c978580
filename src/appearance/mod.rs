//! Theme side effects and system preference tracking
//!
//! The store never touches the presentation layer itself. It decides when the
//! effective darkness changes and hands the result to a [`ThemeSideEffect`].
//! While the theme is [`Theme::System`](crate::app_state::Theme::System) it also
//! listens to a [`SystemPreferenceObserver`].

mod applied;
mod system;

pub use applied::{Appearance, AppliedAppearance};
pub use system::SystemPreference;

use std::sync::Arc;

/// Applies the effective light/dark appearance to the presentation layer
pub trait ThemeSideEffect: Send + Sync {
    /// Apply dark (`true`) or light (`false`) presentation
    fn apply(&self, effective_dark: bool);
}

impl<F> ThemeSideEffect for F
where
    F: Fn(bool) + Send + Sync,
{
    fn apply(&self, effective_dark: bool) {
        self(effective_dark);
    }
}

/// Callback invoked with the new system preference (`true` for dark)
pub type PreferenceCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Handle returned by [`SystemPreferenceObserver::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw subscription number
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw subscription number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Source of the system-level dark/light preference
pub trait SystemPreferenceObserver: Send + Sync {
    /// Whether the system currently prefers dark presentation
    fn prefers_dark(&self) -> bool;

    /// Register a callback for preference changes
    fn subscribe(&self, callback: PreferenceCallback) -> SubscriptionId;

    /// Remove a callback; unknown ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}
