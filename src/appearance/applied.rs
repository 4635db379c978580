//! Side effect that records the applied appearance

use super::ThemeSideEffect;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appearance {
    /// Light presentation
    Light,
    /// Dark presentation
    Dark,
}

impl Appearance {
    /// Appearance for an effective darkness flag
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Remembers the last appearance the store applied.
///
/// Used by front ends without a document to restyle: they read
/// [`current`](Self::current) after each operation.
#[derive(Debug, Clone, Default)]
pub struct AppliedAppearance {
    current: Arc<Mutex<Option<Appearance>>>,
}

impl AppliedAppearance {
    /// Nothing applied yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last applied appearance
    #[must_use]
    pub fn current(&self) -> Option<Appearance> {
        *self.current.lock()
    }
}

impl ThemeSideEffect for AppliedAppearance {
    fn apply(&self, effective_dark: bool) {
        let appearance = Appearance::from_dark(effective_dark);
        *self.current.lock() = Some(appearance);
        info!(%appearance, "Applied appearance");
    }
}
