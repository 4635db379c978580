//! In-process system preference source

use super::{PreferenceCallback, SubscriptionId, SystemPreferenceObserver};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct Inner {
    prefers_dark: bool,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, PreferenceCallback)>,
}

/// A system preference that the embedding application updates explicitly.
///
/// Clones share state: keep one clone to call
/// [`set_prefers_dark`](Self::set_prefers_dark) when the platform reports a
/// change and hand another to the store.
#[derive(Clone, Default)]
pub struct SystemPreference {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for SystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SystemPreference")
            .field("prefers_dark", &inner.prefers_dark)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl SystemPreference {
    /// Start with the given preference
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        let preference = Self::default();
        preference.inner.lock().prefers_dark = prefers_dark;
        preference
    }

    /// Record a new preference and notify subscribers if it changed
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let callbacks: Vec<PreferenceCallback> = {
            let mut inner = self.inner.lock();
            if inner.prefers_dark == prefers_dark {
                return;
            }
            inner.prefers_dark = prefers_dark;
            inner
                .subscribers
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };

        debug!(prefers_dark, subscribers = callbacks.len(), "System preference changed");
        // Called outside the lock so a callback may read the preference again
        for callback in callbacks {
            callback(prefers_dark);
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

impl SystemPreferenceObserver for SystemPreference {
    fn prefers_dark(&self) -> bool {
        self.inner.lock().prefers_dark
    }

    fn subscribe(&self, callback: PreferenceCallback) -> SubscriptionId {
        let mut inner = self.inner.lock();
        let id = SubscriptionId::new(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .lock()
            .subscribers
            .retain(|(existing, _)| *existing != id);
    }
}
