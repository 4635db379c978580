//! In-process storage

use super::{PersistenceAdapter, StorageError};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Slot {
    blob: Option<String>,
    writes: usize,
}

/// Keeps the blob in memory.
///
/// Clones share the same slot, so a caller can hand one clone to the store and
/// keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a blob
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slot.lock().blob = Some(blob.into());
        storage
    }

    /// Current blob
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.slot.lock().blob.clone()
    }

    /// Number of saves so far
    #[must_use]
    pub fn writes(&self) -> usize {
        self.slot.lock().writes
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.blob())
    }

    fn save(&self, blob: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.lock();
        slot.blob = Some(blob.to_string());
        slot.writes += 1;
        Ok(())
    }
}
