//! Durable storage for the serialized state blob
//!
//! An adapter holds exactly one blob under one key. The store treats every
//! failure here as non-fatal: it logs, keeps the in-memory state and holds
//! on to the error until [`StateStore::take_storage_error`] collects it.
//!
//! [`StateStore::take_storage_error`]: crate::store::StateStore::take_storage_error

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::io;
use std::path::PathBuf;

/// Errors raised by storage adapters
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The blob exists but could not be read
    #[error("failed to read state from {}", .path.display())]
    Read {
        /// Location that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The blob could not be written
    #[error("failed to write state to {}", .path.display())]
    Write {
        /// Location that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Another writer holds the storage lock and it could not be acquired
    #[error("failed to lock {}", .path.display())]
    Lock {
        /// Lock file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A durable slot holding one serialized state blob
pub trait PersistenceAdapter: Send {
    /// Read the blob, or `None` if nothing has been saved yet
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the blob
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn save(&self, blob: &str) -> Result<(), StorageError>;
}
