//! File-backed storage

use super::{PersistenceAdapter, StorageError};
use fs4::fs_std::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores the blob in a single JSON file.
///
/// Writes go to a sibling temporary file that is renamed over the target while
/// an exclusive lock on a sibling `.lock` file is held, so readers never see a
/// half-written blob and two processes never interleave writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for `key` inside `dir`, at `<dir>/<key>.json`
    #[must_use]
    pub fn for_key(dir: &Path, key: &str) -> Self {
        Self::new(dir.join(format!("{key}.json")))
    }

    /// Path of the state file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("state"), ToOwned::to_owned);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, blob: &str) -> io::Result<()> {
        let tmp_path = self.sibling(".tmp");
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(blob.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(&tmp_path, &self.path)
    }
}

impl PersistenceAdapter for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => {
                debug!(path = %self.path.display(), "Loaded state file");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "State file not found");
                Ok(None)
            }
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, blob: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let lock_path = self.sibling(".lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .and_then(|file| FileExt::lock_exclusive(&file).map(|()| file))
            .map_err(|source| StorageError::Lock {
                path: lock_path,
                source,
            })?;

        let result = self
            .write_atomically(blob)
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            });
        // Closing the handle releases the lock
        drop(lock);

        result?;
        debug!(path = %self.path.display(), bytes = blob.len(), "Saved state file");
        Ok(())
    }
}
