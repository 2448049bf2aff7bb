//! Flat-file document storage.
//!
//! A collection is persisted as one pretty-printed JSON array. Every read
//! decodes the whole array and every write replaces the whole file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors raised by the storage accessor.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("storage i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage document {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// JSON array document holding a whole collection of `T`.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileStore<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty collection if the document does not exist yet.
    ///
    /// Returns `true` when a new document was written.
    pub fn ensure_exists(&self) -> StorageResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        self.save(&[])?;
        tracing::info!(target: "shelf-db", path = %self.path.display(), "created empty collection");
        Ok(true)
    }

    /// Read and decode the full collection.
    pub fn load(&self) -> StorageResult<Vec<T>> {
        let raw = fs::read(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(self.path.clone())
            } else {
                self.io_error(e)
            }
        })?;

        serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored collection.
    ///
    /// The document is written to a sibling temp file, synced, then renamed
    /// over the target so readers see either the old or the new collection.
    pub fn save(&self, records: &[T]) -> StorageResult<()> {
        let content = serde_json::to_vec_pretty(records).map_err(StorageError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| self.io_error(e))?;

        file.write_all(&content).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        tracing::debug!(
            target: "shelf-db",
            path = %self.path.display(),
            records = records.len(),
            "collection saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
