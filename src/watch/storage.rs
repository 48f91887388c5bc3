//! Durable storage for the link and article collections.
//!
//! Each collection lives in one document that is read and written
//! wholesale. [`FileDocument`] keeps it on disk; [`MemoryDocument`] keeps it
//! in memory for tests and throwaway sessions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::{LinkwatchError, Result};

/// A whole-document storage port.
pub trait Document {
    /// Read the stored document, or `None` if nothing has been stored.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn write(&self, contents: &str) -> Result<()>;
}

/// A document kept in a single file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    /// Create a document backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
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
}

impl Document for FileDocument {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some).map_err(|e| {
            LinkwatchError::StorageRead(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write(&self, contents: &str) -> Result<()> {
        let to_write_error =
            |e: std::io::Error| LinkwatchError::StorageWrite(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(to_write_error)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, contents).map_err(to_write_error)?;
        fs::rename(&temp, &self.path).map_err(to_write_error)
    }
}

/// An in-memory document.
///
/// Clones share the same contents, so a test can keep a handle after
/// moving a clone into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let doc = Self::default();
        if let Ok(mut guard) = doc.contents.lock() {
            *guard = Some(contents.into());
        }
        doc
    }

    /// Current contents.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Document for MemoryDocument {
    fn read(&self) -> Result<Option<String>> {
        self.contents
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| LinkwatchError::StorageRead(e.to_string()))
    }

    fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LinkwatchError::StorageWrite(
                "memory document is read-only".to_string(),
            ));
        }
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| LinkwatchError::StorageWrite(e.to_string()))?;
        *guard = Some(contents.to_string());
        Ok(())
    }
}

/// Load a JSON collection from `doc`.
///
/// A missing document yields the empty collection. An unreadable or
/// undecodable document is logged and also yields the empty collection.
pub fn load_json<T, D>(doc: &D) -> T
where
    T: DeserializeOwned + Default,
    D: Document,
{
    match read_json(doc) {
        Ok(value) => value,
        Err(e) => {
            warn!("Falling back to an empty collection: {}", e);
            T::default()
        }
    }
}

fn read_json<T, D>(doc: &D) -> Result<T>
where
    T: DeserializeOwned + Default,
    D: Document,
{
    match doc.read()? {
        None => Ok(T::default()),
        Some(text) if text.trim().is_empty() => Ok(T::default()),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| LinkwatchError::StorageRead(format!("invalid JSON: {e}"))),
    }
}

/// Write `value` to `doc` as pretty-printed JSON.
pub fn save_json<T, D>(doc: &D, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    D: Document,
{
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| LinkwatchError::StorageWrite(format!("failed to encode JSON: {e}")))?;
    doc.write(&text)
}
