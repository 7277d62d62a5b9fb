#![forbid(unsafe_code)]

//! Storage backends for the "tour already seen" flag.
//!
//! The controller reads the guide's `local_key` once at start and writes it
//! on completion or close. Backends take `&self` so one store can be shared
//! between a controller and whoever inspects it.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: process-local map, for tests and embedding.
//! - [`FileStorage`] (`state-persistence` feature): one JSON file holding
//!   every key, written atomically (temp file then rename).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// The backing file exists but does not parse.
    Corrupted(String),
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Corrupted(msg) => write!(f, "storage file corrupted: {msg}"),
            Self::Serialization(msg) => write!(f, "storage serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Key/value persistence used for completion flags.
pub trait StorageBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `key = value`.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use serde::{Deserialize, Serialize};

    use super::{StorageBackend, StorageError, StorageResult};

    const FORMAT_VERSION: u64 = 1;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct StoreFile {
        version: u64,
        entries: BTreeMap<String, String>,
    }

    /// JSON file storage.
    ///
    /// A missing file reads as empty. Every write rewrites the whole file
    /// through a sibling `.tmp` file and a rename.
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        write_lock: Mutex<()>,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                write_lock: Mutex::new(()),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> StorageResult<StoreFile> {
            if !self.path.exists() {
                return Ok(StoreFile {
                    version: FORMAT_VERSION,
                    entries: BTreeMap::new(),
                });
            }
            let contents = std::fs::read_to_string(&self.path)?;
            let file: StoreFile = serde_json::from_str(&contents)
                .map_err(|e| StorageError::Corrupted(e.to_string()))?;
            if file.version != FORMAT_VERSION {
                return Err(StorageError::Corrupted(format!(
                    "unsupported version {} (expected {FORMAT_VERSION})",
                    file.version
                )));
            }
            Ok(file)
        }

        fn store(&self, file: &StoreFile) -> StorageResult<()> {
            let json = serde_json::to_string_pretty(file)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let temp = self.path.with_extension("json.tmp");
            std::fs::write(&temp, json)?;
            std::fs::rename(&temp, &self.path)?;
            Ok(())
        }

        fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> StorageResult<()> {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut file = self.load()?;
            f(&mut file.entries);
            self.store(&file)
        }
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "file"
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.load()?.entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.update(|entries| {
                entries.insert(key.to_owned(), value.to_owned());
            })
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.update(|entries| {
                entries.remove(key);
            })
        }
    }

}
