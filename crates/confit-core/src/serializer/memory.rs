//! In-memory serializer used to take the filesystem out of the picture.
//!
//! Tests (and tools like preview modes) need to exercise code that dumps and
//! loads configuration without touching disk.  [`MemorySerializer`] stores
//! documents in a map keyed by path and honours the exact same contract as
//! the file codecs, including the error taxonomy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::error::{SerializerError, SerializerResult};
use super::Serializer;
use crate::document::ConfigMap;

// ── MemorySerializer ──────────────────────────────────────────────────────────

/// A [`Serializer`] backed by a process-local map instead of files.
///
/// Paths are compared exactly as given; no normalisation is performed, so
/// `"app.toml"` and `"./app.toml"` are two different documents.
///
/// The `failing` constructor builds an instance whose every operation fails
/// with [`SerializerError::Io`], for exercising error-handling paths.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use confit_core::{ConfigMap, MemorySerializer, Serializer};
///
/// let serializer = MemorySerializer::new();
/// let mut doc = ConfigMap::new();
/// doc.insert("retries", 3_i64);
///
/// serializer.dump(Path::new("svc.conf"), &doc)?;
///
/// let restored = serializer.load(Path::new("svc.conf"))?;
/// assert_eq!(restored, doc);
/// assert!(serializer.load(Path::new("other.conf")).is_err());
/// # Ok::<(), confit_core::SerializerError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySerializer {
    documents: Mutex<HashMap<PathBuf, ConfigMap>>,
    fail_io: bool,
}

impl MemorySerializer {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every `dump` and `load` fails with
    /// [`SerializerError::Io`].
    pub fn failing() -> Self {
        MemorySerializer {
            documents: Mutex::new(HashMap::new()),
            fail_io: true,
        }
    }

    /// Returns `true` if a document has been stored at `file`.
    pub fn contains(&self, file: &Path) -> bool {
        self.documents().contains_key(file)
    }

    /// Removes every stored document.
    pub fn clear(&self) {
        self.documents().clear();
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<PathBuf, ConfigMap>> {
        // A poisoned lock only means some thread panicked mid-operation; the
        // map itself is still a valid snapshot, so keep going.
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn injected_io_error(&self, file: &Path) -> SerializerError {
        SerializerError::Io {
            path: file.to_path_buf(),
            source: std::io::Error::other("injected I/O failure"),
        }
    }
}

impl Serializer for MemorySerializer {
    fn dump(&self, file: &Path, data: &ConfigMap) -> SerializerResult<()> {
        if self.fail_io {
            return Err(self.injected_io_error(file));
        }

        self.documents().insert(file.to_path_buf(), data.clone());
        debug!(path = %file.display(), keys = data.len(), "stored document in memory");
        Ok(())
    }

    fn load(&self, file: &Path) -> SerializerResult<ConfigMap> {
        if self.fail_io {
            return Err(self.injected_io_error(file));
        }

        let documents = self.documents();
        match documents.get(file) {
            Some(doc) => {
                debug!(path = %file.display(), keys = doc.len(), "loaded document from memory");
                Ok(doc.clone())
            }
            None => Err(SerializerError::NotFound {
                path: file.to_path_buf(),
            }),
        }
    }

    fn format_name(&self) -> &'static str {
        "memory"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
