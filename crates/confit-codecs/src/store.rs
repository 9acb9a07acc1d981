//! Path-bound configuration store.
//!
//! A [`ConfigStore`] bundles a codec with the file it manages, so application
//! code can say `store.load()` instead of threading the same path and
//! serializer pair through every call site.  The store also owns the two
//! conveniences almost every application wants:
//!
//! - `load_or_default` turns "file not there yet" into an empty document,
//!   which is the normal first-run experience.
//! - `save` creates missing parent directories before dumping.
//!
//! [`default_config_path`] resolves the platform-appropriate location:
//!
//! - Windows:  `%APPDATA%\<app>\<file>`
//! - Linux:    `$XDG_CONFIG_HOME/<app>/<file>` or `~/.config/<app>/<file>`
//! - macOS:    `~/Library/Application Support/<app>/<file>`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use confit_core::{ConfigMap, Serializer, SerializerError, SerializerResult};
use tracing::{debug, warn};

use crate::registry::serializer_for_path;

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// A configuration file plus the codec that reads and writes it.
///
/// The store holds its serializer behind an `Arc`, so cloning a store is
/// cheap and a single codec instance can serve several stores.
///
/// # Examples
///
/// ```
/// use confit_core::{ConfigMap, MemorySerializer};
/// use confit_codecs::ConfigStore;
/// use std::sync::Arc;
///
/// let store = ConfigStore::new(Arc::new(MemorySerializer::new()), "app.conf");
///
/// let mut doc = store.load_or_default()?;
/// doc.insert("launches", 1_i64);
/// store.save(&doc)?;
///
/// assert_eq!(store.load()?, doc);
/// # Ok::<(), confit_core::SerializerError>(())
/// ```
#[derive(Clone)]
pub struct ConfigStore {
    serializer: Arc<dyn Serializer>,
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store binding `serializer` to `path`.
    pub fn new(serializer: Arc<dyn Serializer>, path: impl Into<PathBuf>) -> Self {
        ConfigStore {
            serializer,
            path: path.into(),
        }
    }

    /// Creates a store picking the codec from the extension of `path`.
    ///
    /// Returns `None` when the extension is not one the
    /// [registry](crate::registry) recognises.
    pub fn for_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let serializer = serializer_for_path(&path)?;
        Some(ConfigStore { serializer, path })
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the complete document.
    ///
    /// # Errors
    ///
    /// Propagates the serializer error unchanged; in particular
    /// [`SerializerError::NotFound`] when the file does not exist.
    pub fn load(&self) -> SerializerResult<ConfigMap> {
        self.serializer.load(&self.path)
    }

    /// Loads the document, treating a missing file as an empty one.
    ///
    /// Only `NotFound` is converted; a malformed file still fails loudly.
    /// Silently replacing a corrupt document with defaults would destroy the
    /// user's file on the next save.
    ///
    /// # Errors
    ///
    /// Returns every error except [`SerializerError::NotFound`] unchanged.
    pub fn load_or_default(&self) -> SerializerResult<ConfigMap> {
        match self.serializer.load(&self.path) {
            Ok(doc) => Ok(doc),
            Err(e) if e.is_not_found() => {
                warn!(path = %self.path.display(), "no configuration file yet, starting empty");
                Ok(ConfigMap::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Persists `data`, creating missing parent directories first.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Io`] if the directories cannot be created,
    /// otherwise propagates the serializer error.
    pub fn save(&self, data: &ConfigMap) -> SerializerResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|source| SerializerError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        self.serializer.dump(&self.path, data)?;
        debug!(path = %self.path.display(), keys = data.len(), "configuration saved");
        Ok(())
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("format", &self.serializer.format_name())
            .field("path", &self.path)
            .finish()
    }
}

// ── Default location ──────────────────────────────────────────────────────────

/// Resolves the conventional per-user path for `file_name` of application
/// `app_name`, e.g. `default_config_path("confit-demo", "settings.toml")`.
///
/// Returns `None` when the environment gives no base to work from (no
/// `%APPDATA%` on Windows, no `$HOME` on Unix), or on platforms without a
/// configuration directory convention.  The file and its directories are
/// not created; pair this with [`ConfigStore::save`], which creates them.
pub fn default_config_path(app_name: &str, file_name: &str) -> Option<PathBuf> {
    Some(platform_config_dir()?.join(app_name).join(file_name))
}

/// Resolves the platform config base directory without the application
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        // Fallback for unsupported platforms.
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use confit_core::MemorySerializer;
    use uuid::Uuid;

    use crate::toml::TomlSerializer;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("confit_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_doc() -> ConfigMap {
        let mut doc = ConfigMap::new();
        doc.insert("theme", "dark");
        doc.insert("autosave", true);
        doc
    }

    #[test]
    fn test_save_then_load_round_trips_via_file() {
        // Arrange
        let dir = scratch_dir();
        let store = ConfigStore::new(Arc::new(TomlSerializer::new()), dir.join("app.toml"));

        // Act
        store.save(&sample_doc()).unwrap();
        let restored = store.load().unwrap();

        // Assert
        assert_eq!(restored, sample_doc());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_creates_missing_parent_directories() {
        let dir = scratch_dir();
        let nested = dir.join("a").join("b").join("app.toml");
        let store = ConfigStore::new(Arc::new(TomlSerializer::new()), &nested);

        store.save(&sample_doc()).unwrap();

        assert!(nested.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_exists_flips_after_first_save() {
        let dir = scratch_dir();
        let store = ConfigStore::new(Arc::new(TomlSerializer::new()), dir.join("app.toml"));

        assert!(!store.exists());
        store.save(&sample_doc()).unwrap();
        assert!(store.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_default_returns_empty_for_missing_file() {
        let dir = scratch_dir();
        let store = ConfigStore::new(Arc::new(TomlSerializer::new()), dir.join("app.toml"));

        let doc = store.load_or_default().unwrap();

        assert!(doc.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_default_does_not_mask_a_corrupt_file() {
        // Arrange: the file exists but is not valid TOML.
        let dir = scratch_dir();
        let path = dir.join("app.toml");
        std::fs::write(&path, "[[[ broken").unwrap();
        let store = ConfigStore::new(Arc::new(TomlSerializer::new()), &path);

        // Act
        let err = store.load_or_default().unwrap_err();

        // Assert
        assert!(matches!(err, SerializerError::Format { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_store_works_against_the_in_memory_serializer() {
        // The exact same store code, no filesystem involved.
        let store = ConfigStore::new(Arc::new(MemorySerializer::new()), "app.conf");

        store.save(&sample_doc()).unwrap();
        let restored = store.load().unwrap();

        assert_eq!(restored, sample_doc());
    }

    #[test]
    fn test_for_path_picks_codec_from_extension() {
        let store = ConfigStore::for_path("settings.json").unwrap();

        assert!(format!("{store:?}").contains("json"));
        assert_eq!(store.path(), Path::new("settings.json"));
    }

    #[test]
    fn test_for_path_rejects_unknown_extension() {
        assert!(ConfigStore::for_path("settings.yaml").is_none());
    }

    #[test]
    fn test_default_config_path_joins_app_and_file() {
        if let Some(path) = default_config_path("confit-demo", "settings.toml") {
            assert!(path.ends_with(Path::new("confit-demo").join("settings.toml")));
        }
        // None is acceptable in a stripped environment with no HOME/APPDATA.
    }
}
