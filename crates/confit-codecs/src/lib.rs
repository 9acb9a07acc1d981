//! # confit-codecs
//!
//! File codecs for confit: each codec implements the
//! [`Serializer`](confit_core::Serializer) contract from `confit-core` for a
//! concrete on-disk format, plus a path-bound [`ConfigStore`] that bundles a
//! codec with the file it manages.
//!
//! Available codecs:
//!
//! - **[`TomlSerializer`]** – human-friendly TOML, the default choice for
//!   application settings.  Cannot store null values.
//! - **[`JsonSerializer`]** – pretty-printed JSON for interop with other
//!   tooling.  Cannot store non-finite floats.
//! - **[`BinarySerializer`]** – a compact binary format with full fidelity
//!   for every document value, for configuration not meant to be hand-edited.
//!
//! All three write atomically: the new content lands in a temporary file
//! next to the destination, which is then renamed over it, so a concurrent
//! reader sees either the old document or the new one and never a torn file.
//!
//! # Quick start
//!
//! ```
//! use confit_codecs::TomlSerializer;
//! use confit_core::{ConfigMap, Serializer};
//!
//! let dir = std::env::temp_dir().join(format!("confit_demo_{}", uuid::Uuid::new_v4()));
//! std::fs::create_dir_all(&dir)?;
//! let file = dir.join("app.toml");
//!
//! let serializer = TomlSerializer::new();
//! let mut doc = ConfigMap::new();
//! doc.insert("name", "demo");
//! doc.insert("port", 8080_i64);
//!
//! serializer.dump(&file, &doc)?;
//! assert_eq!(serializer.load(&file)?, doc);
//!
//! std::fs::remove_dir_all(&dir).ok();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod json;
pub mod registry;
pub mod store;
pub mod toml;

// Shared read/write plumbing for the file-backed codecs.
mod fs_util;

pub use binary::BinarySerializer;
pub use json::JsonSerializer;
pub use registry::serializer_for_path;
pub use store::{default_config_path, ConfigStore};

pub use self::toml::TomlSerializer;
