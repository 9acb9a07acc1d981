//! Maps file extensions to codecs.
//!
//! Keeping the mapping in one place means tools that accept arbitrary
//! configuration paths ("open whatever the user pointed us at") agree on
//! which codec handles which extension.

use std::path::Path;
use std::sync::Arc;

use confit_core::Serializer;

use crate::binary::BinarySerializer;
use crate::json::JsonSerializer;
use crate::toml::TomlSerializer;

/// Conventional extension for the binary format.
pub const BINARY_EXTENSION: &str = "cfit";

/// Picks a codec from the file extension of `path`.
///
/// Recognised extensions (case-insensitive): `toml`, `json`, and
/// [`cfit`](BINARY_EXTENSION).  Returns `None` for anything else, including
/// paths with no extension at all; the caller decides whether that warrants
/// a default or an error.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use confit_codecs::serializer_for_path;
///
/// let codec = serializer_for_path(Path::new("settings.toml")).unwrap();
/// assert_eq!(codec.format_name(), "toml");
///
/// assert!(serializer_for_path(Path::new("settings.yaml")).is_none());
/// ```
pub fn serializer_for_path(path: &Path) -> Option<Arc<dyn Serializer>> {
    let extension = path.extension()?.to_str()?;
    match extension.to_ascii_lowercase().as_str() {
        "toml" => Some(Arc::new(TomlSerializer::new())),
        "json" => Some(Arc::new(JsonSerializer::new())),
        BINARY_EXTENSION => Some(Arc::new(BinarySerializer::new())),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
