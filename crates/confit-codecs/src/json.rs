//! JSON codec.
//!
//! Pretty-printed JSON with a trailing newline, for configuration shared
//! with tooling in other ecosystems.  The document model maps onto JSON
//! one-to-one with a single exception: JSON has no spelling for NaN or the
//! infinities, so dumping a document containing a non-finite float fails
//! with [`SerializerError::Unsupported`] naming the offending key, before
//! anything is written.  Degrading such values to `null` behind the
//! caller's back would break the round-trip promise.
//!
//! On load, integers outside the `i64` range are rejected as malformed
//! rather than silently converted to floats.

use std::path::Path;

use confit_core::{ConfigMap, ConfigValue, Serializer, SerializerError, SerializerResult};
use tracing::debug;

use crate::fs_util::{read_file, write_atomic};

// ── JsonSerializer ────────────────────────────────────────────────────────────

/// [`Serializer`] implementation for JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Creates a JSON serializer.
    pub fn new() -> Self {
        JsonSerializer
    }
}

impl Serializer for JsonSerializer {
    fn dump(&self, file: &Path, data: &ConfigMap) -> SerializerResult<()> {
        reject_non_finite_in_table(data, "")?;

        let mut bytes = serde_json::to_vec_pretty(data).map_err(|e| SerializerError::Unsupported {
            format: "json",
            detail: e.to_string(),
        })?;
        bytes.push(b'\n');

        write_atomic(file, &bytes)?;
        debug!(path = %file.display(), keys = data.len(), "dumped JSON document");
        Ok(())
    }

    fn load(&self, file: &Path) -> SerializerResult<ConfigMap> {
        let bytes = read_file(file)?;
        let doc: ConfigMap = serde_json::from_slice(&bytes).map_err(|e| SerializerError::Format {
            format: "json",
            path: file.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %file.display(), keys = doc.len(), "loaded JSON document");
        Ok(doc)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}

// ── Non-finite float rejection ────────────────────────────────────────────────

/// Walks the table looking for NaN or infinite floats.
///
/// `at` is the dotted path of the table being walked, used to point error
/// messages at the offending key; the root table passes `""`.
fn reject_non_finite_in_table(map: &ConfigMap, at: &str) -> SerializerResult<()> {
    for (key, value) in map {
        let location = if at.is_empty() {
            key.clone()
        } else {
            format!("{at}.{key}")
        };
        reject_non_finite(value, &location)?;
    }
    Ok(())
}

fn reject_non_finite(value: &ConfigValue, at: &str) -> SerializerResult<()> {
    match value {
        ConfigValue::Float(f) if !f.is_finite() => Err(SerializerError::Unsupported {
            format: "json",
            detail: format!("the non-finite float `{f}` at `{at}`"),
        }),
        ConfigValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                reject_non_finite(item, &format!("{at}[{index}]"))?;
            }
            Ok(())
        }
        ConfigValue::Table(map) => reject_non_finite_in_table(map, at),
        _ => Ok(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
