//! TOML codec.
//!
//! TOML is the default format for hand-edited settings files: sections map
//! onto nested tables and every scalar has an obvious spelling.  The value
//! mapping is direct with two exceptions:
//!
//! - TOML has no null.  Dumping a document containing
//!   [`ConfigValue::Null`](confit_core::ConfigValue) fails with
//!   [`SerializerError::Unsupported`] naming the offending key, before
//!   anything is written.
//! - TOML datetime literals have no dedicated variant in the document model;
//!   they load as strings in their original RFC 3339 spelling.
//!
//! Output goes through `toml::to_string_pretty`, so documents dump as the
//! familiar `[section]` style rather than inline tables.

use std::path::Path;

use confit_core::{ConfigMap, ConfigValue, Serializer, SerializerError, SerializerResult};
use tracing::debug;

use crate::fs_util::{read_file, write_atomic};

// The module shares its name with the `toml` crate, so crate paths below are
// spelled `::toml` to keep the two apart.

// ── TomlSerializer ────────────────────────────────────────────────────────────

/// [`Serializer`] implementation for TOML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSerializer;

impl TomlSerializer {
    /// Creates a TOML serializer.
    pub fn new() -> Self {
        TomlSerializer
    }
}

impl Serializer for TomlSerializer {
    fn dump(&self, file: &Path, data: &ConfigMap) -> SerializerResult<()> {
        let table = to_toml_table(data, "")?;
        let text = ::toml::to_string_pretty(&table).map_err(|e| SerializerError::Unsupported {
            format: "toml",
            detail: e.to_string(),
        })?;

        write_atomic(file, text.as_bytes())?;
        debug!(path = %file.display(), keys = data.len(), "dumped TOML document");
        Ok(())
    }

    fn load(&self, file: &Path) -> SerializerResult<ConfigMap> {
        let bytes = read_file(file)?;
        let text = std::str::from_utf8(&bytes).map_err(|e| SerializerError::Format {
            format: "toml",
            path: file.to_path_buf(),
            reason: format!("invalid UTF-8: {e}"),
        })?;

        let table: ::toml::Table = ::toml::from_str(text).map_err(|e| SerializerError::Format {
            format: "toml",
            path: file.to_path_buf(),
            reason: e.message().to_owned(),
        })?;

        let doc = from_toml_table(table);
        debug!(path = %file.display(), keys = doc.len(), "loaded TOML document");
        Ok(doc)
    }

    fn format_name(&self) -> &'static str {
        "toml"
    }
}

// ── Value mapping ─────────────────────────────────────────────────────────────

/// Converts a document table into a `toml::Table`, rejecting nulls.
///
/// `at` is the dotted path of the table being converted, used to point error
/// messages at the offending key; the root table passes `""`.
fn to_toml_table(map: &ConfigMap, at: &str) -> SerializerResult<::toml::Table> {
    let mut table = ::toml::Table::new();
    for (key, value) in map {
        let location = if at.is_empty() {
            key.clone()
        } else {
            format!("{at}.{key}")
        };
        table.insert(key.clone(), to_toml_value(value, &location)?);
    }
    Ok(table)
}

fn to_toml_value(value: &ConfigValue, at: &str) -> SerializerResult<::toml::Value> {
    match value {
        ConfigValue::Null => Err(SerializerError::Unsupported {
            format: "toml",
            detail: format!("the {} value at `{at}`", value.type_name()),
        }),
        ConfigValue::Bool(b) => Ok(::toml::Value::Boolean(*b)),
        ConfigValue::Integer(i) => Ok(::toml::Value::Integer(*i)),
        ConfigValue::Float(f) => Ok(::toml::Value::Float(*f)),
        ConfigValue::String(s) => Ok(::toml::Value::String(s.clone())),
        ConfigValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(to_toml_value(item, &format!("{at}[{index}]"))?);
            }
            Ok(::toml::Value::Array(out))
        }
        ConfigValue::Table(map) => Ok(::toml::Value::Table(to_toml_table(map, at)?)),
    }
}

fn from_toml_table(table: ::toml::Table) -> ConfigMap {
    table
        .into_iter()
        .map(|(key, value)| (key, from_toml_value(value)))
        .collect()
}

fn from_toml_value(value: ::toml::Value) -> ConfigValue {
    match value {
        ::toml::Value::String(s) => ConfigValue::String(s),
        ::toml::Value::Integer(i) => ConfigValue::Integer(i),
        ::toml::Value::Float(f) => ConfigValue::Float(f),
        ::toml::Value::Boolean(b) => ConfigValue::Bool(b),
        // No datetime variant in the document model: keep the RFC 3339 text.
        ::toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        ::toml::Value::Array(items) => {
            ConfigValue::Array(items.into_iter().map(from_toml_value).collect())
        }
        ::toml::Value::Table(table) => ConfigValue::Table(from_toml_table(table)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
