//! A single node in a configuration document.
//!
//! [`ConfigValue`] is the format-neutral representation every codec agrees
//! on.  Concrete formats map onto it losslessly where they can and reject
//! what they cannot represent (see the codec crate for the per-format rules).

use super::map::ConfigMap;

// ── Value tree ────────────────────────────────────────────────────────────────

/// Any value that can appear in a configuration document.
///
/// The variants cover the intersection of what common configuration formats
/// offer: scalars, ordered sequences, and string-keyed tables.  Integers and
/// floats are distinct variants on purpose, so `port = 8080` never comes back
/// as `8080.0` after a round trip.
///
/// # Examples
///
/// ```
/// use confit_core::ConfigValue;
///
/// let value = ConfigValue::from(vec![1_i64, 2, 3]);
/// assert_eq!(value.as_array().map(<[ConfigValue]>::len), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Explicit absence of a value.  Not every format can store this;
    /// codecs that cannot (e.g. TOML) reject it at dump time.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit float.  May be non-finite in memory; text formats that
    /// cannot encode NaN or infinity reject those at dump time.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.  Elements may be of mixed types.
    Array(Vec<ConfigValue>),
    /// A nested string-keyed table.
    Table(ConfigMap),
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Null
    }
}

impl ConfigValue {
    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Table(_) => "table",
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the boolean if this is a [`ConfigValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`ConfigValue::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a [`ConfigValue::Float`].
    ///
    /// Integers are not widened; `as_float` on an `Integer` returns `None`
    /// so the two numeric variants stay distinguishable.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`ConfigValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`ConfigValue::Array`].
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested table if this is a [`ConfigValue::Table`].
    pub fn as_table(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Table(map) => Some(map),
            _ => None,
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Integer(i64::from(value))
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Integer(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl<V: Into<ConfigValue>> From<Vec<V>> for ConfigValue {
    fn from(values: Vec<V>) -> Self {
        ConfigValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Table(map)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
