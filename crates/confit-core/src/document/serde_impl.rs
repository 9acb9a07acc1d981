//! Serde glue for [`ConfigValue`].
//!
//! The impls are hand-written rather than derived.  A derived impl would tag
//! each variant (`{"Integer": 8080}`), but a configuration value must map
//! onto the *natural* representation of the host format: `Null` becomes JSON
//! `null`, `Table` becomes an object, and so on.  This is the same approach
//! `serde_json::Value` and `toml::Value` take.
//!
//! With these impls in place, any self-describing serde format can read and
//! write [`ConfigMap`] directly.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ConfigMap, ConfigValue};

// ── Serialize ─────────────────────────────────────────────────────────────────

impl Serialize for ConfigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(i) => serializer.serialize_i64(*i),
            ConfigValue::Float(f) => serializer.serialize_f64(*f),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Array(items) => items.serialize(serializer),
            ConfigValue::Table(map) => map.serialize(serializer),
        }
    }
}

// ── Deserialize ───────────────────────────────────────────────────────────────

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = ConfigValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a configuration value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ConfigValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ConfigValue::Integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // Formats hand positive integers over as u64; anything that does not
        // fit the signed model is out of range for a configuration document.
        i64::try_from(v)
            .map(ConfigValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} does not fit in 64 signed bits")))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ConfigValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ConfigValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(ConfigValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        ConfigValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ConfigValue::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = ConfigMap::new();
        while let Some((key, value)) = access.next_entry::<String, ConfigValue>()? {
            table.insert(key, value);
        }
        Ok(ConfigValue::Table(table))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
