//! The configuration document model.
//!
//! This module contains the pure data types with no I/O dependencies.
//!
//! # Why a dedicated value type? (for beginners)
//!
//! Configuration data is a tree: scalars at the leaves, sequences and
//! string-keyed tables in between.  Rust needs a single type that can hold
//! any node of that tree, because the shape of a configuration file is not
//! known at compile time.  That is what [`value::ConfigValue`] is, the same
//! way `serde_json::Value` models arbitrary JSON.
//!
//! Keeping the model here, away from any concrete file format, means:
//!
//! - Codecs translate between `ConfigValue` and their byte format, nothing
//!   more.  Swapping TOML for JSON never touches application code.
//! - Documents can be built, inspected, and compared in tests without a
//!   filesystem or a parser in sight.

/// String-keyed table of values, the root of every document.
///
/// See [`map::ConfigMap`] for the main type.
pub mod map;

/// A single node in the configuration tree.
///
/// See [`value::ConfigValue`] for the main type.
pub mod value;

// Serde glue lives in its own file so the data model stays free of
// serialization details.
mod serde_impl;

pub use map::ConfigMap;
pub use value::ConfigValue;
