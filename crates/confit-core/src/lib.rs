//! # confit-core
//!
//! Shared library for confit containing the configuration document model,
//! the serializer contract, and the error taxonomy.
//!
//! This crate is used by every codec implementation and by applications that
//! only need to hold or inspect configuration data.  It has zero dependencies
//! on file formats or the filesystem.
//!
//! # Architecture overview (for beginners)
//!
//! confit persists application configuration as whole documents: a program
//! hands a complete key/value tree to a serializer, which writes it to a file,
//! and later reads the same tree back.  There is no partial update and no
//! merging.  What you dump is what you load.
//!
//! This crate (`confit-core`) is the shared foundation.  It defines:
//!
//! - **`document`** – The in-memory shape of a configuration: a string-keyed
//!   tree of [`ConfigValue`]s rooted in a [`ConfigMap`].  The model is
//!   format-neutral, so the same document can be written as TOML today and
//!   JSON tomorrow.
//!
//! - **`serializer`** – The [`Serializer`] trait every codec implements, the
//!   [`SerializerError`] taxonomy callers match on, and an in-memory
//!   [`MemorySerializer`] that stands in for the filesystem in tests.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/document/mod.rs).
pub mod document;
pub mod serializer;

// Re-export the most-used types at the crate root so callers can write
// `confit_core::ConfigMap` instead of `confit_core::document::map::ConfigMap`.
pub use document::map::ConfigMap;
pub use document::value::ConfigValue;
pub use serializer::error::{SerializerError, SerializerResult};
pub use serializer::memory::MemorySerializer;
pub use serializer::Serializer;
