//! The serializer contract: whole-document persistence behind a trait.
//!
//! # Why a trait? (for beginners)
//!
//! Application code should decide *what* to persist, not *how*.  By depending
//! on the [`Serializer`] trait instead of a concrete codec, a program can
//! switch its configuration format by swapping one constructor call, and its
//! tests can swap the filesystem out entirely (see [`MemorySerializer`]).
//!
//! The concrete file codecs live in the `confit-codecs` crate; this module
//! only defines the contract they implement.

use std::path::Path;

use crate::document::ConfigMap;

pub mod error;
pub mod memory;

pub use error::{SerializerError, SerializerResult};
pub use memory::MemorySerializer;

/// Whole-document configuration persistence.
///
/// A serializer writes a complete [`ConfigMap`] to a destination and reads a
/// complete one back.  There are no partial updates: `dump` replaces whatever
/// the destination held before, and `load` always returns the full document.
///
/// # Contract
///
/// - **Round trip**: for any document a format can represent, `dump` followed
///   by `load` of the same path yields an equal document.
/// - **No mutation on read**: `load` never changes the underlying storage, so
///   loading twice in a row yields equal documents.
/// - **Stateless**: implementations hold no per-document state between calls;
///   the path identifies the document.
///
/// Implementations are `Send + Sync` so one instance can be shared across
/// threads behind an `Arc`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use confit_core::{ConfigMap, MemorySerializer, Serializer};
///
/// let serializer = MemorySerializer::new();
///
/// let mut doc = ConfigMap::new();
/// doc.insert("greeting", "hello");
///
/// serializer.dump(Path::new("app.conf"), &doc)?;
/// assert_eq!(serializer.load(Path::new("app.conf"))?, doc);
/// # Ok::<(), confit_core::SerializerError>(())
/// ```
pub trait Serializer: Send + Sync {
    /// Writes `data` to `file`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Unsupported`] when the document contains a
    /// value the format cannot represent (in which case the destination is
    /// left untouched), or [`SerializerError::Io`] when storage fails.
    fn dump(&self, file: &Path, data: &ConfigMap) -> SerializerResult<()>;

    /// Reads the complete document stored at `file`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::NotFound`] when nothing has been stored at
    /// `file`, [`SerializerError::Format`] when the content is not valid for
    /// this codec, and [`SerializerError::Io`] for other storage failures.
    fn load(&self, file: &Path) -> SerializerResult<ConfigMap>;

    /// Short lowercase name of the format, used in logs and error messages.
    fn format_name(&self) -> &'static str;
}
