//! Error taxonomy for serializer operations.
//!
//! Callers match on [`SerializerError`] to decide what to do next: a missing
//! file usually means "start from defaults", a malformed file means "tell the
//! user which file to fix", and an unsupported value means "this document
//! needs a different format".  Keeping the kinds distinguishable is the whole
//! point of the enum; everything else is context for the message.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all [`Serializer`](crate::Serializer) operations.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// Nothing is stored at the requested path.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was asked for.
        path: PathBuf,
    },

    /// Reading or writing the underlying storage failed.
    #[error("I/O error accessing configuration at {path}: {source}")]
    Io {
        /// Path being accessed when the failure occurred.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes are not a valid document for this codec.
    #[error("malformed {format} configuration in {path}: {reason}")]
    Format {
        /// Codec that rejected the content, e.g. `"toml"`.
        format: &'static str,
        /// File that failed to parse.
        path: PathBuf,
        /// What the parser objected to.
        reason: String,
    },

    /// The document contains a value this format cannot represent.
    #[error("{format} cannot represent {detail}")]
    Unsupported {
        /// Codec that rejected the value, e.g. `"toml"`.
        format: &'static str,
        /// The offending value and where it sits in the document.
        detail: String,
    },
}

impl SerializerError {
    /// Returns `true` for [`SerializerError::NotFound`].
    ///
    /// Convenience for the common "fall back to defaults when the file does
    /// not exist yet" pattern.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SerializerError::NotFound { .. })
    }
}

/// Result alias used throughout the serializer API.
pub type SerializerResult<T> = Result<T, SerializerError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found_only_matches_not_found() {
        let not_found = SerializerError::NotFound {
            path: PathBuf::from("/tmp/app.toml"),
        };
        let io = SerializerError::Io {
            path: PathBuf::from("/tmp/app.toml"),
            source: std::io::Error::other("disk on fire"),
        };

        assert!(not_found.is_not_found());
        assert!(!io.is_not_found());
    }

    #[test]
    fn test_display_includes_path_and_reason() {
        let err = SerializerError::Format {
            format: "toml",
            path: PathBuf::from("/etc/app/config.toml"),
            reason: "expected `=` after key".to_owned(),
        };

        let message = err.to_string();

        assert!(message.contains("/etc/app/config.toml"));
        assert!(message.contains("expected `=` after key"));
    }

    #[test]
    fn test_io_error_preserves_source() {
        use std::error::Error as _;

        let err = SerializerError::Io {
            path: PathBuf::from("config.json"),
            source: std::io::Error::other("injected"),
        };

        assert!(err.source().is_some());
    }
}
