//! Shared filesystem plumbing for the file-backed codecs.
//!
//! Two jobs live here so every codec behaves identically at the I/O layer:
//! classifying a missing file separately from other read failures, and
//! replacing the destination atomically on write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use confit_core::{SerializerError, SerializerResult};
use tracing::trace;
use uuid::Uuid;

/// Reads the whole file into memory.
///
/// # Errors
///
/// Returns [`SerializerError::NotFound`] when the file does not exist and
/// [`SerializerError::Io`] for every other read failure.
pub(crate) fn read_file(path: &Path) -> SerializerResult<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SerializerError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(SerializerError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replaces the content of `path` with `bytes` atomically.
///
/// The bytes are first written to a uniquely named temporary file in the same
/// directory, which is then renamed over `path`.  Rename within a directory
/// is atomic on the platforms we support, so a concurrent reader observes
/// either the complete old file or the complete new one.
///
/// # Errors
///
/// Returns [`SerializerError::Io`] when the temporary file cannot be written
/// or the rename fails.  The temporary file is removed on failure.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> SerializerResult<()> {
    let tmp = temp_sibling(path);

    if let Err(source) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(SerializerError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SerializerError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    trace!(path = %path.display(), bytes = bytes.len(), "atomic write complete");
    Ok(())
}

/// Builds a temporary path in the same directory as `path`.
///
/// Staying in the same directory keeps the final rename on one filesystem;
/// a rename across mount points would silently degrade to copy-and-delete.
fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_owned());
    let tmp_name = format!(".{file_name}.{}.tmp", Uuid::new_v4());

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(tmp_name),
        _ => PathBuf::from(tmp_name),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
