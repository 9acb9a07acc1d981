//! Binary codec for compact, full-fidelity configuration files.
//!
//! File format:
//! ```text
//! [magic "CFIT":4][version:1][root table]
//!
//! table  := [entry_count:4][key value]*      key := [len:4][UTF-8 bytes]
//! value  := [tag:1][payload]
//! ```
//! All multi-byte integers are big-endian.  Value tags:
//!
//! | tag  | payload                                |
//! |------|----------------------------------------|
//! | 0x00 | none (null)                            |
//! | 0x01 | 1 byte, `0x00` false / `0x01` true     |
//! | 0x02 | `i64`, 8 bytes                         |
//! | 0x03 | `f64` IEEE 754 bit pattern, 8 bytes    |
//! | 0x04 | length-prefixed UTF-8 string           |
//! | 0x05 | `[count:4][value]*` array              |
//! | 0x06 | nested table                           |
//!
//! Floats are stored by bit pattern, so NaN and the infinities survive a
//! round trip exactly.  This is the format to reach for when the document
//! holds values the text codecs reject.

use std::path::Path;

use confit_core::{ConfigMap, ConfigValue, Serializer, SerializerError, SerializerResult};
use tracing::debug;

use crate::fs_util::{read_file, write_atomic};

// ── Format constants ──────────────────────────────────────────────────────────

/// Magic bytes at the start of every file.
pub const MAGIC: &[u8; 4] = b"CFIT";

/// Current format version byte.
pub const FORMAT_VERSION: u8 = 0x01;

const TAG_NULL: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INTEGER: u8 = 0x02;
const TAG_FLOAT: u8 = 0x03;
const TAG_STRING: u8 = 0x04;
const TAG_ARRAY: u8 = 0x05;
const TAG_TABLE: u8 = 0x06;

/// Deepest value nesting accepted on decode.  Keeps a crafted file from
/// overflowing the stack with a tower of one-element arrays.
const MAX_NESTING_DEPTH: usize = 128;

/// Upper bound on speculative `Vec` pre-allocation while decoding.  Declared
/// counts are untrusted until the corresponding bytes actually parse.
const MAX_PREALLOC: usize = 1024;

// ── BinarySerializer ──────────────────────────────────────────────────────────

/// [`Serializer`] implementation for the `CFIT` binary format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySerializer;

impl BinarySerializer {
    /// Creates a binary serializer.
    pub fn new() -> Self {
        BinarySerializer
    }
}

impl Serializer for BinarySerializer {
    fn dump(&self, file: &Path, data: &ConfigMap) -> SerializerResult<()> {
        let bytes = encode_document(data)?;
        write_atomic(file, &bytes)?;
        debug!(path = %file.display(), bytes = bytes.len(), "dumped binary document");
        Ok(())
    }

    fn load(&self, file: &Path) -> SerializerResult<ConfigMap> {
        let bytes = read_file(file)?;
        let doc = decode_document(&bytes).map_err(|reason| SerializerError::Format {
            format: "binary",
            path: file.to_path_buf(),
            reason,
        })?;

        debug!(path = %file.display(), keys = doc.len(), "loaded binary document");
        Ok(doc)
    }

    fn format_name(&self) -> &'static str {
        "binary"
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

fn encode_document(data: &ConfigMap) -> SerializerResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(MAGIC);
    buf.push(FORMAT_VERSION);
    encode_table(&mut buf, data)?;
    Ok(buf)
}

fn encode_table(buf: &mut Vec<u8>, map: &ConfigMap) -> SerializerResult<()> {
    buf.extend_from_slice(&count_u32(map.len(), "table entries")?.to_be_bytes());
    for (key, value) in map {
        encode_string(buf, key)?;
        encode_value(buf, value)?;
    }
    Ok(())
}

fn encode_value(buf: &mut Vec<u8>, value: &ConfigValue) -> SerializerResult<()> {
    match value {
        ConfigValue::Null => buf.push(TAG_NULL),
        ConfigValue::Bool(b) => {
            buf.push(TAG_BOOL);
            buf.push(if *b { 0x01 } else { 0x00 });
        }
        ConfigValue::Integer(i) => {
            buf.push(TAG_INTEGER);
            buf.extend_from_slice(&i.to_be_bytes());
        }
        ConfigValue::Float(f) => {
            buf.push(TAG_FLOAT);
            buf.extend_from_slice(&f.to_bits().to_be_bytes());
        }
        ConfigValue::String(s) => {
            buf.push(TAG_STRING);
            encode_string(buf, s)?;
        }
        ConfigValue::Array(items) => {
            buf.push(TAG_ARRAY);
            buf.extend_from_slice(&count_u32(items.len(), "array elements")?.to_be_bytes());
            for item in items {
                encode_value(buf, item)?;
            }
        }
        ConfigValue::Table(map) => {
            buf.push(TAG_TABLE);
            encode_table(buf, map)?;
        }
    }
    Ok(())
}

/// Writes a 4-byte length prefix followed by the UTF-8 bytes.
fn encode_string(buf: &mut Vec<u8>, s: &str) -> SerializerResult<()> {
    buf.extend_from_slice(&count_u32(s.len(), "string bytes")?.to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Narrows a length to the 4-byte prefix, rejecting anything that would not
/// fit instead of silently truncating it.
fn count_u32(len: usize, what: &str) -> SerializerResult<u32> {
    u32::try_from(len).map_err(|_| SerializerError::Unsupported {
        format: "binary",
        detail: format!("{len} {what} (limit is {})", u32::MAX),
    })
}

// ── Decoding ──────────────────────────────────────────────────────────────────

fn decode_document(bytes: &[u8]) -> Result<ConfigMap, String> {
    let mut reader = Reader::new(bytes);

    let magic = reader.take(MAGIC.len(), "header magic")?;
    if magic != MAGIC {
        return Err("missing CFIT magic; not a binary configuration file".to_owned());
    }

    let version = reader.read_u8("format version")?;
    if version != FORMAT_VERSION {
        return Err(format!(
            "unsupported format version {version} (this build reads version {FORMAT_VERSION})"
        ));
    }

    let doc = decode_table(&mut reader, 0)?;

    let trailing = reader.remaining();
    if trailing != 0 {
        return Err(format!("{trailing} trailing bytes after the root table"));
    }
    Ok(doc)
}

fn decode_table(reader: &mut Reader<'_>, depth: usize) -> Result<ConfigMap, String> {
    if depth > MAX_NESTING_DEPTH {
        return Err(format!("nesting deeper than {MAX_NESTING_DEPTH} levels"));
    }

    let count = reader.read_u32("table entry count")? as usize;
    let mut map = ConfigMap::new();
    for _ in 0..count {
        let key = reader.read_string("table key")?;
        let value = decode_value(reader, depth)?;
        map.insert(key, value);
    }
    Ok(map)
}

fn decode_value(reader: &mut Reader<'_>, depth: usize) -> Result<ConfigValue, String> {
    let tag = reader.read_u8("value tag")?;
    match tag {
        TAG_NULL => Ok(ConfigValue::Null),
        TAG_BOOL => match reader.read_u8("boolean payload")? {
            0x00 => Ok(ConfigValue::Bool(false)),
            0x01 => Ok(ConfigValue::Bool(true)),
            other => Err(format!("invalid boolean byte 0x{other:02X}")),
        },
        TAG_INTEGER => reader.read_i64("integer payload").map(ConfigValue::Integer),
        TAG_FLOAT => reader
            .read_f64_bits("float payload")
            .map(|bits| ConfigValue::Float(f64::from_bits(bits))),
        TAG_STRING => reader.read_string("string payload").map(ConfigValue::String),
        TAG_ARRAY => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(format!("nesting deeper than {MAX_NESTING_DEPTH} levels"));
            }
            let count = reader.read_u32("array element count")? as usize;
            let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
            for _ in 0..count {
                items.push(decode_value(reader, depth + 1)?);
            }
            Ok(ConfigValue::Array(items))
        }
        TAG_TABLE => decode_table(reader, depth + 1).map(ConfigValue::Table),
        other => Err(format!("unknown value tag 0x{other:02X}")),
    }
}

// ── Byte reader ───────────────────────────────────────────────────────────────

/// Forward-only cursor over the raw bytes with bounds-checked reads.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], String> {
        if self.remaining() < n {
            return Err(format!(
                "truncated {what} at offset {}: need {n} bytes, {} left",
                self.pos,
                self.remaining()
            ));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8, String> {
        Ok(self.take(1, what)?[0])
    }

    fn read_u32(&mut self, what: &str) -> Result<u32, String> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i64(&mut self, what: &str) -> Result<i64, String> {
        let b = self.take(8, what)?;
        Ok(i64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_f64_bits(&mut self, what: &str) -> Result<u64, String> {
        let b = self.take(8, what)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Reads a 4-byte length prefix and then that many UTF-8 bytes.
    fn read_string(&mut self, what: &str) -> Result<String, String> {
        let len = self.read_u32(what)? as usize;
        let raw = self.take(len, what)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|e| format!("invalid UTF-8 in {what}: {e}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("confit_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_doc() -> ConfigMap {
        let mut nested = ConfigMap::new();
        nested.insert("min", i64::MIN);
        nested.insert("max", i64::MAX);
        nested.insert("unicode", "konfitüre 🫙");

        let mut doc = ConfigMap::new();
        doc.insert("nested", nested);
        doc.insert("nothing", ConfigValue::Null);
        doc.insert("enabled", true);
        doc.insert("empty_string", "");
        doc.insert("empty_array", ConfigValue::Array(Vec::new()));
        doc.insert(
            "mixed",
            ConfigValue::Array(vec![
                ConfigValue::Integer(-1),
                ConfigValue::String("two".into()),
                ConfigValue::Bool(false),
            ]),
        );
        doc
    }

    #[test]
    fn test_dump_then_load_round_trips_every_value_kind() {
        // Arrange
        let dir = scratch_dir();
        let file = dir.join("app.cfit");
        let serializer = BinarySerializer::new();
        let doc = sample_doc();

        // Act
        serializer.dump(&file, &doc).unwrap();
        let restored = serializer.load(&file).unwrap();

        // Assert
        assert_eq!(restored, doc);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_starts_with_magic_and_version() {
        let dir = scratch_dir();
        let file = dir.join("app.cfit");
        BinarySerializer::new().dump(&file, &sample_doc()).unwrap();

        let bytes = std::fs::read(&file).unwrap();

        assert_eq!(&bytes[..4], b"CFIT");
        assert_eq!(bytes[4], FORMAT_VERSION);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_document_is_header_plus_zero_count() {
        let bytes = encode_document(&ConfigMap::new()).unwrap();

        // 4 magic + 1 version + 4 entry count
        assert_eq!(bytes.len(), 9);
        assert_eq!(&bytes[5..9], &[0, 0, 0, 0]);
        assert!(decode_document(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let doc = sample_doc();

        let first = encode_document(&doc).unwrap();
        let second = encode_document(&doc).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_non_finite_floats_survive_by_bit_pattern() {
        // Arrange – the values the text codecs cannot hold.
        let mut doc = ConfigMap::new();
        doc.insert("nan", f64::NAN);
        doc.insert("inf", f64::INFINITY);
        doc.insert("neg_zero", -0.0_f64);

        // Act
        let bytes = encode_document(&doc).unwrap();
        let restored = decode_document(&bytes).unwrap();

        // Assert – compare bit patterns; NaN is not equal to itself.
        let bits = |key: &str| match restored.get(key) {
            Some(ConfigValue::Float(f)) => f.to_bits(),
            other => panic!("expected float at {key}, got {other:?}"),
        };
        assert_eq!(bits("nan"), f64::NAN.to_bits());
        assert_eq!(bits("inf"), f64::INFINITY.to_bits());
        assert_eq!(bits("neg_zero"), (-0.0_f64).to_bits());
    }

    #[test]
    fn test_decode_rejects_wrong_magic() {
        let err = decode_document(b"NOPE\x01\x00\x00\x00\x00").unwrap_err();

        assert!(err.contains("magic"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let err = decode_document(b"CFIT\x02\x00\x00\x00\x00").unwrap_err();

        assert!(err.contains("version 2"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let mut bytes = encode_document(&sample_doc()).unwrap();
        bytes.truncate(bytes.len() - 3);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("truncated"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode_document(&ConfigMap::new()).unwrap();
        bytes.push(0xAA);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("trailing"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_unknown_value_tag() {
        // Header + one entry: key "k", then an unassigned tag byte.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CFIT\x01");
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.push(b'k');
        bytes.push(0x7F);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("unknown value tag 0x7F"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_invalid_boolean_byte() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CFIT\x01");
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.push(b'b');
        bytes.push(TAG_BOOL);
        bytes.push(0x02);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("invalid boolean byte"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8_in_key() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CFIT\x01");
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.extend_from_slice(&2_u32.to_be_bytes());
        bytes.extend_from_slice(&[0xFF, 0xFE]);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("invalid UTF-8"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_excessive_nesting() {
        // A tower of one-element arrays, deeper than the decoder allows.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CFIT\x01");
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.extend_from_slice(&1_u32.to_be_bytes());
        bytes.push(b'v');
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            bytes.push(TAG_ARRAY);
            bytes.extend_from_slice(&1_u32.to_be_bytes());
        }
        bytes.push(TAG_NULL);

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("nesting"), "got: {err}");
    }

    #[test]
    fn test_huge_declared_count_fails_cleanly() {
        // Count says 4 billion entries but no bytes follow; must error out
        // without trying to allocate for them.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CFIT\x01");
        bytes.extend_from_slice(&u32::MAX.to_be_bytes());

        let err = decode_document(&bytes).unwrap_err();

        assert!(err.contains("truncated"), "got: {err}");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = scratch_dir();

        let err = BinarySerializer::new()
            .load(&dir.join("absent.cfit"))
            .unwrap_err();

        assert!(err.is_not_found());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_garbage_file_is_format_error() {
        let dir = scratch_dir();
        let file = dir.join("garbage.cfit");
        std::fs::write(&file, b"this is not CFIT data").unwrap();

        let err = BinarySerializer::new().load(&file).unwrap_err();

        assert!(matches!(err, SerializerError::Format { format: "binary", .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
