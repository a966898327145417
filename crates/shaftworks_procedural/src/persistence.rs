//! # Structure Records
//!
//! Generated structures are persisted so that a reloaded world never re-runs
//! growth or carving.
//!
//! ## Frame Format
//!
//! ```text
//! ┌────────┬─────────┬────────────┬──────────────────┬───────┐
//! │ "SHFT" │ version │ body len N │ body (LZ4, N B)  │ CRC32 │
//! │  4 B   │  u32 LE │   u32 LE   │                  │ u32 LE│
//! └────────┴─────────┴────────────┴──────────────────┴───────┘
//! ```
//!
//! The CRC covers the uncompressed body. The body itself is a flat
//! little-endian record written with [`ByteWriter`]; see
//! `MineshaftStructure::to_bytes` for its layout.

use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::error::{PersistenceError, PersistenceResult};

/// Frame magic.
pub const MAGIC: [u8; 4] = *b"SHFT";

/// Current record schema version.
pub const FORMAT_VERSION: u32 = 1;

/// Bytes before the compressed body.
const HEADER_LEN: usize = 12;

/// Little-endian record writer.
#[derive(Clone, Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a byte.
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Appends a u16.
    #[inline]
    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a u32.
    #[inline]
    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an i32.
    #[inline]
    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a u64.
    #[inline]
    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a length-prefixed UTF-8 string.
    ///
    /// Strings longer than `u16::MAX` bytes are cut at the last character
    /// boundary that fits.
    pub fn put_str(&mut self, value: &str) {
        let mut end = value.len().min(usize::from(u16::MAX));
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        self.put_u16(end as u16);
        self.buf.extend_from_slice(&value.as_bytes()[..end]);
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Little-endian record reader over a byte slice.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> PersistenceResult<[u8; N]> {
        let bytes = self.take_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn take_slice(&mut self, len: usize) -> PersistenceResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(PersistenceError::Truncated)?;
        let slice = self.data.get(self.pos..end).ok_or(PersistenceError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    /// Reads a byte.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input.
    pub fn get_u8(&mut self) -> PersistenceResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    /// Reads a u16.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input.
    pub fn get_u16(&mut self) -> PersistenceResult<u16> {
        self.take().map(u16::from_le_bytes)
    }

    /// Reads a u32.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input.
    pub fn get_u32(&mut self) -> PersistenceResult<u32> {
        self.take().map(u32::from_le_bytes)
    }

    /// Reads an i32.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input.
    pub fn get_i32(&mut self) -> PersistenceResult<i32> {
        self.take().map(i32::from_le_bytes)
    }

    /// Reads a u64.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input.
    pub fn get_u64(&mut self) -> PersistenceResult<u64> {
        self.take().map(u64::from_le_bytes)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Truncated` at end of input and
    /// `PersistenceError::InvalidUtf8` for malformed text.
    pub fn get_str(&mut self) -> PersistenceResult<String> {
        let len = usize::from(self.get_u16()?);
        let bytes = self.take_slice(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| PersistenceError::InvalidUtf8)
    }
}

/// Wraps a record body in a compressed, checksummed frame.
#[must_use]
pub fn encode_frame(body: &[u8]) -> Vec<u8> {
    let compressed = compress_prepend_size(body);
    let crc = crc32fast::hash(body);

    let mut out = Vec::with_capacity(HEADER_LEN + compressed.len() + 4);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    out.extend_from_slice(&compressed);
    out.extend_from_slice(&crc.to_le_bytes());
    out
}

/// Validates a frame and returns its uncompressed body.
///
/// # Errors
///
/// Returns `PersistenceError` for bad magic, unknown versions, truncated
/// frames, undecodable bodies or checksum mismatches.
pub fn decode_frame(bytes: &[u8]) -> PersistenceResult<Vec<u8>> {
    let mut reader = ByteReader::new(bytes);
    if reader.take::<4>()? != MAGIC {
        return Err(PersistenceError::BadMagic);
    }
    let version = reader.get_u32()?;
    if version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }
    let len = reader.get_u32()? as usize;
    let compressed = reader.take_slice(len)?;
    let expected = reader.get_u32()?;

    let body = decompress_size_prepended(compressed)
        .map_err(|e| PersistenceError::Decompress(e.to_string()))?;
    let actual = crc32fast::hash(&body);
    if actual != expected {
        return Err(PersistenceError::ChecksumMismatch { expected, actual });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_reads_what_writer_wrote() {
        let mut w = ByteWriter::new();
        w.put_u8(7);
        w.put_i32(-42);
        w.put_u64(u64::MAX - 1);
        w.put_str("mesa");
        let bytes = w.into_inner();

        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.get_u8().unwrap(), 7);
        assert_eq!(r.get_i32().unwrap(), -42);
        assert_eq!(r.get_u64().unwrap(), u64::MAX - 1);
        assert_eq!(r.get_str().unwrap(), "mesa");
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.get_u8(), Err(PersistenceError::Truncated));
    }

    #[test]
    fn test_long_string_cut_at_char_boundary() {
        let long = "é".repeat(40_000);
        let mut w = ByteWriter::new();
        w.put_str(&long);
        let bytes = w.into_inner();
        let text = ByteReader::new(&bytes).get_str().unwrap();
        assert!(text.len() <= usize::from(u16::MAX));
        assert!(text.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_frame_round_trip() {
        let body = b"a mineshaft body, repeated, repeated, repeated".to_vec();
        let frame = encode_frame(&body);
        assert_eq!(&frame[..4], b"SHFT");
        assert_eq!(decode_frame(&frame).unwrap(), body);
    }

    #[test]
    fn test_frame_rejections() {
        let frame = encode_frame(b"body");

        let mut bad_magic = frame.clone();
        bad_magic[0] = b'X';
        assert_eq!(decode_frame(&bad_magic), Err(PersistenceError::BadMagic));

        let mut bad_version = frame.clone();
        bad_version[4] = 9;
        assert_eq!(decode_frame(&bad_version), Err(PersistenceError::UnsupportedVersion(9)));

        let truncated = &frame[..frame.len() - 2];
        assert_eq!(decode_frame(truncated), Err(PersistenceError::Truncated));

        let mut bad_crc = frame.clone();
        let last = bad_crc.len() - 1;
        bad_crc[last] ^= 0xFF;
        assert!(matches!(
            decode_frame(&bad_crc),
            Err(PersistenceError::ChecksumMismatch { .. })
        ));

        assert_eq!(decode_frame(b"SH"), Err(PersistenceError::Truncated));
    }
}
