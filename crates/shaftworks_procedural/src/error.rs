//! # Generator Error Types
//!
//! Errors surfaced to the host. Placement failures are not errors: a branch
//! that does not fit is pruned and a piece that cannot be carved is vetoed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML text could not be parsed into the expected shape.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Parsed values violate a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while decoding a persisted structure record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The record does not start with the expected magic bytes.
    #[error("not a structure record (bad magic)")]
    BadMagic,

    /// The record was written by a newer schema.
    #[error("unsupported record version {0}")]
    UnsupportedVersion(u32),

    /// Body checksum does not match.
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Checksum stored in the record.
        expected: u32,
        /// Checksum computed over the decoded body.
        actual: u32,
    },

    /// The record ended before a complete value could be read.
    #[error("record truncated")]
    Truncated,

    /// The LZ4 body could not be decompressed.
    #[error("decompression failed: {0}")]
    Decompress(String),

    /// A piece record carries an unknown type tag.
    #[error("unknown piece tag {0}")]
    UnknownPieceTag(u8),

    /// A facing byte is not a horizontal direction.
    #[error("invalid direction byte {0}")]
    InvalidDirection(u8),

    /// A turn record carries a side other than 0 or 1.
    #[error("invalid turn side {0}")]
    InvalidTurnSide(u8),

    /// A room record carries an exit flag other than 0 or 1.
    #[error("invalid room exit flag {0}")]
    InvalidRoomExit(u8),

    /// The theme name is not valid UTF-8.
    #[error("theme name is not valid UTF-8")]
    InvalidUtf8,
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
