//! # Error Types
//!
//! Error handling for the recipe catalogue codec.
//!
//! Every failure the codec can hit while reading a peer-supplied buffer is fatal
//! for the whole decode: payload lengths are variant-specific, so once a record
//! cannot be interpreted the rest of the buffer cannot be either. The caller
//! decides whether to drop the message or the connection.
//!
//! ## Error Categories
//! - **Framing Errors**: unknown recipe tags, truncated input, trailing bytes
//! - **Shape Errors**: shaped recipe grids that disagree with their dimensions
//! - **Limit Errors**: counts and lengths above the configured maximums
//! - **Primitive Errors**: malformed varints, invalid UTF-8, bad identifiers
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! ## Example Usage
//! ```rust
//! use recipe_protocol::error::{ProtocolError, Result};
//! use recipe_protocol::protocol::codec::RecipeCodec;
//! use recipe_protocol::protocol::collection::RecipeCollection;
//!
//! fn decode(bytes: &[u8]) -> Result<RecipeCollection> {
//!     RecipeCodec::default().decode_collection(bytes)
//! }
//!
//! match decode(&[0x01, 0x14]) {
//!     Err(ProtocolError::UnknownTag(10)) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging setup errors
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown recipe type tag: {0}")]
    UnknownTag(i64),

    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("Malformed shaped recipe: {width}x{height} grid with {slots} ingredients")]
    MalformedShape { width: i32, height: i32, slots: usize },

    #[error("Declared count {count} exceeds maximum {max}")]
    ExcessiveCount { count: u64, max: usize },

    #[error("Variable-length integer is too long")]
    VarIntTooLong,

    #[error("Variable-length integer out of range: {0}")]
    VarIntOverflow(u64),

    #[error("String is not valid UTF-8")]
    InvalidUtf8,

    #[error("String too long: {len} bytes (maximum {max})")]
    StringTooLong { len: u64, max: usize },

    #[error("Invalid recipe identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Unknown ingredient descriptor type: {0}")]
    UnknownDescriptor(u8),

    #[error("{0} trailing bytes after recipe data")]
    TrailingBytes(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Short, stable name for the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolError::Io(_) => "io",
            ProtocolError::UnknownTag(_) => "unknown_tag",
            ProtocolError::TruncatedInput { .. } => "truncated_input",
            ProtocolError::MalformedShape { .. } => "malformed_shape",
            ProtocolError::ExcessiveCount { .. } => "excessive_count",
            ProtocolError::VarIntTooLong => "varint_too_long",
            ProtocolError::VarIntOverflow(_) => "varint_overflow",
            ProtocolError::InvalidUtf8 => "invalid_utf8",
            ProtocolError::StringTooLong { .. } => "string_too_long",
            ProtocolError::InvalidIdentifier(_) => "invalid_identifier",
            ProtocolError::UnknownDescriptor(_) => "unknown_descriptor",
            ProtocolError::TrailingBytes(_) => "trailing_bytes",
            ProtocolError::ConfigError(_) => "config",
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
