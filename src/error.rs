//! Error types for the osu! replay parser.
//!
//! This module defines the error hierarchy for all failure cases during
//! replay decoding: I/O errors, truncated data, structural format
//! violations, malformed frame lines, and decompression failures.

use thiserror::Error;

/// The main error type for replay parsing operations.
///
/// This enum covers all error cases that can occur during decoding:
/// - File I/O failures
/// - Truncated or incomplete data
/// - Invalid string markers in the header
/// - Malformed header fields
/// - Malformed frame lines in the decompressed payload
/// - Decompression failures
///
/// # Example
///
/// ```
/// use osr_parser::error::{ParserError, Result};
///
/// fn example_operation() -> Result<()> {
///     // Operations that may fail return Result<T>
///     Err(ParserError::InvalidHeader {
///         reason: "missing required field".to_string(),
///     })
/// }
/// ```
#[derive(Error, Debug)]
pub enum ParserError {
    /// An I/O error occurred while reading the replay file.
    ///
    /// This wraps standard library I/O errors for seamless error propagation
    /// using the `?` operator.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The data ended unexpectedly before the required bytes could be read.
    ///
    /// This typically indicates a truncated replay file.
    #[error("Unexpected end of data: expected {expected} bytes, but only {available} available")]
    UnexpectedEof {
        /// The number of bytes that were expected to be available.
        expected: usize,
        /// The actual number of bytes available.
        available: usize,
    },

    /// A string field's marker byte was not the required `0x0B` sentinel.
    ///
    /// Every string in the header is introduced by a single marker byte
    /// that must equal 11. Any other value means the stream is not
    /// positioned at a string field.
    #[error("Invalid string marker for {field}: expected 0x0B, found 0x{found:02X}")]
    InvalidStringMarker {
        /// The name of the header field being read.
        field: String,
        /// The marker byte actually found.
        found: u8,
    },

    /// The replay header contains invalid data.
    ///
    /// This error is returned when a header field fails validation, such
    /// as an unrecognized game-mode byte or a string payload that is not
    /// valid UTF-8.
    #[error("Invalid header: {reason}")]
    InvalidHeader {
        /// A description of what makes the header invalid.
        reason: String,
    },

    /// A structurally valid frame line contains non-numeric fields.
    ///
    /// Lines with at least 4 `|`-separated fields must carry a numeric
    /// time delta and coordinates. Shorter lines are tolerated and skipped;
    /// this error is only raised when the structure matched but the content
    /// did not.
    #[error("Invalid frame line '{line}': {reason}")]
    InvalidFrameLine {
        /// The offending line from the decompressed payload.
        line: String,
        /// A description of the parse failure.
        reason: String,
    },

    /// Decompression of the frame blob failed.
    ///
    /// The frame data is LZMA-compressed. This error occurs when the
    /// compressed blob is corrupted or not a valid LZMA stream.
    #[error("Decompression failed: {reason}")]
    DecompressionError {
        /// A description of the decompression failure.
        reason: String,
    },
}

impl ParserError {
    /// Creates an `UnexpectedEof` error with the given sizes.
    ///
    /// # Arguments
    ///
    /// * `expected` - The number of bytes that were needed
    /// * `available` - The number of bytes actually available
    #[must_use]
    pub fn unexpected_eof(expected: usize, available: usize) -> Self {
        ParserError::UnexpectedEof { expected, available }
    }

    /// Creates an `InvalidStringMarker` error for the given header field.
    ///
    /// # Arguments
    ///
    /// * `field` - The name of the header field being read
    /// * `found` - The marker byte actually found
    ///
    /// # Example
    ///
    /// ```
    /// use osr_parser::error::ParserError;
    ///
    /// let err = ParserError::invalid_string_marker("player name", 0x00);
    /// assert!(err.to_string().contains("player name"));
    /// ```
    #[must_use]
    pub fn invalid_string_marker(field: &str, found: u8) -> Self {
        ParserError::InvalidStringMarker {
            field: field.to_string(),
            found,
        }
    }

    /// Creates an `InvalidFrameLine` error with the given line context.
    ///
    /// # Arguments
    ///
    /// * `line` - The offending frame line
    /// * `reason` - A description of the parse failure
    #[must_use]
    pub fn invalid_frame_line(line: &str, reason: impl Into<String>) -> Self {
        ParserError::InvalidFrameLine {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for replay parsing operations.
///
/// This is a convenience alias that uses `ParserError` as the error type.
pub type Result<T> = std::result::Result<T, ParserError>;
