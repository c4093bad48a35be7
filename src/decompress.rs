//! LZMA decompression for the replay frame blob.
//!
//! The frame data in a replay file is a single LZMA-alone stream (the
//! legacy `.lzma` container: a 13-byte properties/size header followed by
//! the range-coded payload). This module wraps the codec behind one
//! function that maps failures into the crate's error type.
//!
//! # Example
//!
//! ```no_run
//! use osr_parser::decompress::decompress;
//!
//! let blob: Vec<u8> = std::fs::read("frames.lzma").unwrap();
//! let text = decompress(&blob).unwrap();
//! println!("Decompressed {} bytes", text.len());
//! ```

use std::io::Cursor;

use crate::error::{ParserError, Result};

/// Decompresses an LZMA-alone blob into its raw bytes.
///
/// # Arguments
///
/// * `blob` - The compressed frame data as captured from the file
///
/// # Returns
///
/// A `Vec<u8>` containing the decompressed payload.
///
/// # Errors
///
/// Returns `ParserError::DecompressionError` if the blob is not a valid
/// LZMA stream or ends prematurely.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>> {
    let mut input = Cursor::new(blob);
    let mut output = Vec::new();

    lzma_rs::lzma_decompress(&mut input, &mut output).map_err(|e| {
        ParserError::DecompressionError {
            reason: format!("{e:?}"),
        }
    })?;

    Ok(output)
}
