//! Whole-replay decoding: header, compressed frame blob, and trailer.
//!
//! A replay file is the fixed header, a 4-byte length prefix, the
//! LZMA-compressed frame blob, and (for files written by clients from
//! 2014-07-21 onward) a trailing 8-byte online score identifier.
//!
//! Decoding is all-or-nothing: on any failure no partial [`Replay`]
//! value is returned.
//!
//! # Example
//!
//! ```no_run
//! use osr_parser::replay::Replay;
//!
//! let replay = Replay::from_file("replay.osr").unwrap();
//! println!("{} frames by {}", replay.frame_count(), replay.header.player_name);
//! ```

use std::path::Path;

use crate::binary::ByteReader;
use crate::decompress::decompress;
use crate::error::Result;
use crate::frames::{parse_frames, ReplayFrame};
use crate::header::ReplayHeader;

/// The first client version that writes the trailing online identifier.
pub const ONLINE_ID_MIN_VERSION: i32 = 20140721;

/// A fully decoded replay.
///
/// Constructed in one pass by [`Replay::parse`] and immutable afterward.
/// The compressed blob is always captured; the decompressed payload and
/// frame list are present only when decompression was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    /// The decoded header fields.
    pub header: ReplayHeader,
    /// The raw LZMA blob exactly as stored in the file.
    pub compressed_data: Vec<u8>,
    /// The decompressed frame text bytes, or `None` when decompression
    /// was skipped.
    pub decompressed_data: Option<Vec<u8>>,
    /// The reconstructed cursor samples, empty when decompression was
    /// skipped.
    pub frames: Vec<ReplayFrame>,
    /// The RNG seed from the frame stream's marker line, or 0 if absent.
    pub seed: i32,
    /// The online score identifier, present only for
    /// `version >= 20140721`.
    pub online_id: Option<i64>,
}

impl Replay {
    /// Decodes a replay from raw file bytes, including the frame stream.
    ///
    /// # Errors
    ///
    /// Propagates every decode failure: truncation
    /// (`ParserError::UnexpectedEof`), structural header violations
    /// (`ParserError::InvalidStringMarker`, `ParserError::InvalidHeader`),
    /// decompression failures (`ParserError::DecompressionError`), and
    /// malformed frame lines (`ParserError::InvalidFrameLine`).
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_options(data, true)
    }

    /// Decodes a replay, optionally skipping frame decompression.
    ///
    /// With `decompress_frames` set to `false`, the compressed blob is
    /// still captured and the trailing online identifier still read, but
    /// the decompressed payload stays `None` and the frame list empty.
    /// Use this when only the header statistics are needed.
    ///
    /// # Errors
    ///
    /// Same as [`Replay::parse`], minus the decompression and frame-line
    /// failures when `decompress_frames` is `false`.
    pub fn parse_with_options(data: &[u8], decompress_frames: bool) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        let header = ReplayHeader::parse(&mut reader)?;

        let compressed_len = reader.read_i32_le()?.max(0);
        #[allow(clippy::cast_sign_loss)]
        let compressed_data = reader.read_bytes(compressed_len as usize)?.to_vec();

        let (decompressed_data, frames, seed) = if decompress_frames {
            let payload = decompress(&compressed_data)?;
            // Payloads are ASCII in practice; decode lossily so stray
            // bytes degrade to replacement characters instead of failing
            let text = String::from_utf8_lossy(&payload);
            let stream = parse_frames(&text)?;
            (Some(payload), stream.frames, stream.seed)
        } else {
            (None, Vec::new(), 0)
        };

        let online_id = if header.version >= ONLINE_ID_MIN_VERSION {
            Some(reader.read_i64_le()?)
        } else {
            None
        };

        Ok(Replay {
            header,
            compressed_data,
            decompressed_data,
            frames,
            seed,
            online_id,
        })
    }

    /// Reads and decodes a replay file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::IoError` if the file cannot be read, plus
    /// every failure mode of [`Replay::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Returns the number of decoded cursor samples.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
