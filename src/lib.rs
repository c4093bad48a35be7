//! # OSR Parser
//!
//! An osu! replay (`.osr`) parser and audio-synchronized playback library.
//!
//! This library decodes the binary replay format (header statistics,
//! gameplay modifiers, and the LZMA-compressed cursor frame stream) and
//! provides a playback synchronizer that maps an external audio clock
//! onto the decoded frame sequence.
//!
//! ## Quick Start
//!
//! ```no_run
//! use osr_parser::replay::Replay;
//! use osr_parser::playback::PlaybackSession;
//!
//! // Decode a replay file
//! let replay = Replay::from_file("replay.osr").unwrap();
//! println!("{} on {}", replay.header.player_name, replay.header.beatmap_hash);
//! println!("{:?} +{:?}", replay.header.game_mode, replay.header.mods);
//! println!("{} frames, seed {}", replay.frame_count(), replay.seed);
//!
//! // Drive playback from an audio clock (milliseconds, already scaled
//! // by the playback rate)
//! let mut session = PlaybackSession::new(replay);
//! let audio_clock_ms = 45;
//! if let Some(frame) = session.tick(audio_clock_ms) {
//!     println!("cursor at ({}, {})", frame.x, frame.y);
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and result alias for parser operations
//! - [`binary`] - Low-level binary reading for little-endian data and
//!   length-prefixed strings
//! - [`mods`] - Gameplay modifier bit-flags
//! - [`header`] - Replay header decoding
//! - [`decompress`] - LZMA decompression of the frame blob
//! - [`frames`] - Frame stream text parsing with delta-time decoding
//! - [`replay`] - Whole-replay decoding
//! - [`playback`] - Audio-synchronized playback state machine
//!
//! ## Format Reference
//!
//! A replay file is, in order: `u8` game mode, `i32` version, three
//! length-prefixed strings (beatmap hash, player name, replay hash), six
//! `u16` hit counts, `i32` total score, `u16` max combo, `u8` perfect
//! flag, `i32` mods, a lifebar-graph string, `i64` timestamp ticks, an
//! `i32`-length-prefixed LZMA blob of frame text, and, for versions
//! from 20140721 onward, an `i64` online identifier.
//!
//! All multi-byte integers are stored in little-endian byte order.
//! Strings are a `0x0B` marker byte followed by a ULEB128 length prefix
//! and UTF-8 payload.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binary;
pub mod decompress;
pub mod error;
pub mod frames;
pub mod header;
pub mod mods;
pub mod playback;
pub mod replay;

// Re-export commonly used types at the crate root
pub use binary::ByteReader;
pub use decompress::decompress;
pub use error::{ParserError, Result};
pub use frames::{parse_frames, FrameStream, ReplayFrame, SEED_MARKER};
pub use header::{GameMode, ReplayHeader};
pub use mods::Mods;
pub use playback::{PlaybackSession, PlaybackState, SYNC_THRESHOLD_MS};
pub use replay::{Replay, ONLINE_ID_MIN_VERSION};
