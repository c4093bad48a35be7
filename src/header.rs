//! Header parsing for osu! replay files.
//!
//! The replay header is a fixed-layout sequence of scalar and
//! length-prefixed string fields, consumed in a single forward pass.
//! All multi-byte integers are little-endian.
//!
//! # Layout
//!
//! | Field | Type |
//! |-------|------|
//! | Game mode | u8 |
//! | Format version | i32 |
//! | Beatmap hash | string |
//! | Player name | string |
//! | Replay hash | string |
//! | 300s / 100s / 50s / gekis / katus / misses | u16 each |
//! | Total score | i32 |
//! | Max combo | u16 |
//! | Perfect flag | u8 bool |
//! | Mods | i32 bit-set |
//! | Lifebar graph | string |
//! | Timestamp | i64 ticks |
//!
//! # Example
//!
//! ```no_run
//! use osr_parser::binary::ByteReader;
//! use osr_parser::header::ReplayHeader;
//!
//! let data = std::fs::read("replay.osr").unwrap();
//! let mut reader = ByteReader::new(&data);
//! let header = ReplayHeader::parse(&mut reader).unwrap();
//!
//! println!("{} played {}", header.player_name, header.beatmap_hash);
//! println!("Score: {} ({}x)", header.total_score, header.max_combo);
//! ```

use crate::binary::ByteReader;
use crate::error::{ParserError, Result};
use crate::mods::Mods;

/// The game mode a replay was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Standard circle-clicking mode.
    Osu,
    /// Drum mode with alternate input semantics.
    Taiko,
    /// Catch-the-beat fruit-catching mode.
    Ctb,
    /// Multi-key mania mode.
    Mania,
}

impl GameMode {
    /// Decodes a game mode from its 1-byte header code.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::InvalidHeader` for any byte other than 0-3.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(GameMode::Osu),
            1 => Ok(GameMode::Taiko),
            2 => Ok(GameMode::Ctb),
            3 => Ok(GameMode::Mania),
            other => Err(ParserError::InvalidHeader {
                reason: format!("unknown game mode byte 0x{other:02X}"),
            }),
        }
    }
}

/// The decoded replay header.
///
/// Fully constructed in one decode pass and never mutated afterward. The
/// hit-count fields are stored as-is; their game-mode-specific meaning
/// (150s in taiko, max 300s in mania, and so on) is not interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayHeader {
    /// The game mode the replay was recorded in.
    pub game_mode: GameMode,
    /// The client version that wrote the replay (YYYYMMDD).
    pub version: i32,
    /// MD5 hash of the beatmap the replay was recorded on.
    pub beatmap_hash: String,
    /// Name of the player.
    pub player_name: String,
    /// MD5 hash of the replay itself.
    pub replay_hash: String,
    /// Number of 300-point hits.
    pub count_300: u16,
    /// Number of 100-point hits (150s in taiko, 200s in mania).
    pub count_100: u16,
    /// Number of 50-point hits (small fruit in catch).
    pub count_50: u16,
    /// Number of gekis (max 300s in mania).
    pub count_geki: u16,
    /// Number of katus (100s in mania).
    pub count_katu: u16,
    /// Number of misses.
    pub count_miss: u16,
    /// Total score of the play.
    pub total_score: i32,
    /// Highest combo reached.
    pub max_combo: u16,
    /// Whether the play was a perfect (full combo with no drops).
    pub perfect: bool,
    /// The gameplay modifiers that were enabled.
    pub mods: Mods,
    /// The lifebar graph, as the client's raw `time|fraction` string.
    pub lifebar_graph: String,
    /// Timestamp of the play, in ticks since the .NET epoch.
    ///
    /// Stored as the raw tick count; no calendar conversion is applied.
    pub timestamp_ticks: i64,
}

impl ReplayHeader {
    /// Parses a replay header from the reader's current position.
    ///
    /// Consumes exactly the header layout and leaves the reader
    /// positioned at the compressed frame blob's length prefix.
    ///
    /// # Errors
    ///
    /// - `ParserError::UnexpectedEof` if the data is truncated mid-field
    /// - `ParserError::InvalidStringMarker` if a string field's marker
    ///   byte is not `0x0B` (the error names the field)
    /// - `ParserError::InvalidHeader` for an unknown game-mode byte or a
    ///   string payload that is not valid UTF-8
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let game_mode = GameMode::from_byte(reader.read_u8()?)?;
        let version = reader.read_i32_le()?;
        let beatmap_hash = reader.read_string("beatmap hash")?;
        let player_name = reader.read_string("player name")?;
        let replay_hash = reader.read_string("replay hash")?;
        let count_300 = reader.read_u16_le()?;
        let count_100 = reader.read_u16_le()?;
        let count_50 = reader.read_u16_le()?;
        let count_geki = reader.read_u16_le()?;
        let count_katu = reader.read_u16_le()?;
        let count_miss = reader.read_u16_le()?;
        let total_score = reader.read_i32_le()?;
        let max_combo = reader.read_u16_le()?;
        let perfect = reader.read_u8()? != 0;
        let mods = Mods::from_raw(reader.read_i32_le()?);
        let lifebar_graph = reader.read_string("lifebar graph")?;
        let timestamp_ticks = reader.read_i64_le()?;

        Ok(ReplayHeader {
            game_mode,
            version,
            beatmap_hash,
            player_name,
            replay_hash,
            count_300,
            count_100,
            count_50,
            count_geki,
            count_katu,
            count_miss,
            total_score,
            max_combo,
            perfect,
            mods,
            lifebar_graph,
            timestamp_ticks,
        })
    }
}
