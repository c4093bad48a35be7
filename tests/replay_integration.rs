//! Integration tests for whole-replay decoding.
//!
//! These tests build complete synthetic replay files byte by byte and
//! verify the full decode path: header, compressed blob capture, LZMA
//! decompression, frame reconstruction, and the version-gated trailer.

use osr_parser::binary::ByteReader;
use osr_parser::header::{GameMode, ReplayHeader};
use osr_parser::mods::Mods;
use osr_parser::replay::{Replay, ONLINE_ID_MIN_VERSION};
use osr_parser::ParserError;

// ============================================================================
// Fixture construction
// ============================================================================

/// Appends a length-prefixed string field.
fn push_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(0x0B);
    buf.push(u8::try_from(s.len()).expect("test strings stay short"));
    buf.extend_from_slice(s.as_bytes());
}

/// Compresses frame text into an LZMA-alone blob.
fn compress(data: &[u8]) -> Vec<u8> {
    let mut input = std::io::Cursor::new(data);
    let mut output = Vec::new();
    lzma_rs::lzma_compress(&mut input, &mut output).unwrap();
    output
}

/// Field values for a synthetic replay file.
struct Fixture {
    game_mode: u8,
    version: i32,
    mods: Mods,
    frame_text: &'static str,
    online_id: Option<i64>,
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture {
            game_mode: 0,
            version: 20151228,
            mods: Mods::HIDDEN | Mods::DOUBLE_TIME,
            frame_text: "0|256|192|0,16|260|190|1,17|264|188|1,-12345|0|0|1337,",
            online_id: Some(2_000_000_001),
        }
    }
}

impl Fixture {
    fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(self.game_mode);
        buf.extend_from_slice(&self.version.to_le_bytes());
        push_string(&mut buf, "c8f08438204abfcdd1a748ebfae67421");
        push_string(&mut buf, "WhiteCat");
        push_string(&mut buf, "d41d8cd98f00b204e9800998ecf8427e");
        for count in [1873u16, 44, 2, 410, 21, 0] {
            buf.extend_from_slice(&count.to_le_bytes());
        }
        buf.extend_from_slice(&127_492_610i32.to_le_bytes());
        buf.extend_from_slice(&2047u16.to_le_bytes());
        buf.push(1); // perfect
        buf.extend_from_slice(&self.mods.to_raw().to_le_bytes());
        push_string(&mut buf, "0|1,5000|0.92");
        buf.extend_from_slice(&636_085_742_155_000_000i64.to_le_bytes());

        let blob = compress(self.frame_text.as_bytes());
        buf.extend_from_slice(&i32::try_from(blob.len()).unwrap().to_le_bytes());
        buf.extend_from_slice(&blob);

        if let Some(id) = self.online_id {
            buf.extend_from_slice(&id.to_le_bytes());
        }
        buf
    }
}

// ============================================================================
// Full decode
// ============================================================================

#[test]
fn test_full_decode() {
    let data = Fixture::default().build();
    let replay = Replay::parse(&data).unwrap();

    assert_eq!(replay.header.game_mode, GameMode::Osu);
    assert_eq!(replay.header.version, 20151228);
    assert_eq!(replay.header.beatmap_hash, "c8f08438204abfcdd1a748ebfae67421");
    assert_eq!(replay.header.player_name, "WhiteCat");
    assert_eq!(replay.header.count_300, 1873);
    assert_eq!(replay.header.count_miss, 0);
    assert_eq!(replay.header.total_score, 127_492_610);
    assert_eq!(replay.header.max_combo, 2047);
    assert!(replay.header.perfect);
    assert_eq!(replay.header.mods, Mods::HIDDEN | Mods::DOUBLE_TIME);
    assert_eq!(replay.header.lifebar_graph, "0|1,5000|0.92");
    assert_eq!(replay.header.timestamp_ticks, 636_085_742_155_000_000);

    assert_eq!(replay.frame_count(), 3);
    assert_eq!(replay.seed, 1337);
    assert_eq!(replay.online_id, Some(2_000_000_001));
}

#[test]
fn test_frame_times_accumulate_across_decode() {
    let data = Fixture::default().build();
    let replay = Replay::parse(&data).unwrap();

    let times: Vec<i32> = replay.frames.iter().map(|f| f.time).collect();
    assert_eq!(times, vec![0, 16, 33]);

    // Non-decreasing whenever the deltas are non-negative
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_all_game_modes_decode() {
    for (byte, mode) in [
        (0u8, GameMode::Osu),
        (1, GameMode::Taiko),
        (2, GameMode::Ctb),
        (3, GameMode::Mania),
    ] {
        let data = Fixture {
            game_mode: byte,
            ..Fixture::default()
        }
        .build();
        let replay = Replay::parse(&data).unwrap();
        assert_eq!(replay.header.game_mode, mode);
    }
}

#[test]
fn test_unknown_game_mode_rejected() {
    let data = Fixture {
        game_mode: 9,
        ..Fixture::default()
    }
    .build();
    assert!(matches!(
        Replay::parse(&data),
        Err(ParserError::InvalidHeader { .. })
    ));
}

// ============================================================================
// Blob capture and skip-decompress mode
// ============================================================================

#[test]
fn test_compressed_blob_captured_verbatim() {
    let fixture = Fixture::default();
    let data = fixture.build();
    let replay = Replay::parse(&data).unwrap();

    assert_eq!(replay.compressed_data, compress(fixture.frame_text.as_bytes()));
    assert_eq!(
        replay.decompressed_data.as_deref(),
        Some(fixture.frame_text.as_bytes())
    );
}

#[test]
fn test_skip_decompress_mode() {
    let fixture = Fixture::default();
    let data = fixture.build();
    let replay = Replay::parse_with_options(&data, false).unwrap();

    // The blob is captured even when decompression is skipped
    assert_eq!(replay.compressed_data, compress(fixture.frame_text.as_bytes()));
    assert!(replay.decompressed_data.is_none());
    assert!(replay.frames.is_empty());
    assert_eq!(replay.online_id, Some(2_000_000_001));
}

// ============================================================================
// Version-gated trailer
// ============================================================================

#[test]
fn test_online_id_read_at_cutoff_version() {
    let data = Fixture {
        version: ONLINE_ID_MIN_VERSION,
        online_id: Some(555),
        ..Fixture::default()
    }
    .build();
    let replay = Replay::parse(&data).unwrap();
    assert_eq!(replay.online_id, Some(555));
}

#[test]
fn test_online_id_absent_before_cutoff_version() {
    // The file ends exactly after the compressed blob
    let data = Fixture {
        version: ONLINE_ID_MIN_VERSION - 1,
        online_id: None,
        ..Fixture::default()
    }
    .build();
    let replay = Replay::parse(&data).unwrap();
    assert_eq!(replay.online_id, None);
}

#[test]
fn test_old_version_ignores_trailing_bytes() {
    // A pre-cutoff file with extra trailing bytes still decodes; the
    // decoder consumes exactly the declared layout
    let mut data = Fixture {
        version: ONLINE_ID_MIN_VERSION - 1,
        online_id: None,
        ..Fixture::default()
    }
    .build();
    data.extend_from_slice(&[0xDE, 0xAD]);
    let replay = Replay::parse(&data).unwrap();
    assert_eq!(replay.online_id, None);
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_truncation_at_every_header_boundary() {
    let data = Fixture::default().build();

    // Chopping the file anywhere inside the header or blob must produce
    // an error, never a partial replay
    for len in [0, 1, 3, 5, 6, 20, 40, 60, 80, 100] {
        if len >= data.len() {
            continue;
        }
        let result = Replay::parse(&data[..len]);
        assert!(result.is_err(), "decode succeeded on {len}-byte prefix");
    }
}

#[test]
fn test_invalid_string_marker_names_the_field() {
    let mut data = Fixture::default().build();
    // Offset 5 is the beatmap hash marker (mode byte + 4-byte version)
    data[5] = 0x0A;

    match Replay::parse(&data) {
        Err(ParserError::InvalidStringMarker { field, found }) => {
            assert_eq!(field, "beatmap hash");
            assert_eq!(found, 0x0A);
        }
        other => panic!("Expected InvalidStringMarker, got {other:?}"),
    }
}

#[test]
fn test_malformed_frame_line_aborts() {
    let data = Fixture {
        frame_text: "0|256|192|0,oops|1|1|0,",
        ..Fixture::default()
    }
    .build();
    assert!(matches!(
        Replay::parse(&data),
        Err(ParserError::InvalidFrameLine { .. })
    ));
}

#[test]
fn test_short_lines_tolerated_in_full_decode() {
    let data = Fixture {
        frame_text: "0|256|192|0,16|260|190|1,trailing-garbage",
        ..Fixture::default()
    }
    .build();
    let replay = Replay::parse(&data).unwrap();
    assert_eq!(replay.frame_count(), 2);
}

// ============================================================================
// Header layout round-trip
// ============================================================================

#[test]
fn test_header_layout_round_trip() {
    let data = Fixture::default().build();
    let mut reader = ByteReader::new(&data);
    let header = ReplayHeader::parse(&mut reader).unwrap();
    let header_len = reader.position();

    // Re-serialize the decoded fields through the known layout
    let mut out = Vec::new();
    out.push(0u8);
    out.extend_from_slice(&header.version.to_le_bytes());
    push_string(&mut out, &header.beatmap_hash);
    push_string(&mut out, &header.player_name);
    push_string(&mut out, &header.replay_hash);
    for count in [
        header.count_300,
        header.count_100,
        header.count_50,
        header.count_geki,
        header.count_katu,
        header.count_miss,
    ] {
        out.extend_from_slice(&count.to_le_bytes());
    }
    out.extend_from_slice(&header.total_score.to_le_bytes());
    out.extend_from_slice(&header.max_combo.to_le_bytes());
    out.push(u8::from(header.perfect));
    out.extend_from_slice(&header.mods.to_raw().to_le_bytes());
    push_string(&mut out, &header.lifebar_graph);
    out.extend_from_slice(&header.timestamp_ticks.to_le_bytes());

    assert_eq!(out, &data[..header_len]);
}
