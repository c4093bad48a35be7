//! Frame stream parsing for decompressed replay data.
//!
//! The decompressed frame blob is text: comma-separated lines, each line
//! `delta|x|y|keys`. Only the first three fields become frame data; the
//! fourth is ignored except on the seed line. Time is delta-encoded, so
//! each line's first field is added to the previous emitted frame's time
//! to produce an absolute timestamp.
//!
//! # Tolerance policy
//!
//! Real replay files frequently end in trailing garbage, so lines with
//! fewer than 4 `|`-separated fields are skipped silently and do not
//! perturb the running time baseline. A line that *does* have 4 or more
//! fields but carries non-numeric content is a hard error: the structure
//! matched, so bad content means corruption rather than trailing noise.
//! This asymmetry is deliberate and load-bearing; do not tighten the
//! short-line case into an error.
//!
//! # Seed line
//!
//! A line whose first field is the literal `-12345` carries the RNG seed
//! of the play in its fourth field. It contributes no frame.
//!
//! # Example
//!
//! ```
//! use osr_parser::frames::parse_frames;
//!
//! let stream = parse_frames("0|256|192|0,16|260.5|190|0,-12345|0|0|42,").unwrap();
//! assert_eq!(stream.frames.len(), 2);
//! assert_eq!(stream.frames[1].time, 16);
//! assert_eq!(stream.seed, 42);
//! ```

use crate::error::{ParserError, Result};

/// The sentinel first field that marks the RNG seed line.
pub const SEED_MARKER: &str = "-12345";

/// A single cursor-position sample.
///
/// `time` is absolute milliseconds from the start of the replay,
/// reconstructed by cumulative summation of per-line deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    /// Absolute time of the sample in milliseconds.
    pub time: i32,
    /// Horizontal cursor position in playfield coordinates.
    pub x: f32,
    /// Vertical cursor position in playfield coordinates.
    pub y: f32,
}

/// The decoded output of a frame blob: the ordered samples plus the seed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameStream {
    /// The cursor samples, in input order.
    pub frames: Vec<ReplayFrame>,
    /// The RNG seed from the `-12345` marker line, or 0 if absent.
    pub seed: i32,
}

/// Parses decompressed frame text into an ordered frame sequence.
///
/// Frames are appended in input order; no sorting is performed. The first
/// line's delta is taken relative to a synthetic `(0, 0.0, 0.0)` frame.
///
/// # Errors
///
/// Returns `ParserError::InvalidFrameLine` when a line with 4 or more
/// fields carries a non-numeric time, x, y, or seed value.
///
/// # Example
///
/// ```
/// use osr_parser::frames::parse_frames;
///
/// let stream = parse_frames("10|5|5|0,10|6|6|0,").unwrap();
/// assert_eq!(stream.frames[0].time, 10);
/// assert_eq!(stream.frames[1].time, 20);
/// ```
pub fn parse_frames(text: &str) -> Result<FrameStream> {
    let mut frames: Vec<ReplayFrame> = Vec::new();
    let mut seed = 0;

    let mut last_time = 0;
    for line in text.split(',') {
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < 4 {
            // Trailing garbage; skip without touching the time baseline
            continue;
        }

        if fields[0] == SEED_MARKER {
            seed = parse_i32(line, "seed", fields[3])?;
            continue;
        }

        let delta = parse_i32(line, "time delta", fields[0])?;
        let frame = ReplayFrame {
            time: delta + last_time,
            x: parse_f32(line, "x", fields[1])?,
            y: parse_f32(line, "y", fields[2])?,
        };

        last_time = frame.time;
        frames.push(frame);
    }

    Ok(FrameStream { frames, seed })
}

fn parse_i32(line: &str, field: &str, value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| ParserError::invalid_frame_line(line, format!("invalid {field} '{value}'")))
}

fn parse_f32(line: &str, field: &str, value: &str) -> Result<f32> {
    value
        .parse()
        .map_err(|_| ParserError::invalid_frame_line(line, format!("invalid {field} '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_accumulation() {
        let stream = parse_frames("0|256|192|0,16|260|190|0,17|262|188|0,").unwrap();
        let times: Vec<i32> = stream.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0, 16, 33]);
    }

    #[test]
    fn test_first_delta_relative_to_zero_frame() {
        let stream = parse_frames("250|100|100|0,").unwrap();
        assert_eq!(stream.frames[0].time, 250);
    }

    #[test]
    fn test_negative_delta() {
        // Clients write negative deltas at the start of some replays
        let stream = parse_frames("-500|256|500|0,550|256|192|0,").unwrap();
        assert_eq!(stream.frames[0].time, -500);
        assert_eq!(stream.frames[1].time, 50);
    }

    #[test]
    fn test_float_coordinates() {
        let stream = parse_frames("16|256.5|191.25|0,").unwrap();
        let frame = stream.frames[0];
        assert!((frame.x - 256.5).abs() < f32::EPSILON);
        assert!((frame.y - 191.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_seed_line_sets_seed_and_emits_no_frame() {
        let stream = parse_frames("-12345|0|0|42").unwrap();
        assert!(stream.frames.is_empty());
        assert_eq!(stream.seed, 42);
    }

    #[test]
    fn test_seed_defaults_to_zero() {
        let stream = parse_frames("16|1|1|0,").unwrap();
        assert_eq!(stream.seed, 0);
    }

    #[test]
    fn test_seed_line_does_not_shift_baseline() {
        let stream = parse_frames("10|1|1|0,-12345|0|0|7,10|2|2|0,").unwrap();
        assert_eq!(stream.seed, 7);
        let times: Vec<i32> = stream.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![10, 20]);
    }

    #[test]
    fn test_short_line_skipped() {
        let stream = parse_frames("10|5|5,16|1|1|0,").unwrap();
        assert_eq!(stream.frames.len(), 1);
        assert_eq!(stream.frames[0].time, 16);
    }

    #[test]
    fn test_short_line_does_not_shift_baseline() {
        // The skipped line's delta must not count toward later frames
        let stream = parse_frames("10|1|1|0,999|9|9,10|2|2|0,").unwrap();
        let times: Vec<i32> = stream.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![10, 20]);
    }

    #[test]
    fn test_empty_lines_ignored() {
        let stream = parse_frames(",,16|1|1|0,,").unwrap();
        assert_eq!(stream.frames.len(), 1);
    }

    #[test]
    fn test_empty_text() {
        let stream = parse_frames("").unwrap();
        assert!(stream.frames.is_empty());
        assert_eq!(stream.seed, 0);
    }

    #[test]
    fn test_non_numeric_time_is_hard_error() {
        let result = parse_frames("x|5|5|0,");
        match result {
            Err(ParserError::InvalidFrameLine { line, .. }) => {
                assert_eq!(line, "x|5|5|0");
            }
            other => panic!("Expected InvalidFrameLine, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_coordinate_is_hard_error() {
        assert!(matches!(
            parse_frames("16|abc|5|0,"),
            Err(ParserError::InvalidFrameLine { .. })
        ));
        assert!(matches!(
            parse_frames("16|5|abc|0,"),
            Err(ParserError::InvalidFrameLine { .. })
        ));
    }

    #[test]
    fn test_non_numeric_seed_is_hard_error() {
        assert!(matches!(
            parse_frames("-12345|0|0|abc,"),
            Err(ParserError::InvalidFrameLine { .. })
        ));
    }

    #[test]
    fn test_extra_fields_tolerated() {
        // Only the first three fields are consumed for frames
        let stream = parse_frames("16|1|2|3|junk|more,").unwrap();
        assert_eq!(stream.frames.len(), 1);
        assert_eq!(stream.frames[0].time, 16);
    }

    #[test]
    fn test_frames_kept_in_input_order() {
        // No sorting: out-of-order source data stays out of order
        let stream = parse_frames("100|1|1|0,-50|2|2|0,").unwrap();
        let times: Vec<i32> = stream.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![100, 50]);
    }
}
