//! Audio-synchronized playback over a decoded frame sequence.
//!
//! The audio clock is the timing authority: audio hardware paces itself in
//! hard real time, which a variable-rate render loop cannot match. Each
//! tick samples the clock (already scaled to replay milliseconds by the
//! audio collaborator) and projects it onto a frame index.
//!
//! [`PlaybackState`] is the small mutable core: a current index and an
//! `ended` latch, updated by a pure transition per tick. It holds no frame
//! data, only an index into a frame slice owned elsewhere, so it is
//! testable without any audio or rendering dependency.
//! [`PlaybackSession`] pairs the state with an owned [`Replay`] for the
//! common case.
//!
//! # Synchronization rule
//!
//! Per tick, with `frame` the sample at the current index:
//!
//! - `frame.time == clock`: no change.
//! - divergence of [`SYNC_THRESHOLD_MS`] or more in either direction: scan
//!   forward from the current index and land on the *last* index whose
//!   time has already elapsed. The scan never moves backward; a clock
//!   reading behind every remaining frame leaves the index unchanged.
//! - divergence under the threshold: advance by exactly one. This is the
//!   steady-state path when ticks arrive faster than the frame rate.
//!
//! When the index steps past the final frame the `ended` latch closes;
//! from then on ticks are no-ops and no frame is exposed.
//!
//! # Example
//!
//! ```
//! use osr_parser::frames::ReplayFrame;
//! use osr_parser::playback::PlaybackState;
//!
//! let frames = vec![
//!     ReplayFrame { time: 0, x: 0.0, y: 0.0 },
//!     ReplayFrame { time: 20, x: 1.0, y: 1.0 },
//!     ReplayFrame { time: 40, x: 2.0, y: 2.0 },
//! ];
//!
//! let mut state = PlaybackState::new();
//! state.advance(&frames, 45);
//! assert_eq!(state.frame_index(), 2);
//! ```

use crate::frames::ReplayFrame;
use crate::replay::Replay;

/// Divergence (in milliseconds) between clock and frame time that
/// triggers a catch-up scan instead of a single-step advance.
pub const SYNC_THRESHOLD_MS: i32 = 10;

/// Width of the playfield coordinate space frames are expressed in.
pub const PLAYFIELD_WIDTH: f32 = 512.0;

/// Height of the playfield coordinate space frames are expressed in.
pub const PLAYFIELD_HEIGHT: f32 = 384.0;

/// The synchronizer's mutable state: a frame index and an ended latch.
///
/// The index is monotonically non-decreasing over a playback session;
/// a drift correction may advance it by more than one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    index: usize,
    ended: bool,
}

impl PlaybackState {
    /// Creates a state positioned at the first frame, not ended.
    #[must_use]
    pub fn new() -> Self {
        PlaybackState::default()
    }

    /// Returns the current frame index.
    #[must_use]
    pub fn frame_index(&self) -> usize {
        self.index
    }

    /// Returns whether playback has run past the final frame.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Advances the state by one tick against the given clock reading.
    ///
    /// `clock_ms` must already be in the same millisecond timebase as the
    /// frame times; any playback-rate scaling is the clock provider's
    /// concern and is not re-applied here.
    pub fn advance(&mut self, frames: &[ReplayFrame], clock_ms: i32) {
        if self.ended {
            return;
        }

        if self.index >= frames.len() {
            self.ended = true;
            return;
        }

        let current = frames[self.index].time;
        if current == clock_ms {
            return;
        }

        let divergence = (i64::from(clock_ms) - i64::from(current)).abs();
        if divergence >= i64::from(SYNC_THRESHOLD_MS) {
            // Catch-up: land on the last frame whose time has elapsed.
            // Forward only; ties resolve to the highest index.
            for i in self.index..frames.len() {
                if frames[i].time <= clock_ms {
                    self.index = i;
                }
            }
        } else {
            self.index += 1;
            if self.index == frames.len() {
                self.ended = true;
            }
        }
    }

    /// Returns the frame at the current index, or `None` once ended.
    ///
    /// The rendering collaborator must treat `None` as the ended signal
    /// and stop reading position data.
    #[must_use]
    pub fn current_frame<'a>(&self, frames: &'a [ReplayFrame]) -> Option<&'a ReplayFrame> {
        if self.ended {
            return None;
        }
        frames.get(self.index)
    }
}

/// A playback session owning a decoded replay and its synchronizer state.
///
/// The replay value is produced once and owned exclusively by the
/// session; the synchronizer holds only an index into it.
#[derive(Debug)]
pub struct PlaybackSession {
    replay: Replay,
    state: PlaybackState,
}

impl PlaybackSession {
    /// Creates a session over a decoded replay, positioned at the start.
    #[must_use]
    pub fn new(replay: Replay) -> Self {
        PlaybackSession {
            replay,
            state: PlaybackState::new(),
        }
    }

    /// Advances playback by one tick and returns the frame to render.
    ///
    /// Returns `None` once playback has ended.
    pub fn tick(&mut self, clock_ms: i32) -> Option<&ReplayFrame> {
        self.state.advance(&self.replay.frames, clock_ms);
        self.state.current_frame(&self.replay.frames)
    }

    /// Returns the frame at the current index without advancing.
    #[must_use]
    pub fn current_frame(&self) -> Option<&ReplayFrame> {
        self.state.current_frame(&self.replay.frames)
    }

    /// Returns the owned replay.
    #[must_use]
    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Returns a copy of the synchronizer state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Returns whether playback has run past the final frame.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// Consumes the session and returns the replay.
    #[must_use]
    pub fn into_replay(self) -> Replay {
        self.replay
    }
}

/// Maps a frame's playfield position onto a host surface.
///
/// The 512x384 playfield is centered on the surface; the frame's
/// coordinates are offset accordingly. Pure coordinate math only; the
/// caller is responsible for any sprite-size adjustment.
#[must_use]
pub fn screen_position(frame: &ReplayFrame, surface_width: f32, surface_height: f32) -> (f32, f32) {
    (
        frame.x + (surface_width - PLAYFIELD_WIDTH) / 2.0,
        frame.y + (surface_height - PLAYFIELD_HEIGHT) / 2.0,
    )
}
