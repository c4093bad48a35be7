//! Gameplay modifier flags stored in the replay header.
//!
//! The header carries the active modifiers as a single i32 bit-set. Each
//! named flag occupies a distinct bit; a handful of composite groups are
//! defined as the exact union of their members and never carry bits of
//! their own.
//!
//! # Example
//!
//! ```
//! use osr_parser::mods::Mods;
//!
//! let mods = Mods::HIDDEN | Mods::HARD_ROCK;
//! assert!(mods.contains(Mods::HIDDEN));
//! assert!(mods.intersects(Mods::SCORE_INCREASE_MODS));
//! assert!(!mods.intersects(Mods::KEY_MOD));
//! ```

use bitflags::bitflags;

bitflags! {
    /// The set of gameplay modifiers enabled for a play.
    ///
    /// The numeric values match the replay format's mods field bit for
    /// bit. Unknown bits from newer client versions are retained rather
    /// than rejected; use [`Mods::from_raw`] when decoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mods: u32 {
        /// Misses do not end the play.
        const NO_FAIL = 1;
        /// Reduced difficulty settings.
        const EASY = 1 << 1;
        /// Played on a touch device.
        const TOUCH_DEVICE = 1 << 2;
        /// Approach circles fade out.
        const HIDDEN = 1 << 3;
        /// Increased difficulty settings.
        const HARD_ROCK = 1 << 4;
        /// A single miss ends the play.
        const SUDDEN_DEATH = 1 << 5;
        /// 1.5x playback speed.
        const DOUBLE_TIME = 1 << 6;
        /// Automatic cursor timing.
        const RELAX = 1 << 7;
        /// 0.75x playback speed.
        const HALF_TIME = 1 << 8;
        /// Double time with pitch shift.
        const NIGHTCORE = 1 << 9;
        /// Restricted visible play area.
        const FLASHLIGHT = 1 << 10;
        /// Fully automated play.
        const AUTOPLAY = 1 << 11;
        /// Spinners complete themselves.
        const SPUN_OUT = 1 << 12;
        /// Automatic keypresses (autopilot).
        const RELAX2 = 1 << 13;
        /// Sudden death requiring maximum judgements.
        const PERFECT = 1 << 14;
        /// 4-key layout (mania).
        const KEY4 = 1 << 15;
        /// 5-key layout (mania).
        const KEY5 = 1 << 16;
        /// 6-key layout (mania).
        const KEY6 = 1 << 17;
        /// 7-key layout (mania).
        const KEY7 = 1 << 18;
        /// 8-key layout (mania).
        const KEY8 = 1 << 19;
        /// Notes fade in from the top (mania).
        const FADE_IN = 1 << 20;
        /// Randomized note placement (mania).
        const RANDOM = 1 << 21;
        /// Spectator-style autoplay.
        const CINEMA = 1 << 22;
        /// Target practice mode.
        const TARGET = 1 << 23;
        /// 9-key layout (mania).
        const KEY9 = 1 << 24;
        /// Co-op split keyboard (mania).
        const KEY_COOP = 1 << 25;
        /// 1-key layout (mania).
        const KEY1 = 1 << 26;
        /// 3-key layout (mania).
        const KEY3 = 1 << 27;
        /// 2-key layout (mania).
        const KEY2 = 1 << 28;
        /// ScoreV2 scoring rules.
        const SCORE_V2 = 1 << 29;
        /// Reserved final flag value.
        const LAST_MOD = 1 << 30;

        /// All key-count modifiers.
        const KEY_MOD = Self::KEY1.bits()
            | Self::KEY2.bits()
            | Self::KEY3.bits()
            | Self::KEY4.bits()
            | Self::KEY5.bits()
            | Self::KEY6.bits()
            | Self::KEY7.bits()
            | Self::KEY8.bits()
            | Self::KEY9.bits()
            | Self::KEY_COOP.bits();

        /// Modifiers selectable under free-mod multiplayer rules.
        const FREE_MOD_ALLOWED = Self::NO_FAIL.bits()
            | Self::EASY.bits()
            | Self::HIDDEN.bits()
            | Self::HARD_ROCK.bits()
            | Self::SUDDEN_DEATH.bits()
            | Self::FLASHLIGHT.bits()
            | Self::FADE_IN.bits()
            | Self::RELAX.bits()
            | Self::RELAX2.bits()
            | Self::SPUN_OUT.bits()
            | Self::KEY_MOD.bits();

        /// Modifiers that raise the score multiplier.
        const SCORE_INCREASE_MODS = Self::HIDDEN.bits()
            | Self::HARD_ROCK.bits()
            | Self::DOUBLE_TIME.bits()
            | Self::FLASHLIGHT.bits()
            | Self::FADE_IN.bits();
    }
}

impl Mods {
    /// Builds a mod set from the raw i32 header field.
    ///
    /// Bits that do not correspond to any named flag are retained so that
    /// replays written by newer clients still round-trip through
    /// [`Mods::to_raw`].
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_raw(raw: i32) -> Self {
        Mods::from_bits_retain(raw as u32)
    }

    /// Returns the raw i32 representation used by the header field.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_raw(self) -> i32 {
        self.bits() as i32
    }
}
