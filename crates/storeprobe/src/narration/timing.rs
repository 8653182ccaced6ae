//! Narration timing model.
//!
//! Estimates how long a line of synthesized speech takes to play so the
//! scripted browser sequence can pause for it. The estimate is a plain
//! words-per-second rate plus fixed pauses for sentence and clause
//! punctuation, scaled by a safety buffer, floored and rounded.
//!
//! ```text
//! base      = words / words_per_second * 1000
//! paused    = base + periods * period_pause + commas * comma_pause
//! buffered  = paused * buffer_multiplier
//! duration  = round(max(buffered, minimum) / granularity) * granularity
//! ```

use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Average speech rate (150 words per minute)
pub const DEFAULT_WORDS_PER_SECOND: f64 = 2.5;

/// Pause credited per `.`
pub const DEFAULT_PERIOD_PAUSE_MS: u64 = 300;

/// Pause credited per `,`
pub const DEFAULT_COMMA_PAUSE_MS: u64 = 200;

/// Safety factor between estimate and real synthesized speech length
pub const DEFAULT_BUFFER_MULTIPLIER: f64 = 1.2;

/// Floor so even a one-word line gets audible time
pub const DEFAULT_MINIMUM_MS: u64 = 1500;

/// Final durations are multiples of this
pub const DEFAULT_ROUNDING_GRANULARITY_MS: u64 = 100;

/// Flat delay for short status lines
pub const QUICK_DELAY_MS: u64 = 2000;

/// Flat delay for long, detailed lines
pub const LONG_DELAY_MS: u64 = 4000;

/// Largest per-mark pause a profile may configure
pub const MAX_PAUSE_MS: u64 = 60_000;

// =============================================================================
// PROFILE
// =============================================================================

/// Tunables for the timing formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationProfile {
    /// Speech rate used to convert word count to seconds
    pub words_per_second: f64,
    /// Extra pause per period
    pub period_pause_ms: u64,
    /// Extra pause per comma
    pub comma_pause_ms: u64,
    /// Multiplier applied to the summed duration
    pub buffer_multiplier: f64,
    /// Hard floor in milliseconds
    pub minimum_ms: u64,
    /// Rounding step in milliseconds (0 disables rounding)
    pub rounding_granularity_ms: u64,
}

impl Default for NarrationProfile {
    fn default() -> Self {
        Self {
            words_per_second: DEFAULT_WORDS_PER_SECOND,
            period_pause_ms: DEFAULT_PERIOD_PAUSE_MS,
            comma_pause_ms: DEFAULT_COMMA_PAUSE_MS,
            buffer_multiplier: DEFAULT_BUFFER_MULTIPLIER,
            minimum_ms: DEFAULT_MINIMUM_MS,
            rounding_granularity_ms: DEFAULT_ROUNDING_GRANULARITY_MS,
        }
    }
}

impl NarrationProfile {
    /// Create a profile with the default speech model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set speech rate
    #[must_use]
    pub const fn with_words_per_second(mut self, wps: f64) -> Self {
        self.words_per_second = wps;
        self
    }

    /// Set period pause
    #[must_use]
    pub const fn with_period_pause(mut self, ms: u64) -> Self {
        self.period_pause_ms = ms;
        self
    }

    /// Set comma pause
    #[must_use]
    pub const fn with_comma_pause(mut self, ms: u64) -> Self {
        self.comma_pause_ms = ms;
        self
    }

    /// Set buffer multiplier
    #[must_use]
    pub const fn with_buffer_multiplier(mut self, multiplier: f64) -> Self {
        self.buffer_multiplier = multiplier;
        self
    }

    /// Set minimum duration
    #[must_use]
    pub const fn with_minimum(mut self, ms: u64) -> Self {
        self.minimum_ms = ms;
        self
    }

    /// Set rounding granularity
    #[must_use]
    pub const fn with_granularity(mut self, ms: u64) -> Self {
        self.rounding_granularity_ms = ms;
        self
    }

    /// Check that a profile loaded from configuration is usable.
    ///
    /// `compute_delay` never fails on a bad profile, it just degrades; this
    /// is for catching typos in config files early.
    pub fn validate(&self) -> ProbeResult<()> {
        if !self.words_per_second.is_finite() || self.words_per_second <= 0.0 {
            return Err(ProbeError::config(format!(
                "words_per_second must be a positive number, got {}",
                self.words_per_second
            )));
        }
        if !self.buffer_multiplier.is_finite() || self.buffer_multiplier < 0.0 {
            return Err(ProbeError::config(format!(
                "buffer_multiplier must be a non-negative number, got {}",
                self.buffer_multiplier
            )));
        }
        for (name, ms) in [
            ("period_pause_ms", self.period_pause_ms),
            ("comma_pause_ms", self.comma_pause_ms),
        ] {
            if ms > MAX_PAUSE_MS {
                return Err(ProbeError::config(format!(
                    "{name} must be at most {MAX_PAUSE_MS}, got {ms}"
                )));
            }
        }
        if self.rounding_granularity_ms == 0 {
            return Err(ProbeError::config("rounding_granularity_ms must be at least 1"));
        }
        Ok(())
    }
}

// =============================================================================
// TIMING
// =============================================================================

/// Which delay rule a narrated line uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacingMode {
    /// Derived from the message with [`compute_delay`]
    #[default]
    Computed,
    /// Flat [`QUICK_DELAY_MS`]
    Quick,
    /// Flat [`LONG_DELAY_MS`]
    Long,
}

/// Breakdown of a computed narration delay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationTiming {
    /// Rule that produced `duration_ms`
    pub mode: PacingMode,
    /// Whitespace-delimited words
    pub word_count: usize,
    /// Number of `.` characters
    pub period_count: usize,
    /// Number of `,` characters
    pub comma_count: usize,
    /// Speech time before pauses and buffering
    pub base_ms: f64,
    /// Time after pauses and buffer, before floor and rounding
    pub buffered_ms: f64,
    /// Final delay
    pub duration_ms: u64,
}

impl NarrationTiming {
    /// Fixed-duration timing for quick or long lines
    #[must_use]
    pub fn fixed(mode: PacingMode, message: &str) -> Self {
        let duration_ms = match mode {
            PacingMode::Quick => QUICK_DELAY_MS,
            PacingMode::Long => LONG_DELAY_MS,
            PacingMode::Computed => {
                return compute_delay(message, &NarrationProfile::default());
            }
        };
        let counts = Counts::of(message);
        Self {
            mode,
            word_count: counts.words,
            period_count: counts.periods,
            comma_count: counts.commas,
            base_ms: duration_ms as f64,
            buffered_ms: duration_ms as f64,
            duration_ms,
        }
    }

    /// Delay as a `Duration`
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

struct Counts {
    words: usize,
    periods: usize,
    commas: usize,
}

impl Counts {
    fn of(message: &str) -> Self {
        let (periods, commas) = message.chars().fold((0, 0), |(p, c), ch| match ch {
            '.' => (p + 1, c),
            ',' => (p, c + 1),
            _ => (p, c),
        });
        Self {
            words: message.split_whitespace().count(),
            periods,
            commas,
        }
    }
}

/// Compute how long to wait for `message` to be spoken.
///
/// Never fails: empty or whitespace-only input yields the floor.
#[must_use]
pub fn compute_delay(message: &str, profile: &NarrationProfile) -> NarrationTiming {
    let counts = Counts::of(message);

    let base_ms = if profile.words_per_second > 0.0 {
        counts.words as f64 / profile.words_per_second * 1000.0
    } else {
        0.0
    };
    let with_pauses = base_ms
        + counts.periods as f64 * profile.period_pause_ms as f64
        + counts.commas as f64 * profile.comma_pause_ms as f64;
    let buffered_ms = with_pauses * profile.buffer_multiplier;
    let floored = buffered_ms.max(profile.minimum_ms as f64);

    let duration_ms = if profile.rounding_granularity_ms == 0 {
        floored.round() as u64
    } else {
        let step = profile.rounding_granularity_ms as f64;
        ((floored / step).round() * step) as u64
    };

    NarrationTiming {
        mode: PacingMode::Computed,
        word_count: counts.words,
        period_count: counts.periods,
        comma_count: counts.commas,
        base_ms,
        buffered_ms,
        duration_ms,
    }
}

/// Timing for `message` under the given pacing rule
#[must_use]
pub fn timing_for(mode: PacingMode, message: &str, profile: &NarrationProfile) -> NarrationTiming {
    match mode {
        PacingMode::Computed => compute_delay(message, profile),
        PacingMode::Quick | PacingMode::Long => NarrationTiming::fixed(mode, message),
    }
}
