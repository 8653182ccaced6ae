//! Narration: pacing scripted output to speech, and narrating recorded videos.
//!
//! - [`timing`]: the delay formula
//! - [`pacing`]: writing a line and holding the sequence for its delay
//! - [`speech`] and [`video`]: post-run voice-over of `.webm` recordings
//!   (feature `narration`)

pub mod pacing;
pub mod timing;

#[cfg(feature = "narration")]
pub mod speech;
#[cfg(feature = "narration")]
pub mod video;

#[cfg(feature = "narration")]
pub use pacing::pace_async;
pub use pacing::{pacing_delay, Narrator, PacingHost, RecordingHost, ThreadSleepHost};
#[cfg(feature = "narration")]
pub use speech::{AzureSpeech, FfmpegMuxer, MediaMuxer, SpeechBackend};
pub use timing::{
    compute_delay, timing_for, NarrationProfile, NarrationTiming, PacingMode, LONG_DELAY_MS,
    MAX_PAUSE_MS, QUICK_DELAY_MS,
};
#[cfg(feature = "narration")]
pub use video::{
    extract_test_info, find_videos, narration_script, NarrationObserver, NarrationSummary,
    VideoNarrator, VideoTestInfo,
};
