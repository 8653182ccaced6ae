//! Storeprobe: narration pacing and accessibility reporting for storefront
//! end-to-end suites.
//!
//! A browser suite drives guest checkouts, logins and crawls across several
//! storefronts. This crate holds the parts of that suite that are not
//! browser automation:
//!
//! - **Narration timing**: how long to hold a scripted sequence so a
//!   spoken line finishes before the next action ([`compute_delay`],
//!   [`Narrator`]).
//! - **Accessibility reports**: per-page axe-core findings rolled up into
//!   severity counts and a self-contained HTML report
//!   ([`AccessibilityReporter`]).
//! - **Run observers**: per-test console capture and post-run video
//!   narration hooked into the harness lifecycle ([`RunObserver`]).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  harness ──► RunObserver ──► ConsoleLogCapture  (console-logs.txt)│
//! │                          └─► NarrationObserver  (*.mp4)           │
//! │                                  │                                │
//! │                                  ▼                                │
//! │                  SpeechBackend + MediaMuxer                       │
//! │                                                                   │
//! │  test script ──► Narrator ──► compute_delay ──► PacingHost        │
//! │                                                                   │
//! │  axe scan ──► AccessibilityReporter ──► SeverityStats             │
//! │                                     └─► accessibility-report.html │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod accessibility;
pub mod config;
pub mod console_log;
pub mod narration;
pub mod observer;
mod result;

pub use accessibility::{
    load_page_violations, AccessibilityReporter, AffectedNode, Impact, PageViolationGroup,
    SeverityStats, ViolationRecord, DEFAULT_REPORT_DIR, REPORT_FILE_NAME, SUMMARY_FILE_NAME,
};
pub use config::{format_session_timestamp, SpeechSettings, SuiteConfig};
pub use console_log::{ConsoleLogCapture, LogFilter, CONSOLE_LOG_FILE};
pub use narration::{
    compute_delay, timing_for, NarrationProfile, NarrationTiming, Narrator, PacingHost,
    PacingMode, RecordingHost, ThreadSleepHost,
};
#[cfg(feature = "narration")]
pub use narration::{NarrationObserver, NarrationSummary, VideoNarrator};
pub use observer::{
    Attachment, ObserverSet, RunObserver, RunStatus, TestCase, TestOutcome, TestStatus,
};
pub use result::{ProbeError, ProbeResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::accessibility::*;
    pub use super::config::*;
    pub use super::console_log::*;
    pub use super::narration::*;
    pub use super::observer::*;
    pub use super::result::{ProbeError, ProbeResult};
}
