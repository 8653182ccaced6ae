//! Pacing delays for narrated scripts.
//!
//! A narrated test prints a line, then holds the scripted sequence still
//! long enough for the voice-over of that line to finish. The hold goes
//! through [`PacingHost`] so the browser driver (or a test double) decides
//! how to suspend, and the timing formula stays a pure function.

use super::timing::{timing_for, NarrationProfile, NarrationTiming, PacingMode};
use crate::result::{ProbeError, ProbeResult};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Host capable of suspending the current scripted sequence.
///
/// Implementations must block only the calling sequence, never unrelated
/// concurrently running tests.
pub trait PacingHost {
    /// Suspend for exactly `ms` milliseconds
    fn wait_for_timeout(&self, ms: u64);
}

/// Suspends by sleeping the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleepHost;

impl PacingHost for ThreadSleepHost {
    fn wait_for_timeout(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Records requested waits instead of sleeping.
///
/// Clones share the same log, so a handle kept by the test sees waits
/// requested through the narrator.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    waits: Arc<Mutex<Vec<u64>>>,
}

impl RecordingHost {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far, in order
    #[must_use]
    pub fn waits(&self) -> Vec<u64> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Sum of all requested waits
    #[must_use]
    pub fn total_ms(&self) -> u64 {
        self.waits().iter().sum()
    }
}

impl PacingHost for RecordingHost {
    fn wait_for_timeout(&self, ms: u64) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(ms);
        }
    }
}

impl<H: PacingHost + ?Sized> PacingHost for &H {
    fn wait_for_timeout(&self, ms: u64) {
        (**self).wait_for_timeout(ms);
    }
}

/// Hold the current sequence for the computed narration time
pub fn pacing_delay<H: PacingHost + ?Sized>(host: &H, timing: &NarrationTiming) {
    tracing::trace!(duration_ms = timing.duration_ms, "pacing delay");
    host.wait_for_timeout(timing.duration_ms);
}

/// Async pacing delay for tokio-driven scripts
#[cfg(feature = "narration")]
pub async fn pace_async(timing: &NarrationTiming) {
    tracing::trace!(duration_ms = timing.duration_ms, "pacing delay");
    tokio::time::sleep(timing.as_duration()).await;
}

/// Writes narration lines and paces the script after each one.
///
/// Output goes to `out` (stdout by default) so the harness's stdout capture
/// and the narration pipeline both see the line.
#[derive(Debug)]
pub struct Narrator<H, W = std::io::Stdout> {
    host: H,
    out: W,
    profile: NarrationProfile,
}

impl<H: PacingHost> Narrator<H, std::io::Stdout> {
    /// Narrator writing to stdout with the default profile
    #[must_use]
    pub fn stdout(host: H) -> Self {
        Self::new(host, std::io::stdout())
    }
}

impl<H: PacingHost, W: Write> Narrator<H, W> {
    /// Create a narrator over an arbitrary sink
    #[must_use]
    pub fn new(host: H, out: W) -> Self {
        Self {
            host,
            out,
            profile: NarrationProfile::default(),
        }
    }

    /// Replace the timing profile
    #[must_use]
    pub fn with_profile(mut self, profile: NarrationProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Active timing profile
    #[must_use]
    pub const fn profile(&self) -> &NarrationProfile {
        &self.profile
    }

    /// Log a line and wait for its computed narration time
    pub fn narrated_log(&mut self, message: &str) -> ProbeResult<NarrationTiming> {
        self.log(PacingMode::Computed, message)
    }

    /// Log a short status line and wait a flat 2 seconds
    pub fn quick_log(&mut self, message: &str) -> ProbeResult<NarrationTiming> {
        self.log(PacingMode::Quick, message)
    }

    /// Log a detailed line and wait a flat 4 seconds
    pub fn long_log(&mut self, message: &str) -> ProbeResult<NarrationTiming> {
        self.log(PacingMode::Long, message)
    }

    /// Log a line under an explicit pacing rule
    pub fn log(&mut self, mode: PacingMode, message: &str) -> ProbeResult<NarrationTiming> {
        writeln!(self.out, "{message}")
            .and_then(|()| self.out.flush())
            .map_err(|e| ProbeError::io("<narration output>", e))?;

        let timing = timing_for(mode, message, &self.profile);
        pacing_delay(&self.host, &timing);
        Ok(timing)
    }

    /// Borrow the output sink
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Take the host and sink back
    pub fn into_parts(self) -> (H, W) {
        (self.host, self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host that checks the line was already written when the wait starts
    struct OrderCheckingHost {
        sink: Arc<Mutex<Vec<u8>>>,
        seen_before_wait: Arc<Mutex<Vec<String>>>,
    }

    impl PacingHost for OrderCheckingHost {
        fn wait_for_timeout(&self, _ms: u64) {
            let written = String::from_utf8(self.sink.lock().unwrap().clone()).unwrap();
            self.seen_before_wait.lock().unwrap().push(written);
        }
    }

    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_narrated_log_waits_computed_duration() {
        let host = RecordingHost::new();
        let mut narrator = Narrator::new(host.clone(), Vec::new());

        let timing = narrator
            .narrated_log("This is a longer sentence, with a comma and a period.")
            .unwrap();

        assert_eq!(timing.duration_ms, 5900);
        assert_eq!(host.waits(), vec![5900]);
        assert_eq!(
            String::from_utf8(narrator.output().clone()).unwrap(),
            "This is a longer sentence, with a comma and a period.\n"
        );
    }

    #[test]
    fn test_quick_and_long_logs() {
        let host = RecordingHost::new();
        let mut narrator = Narrator::new(host.clone(), Vec::new());

        narrator.quick_log("Cart updated").unwrap();
        narrator.long_log("Proceeding to checkout as a guest").unwrap();
        narrator.narrated_log("").unwrap();

        assert_eq!(host.waits(), vec![2000, 4000, 1500]);
        assert_eq!(host.total_ms(), 7500);
    }

    #[test]
    fn test_line_is_written_before_waiting() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let host = OrderCheckingHost {
            sink: Arc::clone(&sink),
            seen_before_wait: Arc::clone(&seen),
        };
        let mut narrator = Narrator::new(host, SharedSink(sink));

        narrator.narrated_log("Searching for air fryer").unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], "Searching for air fryer\n");
    }

    #[test]
    fn test_custom_profile_is_used() {
        let host = RecordingHost::new();
        let profile = NarrationProfile::new().with_minimum(5000);
        let mut narrator = Narrator::new(host.clone(), Vec::new()).with_profile(profile);

        narrator.narrated_log("Hi").unwrap();

        assert_eq!(narrator.profile().minimum_ms, 5000);
        assert_eq!(host.waits(), vec![5000]);
    }

    #[test]
    fn test_thread_sleep_host_blocks_for_duration() {
        let start = std::time::Instant::now();
        ThreadSleepHost.wait_for_timeout(20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_host_by_reference() {
        let host = RecordingHost::new();
        let mut narrator = Narrator::new(&host, Vec::new());
        narrator.quick_log("ok").unwrap();
        let (_, out) = narrator.into_parts();
        assert_eq!(out, b"ok\n");
        assert_eq!(host.waits(), vec![2000]);
    }

    #[cfg(feature = "narration")]
    #[tokio::test]
    async fn test_pace_async_sleeps() {
        let profile = NarrationProfile::new()
            .with_minimum(10)
            .with_granularity(10);
        let timing = timing_for(PacingMode::Computed, "", &profile);
        let start = std::time::Instant::now();
        pace_async(&timing).await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
