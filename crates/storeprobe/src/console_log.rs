//! Per-test console capture.
//!
//! Collects what each test prints, drops harness noise, and writes the
//! remaining lines next to the test's other artifacts as `console-logs.txt`.

use crate::observer::{RunObserver, TestCase, TestOutcome};
use crate::result::ProbeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// File written into each test's result directory
pub const CONSOLE_LOG_FILE: &str = "console-logs.txt";

/// Substrings that mark a stdout line as noise
pub const DEFAULT_EXCLUDED: [&str; 4] = ["[dotenv", "injecting env", "Page URL:", "Page title:"];

/// Substring blocklist applied to trimmed stdout chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogFilter {
    excluded: Vec<String>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED)
    }
}

impl LogFilter {
    /// Filter excluding the given substrings
    #[must_use]
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter that keeps every non-empty line
    #[must_use]
    pub const fn keep_all() -> Self {
        Self {
            excluded: Vec::new(),
        }
    }

    /// Excluded substrings
    #[must_use]
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Trimmed chunk if it should be kept
    #[must_use]
    pub fn accept<'a>(&self, chunk: &'a str) -> Option<&'a str> {
        let text = chunk.trim();
        if text.is_empty() || self.excluded.iter().any(|noise| text.contains(noise.as_str())) {
            return None;
        }
        Some(text)
    }
}

/// Run observer that saves filtered stdout per test
#[derive(Debug, Default)]
pub struct ConsoleLogCapture {
    filter: LogFilter,
    logs: HashMap<String, Vec<String>>,
    saved: Vec<PathBuf>,
}

impl ConsoleLogCapture {
    /// Capture with the default noise filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter
    #[must_use]
    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Lines captured so far for a running test
    #[must_use]
    pub fn logs_for(&self, test: &TestCase) -> &[String] {
        self.logs.get(&test.id()).map_or(&[][..], Vec::as_slice)
    }

    /// Log files written so far
    #[must_use]
    pub fn saved_files(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl RunObserver for ConsoleLogCapture {
    fn on_test_begin(&mut self, test: &TestCase) {
        self.logs.insert(test.id(), Vec::new());
    }

    fn on_stdout(&mut self, chunk: &str, test: Option<&TestCase>) {
        let Some(test) = test else {
            return;
        };
        if let Some(line) = self.filter.accept(chunk) {
            self.logs.entry(test.id()).or_default().push(line.to_string());
        }
    }

    fn on_test_end(&mut self, test: &TestCase, outcome: &TestOutcome) {
        let Some(lines) = self.logs.remove(&test.id()) else {
            return;
        };
        if lines.is_empty() {
            return;
        }
        let Some(dir) = outcome.output_dir() else {
            tracing::debug!(test = %test.id(), "no attachment directory, console logs dropped");
            return;
        };

        let path = dir.join(CONSOLE_LOG_FILE);
        match fs::write(&path, lines.join("\n")) {
            Ok(()) => {
                tracing::info!(path = %path.display(), lines = lines.len(), "console logs saved");
                self.saved.push(path);
            }
            Err(e) => {
                let err = ProbeError::io(&path, e);
                tracing::error!(error = %err, "failed to save console logs");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{Attachment, TestStatus};
    use tempfile::TempDir;

    mod filter_tests {
        use super::*;

        #[test]
        fn test_default_filter_drops_each_noise_entry() {
            let filter = LogFilter::default();
            assert_eq!(filter.excluded().len(), 4);
            for noisy in [
                "[dotenv@16.4.5] injecting env (3) from .env",
                "injecting env (0)",
                "Page URL: https://www.cuisinart.com/",
                "Page title: Cuisinart",
            ] {
                assert_eq!(filter.accept(noisy), None, "{noisy}");
            }
        }

        #[test]
        fn test_trims_and_keeps_meaningful_lines() {
            let filter = LogFilter::default();
            assert_eq!(filter.accept("  Added to cart \n"), Some("Added to cart"));
            assert_eq!(filter.accept("   \n"), None);
        }

        #[test]
        fn test_custom_filter() {
            let filter = LogFilter::new(["DEBUG"]);
            assert_eq!(filter.accept("DEBUG noise"), None);
            assert_eq!(filter.accept("Page URL: kept"), Some("Page URL: kept"));
            assert_eq!(LogFilter::keep_all().accept("[dotenv x"), Some("[dotenv x"));
        }
    }

    mod capture_tests {
        use super::*;

        fn outcome_in(dir: &std::path::Path) -> TestOutcome {
            TestOutcome::new(TestStatus::Passed)
                .with_attachment(Attachment::inline("stdout", "text/plain"))
                .with_attachment(Attachment::file("video", "video/webm", dir.join("video.webm")))
        }

        #[test]
        fn test_writes_filtered_lines_next_to_attachment() {
            let tmp = TempDir::new().unwrap();
            let test = TestCase::new("Guest checkout", "pays with a card");
            let mut capture = ConsoleLogCapture::new();

            capture.on_test_begin(&test);
            capture.on_stdout("Searching for air fryer\n", Some(&test));
            capture.on_stdout("[dotenv@16] injecting env", Some(&test));
            capture.on_stdout("Page title: Checkout", Some(&test));
            capture.on_stdout("  Order placed  ", Some(&test));
            capture.on_stdout("orphan line", None);
            capture.on_test_end(&test, &outcome_in(tmp.path()));

            let written = fs::read_to_string(tmp.path().join(CONSOLE_LOG_FILE)).unwrap();
            assert_eq!(written, "Searching for air fryer\nOrder placed");
            assert_eq!(capture.saved_files(), [tmp.path().join(CONSOLE_LOG_FILE)]);
        }

        #[test]
        fn test_nothing_written_without_logs() {
            let tmp = TempDir::new().unwrap();
            let test = TestCase::new("Suite", "quiet");
            let mut capture = ConsoleLogCapture::new();

            capture.on_test_begin(&test);
            capture.on_stdout("Page URL: https://example.com", Some(&test));
            capture.on_test_end(&test, &outcome_in(tmp.path()));

            assert!(!tmp.path().join(CONSOLE_LOG_FILE).exists());
            assert!(capture.saved_files().is_empty());
        }

        #[test]
        fn test_nothing_written_without_attachment_path() {
            let test = TestCase::new("Suite", "no artifacts");
            let mut capture = ConsoleLogCapture::new();

            capture.on_test_begin(&test);
            capture.on_stdout("hello", Some(&test));
            assert_eq!(capture.logs_for(&test), ["hello".to_string()]);
            capture.on_test_end(
                &test,
                &TestOutcome::new(TestStatus::Failed)
                    .with_attachment(Attachment::inline("error", "text/plain")),
            );

            assert!(capture.saved_files().is_empty());
            assert!(capture.logs_for(&test).is_empty());
        }

        #[test]
        fn test_begin_resets_previous_lines() {
            let test = TestCase::new("Suite", "retried");
            let mut capture = ConsoleLogCapture::new();

            capture.on_test_begin(&test);
            capture.on_stdout("first attempt", Some(&test));
            capture.on_test_begin(&test);
            capture.on_stdout("second attempt", Some(&test));

            assert_eq!(capture.logs_for(&test), ["second attempt".to_string()]);
        }

        #[test]
        fn test_write_failure_is_not_fatal() {
            let tmp = TempDir::new().unwrap();
            let missing = tmp.path().join("gone");
            let test = TestCase::new("Suite", "dir removed");
            let mut capture = ConsoleLogCapture::new();

            capture.on_test_begin(&test);
            capture.on_stdout("line", Some(&test));
            capture.on_test_end(&test, &outcome_in(&missing));

            assert!(capture.saved_files().is_empty());
        }
    }
}
