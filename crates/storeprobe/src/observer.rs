//! Run lifecycle hooks consumed by the peripheral reporters.
//!
//! The browser harness owns test scheduling; it notifies observers as a run
//! progresses. Every hook has a no-op default so an observer only implements
//! what it cares about.

use crate::result::ProbeResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Content type the harness uses for recorded videos
pub const VIDEO_CONTENT_TYPE: &str = "video/webm";

/// Attachment name the harness uses for recorded videos
pub const VIDEO_ATTACHMENT_NAME: &str = "video";

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test exceeded its timeout
    TimedOut,
    /// Test was skipped
    Skipped,
    /// Run was interrupted while the test was executing
    Interrupted,
}

impl TestStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing (timeouts included)
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }
}

/// Overall status reported when the run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Every test passed or was skipped
    Passed,
    /// At least one test failed
    Failed,
    /// The run hit its global timeout
    TimedOut,
    /// The run was interrupted
    Interrupted,
}

/// A test as identified by the harness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Title of the enclosing suite (describe block or file)
    pub parent_title: String,
    /// Test title
    pub title: String,
}

impl TestCase {
    /// Create a test case
    #[must_use]
    pub fn new(parent_title: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            parent_title: parent_title.into(),
            title: title.into(),
        }
    }

    /// Stable identifier: `"{parent_title}:{title}"`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.parent_title, self.title)
    }
}

/// File or blob attached to a test result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment name (`video`, `screenshot`, `trace`, ...)
    pub name: String,
    /// MIME type
    pub content_type: String,
    /// Location on disk, absent for in-memory attachments
    pub path: Option<PathBuf>,
}

impl Attachment {
    /// Attachment stored on disk
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: Some(path.into()),
        }
    }

    /// Attachment without a file
    #[must_use]
    pub fn inline(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: None,
        }
    }

    /// Whether this is a recorded video
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.name == VIDEO_ATTACHMENT_NAME || self.content_type == VIDEO_CONTENT_TYPE
    }
}

/// Result of one test attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Final status
    pub status: TestStatus,
    /// Attachments in the order the harness produced them
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Retry index, zero for the first attempt
    #[serde(default)]
    pub retry: u32,
    /// Wall-clock duration
    #[serde(default)]
    pub duration: Duration,
}

impl TestOutcome {
    /// Outcome with no attachments
    #[must_use]
    pub const fn new(status: TestStatus) -> Self {
        Self {
            status,
            attachments: Vec::new(),
            retry: 0,
            duration: Duration::ZERO,
        }
    }

    /// Add an attachment
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Set the duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Directory of the first attachment stored on disk
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.attachments
            .iter()
            .find_map(|a| a.path.as_deref())
            .and_then(Path::parent)
    }

    /// Whether any attachment is a recorded video
    #[must_use]
    pub fn has_video(&self) -> bool {
        self.attachments.iter().any(Attachment::is_video)
    }
}

/// Receives run lifecycle notifications from the harness.
///
/// Hooks are called from the harness thread in order: `on_run_begin`, then
/// per test `on_test_begin`, any number of `on_stdout`, `on_test_end`, and
/// finally `on_run_end`.
pub trait RunObserver {
    /// The run is starting
    fn on_run_begin(&mut self) {}

    /// A test is starting
    fn on_test_begin(&mut self, _test: &TestCase) {}

    /// A chunk of stdout was written, attributed to a test when known
    fn on_stdout(&mut self, _chunk: &str, _test: Option<&TestCase>) {}

    /// A test finished
    fn on_test_end(&mut self, _test: &TestCase, _outcome: &TestOutcome) {}

    /// The run finished
    ///
    /// # Errors
    ///
    /// Implementations return errors only for failures the run should report.
    fn on_run_end(&mut self, _status: RunStatus) -> ProbeResult<()> {
        Ok(())
    }
}

/// Fans every notification out to several observers in order
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn RunObserver + Send>>,
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ObserverSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer
    #[must_use]
    pub fn with(mut self, observer: impl RunObserver + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Number of registered observers
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl RunObserver for ObserverSet {
    fn on_run_begin(&mut self) {
        self.observers.iter_mut().for_each(|o| o.on_run_begin());
    }

    fn on_test_begin(&mut self, test: &TestCase) {
        self.observers.iter_mut().for_each(|o| o.on_test_begin(test));
    }

    fn on_stdout(&mut self, chunk: &str, test: Option<&TestCase>) {
        self.observers.iter_mut().for_each(|o| o.on_stdout(chunk, test));
    }

    fn on_test_end(&mut self, test: &TestCase, outcome: &TestOutcome) {
        self.observers
            .iter_mut()
            .for_each(|o| o.on_test_end(test, outcome));
    }

    /// Every observer runs; the first error is returned
    fn on_run_end(&mut self, status: RunStatus) -> ProbeResult<()> {
        let mut first_error = None;
        for observer in &mut self.observers {
            if let Err(e) = observer.on_run_end(status) {
                tracing::error!(error = %e, "observer failed at run end");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
