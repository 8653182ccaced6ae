//! Narrated test videos.
//!
//! After a run, every recorded `.webm` under the results directory gets a
//! spoken summary of its test (name, status, error) muxed in as an audio
//! track. Failures are contained per video: one bad recording never stops
//! the rest from being narrated.

use super::speech::{AzureSpeech, FfmpegMuxer, MediaMuxer, SpeechBackend};
use crate::config::{SpeechSettings, SuiteConfig};
use crate::observer::{RunObserver, RunStatus, TestCase, TestOutcome, TestStatus};
use crate::result::{ProbeError, ProbeResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Marker file the harness writes next to a failed test's artifacts
pub const ERROR_CONTEXT_FILE: &str = "error-context.md";

/// One step of a test, as read back for narration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrationStep {
    /// Step title
    pub title: String,
    /// Error raised in this step
    pub error: Option<String>,
}

/// What is known about the test that recorded a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoTestInfo {
    /// Human-readable test name
    pub test_name: String,
    /// Passed unless an error context was found
    pub status: TestStatus,
    /// First line of the error context
    pub error: Option<String>,
    /// Recorded steps (empty when unknown)
    pub steps: Vec<NarrationStep>,
    /// Test duration
    pub duration_ms: Option<u64>,
}

/// Outcome of a narration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NarrationSummary {
    /// Videos discovered
    pub found: usize,
    /// Narrated videos written
    pub narrated: Vec<PathBuf>,
    /// Source videos that could not be narrated, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

/// Every `.webm` file below `dir`, in path order.
///
/// A missing directory yields no videos.
pub fn find_videos(dir: &Path) -> ProbeResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{root}/**/*.webm");
    let entries = glob::glob(&pattern)
        .map_err(|e| ProbeError::config(format!("invalid video pattern {pattern}: {e}")))?;

    let mut videos = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => videos.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "skipping unreadable path"),
        }
    }
    videos.sort();
    Ok(videos)
}

fn parent_dir_name(video: &Path) -> String {
    video
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive test info from the directory holding `video`
pub fn extract_test_info(video: &Path) -> ProbeResult<VideoTestInfo> {
    let test_name = parent_dir_name(video).replace('-', " ");
    let context = video
        .parent()
        .map_or_else(|| PathBuf::from(ERROR_CONTEXT_FILE), |dir| dir.join(ERROR_CONTEXT_FILE));

    // A context file whose first line has no text does not mark a failure
    let error = if context.is_file() {
        let text = fs::read_to_string(&context).map_err(|e| ProbeError::io(&context, e))?;
        let first = text.lines().next().unwrap_or_default();
        Some(first.trim_start_matches('#').trim().to_string()).filter(|e| !e.is_empty())
    } else {
        None
    };

    Ok(VideoTestInfo {
        test_name,
        status: if error.is_some() {
            TestStatus::Failed
        } else {
            TestStatus::Passed
        },
        error,
        steps: Vec::new(),
        duration_ms: None,
    })
}

/// Spoken summary: sentences joined with `". "`
#[must_use]
pub fn narration_script(info: &VideoTestInfo) -> String {
    let mut script = vec![format!("Test: {}", info.test_name)];

    if info.status.is_passed() {
        script.push("Status: Passed successfully".to_string());
    } else if info.status.is_failed() {
        script.push("Status: Failed".to_string());
        if let Some(error) = info.error.as_deref().filter(|e| !e.is_empty()) {
            script.push(format!("Error: {error}"));
        }
    }

    if !info.steps.is_empty() {
        script.push("Test steps:".to_string());
        for (index, step) in info.steps.iter().enumerate() {
            script.push(format!("Step {}: {}", index + 1, step.title));
            if let Some(error) = &step.error {
                script.push(format!("Failed at this step: {error}"));
            }
        }
    }

    if let Some(ms) = info.duration_ms.filter(|ms| *ms > 0) {
        script.push(format!("Total duration: {:.1} seconds", ms as f64 / 1000.0));
    }

    script.join(". ")
}

/// Narrates recorded videos with a speech backend and a muxer
#[derive(Clone)]
pub struct VideoNarrator {
    speech: Arc<dyn SpeechBackend>,
    muxer: Arc<dyn MediaMuxer>,
    voice: String,
}

impl std::fmt::Debug for VideoNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoNarrator")
            .field("voice", &self.voice)
            .finish()
    }
}

impl VideoNarrator {
    /// Narrator over the given backends
    pub fn new(speech: Arc<dyn SpeechBackend>, muxer: Arc<dyn MediaMuxer>) -> Self {
        Self {
            speech,
            muxer,
            voice: crate::config::DEFAULT_VOICE.to_string(),
        }
    }

    /// Azure speech and ffmpeg, if the settings carry usable credentials
    #[must_use]
    pub fn from_settings(settings: &SpeechSettings) -> Option<Self> {
        let (key, region) = settings.credentials()?;
        Some(
            Self::new(Arc::new(AzureSpeech::new(key, region)), Arc::new(FfmpegMuxer::new()))
                .with_voice(&settings.voice),
        )
    }

    /// Speak with a different voice
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Narrate every video under `test_results_dir` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Only setup failures (creating `output_dir`, scanning for videos) are
    /// returned; per-video failures land in [`NarrationSummary::failed`].
    pub async fn process(
        &self,
        test_results_dir: &Path,
        output_dir: &Path,
    ) -> ProbeResult<NarrationSummary> {
        fs::create_dir_all(output_dir).map_err(|e| ProbeError::io(output_dir, e))?;

        let videos = find_videos(test_results_dir)?;
        let mut summary = NarrationSummary {
            found: videos.len(),
            ..NarrationSummary::default()
        };
        if videos.is_empty() {
            tracing::info!(dir = %test_results_dir.display(), "no video files found");
            return Ok(summary);
        }
        tracing::info!(count = videos.len(), "found videos to narrate");

        for video in videos {
            match self.narrate_one(&video, output_dir).await {
                Ok(out) => {
                    tracing::info!(path = %out.display(), "narration completed");
                    summary.narrated.push(out);
                }
                Err(e) => {
                    tracing::error!(
                        video = %video.display(),
                        error = %e,
                        "failed to narrate video"
                    );
                    summary.failed.push((video, e.to_string()));
                }
            }
        }
        Ok(summary)
    }

    async fn narrate_one(&self, video: &Path, output_dir: &Path) -> ProbeResult<PathBuf> {
        tracing::info!(video = %video.display(), "processing");
        let info = extract_test_info(video)?;
        let script = narration_script(&info);

        let audio = output_dir.join(format!("narration-{}.wav", uuid::Uuid::new_v4()));
        let out = output_dir.join(format!("{}.mp4", parent_dir_name(video)));

        let result = async {
            self.speech.synthesize(&script, &self.voice, &audio).await?;
            self.muxer.mux(video, &audio, &out).await
        }
        .await;

        if audio.exists() {
            if let Err(e) = fs::remove_file(&audio) {
                tracing::warn!(
                    path = %audio.display(),
                    error = %e,
                    "could not remove temporary audio"
                );
            }
        }
        result.map(|()| out)
    }
}

/// Run observer that narrates recorded videos when the run ends
#[derive(Debug)]
pub struct NarrationObserver {
    settings: SpeechSettings,
    test_results_dir: PathBuf,
    output_dir: PathBuf,
    narrator: Option<VideoNarrator>,
    has_videos: bool,
    last_summary: Option<NarrationSummary>,
}

impl NarrationObserver {
    /// Observer using the suite's speech settings and directories
    #[must_use]
    pub fn new(config: &SuiteConfig) -> Self {
        Self {
            settings: config.speech.clone(),
            test_results_dir: config.test_results_dir.clone(),
            output_dir: config.narrated_videos_dir.clone(),
            narrator: None,
            has_videos: false,
            last_summary: None,
        }
    }

    /// Use a specific narrator instead of the Azure/ffmpeg default
    #[must_use]
    pub fn with_narrator(mut self, narrator: VideoNarrator) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Whether any finished test recorded a video
    #[must_use]
    pub const fn has_videos(&self) -> bool {
        self.has_videos
    }

    /// Summary of the last narration pass, if one ran
    #[must_use]
    pub fn last_summary(&self) -> Option<&NarrationSummary> {
        self.last_summary.as_ref()
    }
}

impl RunObserver for NarrationObserver {
    fn on_run_begin(&mut self) {
        tracing::info!("narration observer monitoring test execution");
    }

    fn on_test_end(&mut self, _test: &TestCase, outcome: &TestOutcome) {
        if outcome.has_video() {
            self.has_videos = true;
        }
    }

    fn on_run_end(&mut self, _status: RunStatus) -> ProbeResult<()> {
        if !self.has_videos {
            tracing::info!("no videos recorded, skipping narration");
            return Ok(());
        }
        if !self.settings.has_credentials() {
            tracing::warn!(
                "SPEECH_KEY/SPEECH_REGION not configured, skipping narration \
                 (export SPEECH_KEY=<key> and SPEECH_REGION=<region, e.g. eastus>)"
            );
            return Ok(());
        }
        let Some(narrator) = self
            .narrator
            .clone()
            .or_else(|| VideoNarrator::from_settings(&self.settings))
        else {
            return Ok(());
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProbeError::io("<tokio runtime>", e))?;

        tracing::info!("generating narrated videos");
        match runtime.block_on(narrator.process(&self.test_results_dir, &self.output_dir)) {
            Ok(summary) => {
                tracing::info!(
                    narrated = summary.narrated.len(),
                    failed = summary.failed.len(),
                    output = %self.output_dir.display(),
                    "video narration complete"
                );
                self.last_summary = Some(summary);
            }
            Err(e) => tracing::error!(error = %e, "failed to generate narrated videos"),
        }
        Ok(())
    }
}
