//! Narrate command handler

use crate::commands::NarrateArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use std::path::PathBuf;
use std::time::Instant;
use storeprobe::config::{ENV_SPEECH_KEY, ENV_SPEECH_REGION};
use storeprobe::{NarrationSummary, SpeechSettings, SuiteConfig, VideoNarrator};

/// Directories and voice for one narration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationPlan {
    /// Searched recursively for recordings
    pub test_results: PathBuf,
    /// Receives the narrated `.mp4` files
    pub output: PathBuf,
    /// Speech settings with any `--voice` override applied
    pub speech: SpeechSettings,
}

impl NarrationPlan {
    /// Command-line values over configured ones
    #[must_use]
    pub fn resolve(suite: &SuiteConfig, args: &NarrateArgs) -> Self {
        let mut speech = suite.speech.clone();
        if let Some(ref voice) = args.voice {
            speech.voice.clone_from(voice);
        }
        Self {
            test_results: args
                .test_results
                .clone()
                .unwrap_or_else(|| suite.test_results_dir.clone()),
            output: args
                .output
                .clone()
                .unwrap_or_else(|| suite.narrated_videos_dir.clone()),
            speech,
        }
    }

    /// Azure/ffmpeg narrator, or an error naming the missing variables
    pub fn narrator(&self) -> CliResult<VideoNarrator> {
        VideoNarrator::from_settings(&self.speech).ok_or_else(|| {
            CliError::narration(format!(
                "speech credentials missing; set {ENV_SPEECH_KEY} and {ENV_SPEECH_REGION}"
            ))
        })
    }
}

/// Execute the narrate command
pub fn execute_narrate(
    config: &CliConfig,
    suite: &SuiteConfig,
    args: &NarrateArgs,
) -> CliResult<NarrationSummary> {
    let plan = NarrationPlan::resolve(suite, args);
    run_plan(config, &plan, &plan.narrator()?)
}

/// Narrate with an explicit narrator on a private runtime
pub fn run_plan(
    config: &CliConfig,
    plan: &NarrationPlan,
    narrator: &VideoNarrator,
) -> CliResult<NarrationSummary> {
    let mut reporter =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    reporter.start_spinner(&format!("Narrating videos in {}", plan.test_results.display()));
    let started = Instant::now();
    let result = runtime.block_on(narrator.process(&plan.test_results, &plan.output));
    reporter.finish();
    let summary = result?;

    if summary.found == 0 {
        reporter.warning(&format!("No videos found in {}", plan.test_results.display()));
    }
    for path in &summary.narrated {
        println!("{}", path.display());
    }
    for (video, error) in &summary.failed {
        reporter.failure(&format!("{}: {error}", video.display()));
    }
    reporter.narration_summary(
        summary.found,
        summary.narrated.len(),
        summary.failed.len(),
        started.elapsed(),
    );

    if summary.failed.is_empty() {
        Ok(summary)
    } else {
        Err(CliError::narration(format!(
            "{} of {} videos failed",
            summary.failed.len(),
            summary.found
        )))
    }
}
