//! Suite configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables.

use crate::accessibility::DEFAULT_REPORT_DIR;
use crate::narration::NarrationProfile;
use crate::result::{ProbeError, ProbeResult};
use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Speech subscription key
pub const ENV_SPEECH_KEY: &str = "SPEECH_KEY";

/// Speech service region
pub const ENV_SPEECH_REGION: &str = "SPEECH_REGION";

/// Session timestamp shared by every worker of one run
pub const ENV_SESSION_TIMESTAMP: &str = "TEST_SESSION_TIMESTAMP";

/// Key value shipped in sample environment files
pub const PLACEHOLDER_SPEECH_KEY: &str = "YOUR_SPEECH_KEY";

/// Region value shipped in sample environment files
pub const PLACEHOLDER_SPEECH_REGION: &str = "YOUR_REGION";

/// Default voice for narrated videos
pub const DEFAULT_VOICE: &str = "en-US-JennyNeural";

/// Speech service credentials and voice
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Subscription key, never serialized back out
    #[serde(skip_serializing)]
    pub key: Option<String>,
    /// Service region (e.g. `eastus`)
    pub region: Option<String>,
    /// Neural voice name
    pub voice: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            key: None,
            region: None,
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl fmt::Debug for SpeechSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechSettings")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .field("voice", &self.voice)
            .finish()
    }
}

impl SpeechSettings {
    /// Key and region, unless either is missing, blank or a placeholder
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = real_value(self.key.as_deref(), PLACEHOLDER_SPEECH_KEY)?;
        let region = real_value(self.region.as_deref(), PLACEHOLDER_SPEECH_REGION)?;
        Some((key, region))
    }

    /// Whether narration can reach the speech service
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }
}

fn real_value<'a>(value: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != placeholder)
}

/// Everything a suite run needs to know about paths, pacing and speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Where HTML reports go
    pub report_dir: PathBuf,
    /// Root of per-test artifacts (videos, traces, console logs)
    pub test_results_dir: PathBuf,
    /// Where narrated videos are written
    pub narrated_videos_dir: PathBuf,
    /// Narration timing tunables
    pub narration: NarrationProfile,
    /// Speech service settings
    pub speech: SpeechSettings,
    /// Fixed session timestamp; generated from the clock when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timestamp: Option<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            test_results_dir: PathBuf::from("test-results"),
            narrated_videos_dir: PathBuf::from("narrated-videos"),
            narration: NarrationProfile::default(),
            speech: SpeechSettings::default(),
            session_timestamp: None,
        }
    }
}

impl SuiteConfig {
    /// Defaults overlaid with the process environment
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml(text: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: &Path) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ProbeError::io(path, e))?;
        Self::from_yaml(&text)
    }

    /// Defaults, then `file` if given, then the process environment
    pub fn load(file: Option<&Path>) -> ProbeResult<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Overlay variables from `lookup`; blank values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = var(ENV_SPEECH_KEY) {
            self.speech.key = Some(key);
        }
        if let Some(region) = var(ENV_SPEECH_REGION) {
            self.speech.region = Some(region);
        }
        if let Some(ts) = var(ENV_SESSION_TIMESTAMP) {
            self.session_timestamp = Some(ts);
        }
    }

    /// Reject values the timing model cannot use
    pub fn validate(&self) -> ProbeResult<()> {
        self.narration.validate()?;
        if self.speech.voice.trim().is_empty() {
            return Err(ProbeError::config("speech.voice must not be empty"));
        }
        Ok(())
    }

    /// Configured session timestamp, or one for the current local time
    #[must_use]
    pub fn session_timestamp(&self) -> String {
        self.session_timestamp
            .clone()
            .unwrap_or_else(|| format_session_timestamp(&Local::now()))
    }

    /// `{test_results_dir}/session_{timestamp}`
    #[must_use]
    pub fn session_results_dir(&self) -> PathBuf {
        session_dir(&self.test_results_dir, &self.session_timestamp())
    }
}

/// Per-session directory under `root`
#[must_use]
pub fn session_dir(root: &Path, timestamp: &str) -> PathBuf {
    root.join(format!("session_{timestamp}"))
}

/// Format as `YYYY-MM-DD_h-mmam`, 12-hour clock, hour unpadded
#[must_use]
pub fn format_session_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let (is_pm, hour) = at.hour12();
    format!(
        "{}_{}-{:02}{}",
        at.date_naive().format("%Y-%m-%d"),
        hour,
        at.minute(),
        if is_pm { "pm" } else { "am" }
    )
}
