//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storeprobe: narration timing, accessibility reports and narrated test videos
#[derive(Parser, Debug)]
#[command(name = "storeprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Suite configuration file (YAML)
    #[arg(long, global = true, env = "STOREPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the narration delay for a line of text
    Delay(DelayArgs),

    /// Generate the accessibility HTML report
    #[command(name = "a11y-report")]
    A11yReport(A11yReportArgs),

    /// Add spoken narration to recorded test videos
    Narrate(NarrateArgs),

    /// Print the session timestamp and results directory
    Session,

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the delay command
#[derive(Args, Debug)]
pub struct DelayArgs {
    /// Narration text (multiple words are joined with spaces)
    #[arg(required = true)]
    pub message: Vec<String>,

    /// Use the flat quick delay (2 s)
    #[arg(long, conflicts_with = "long")]
    pub quick: bool,

    /// Use the flat long delay (4 s)
    #[arg(long)]
    pub long: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: DelayFormat,
}

impl DelayArgs {
    /// Message words joined into one line
    #[must_use]
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

/// Output format for the delay command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelayFormat {
    /// Human-readable breakdown
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Arguments for the a11y-report command
#[derive(Args, Debug)]
pub struct A11yReportArgs {
    /// JSON array of `{ "page": ..., "violations": [...] }` from axe scans
    #[arg(short, long, conflicts_with = "demo", required_unless_present = "demo")]
    pub input: Option<PathBuf>,

    /// Render the built-in sample checkout data
    #[arg(long)]
    pub demo: bool,

    /// Label shown in the report header
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory (defaults to the configured report directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write accessibility-report.json
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the narrate command
#[derive(Args, Debug)]
pub struct NarrateArgs {
    /// Directory searched recursively for .webm recordings
    pub test_results: Option<PathBuf>,

    /// Directory the narrated .mp4 files are written to
    pub output: Option<PathBuf>,

    /// Voice to speak with
    #[arg(long)]
    pub voice: Option<String>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Load this file instead of the global --config
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Log format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
