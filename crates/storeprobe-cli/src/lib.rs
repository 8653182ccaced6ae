//! Storeprobe CLI library
//!
//! Command-line front end for the storeprobe library: narration delay
//! breakdowns, accessibility reports, video narration and session paths.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    A11yReportArgs, Cli, ColorArg, Commands, ConfigArgs, DelayArgs, DelayFormat, LogFormatArg,
    NarrateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
