//! Config command handler

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use storeprobe::{ProbeError, SuiteConfig};

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let suite = config.load_suite(args.file.as_deref())?;
    print!("{}", render_config(&suite)?);
    Ok(())
}

/// Effective configuration as YAML; the speech key is never included
pub fn render_config(suite: &SuiteConfig) -> CliResult<String> {
    Ok(serde_yaml_ng::to_string(suite).map_err(ProbeError::from)?)
}
