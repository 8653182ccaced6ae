//! Storeprobe CLI
//!
//! ## Usage
//!
//! ```bash
//! storeprobe delay "Adding the air fryer to the cart."   # Narration delay
//! storeprobe a11y-report --input axe.json --json         # Accessibility report
//! storeprobe narrate test-results narrated-videos        # Voice-over recordings
//! storeprobe session                                     # Session results dir
//! ```

use clap::Parser;
use std::process::ExitCode;
use storeprobe_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, LogFormatArg, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init_logging(&config);

    match cli.command {
        Commands::Delay(args) => handlers::execute_delay(&config.load_suite(None)?, &args),
        Commands::A11yReport(args) => {
            handlers::execute_a11y_report(&config, &config.load_suite(None)?, &args)?;
            Ok(())
        }
        #[cfg(feature = "narration")]
        Commands::Narrate(args) => {
            handlers::execute_narrate(&config, &config.load_suite(None)?, &args)?;
            Ok(())
        }
        #[cfg(not(feature = "narration"))]
        Commands::Narrate(_) => Err(storeprobe_cli::CliError::narration(
            "built without the narration feature",
        )),
        Commands::Session => {
            handlers::execute_session(&config.load_suite(None)?);
            Ok(())
        }
        Commands::Config(args) => handlers::execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(color)
        .with_log_json(cli.log_format == LogFormatArg::Json)
        .with_config_file(cli.config.clone())
}
