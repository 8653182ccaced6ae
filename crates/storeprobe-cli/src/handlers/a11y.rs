//! Accessibility report command handler

use crate::commands::A11yReportArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use std::path::PathBuf;
use storeprobe::accessibility::{demo_reporter, DEMO_LABEL};
use storeprobe::{load_page_violations, AccessibilityReporter, SuiteConfig};

/// Header label when scanning real pages without `--name`
pub const DEFAULT_SCAN_LABEL: &str = "Accessibility Scan";

/// Files written by one `a11y-report` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutputs {
    /// The HTML report
    pub html: PathBuf,
    /// The JSON summary, when requested
    pub json: Option<PathBuf>,
}

/// Execute the a11y-report command
pub fn execute_a11y_report(
    config: &CliConfig,
    suite: &SuiteConfig,
    args: &A11yReportArgs,
) -> CliResult<ReportOutputs> {
    let reporter =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let accessibility = build_reporter(suite, args)?;
    let label = report_label(args);

    reporter.header(&label);
    let stats = accessibility.stats();
    reporter.severity_summary(&stats);

    let output = args.output.as_deref();
    reporter.info(&format!(
        "Writing report to {}",
        output.unwrap_or_else(|| accessibility.output_dir()).display()
    ));
    let html = accessibility.generate_report(&label, output)?;
    let json = if args.json {
        Some(accessibility.generate_json_summary(&label, output)?)
    } else {
        None
    };

    println!("{}", html.display());
    if let Some(ref path) = json {
        println!("{}", path.display());
    }
    if stats.is_clean() {
        reporter.success("No accessibility violations found");
    } else {
        reporter.warning(&format!(
            "{} violations across {} pages",
            stats.total,
            accessibility.violations().len()
        ));
    }
    Ok(ReportOutputs { html, json })
}

/// Reporter filled from `--input` or the demo data
pub fn build_reporter(
    suite: &SuiteConfig,
    args: &A11yReportArgs,
) -> CliResult<AccessibilityReporter> {
    let reporter = if args.demo {
        demo_reporter()
    } else {
        let input = args
            .input
            .as_deref()
            .ok_or_else(|| CliError::invalid_argument("either --input or --demo is required"))?;
        let mut reporter = AccessibilityReporter::new();
        reporter.extend_pages(load_page_violations(input)?);
        reporter
    };
    Ok(reporter.with_output_dir(&suite.report_dir))
}

/// `--name`, or a default for demo and real scans
#[must_use]
pub fn report_label(args: &A11yReportArgs) -> String {
    match (&args.name, args.demo) {
        (Some(name), _) => name.clone(),
        (None, true) => DEMO_LABEL.to_string(),
        (None, false) => DEFAULT_SCAN_LABEL.to_string(),
    }
}
