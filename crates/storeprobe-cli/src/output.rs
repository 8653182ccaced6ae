//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use storeprobe::SeverityStats;

/// Progress reporter for report generation and narration
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a spinner for work of unknown length
    pub fn start_spinner(&mut self, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {elapsed} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Finish and clear the progress indicator
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Failures print even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print the severity breakdown of an accessibility scan
    pub fn severity_summary(&self, stats: &SeverityStats) {
        if self.quiet {
            return;
        }

        let line = if self.use_color {
            format!(
                "{} violations ({} critical, {} serious, {} moderate, {} minor)",
                Style::new().bold().apply_to(stats.total),
                Style::new().red().bold().apply_to(stats.critical),
                Style::new().color256(208).apply_to(stats.serious),
                Style::new().yellow().apply_to(stats.moderate),
                Style::new().cyan().apply_to(stats.minor),
            )
        } else {
            format!(
                "{} violations ({} critical, {} serious, {} moderate, {} minor)",
                stats.total, stats.critical, stats.serious, stats.moderate, stats.minor
            )
        };
        let _ = self.term.write_line(&line);
    }

    /// Print the outcome of a narration pass
    pub fn narration_summary(
        &self,
        found: usize,
        narrated: usize,
        failed: usize,
        elapsed: Duration,
    ) {
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");
        let secs = elapsed.as_secs_f64();

        if self.use_color {
            let status = if failed > 0 {
                Style::new().red().bold().apply_to("INCOMPLETE")
            } else {
                Style::new().green().bold().apply_to("DONE")
            };
            let _ = self.term.write_line(&format!(
                "{status} {found} videos in {secs:.2}s ({} narrated, {} failed)",
                Style::new().green().apply_to(narrated),
                if failed > 0 {
                    Style::new().red().bold().apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
            ));
        } else {
            let status = if failed > 0 { "INCOMPLETE" } else { "DONE" };
            let _ = self.term.write_line(&format!(
                "{status} {found} videos in {secs:.2}s ({narrated} narrated, {failed} failed)"
            ));
        }
    }
}
