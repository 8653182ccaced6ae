//! Run-scoped collector for accessibility scan results.

use super::render::render_report;
use super::stats::SeverityStats;
use super::violation::{PageViolationGroup, ViolationRecord};
use crate::result::{ProbeError, ProbeResult};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Default output directory, shared with the harness HTML report
pub const DEFAULT_REPORT_DIR: &str = "playwright-report";

/// File name of the HTML report
pub const REPORT_FILE_NAME: &str = "accessibility-report.html";

/// File name of the JSON summary
pub const SUMMARY_FILE_NAME: &str = "accessibility-report.json";

/// Collects violations page by page and renders the report.
///
/// Pages keep their insertion order, which is also the order of the
/// per-page chart and sections. Statistics are recomputed from the stored
/// pages on every call.
///
/// # Example
///
/// ```ignore
/// let mut reporter = AccessibilityReporter::new();
/// reporter.add_violations("Home Page", scan_results);
/// reporter.add_violations("Cart", Vec::new()); // dropped
/// reporter.generate_report("Guest checkout", None)?;
/// ```
#[derive(Debug, Clone)]
pub struct AccessibilityReporter {
    groups: Vec<PageViolationGroup>,
    output_dir: PathBuf,
}

impl Default for AccessibilityReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportSummary<'a> {
    test_label: &'a str,
    generated_at: String,
    stats: SeverityStats,
    pages: &'a [PageViolationGroup],
}

impl AccessibilityReporter {
    /// Reporter writing to [`DEFAULT_REPORT_DIR`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }

    /// Set the default output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Default output directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Record the violations found on a page.
    ///
    /// An empty list is dropped: clean pages never appear in the report.
    pub fn add_violations(&mut self, page: impl Into<String>, violations: Vec<ViolationRecord>) {
        if violations.is_empty() {
            return;
        }
        let page = page.into();
        tracing::debug!(
            page = %page,
            count = violations.len(),
            "recorded accessibility violations"
        );
        self.groups.push(PageViolationGroup { page, violations });
    }

    /// Record several pages at once, dropping empty ones
    pub fn extend_pages(&mut self, pages: impl IntoIterator<Item = PageViolationGroup>) {
        for group in pages {
            self.add_violations(group.page, group.violations);
        }
    }

    /// Recorded pages in insertion order
    #[must_use]
    pub fn violations(&self) -> &[PageViolationGroup] {
        &self.groups
    }

    /// Severity counts, derived from the recorded pages
    #[must_use]
    pub fn stats(&self) -> SeverityStats {
        SeverityStats::from_groups(&self.groups)
    }

    /// Render the HTML document stamped with the current local time
    #[must_use]
    pub fn render_html(&self, test_label: &str) -> String {
        self.render_html_at(test_label, &Local::now())
    }

    /// Render the HTML document with an explicit timestamp
    #[must_use]
    pub fn render_html_at<Tz>(&self, test_label: &str, generated_at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        render_report(test_label, &self.groups, generated_at)
    }

    /// Write `accessibility-report.html`, replacing any previous one.
    ///
    /// `output_dir` overrides the reporter's directory; it is created if
    /// missing. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Io`] naming the directory or file that failed.
    pub fn generate_report(
        &self,
        test_label: &str,
        output_dir: Option<&Path>,
    ) -> ProbeResult<PathBuf> {
        let path = self.prepare_output(output_dir, REPORT_FILE_NAME)?;
        let html = self.render_html(test_label);
        fs::write(&path, html).map_err(|e| ProbeError::io(&path, e))?;

        let stats = self.stats();
        tracing::info!(
            path = %path.display(),
            total = stats.total,
            pages = self.groups.len(),
            "accessibility report generated"
        );
        Ok(path)
    }

    /// Write `accessibility-report.json` with stats and every recorded page
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Io`] on filesystem failure.
    pub fn generate_json_summary(
        &self,
        test_label: &str,
        output_dir: Option<&Path>,
    ) -> ProbeResult<PathBuf> {
        let path = self.prepare_output(output_dir, SUMMARY_FILE_NAME)?;
        let json = self.render_json_summary(test_label)?;
        fs::write(&path, json).map_err(|e| ProbeError::io(&path, e))?;
        tracing::info!(path = %path.display(), "accessibility summary written");
        Ok(path)
    }

    /// Pretty-printed JSON summary
    pub fn render_json_summary(&self, test_label: &str) -> ProbeResult<String> {
        let summary = ReportSummary {
            test_label,
            generated_at: Local::now().to_rfc3339(),
            stats: self.stats(),
            pages: &self.groups,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    fn prepare_output(&self, output_dir: Option<&Path>, file_name: &str) -> ProbeResult<PathBuf> {
        let dir = output_dir.unwrap_or(&self.output_dir);
        fs::create_dir_all(dir).map_err(|e| ProbeError::io(dir, e))?;
        Ok(dir.join(file_name))
    }
}

/// Load pages from a JSON array of `{ "page": ..., "violations": [...] }`
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_page_violations(path: &Path) -> ProbeResult<Vec<PageViolationGroup>> {
    let text = fs::read_to_string(path).map_err(|e| ProbeError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}
