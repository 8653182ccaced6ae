//! Accessibility report aggregation.
//!
//! Scan results arrive per page in the axe-core result shape. The
//! [`AccessibilityReporter`] keeps them in insertion order, derives
//! [`SeverityStats`] on demand and renders a self-contained HTML report
//! with two Chart.js charts and a collapsible section per page.

pub mod demo;
pub mod render;
pub mod reporter;
pub mod stats;
pub mod violation;

pub use demo::{demo_pages, demo_reporter, DEMO_LABEL};
pub use render::{escape_html, render_report, truncate_snippet};
pub use reporter::{
    load_page_violations, AccessibilityReporter, DEFAULT_REPORT_DIR, REPORT_FILE_NAME,
    SUMMARY_FILE_NAME,
};
pub use stats::SeverityStats;
pub use violation::{AffectedNode, Impact, PageViolationGroup, ViolationRecord};
