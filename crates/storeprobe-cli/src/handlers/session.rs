//! Session command handler

use storeprobe::SuiteConfig;

/// Execute the session command
pub fn execute_session(suite: &SuiteConfig) {
    println!("{}", render_session(suite));
}

/// Timestamp and results directory, one per line
#[must_use]
pub fn render_session(suite: &SuiteConfig) -> String {
    let timestamp = suite.session_timestamp();
    let dir = storeprobe::config::session_dir(&suite.test_results_dir, &timestamp);
    format!("Session:  {timestamp}\nResults:  {}", dir.display())
}
