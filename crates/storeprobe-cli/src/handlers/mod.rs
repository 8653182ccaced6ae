//! Command handlers - kept out of main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure rendering helpers
//! - Tests

pub mod a11y;
pub mod config;
pub mod delay;
#[cfg(feature = "narration")]
pub mod narrate;
pub mod session;

pub use a11y::{build_reporter, execute_a11y_report, report_label, ReportOutputs};
pub use config::{execute_config, render_config};
pub use delay::{execute_delay, pacing_mode};
#[cfg(feature = "narration")]
pub use narrate::{execute_narrate, NarrationPlan};
pub use session::{execute_session, render_session};
