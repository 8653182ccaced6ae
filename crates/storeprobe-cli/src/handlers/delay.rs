//! Delay command handler

use crate::commands::{DelayArgs, DelayFormat};
use crate::error::CliResult;
use serde::Serialize;
use storeprobe::{timing_for, NarrationTiming, PacingMode, SuiteConfig};

#[derive(Debug, Serialize)]
struct DelayReport<'a> {
    message: &'a str,
    #[serde(flatten)]
    timing: &'a NarrationTiming,
}

/// Execute the delay command
pub fn execute_delay(suite: &SuiteConfig, args: &DelayArgs) -> CliResult<()> {
    let message = args.text();
    let timing = delay_timing(suite, args, &message);
    let out = match args.format {
        DelayFormat::Text => render_text(&message, &timing),
        DelayFormat::Json => render_json(&message, &timing)?,
    };
    println!("{out}");
    Ok(())
}

/// Pacing rule selected by `--quick` / `--long`
#[must_use]
pub const fn pacing_mode(args: &DelayArgs) -> PacingMode {
    if args.quick {
        PacingMode::Quick
    } else if args.long {
        PacingMode::Long
    } else {
        PacingMode::Computed
    }
}

/// Timing for the message under the configured profile
#[must_use]
pub fn delay_timing(suite: &SuiteConfig, args: &DelayArgs, message: &str) -> NarrationTiming {
    timing_for(pacing_mode(args), message, &suite.narration)
}

/// Human-readable breakdown
#[must_use]
pub fn render_text(message: &str, timing: &NarrationTiming) -> String {
    let mode = match timing.mode {
        PacingMode::Computed => "computed",
        PacingMode::Quick => "quick",
        PacingMode::Long => "long",
    };
    let mut out = String::new();
    out.push_str(&format!("Message:   {message}\n"));
    out.push_str(&format!("Mode:      {mode}\n"));
    out.push_str(&format!(
        "Words:     {} ({} periods, {} commas)\n",
        timing.word_count, timing.period_count, timing.comma_count
    ));
    if timing.mode == PacingMode::Computed {
        out.push_str(&format!("Speech:    {:.0} ms\n", timing.base_ms));
        out.push_str(&format!("Buffered:  {:.0} ms\n", timing.buffered_ms));
    }
    out.push_str(&format!(
        "Delay:     {} ms ({:.1} s)",
        timing.duration_ms,
        timing.duration_ms as f64 / 1000.0
    ));
    out
}

/// JSON object with the message and every timing field
pub fn render_json(message: &str, timing: &NarrationTiming) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(&DelayReport { message, timing })?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn args(words: &[&str], quick: bool, long: bool) -> DelayArgs {
        DelayArgs {
            message: words.iter().map(|w| (*w).to_string()).collect(),
            quick,
            long,
            format: DelayFormat::Text,
        }
    }

    const SENTENCE: &str = "This is a longer sentence, with a comma and a period.";

    #[test]
    fn test_computed_sentence() {
        let a = args(&[SENTENCE], false, false);
        let timing = delay_timing(&SuiteConfig::default(), &a, &a.text());
        assert_eq!(timing.duration_ms, 5900);

        let text = render_text(&a.text(), &timing);
        assert!(text.contains("Words:     11 (1 periods, 1 commas)"));
        assert!(text.contains("Speech:    4400 ms"));
        assert!(text.contains("Buffered:  5880 ms"));
        assert!(text.contains("Delay:     5900 ms (5.9 s)"));
    }

    #[test]
    fn test_flat_modes() {
        let suite = SuiteConfig::default();
        let quick = args(&["Cart", "updated."], true, false);
        let long = args(&["Cart", "updated."], false, true);
        assert_eq!(pacing_mode(&quick), PacingMode::Quick);
        assert_eq!(delay_timing(&suite, &quick, "Cart updated.").duration_ms, 2000);
        assert_eq!(delay_timing(&suite, &long, "Cart updated.").duration_ms, 4000);

        let text = render_text("Cart updated.", &delay_timing(&suite, &quick, "Cart updated."));
        assert!(text.contains("Mode:      quick"));
        assert!(!text.contains("Speech:"));
    }

    #[test]
    fn test_profile_from_config() {
        let mut suite = SuiteConfig::default();
        suite.narration.minimum_ms = 3000;
        let a = args(&["Hi."], false, false);
        assert_eq!(delay_timing(&suite, &a, "Hi.").duration_ms, 3000);
    }

    #[test]
    fn test_json_output() {
        let a = args(&[SENTENCE], false, false);
        let timing = delay_timing(&SuiteConfig::default(), &a, SENTENCE);
        let rendered = render_json(SENTENCE, &timing).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["message"], SENTENCE);
        assert_eq!(json["mode"], "computed");
        assert_eq!(json["duration_ms"], 5900);
        assert_eq!(json["word_count"], 11);
    }
}
