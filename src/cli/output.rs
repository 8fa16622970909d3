//! CLI output formatting

use crate::convert::{ConversionEvent, ConversionOutcome};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let template = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(template.progress_chars("#>-"));
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a conversion event for display
pub fn format_conversion_event(event: &ConversionEvent) -> String {
    match event {
        ConversionEvent::BatchStarted { total } => {
            format!("{} Converting {} file(s)", ROCKET, style(total).bold())
        }
        ConversionEvent::JobStarted { input } => {
            format!("{} {}", SPINNER, style(file_name(input)).cyan())
        }
        ConversionEvent::JobCompleted { input, output } => format!(
            "{} {} → {}",
            CHECK,
            style(file_name(input)).green(),
            style(output.display()).dim()
        ),
        ConversionEvent::JobFailed { input, error } => {
            format!("{} {}: {}", CROSS, style(file_name(input)).red(), style(error).dim())
        }
        ConversionEvent::BatchCompleted { succeeded, failed } => {
            let icon = if *failed == 0 { CHECK } else { WARN };
            format!(
                "{} {} converted, {} failed",
                icon,
                style(succeeded).green(),
                if *failed == 0 {
                    style(failed).dim()
                } else {
                    style(failed).red()
                }
            )
        }
    }
}

/// One line per failed outcome
pub fn format_failures(outcomes: &[ConversionOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| {
            o.result.as_ref().err().map(|e| {
                format!("{} {}: {}", CROSS, style(o.input.display()).red(), e)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BetterMdError;
    use std::path::PathBuf;

    #[test]
    fn test_format_events_mention_files() {
        console::set_colors_enabled(false);

        let done = format_conversion_event(&ConversionEvent::JobCompleted {
            input: PathBuf::from("docs/a.md"),
            output: PathBuf::from("out/a.html"),
        });
        assert!(done.contains("a.md"));
        assert!(done.contains("out/a.html"));

        let summary = format_conversion_event(&ConversionEvent::BatchCompleted {
            succeeded: 2,
            failed: 1,
        });
        assert!(summary.contains("2 converted, 1 failed"));
    }

    #[test]
    fn test_format_failures_skips_successes() {
        let outcomes = vec![
            ConversionOutcome {
                input: PathBuf::from("ok.md"),
                output: PathBuf::from("ok.html"),
                result: Ok(()),
            },
            ConversionOutcome {
                input: PathBuf::from("bad.md"),
                output: PathBuf::from("bad.html"),
                result: Err(BetterMdError::MalformedInput("bad.md is not valid UTF-8".into())),
            },
        ];
        let lines = format_failures(&outcomes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("bad.md"));
    }
}
