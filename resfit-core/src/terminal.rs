//! Terminal UI components and styling for resfit.
//!
//! Output goes through the `log` facade so the same lines reach the console
//! and, when enabled, the log file. Styling follows a small hierarchy of
//! indentation levels and respects `NO_COLOR`.

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Represents the visual hierarchy levels in the CLI output
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Level 1: Main sections (===== SECTION =====)
    Section,
    /// Level 2: Per-file steps (» Step)
    Subsection,
    /// Level 3: Key-value status information
    Status,
}

impl OutputLevel {
    fn indent(&self) -> &'static str {
        match self {
            OutputLevel::Section => "",
            OutputLevel::Subsection => "  ",
            OutputLevel::Status => "      ",
        }
    }
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print an item at the specified hierarchy level
pub fn print_item(level: OutputLevel, symbol: Option<&str>, text: &str, bold: bool) {
    let indent = level.indent();
    let prefix = match symbol {
        Some(sym) => format!("{indent}{sym} "),
        None => indent.to_string(),
    };

    if should_use_color() && bold {
        info!("{prefix}{}", style(text).bold());
    } else {
        info!("{prefix}{text}");
    }
}

/// Print a per-file processing step
pub fn print_processing(message: &str) {
    info!("");
    print_item(OutputLevel::Subsection, Some("»"), message, true);
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        info!("  ⚠ {}", message.yellow());
    } else {
        info!("  ⚠ {message}");
    }
}

/// Print an error message with an optional suggestion
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        info!("✗ {}", title.red().bold());
    } else {
        info!("✗ {title}");
    }

    info!("");
    info!("  Message:  {message}");

    if let Some(suggestion_text) = suggestion {
        info!("");
        info!("  Suggestion: {suggestion_text}");
    }

    info!("");
}

/// Pads `label` so values line up in a column of `width` display cells.
fn status_line(label: &str, value: &str, width: usize) -> String {
    let padding = width.saturating_sub(label.width()).max(1);
    format!(
        "{}{}:{}{}",
        OutputLevel::Status.indent(),
        label,
        " ".repeat(padding),
        value
    )
}

/// Print a status line (key-value pair)
///
/// Verdicts are colored: "... standard" and "ok" green, "... non-standard"
/// and "skipped" yellow, "failed ..." red. `highlight` bolds anything else.
pub fn print_status(label: &str, value: &str, highlight: bool) {
    const LABEL_WIDTH: usize = 15;

    if !should_use_color() {
        info!("{}", status_line(label, value, LABEL_WIDTH));
        return;
    }

    let colored_value = match value {
        v if v.ends_with("non-standard") || v == "skipped" => value.yellow().to_string(),
        v if v.ends_with("standard") || v == "ok" => value.green().to_string(),
        v if v.starts_with("failed") => value.red().to_string(),
        _ if highlight => value.bold().to_string(),
        _ => value.to_string(),
    };
    info!("{}", status_line(label, &colored_value, LABEL_WIDTH));
}

/// A batch progress bar counting finished files.
///
/// Hidden when stderr is not a terminal, so piped output and tests stay
/// clean. Cloning shares the same bar, which makes it usable from worker
/// threads.
#[derive(Clone)]
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: usize, label: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        let term_width = Term::stderr().size().1 as usize;
        let template = if term_width >= 80 {
            "  ⧖ {prefix}: {pos}/{len} [{bar:30}] {elapsed_precise} {wide_msg}"
        } else {
            "  ⧖ {pos}/{len} [{bar:15}]"
        };
        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##.");
        bar.set_style(style);
        bar.set_prefix(label.to_string());

        if !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            bar.enable_steady_tick(Duration::from_millis(200));
        }

        Self { bar }
    }

    /// A bar that never draws.
    #[cfg(test)]
    fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Marks one more file as finished.
    pub fn advance(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.inc(1);
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clears the bar, leaving the log lines above it.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
