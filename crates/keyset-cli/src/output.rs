//! Output formatting utilities for the keyset CLI.
//!
//! Status lines go to stderr so that the rendered result on stdout can be
//! piped. Results are rendered as a table, plain `label: value` lines, or
//! JSON.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use keyset_core::IntersectionResult;
use std::fmt::Display;
use std::time::Duration;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON output for scripting
    Json,
    /// Plain text without colors
    Plain,
}

/// Column headers of the result table, in display order
pub const RESULT_HEADERS: [&str; 6] = [
    "Total keys in first table",
    "Distinct keys in first table",
    "Total keys in second table",
    "Distinct keys in second table",
    "Total Overlap",
    "Distinct Overlap",
];

/// Print a success message
pub fn success(msg: impl Display) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: impl Display) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Create a spinner for long-running operations
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Format duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn result_values(result: &IntersectionResult) -> [u64; 6] {
    [
        result.first.record_count,
        result.first.distinct_key_count,
        result.second.record_count,
        result.second.distinct_key_count,
        result.total_overlap,
        result.distinct_overlap,
    ]
}

fn result_table(values: &[u64; 6]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(RESULT_HEADERS.map(|h| Cell::new(h).fg(Color::Cyan)))
        .add_row(values.map(Cell::new));
    table
}

/// Render a result in the requested format.
pub fn render_result(result: &IntersectionResult, format: OutputFormat) -> Result<String> {
    let values = result_values(result);
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Human => result_table(&values).to_string(),
        OutputFormat::Plain => RESULT_HEADERS
            .iter()
            .zip(values)
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}
