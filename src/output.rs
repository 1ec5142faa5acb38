//! Terminal output formatting for the scenesync CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! Status output goes to stderr; run summaries go to stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::batch::{ConversionSummary, Failure, PassSummary};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "      Synced Portraits/Alice/alice.json (3 nodes)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "node", "nodes")` → "1 node".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a path relative to `base` when possible, as given otherwise.
pub fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        Ok(_) => ".".to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Human-readable byte size: `format_size(1536)` → "1.50KB".
pub fn format_size(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let mut size = bytes.unsigned_abs() as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{sign}{size:.2}{unit}");
        }
        size /= 1024.0;
    }
    format!("{sign}{size:.2}TB")
}

const RULE_WIDTH: usize = 60;

/// Render the summary of a document pass.
pub fn render_pass_summary(title: &str, summary: &PassSummary, base: &Path) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n{title}\n{rule}\n"));
    out.push_str(&format!(
        "  Succeeded: {}/{}\n",
        summary.succeeded(),
        summary.found
    ));
    out.push_str(&format!("  Failed: {}/{}\n", summary.failed(), summary.found));
    out.push_str(&format!(
        "  Nodes: {} updated, {} skipped\n",
        summary.nodes_updated(),
        summary.nodes_skipped()
    ));
    out.push_str(&format!(
        "  Time Elapsed: {:.2}s\n",
        summary.elapsed.as_secs_f64()
    ));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render_failures(&summary.failures, |p| display_path(p, base)));

    out
}

/// Render the summary of a conversion run.
pub fn render_conversion_summary(summary: &ConversionSummary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\nConversion Complete!\n{rule}\n"));
    out.push_str(&format!(
        "  Successful: {}/{}\n",
        summary.successful(),
        summary.found
    ));
    out.push_str(&format!("  Failed: {}/{}\n", summary.failed(), summary.found));
    out.push_str(&format!(
        "  Total Size: {} → {}\n",
        format_size(summary.original_bytes() as i64),
        format_size(summary.new_bytes() as i64)
    ));
    out.push_str(&format!(
        "  Space Saved: {} ({:.1}%)\n",
        format_size(summary.savings()),
        summary.savings_pct()
    ));
    out.push_str(&format!(
        "  Time Elapsed: {:.2}s\n",
        summary.elapsed.as_secs_f64()
    ));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render_failures(&summary.failures, |p| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.display().to_string())
    }));

    out
}

fn render_failures(failures: &[Failure], name: impl Fn(&Path) -> String) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nErrors:\n");
    for failure in failures {
        out.push_str(&format!("  - {}: {}\n", name(&failure.item), failure.message));
    }
    out
}
