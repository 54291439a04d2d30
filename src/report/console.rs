//! Colored console output for scan results.

use crate::engine::looks_like_regex;
use crate::types::{ScanOutcome, ScanResultStore, Snippet};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    json_mode: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(json_mode: bool, quiet: bool) -> Self {
        Self { json_mode, quiet }
    }

    /// Handler that prints nothing besides explicit reports.
    pub fn silent() -> Self {
        Self::new(false, true)
    }

    /// Print the run settings shown before scanning.
    pub fn print_run_info(&self, visual: bool, include_all: bool, target_count: usize) {
        if self.json_mode || self.quiet {
            return;
        }

        let mode = if visual { "Visual" } else { "Text" };
        let exhaustive = if include_all { "Enabled" } else { "Disabled" };
        println!("{} {}", "✓ Mode".green(), mode);
        println!("{} {}", "✓ Exhaustive mode".green(), exhaustive);
        println!("{} {}", "✓ URLs to check".green(), target_count);
        println!();
    }

    /// Print the full text report.
    pub fn print_report(&self, store: &ScanResultStore, include_all: bool) {
        print!("{}", format_report(store, include_all));
    }

    /// Print totals for the run.
    pub fn print_summary(&self, store: &ScanResultStore) {
        if self.json_mode || self.quiet {
            return;
        }

        let errors = store.iter().filter(|e| e.outcome.is_error()).count();
        let flagged = store
            .iter()
            .filter(|e| e.outcome.findings().is_some_and(|f| !f.is_empty()))
            .count();

        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Targets:        {}", store.len());
        println!("  With findings:  {}", flagged);
        println!("  Fetch errors:   {}", errors);
        println!();
    }

    /// Create a progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.json_mode || self.quiet {
            return None;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        Some(pb)
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// Render the store as a plain-text report: one block per target, grouped by
/// pattern, snippets numbered from 1.
pub fn format_report(store: &ScanResultStore, include_all: bool) -> String {
    let mut out = String::new();
    let rule = "━".repeat(80).cyan();

    for entry in store.iter() {
        let _ = writeln!(out, "{}", format!("┏━━ URL: {}", entry.target).green().bold());
        let _ = writeln!(out, "{}", rule);

        match &entry.outcome {
            ScanOutcome::Error { message } => {
                let _ = writeln!(out, "{}", format!("⚠ Error: {}", message).red());
            }
            ScanOutcome::Findings { findings } if findings.is_empty() => {
                let _ = writeln!(out, "{}", "✔ No sensitive occurrences.".green());
            }
            ScanOutcome::Findings { findings } => {
                for group in findings.iter() {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "{}", pattern_heading(&group.pattern));
                    let _ = writeln!(out, "{}", "─".repeat(70).cyan());

                    let count = group.snippets.len();
                    for (i, snippet) in group.snippets.iter().enumerate() {
                        let _ = writeln!(
                            out,
                            "{} {}",
                            format!("  {}.", i + 1).white().bold(),
                            highlight(snippet)
                        );
                        if include_all && i + 1 < count {
                            let _ = writeln!(out, "{}", format!("  {}", "· ".repeat(30)).cyan());
                        }
                    }
                }
            }
        }

        let _ = writeln!(out, "\n{}\n", rule);
    }

    out
}

fn pattern_heading(pattern: &str) -> colored::ColoredString {
    if looks_like_regex(pattern) {
        format!("🔍 Pattern: {}", pattern).magenta().bold()
    } else {
        format!("👁 Keyword: {}", pattern).blue().bold()
    }
}

fn highlight(snippet: &Snippet) -> String {
    let (before, hit, after) = snippet.parts();
    format!("{}{}{}", before, hit.yellow().bold(), after)
}
