//! Configuration handling for the scanner.

use crate::engine::PatternSet;
use crate::types::{BanditError, HttpConfig, Result};
use clap::Parser;
use std::path::PathBuf;

/// Fetch URLs and look for leaked credentials, tokens and secret keywords.
#[derive(Parser, Debug, Clone)]
#[command(name = "urlbandit")]
#[command(author, version, about, long_about = None)]
pub struct ScanConfig {
    /// Target URL(s) to scan
    pub targets: Vec<String>,

    /// File containing URLs to scan (one per line)
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Browse results in an interactive terminal view
    #[arg(long)]
    pub visual: bool,

    /// Show every occurrence and add the extended (more generic) patterns
    #[arg(long)]
    pub all: bool,

    /// Add the extended patterns but keep the first distinct occurrences only
    #[arg(long)]
    pub extended: bool,

    /// Sensitive patterns (regex), replacing the built-in ones
    #[arg(short, long, num_args = 1..)]
    pub sensitive: Option<Vec<String>>,

    /// Output results as JSON
    #[arg(long, conflicts_with = "visual")]
    pub json: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Custom User-Agent string
    #[arg(long, env = "URLBANDIT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Number of URLs to fetch in parallel
    #[arg(long, short = 'p', default_value = "1")]
    pub parallel: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: only print the report
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            wordlist: None,
            visual: false,
            all: false,
            extended: false,
            sensitive: None,
            json: false,
            timeout: 10,
            user_agent: None,
            parallel: 1,
            verbose: false,
            quiet: false,
        }
    }
}

impl ScanConfig {
    /// Get HTTP configuration from scan config.
    pub fn http_config(&self) -> HttpConfig {
        let defaults = HttpConfig::default();
        HttpConfig {
            timeout_secs: self.timeout,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    /// Whether the extended pattern tier is applied.
    pub fn include_extended(&self) -> bool {
        self.all || self.extended
    }

    /// Patterns for this run.
    pub fn pattern_set(&self) -> PatternSet {
        PatternSet::with_base(self.sensitive.clone(), self.include_extended())
    }

    /// Positional targets followed by the wordlist entries, in order.
    ///
    /// Blank lines and `#` comments in the wordlist are skipped. An empty
    /// result is a configuration error.
    pub fn load_targets(&self) -> Result<Vec<String>> {
        let mut targets: Vec<String> = self
            .targets
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if let Some(ref file_path) = self.wordlist {
            if !file_path.is_file() {
                return Err(BanditError::ConfigError(format!(
                    "wordlist not found: {}",
                    file_path.display()
                )));
            }
            let content = std::fs::read_to_string(file_path)?;
            for line in content.lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    targets.push(trimmed.to_string());
                }
            }
        }

        if targets.is_empty() {
            return Err(BanditError::ConfigError(
                "no targets specified; pass a URL or -w <file>".to_string(),
            ));
        }

        Ok(targets)
    }
}
