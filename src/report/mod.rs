//! Output for scan results.
//!
//! This module handles:
//! - Colored console report (the static renderer)
//! - Progress and summary lines
//! - JSON output formatting

pub mod console;

pub use console::{format_report, ConsoleOutput};

use crate::types::{Result, ScanResultStore};

/// Serialize the store as pretty JSON.
pub fn to_json(store: &ScanResultStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}
