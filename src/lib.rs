//! urlbandit - Sensitive data scanner for web resources.
//!
//! This library fetches a list of URLs and scans each body for:
//! - Credential assignments (passwords, API keys, access tokens, JWTs)
//! - Service tokens such as Slack tokens
//! - Administrative and secret keywords in many languages
//!
//! Results are kept in input order and can be printed as a text report,
//! serialized as JSON, or browsed in an interactive terminal view.
//!
//! # Example
//!
//! ```no_run
//! use urlbandit::{Scanner, ScanConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::default();
//!     let scanner = Scanner::new(&config).unwrap();
//!     let store = scanner.scan_all(&["https://example.com".to_string()]).await;
//!     println!("{}", urlbandit::report::format_report(&store, false));
//! }
//! ```

pub mod config;
pub mod engine;
pub mod fetch;
pub mod report;
pub mod scanner;
pub mod tui;
pub mod types;

pub use config::ScanConfig;
pub use engine::{Pattern, PatternKind, PatternSet};
pub use scanner::Scanner;
pub use types::{
    BanditError, Findings, HttpConfig, Match, PatternFindings, Result, ScanOutcome,
    ScanResultStore, Snippet, TargetOutcome,
};
