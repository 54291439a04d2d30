//! Core types and errors for the sensitive-data scanner.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Errors that can occur during a run.
#[derive(Error, Debug)]
pub enum BanditError {
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, BanditError>;

/// A single occurrence of a pattern inside a document.
///
/// Offsets are byte offsets into the scanned document and always fall on
/// char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
}

/// A window of document text around a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Trimmed context with newlines collapsed to spaces.
    pub text: String,
    /// Byte range of the matched text inside `text`.
    pub highlight: Range<usize>,
}

impl Snippet {
    /// The highlighted part of the snippet.
    pub fn highlighted(&self) -> &str {
        self.text.get(self.highlight.clone()).unwrap_or_default()
    }

    /// Split into (before, highlighted, after) for renderers.
    pub fn parts(&self) -> (&str, &str, &str) {
        let Range { start, end } = self.highlight;
        match (
            self.text.get(..start),
            self.text.get(start..end),
            self.text.get(end..),
        ) {
            (Some(before), Some(hit), Some(after)) => (before, hit, after),
            _ => (self.text.as_str(), "", ""),
        }
    }
}

/// Ordered snippets for one pattern on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFindings {
    pub pattern: String,
    pub snippets: Vec<Snippet>,
}

/// Per-pattern findings for one document, in pattern evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Findings(Vec<PatternFindings>);

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert findings for a pattern. A pattern text already present keeps
    /// its position and has its snippets replaced.
    pub fn insert(&mut self, pattern: &str, snippets: Vec<Snippet>) {
        match self.0.iter_mut().find(|f| f.pattern == pattern) {
            Some(existing) => existing.snippets = snippets,
            None => self.0.push(PatternFindings {
                pattern: pattern.to_string(),
                snippets,
            }),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<&[Snippet]> {
        self.0
            .iter()
            .find(|f| f.pattern == pattern)
            .map(|f| f.snippets.as_slice())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.pattern.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternFindings> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The fetch failed; nothing was scanned.
    Error { message: String },
    /// The body was scanned. An empty mapping means nothing sensitive was found.
    Findings { findings: Findings },
}

impl ScanOutcome {
    /// Findings, if the target was scanned.
    pub fn findings(&self) -> Option<&Findings> {
        match self {
            ScanOutcome::Findings { findings } => Some(findings),
            ScanOutcome::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScanOutcome::Error { .. })
    }
}

/// One entry of the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOutcome {
    pub target: String,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

/// Scan outcomes keyed by target, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResultStore {
    entries: Vec<TargetOutcome>,
}

impl ScanResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: impl Into<String>, outcome: ScanOutcome) {
        self.entries.push(TargetOutcome {
            target: target.into(),
            outcome,
        });
    }

    pub fn get(&self, index: usize) -> Option<&TargetOutcome> {
        self.entries.get(index)
    }

    /// First outcome recorded for `target`.
    pub fn outcome_for(&self, target: &str) -> Option<&ScanOutcome> {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| &e.outcome)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetOutcome> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TargetOutcome> for ScanResultStore {
    fn from_iter<I: IntoIterator<Item = TargetOutcome>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<TargetOutcome> for ScanResultStore {
    fn extend<I: IntoIterator<Item = TargetOutcome>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; urlbandit/0.1)".to_string(),
        }
    }
}
