//! The scan engine: applies patterns to one document.

use crate::engine::patterns::Pattern;
use crate::engine::snippet;
use crate::types::{Findings, Match, Snippet};
use tracing::trace;

/// Maximum distinct snippets kept per pattern unless every occurrence is requested.
pub const MAX_DISTINCT_SNIPPETS: usize = 5;

/// Scan `document` with each pattern in order.
///
/// With `include_all` every occurrence is kept. Otherwise snippets with identical
/// text are dropped and at most [`MAX_DISTINCT_SNIPPETS`] are kept per pattern.
/// Patterns without any snippet are left out of the result.
pub fn scan<'a, I>(document: &str, patterns: I, include_all: bool) -> Findings
where
    I: IntoIterator<Item = &'a Pattern>,
{
    let mut findings = Findings::new();

    for pattern in patterns {
        let snippets = collect_snippets(document, find_matches(document, pattern), include_all);
        trace!("Pattern {:?}: {} snippets", pattern.text(), snippets.len());
        if !snippets.is_empty() {
            findings.insert(pattern.text(), snippets);
        }
    }

    findings
}

/// All non-overlapping matches of `pattern`, left to right.
///
/// The match iterator is lazy so the capped path stops early.
pub fn find_matches<'d>(
    document: &'d str,
    pattern: &'d Pattern,
) -> impl Iterator<Item = Match> + 'd {
    pattern
        .matcher()
        .into_iter()
        .flat_map(move |rx| rx.find_iter(document))
        .map(|m| Match {
            start: m.start(),
            end: m.end(),
            matched_text: m.as_str().to_string(),
        })
}

fn collect_snippets<I>(document: &str, matches: I, include_all: bool) -> Vec<Snippet>
where
    I: Iterator<Item = Match>,
{
    let mut kept: Vec<Snippet> = Vec::new();

    for m in matches {
        let snippet = snippet::extract(document, &m);
        if include_all {
            kept.push(snippet);
            continue;
        }

        if !kept.iter().any(|k| k.text == snippet.text) {
            kept.push(snippet);
        }
        if kept.len() >= MAX_DISTINCT_SNIPPETS {
            break;
        }
    }

    kept
}
