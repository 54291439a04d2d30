//! Context windows around matches.

use crate::types::{Match, Snippet};

/// Characters of context kept on each side of a match.
pub const CONTEXT_CHARS: usize = 50;

/// Build the snippet for `m` within `document`.
///
/// The window spans [`CONTEXT_CHARS`] characters on each side of the match,
/// clamped to the document. Newlines become spaces and the window is trimmed.
/// The highlight is shifted by whatever the trim removed and clamped to the text.
pub fn extract(document: &str, m: &Match) -> Snippet {
    let window_start = chars_before(document, m.start, CONTEXT_CHARS);
    let window_end = chars_after(document, m.end, CONTEXT_CHARS);

    let raw = document[window_start..window_end].replace('\n', " ");
    let leading = raw.len() - raw.trim_start().len();
    let text = raw.trim().to_string();

    let start = (m.start - window_start).saturating_sub(leading).min(text.len());
    let end = (m.end - window_start)
        .saturating_sub(leading)
        .clamp(start, text.len());

    Snippet {
        text,
        highlight: start..end,
    }
}

/// Byte offset `n` characters before `offset`, or 0.
fn chars_before(s: &str, offset: usize, n: usize) -> usize {
    if n == 0 {
        return offset;
    }
    s[..offset]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(offset, |(i, _)| i)
}

/// Byte offset `n` characters after `offset`, or the end of `s`.
fn chars_after(s: &str, offset: usize, n: usize) -> usize {
    s[offset..]
        .char_indices()
        .nth(n)
        .map_or(s.len(), |(i, _)| offset + i)
}
