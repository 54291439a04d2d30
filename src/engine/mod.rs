//! Pattern scan engine.
//!
//! This module handles:
//! - Loading and classifying detector patterns (regex or literal keyword)
//! - Finding every occurrence of a pattern in a document
//! - Cutting context snippets and applying the dedup/cap policy

pub mod matcher;
pub mod patterns;
pub mod snippet;

pub use matcher::{find_matches, scan, MAX_DISTINCT_SNIPPETS};
pub use patterns::{looks_like_regex, Pattern, PatternKind, PatternSet};
