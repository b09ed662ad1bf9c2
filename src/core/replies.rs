//! Parsers for the oracle's comma-separated replies
//!
//! Both parsers are total: empty input, trailing commas and junk tokens are
//! skipped rather than reported.

use crate::models::Tag;

/// Split a reply on commas into trimmed, non-empty tags, in reply order
pub fn parse_tag_list(text: &str) -> Vec<Tag> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a reply of 1-based item numbers into 0-based indices, in reply order
///
/// Only tokens made entirely of ASCII digits count. `0` and numbers too large
/// for `usize` are dropped. Range checks against a particular list are the
/// caller's job.
pub fn parse_index_list(text: &str) -> Vec<usize> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter_map(|number| number.checked_sub(1))
        .collect()
}
