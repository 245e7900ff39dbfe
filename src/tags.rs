//! `@word` tag detection.
//!
//! A tag is `@` followed by ASCII word characters, so `@zoë` tags `@zo`.
//! Tags are highlighted by adding a [`InlineStyle::Tag`] range per match, so
//! they go through the same serializer as every other inline style.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::content::{InlineStyle, StyleRange, TextBlock};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("tag pattern is valid"));

/// Character ranges of every `@word` tag in `text`, left to right.
pub fn find_tags(text: &str) -> Vec<Range<usize>> {
    TAG_PATTERN
        .find_iter(text)
        .map(|m| {
            let start = text[..m.start()].chars().count();
            start..start + m.as_str().chars().count()
        })
        .collect()
}

/// Copy of `block` with a tag range appended for each `@word`.
///
/// Tag ranges come after the existing ranges so they open innermost.
pub fn highlight_tags(block: &TextBlock) -> TextBlock {
    let mut highlighted = block.clone();
    highlighted
        .style_ranges
        .extend(find_tags(&block.text).into_iter().map(|range| {
            let length = i64::try_from(range.len()).unwrap_or(i64::MAX);
            StyleRange::new(InlineStyle::Tag, range.start, length)
        }));
    highlighted
}
