//! Style identifier to tag pair mapping.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::InlineStyle;

/// Open and close markup for one style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct TagPair {
    pub open: String,
    pub close: String,
}

impl TagPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl From<(String, String)> for TagPair {
    fn from((open, close): (String, String)) -> Self {
        Self { open, close }
    }
}

/// Caller-supplied markup for every inline style the input uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MarkupTable {
    tags: HashMap<InlineStyle, TagPair>,
}

impl MarkupTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Add or replace the tags for `style`.
    #[must_use]
    pub fn with(mut self, style: InlineStyle, open: &str, close: &str) -> Self {
        self.insert(style, TagPair::new(open, close));
        self
    }

    pub fn insert(&mut self, style: InlineStyle, pair: TagPair) {
        self.tags.insert(style, pair);
    }

    pub fn get(&self, style: &InlineStyle) -> Option<&TagPair> {
        self.tags.get(style)
    }

    pub fn contains(&self, style: &InlineStyle) -> bool {
        self.tags.contains_key(style)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Entries of `other` override entries of `self`.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.tags.extend(other.tags);
        self
    }

    /// Parse a JSON object of the form `{"BOLD": ["<b>", "</b>"]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse markup table")
    }

    /// Load a JSON markup table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read markup table {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("In {}", path.display()))
    }
}

impl Default for MarkupTable {
    /// The comment editor's markup.
    fn default() -> Self {
        Self::empty()
            .with(InlineStyle::Bold, "<strong>", "</strong>")
            .with(InlineStyle::Italic, "<em>", "</em>")
            .with(InlineStyle::Link, "<a href=\"#\">", "</a>")
            .with(InlineStyle::Code, "<code>", "</code>")
            .with(InlineStyle::Tag, "<span class=\"tag\">", "</span>")
    }
}
