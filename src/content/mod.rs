//! Raw editor content.
//!
//! This module handles:
//! - Deserializing the editor's raw JSON export with serde
//! - Typed block, range, and style identifiers
//! - The per-block output of the serializer

mod types;

use anyhow::{Context, Result};

pub use types::{BlockType, InlineStyle, RawContent, RenderedBlock, StyleRange, TextBlock};

/// Parse the editor's raw JSON export.
///
/// # Example
///
/// ```
/// use commentmark::content::RawContent;
///
/// let raw = RawContent::parse(r#"{"blocks":[{"text":"hi","type":"unstyled"}]}"#).unwrap();
/// assert_eq!(raw.blocks.len(), 1);
/// ```
impl RawContent {
    pub fn parse(json: &str) -> Result<Self> {
        parse(json)
    }
}

/// Parse raw content JSON into blocks.
pub fn parse(json: &str) -> Result<RawContent> {
    serde_json::from_str(json).context("Failed to parse raw editor content")
}
