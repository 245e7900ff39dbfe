//! Core content types.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Raw content exported by the editor: an ordered list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawContent {
    /// Blocks in document order
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl RawContent {
    /// Create raw content from blocks.
    pub const fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Returns true if any block carries text.
    pub fn has_text(&self) -> bool {
        self.blocks.iter().any(|block| !block.text.is_empty())
    }
}

/// One paragraph-like unit of editor content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Plain text of the block
    #[serde(default)]
    pub text: String,
    /// Block type (paragraph, quote, code...)
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    /// Inline style ranges over the block's characters
    #[serde(rename = "inlineStyleRanges", default)]
    pub style_ranges: Vec<StyleRange>,
}

impl TextBlock {
    /// Create an unstyled block with no ranges.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            block_type: BlockType::Unstyled,
            style_ranges: Vec::new(),
        }
    }

    /// Set the block type.
    #[must_use]
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    /// Append a style range.
    #[must_use]
    pub fn with_range(mut self, style: InlineStyle, offset: usize, length: i64) -> Self {
        self.style_ranges.push(StyleRange::new(style, offset, length));
        self
    }

    /// Number of characters in the block text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A style applied to the characters `[offset, offset + length)` of a block.
///
/// Offsets count `char`s, not bytes. `length` is signed so that malformed
/// input can be represented and rejected by the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleRange {
    pub style: InlineStyle,
    pub offset: usize,
    pub length: i64,
}

impl StyleRange {
    pub const fn new(style: InlineStyle, offset: usize, length: i64) -> Self {
        Self {
            style,
            offset,
            length,
        }
    }

    /// Returns true if the character at `position` carries this style.
    pub fn covers(&self, position: usize) -> bool {
        self.char_range().contains(&position)
    }

    /// The covered character positions. Empty for non-positive lengths.
    pub fn char_range(&self) -> Range<usize> {
        let length = usize::try_from(self.length).unwrap_or(0);
        self.offset..self.offset.saturating_add(length)
    }
}

/// Inline style identifier.
///
/// The editor's built-in styles get their own variants; anything else is kept
/// verbatim in [`InlineStyle::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum InlineStyle {
    Bold,
    Italic,
    Link,
    Code,
    Underline,
    Strikethrough,
    /// `@word` tag highlight
    Tag,
    Custom(String),
}

impl InlineStyle {
    /// The identifier used in raw content.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Link => "LINK",
            Self::Code => "CODE",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::Tag => "TAG",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for InlineStyle {
    fn from(s: &str) -> Self {
        match s {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "LINK" => Self::Link,
            "CODE" => Self::Code,
            "UNDERLINE" => Self::Underline,
            "STRIKETHROUGH" => Self::Strikethrough,
            "TAG" => Self::Tag,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for InlineStyle {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Custom(_) => Self::Custom(s),
            known => known,
        }
    }
}

impl From<InlineStyle> for String {
    fn from(style: InlineStyle) -> Self {
        match style {
            InlineStyle::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a block, as named by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    Blockquote,
    CodeBlock,
    /// `header-one` through `header-six`
    Header(u8),
    UnorderedListItem,
    OrderedListItem,
    Atomic,
    Other(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code-block",
            Self::Header(level) => match level {
                1 => "header-one",
                2 => "header-two",
                3 => "header-three",
                4 => "header-four",
                5 => "header-five",
                _ => "header-six",
            },
            Self::UnorderedListItem => "unordered-list-item",
            Self::OrderedListItem => "ordered-list-item",
            Self::Atomic => "atomic",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        match s {
            "unstyled" => Self::Unstyled,
            "blockquote" => Self::Blockquote,
            "code-block" => Self::CodeBlock,
            "header-one" => Self::Header(1),
            "header-two" => Self::Header(2),
            "header-three" => Self::Header(3),
            "header-four" => Self::Header(4),
            "header-five" => Self::Header(5),
            "header-six" => Self::Header(6),
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "atomic" => Self::Atomic,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializer output for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub block_type: BlockType,
    pub styled_markup: String,
}

impl RenderedBlock {
    pub const fn new(block_type: BlockType, styled_markup: String) -> Self {
        Self {
            block_type,
            styled_markup,
        }
    }
}
