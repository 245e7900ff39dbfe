//! Style ranges to nested markup.

use tracing::{debug, trace};

use super::error::SerializeError;
use super::stack::StyleStack;
use super::table::{MarkupTable, TagPair};
use crate::content::{InlineStyle, RenderedBlock, StyleRange, TextBlock};

/// Serialize blocks with `table`, without escaping.
///
/// # Example
///
/// ```
/// use commentmark::content::{InlineStyle, TextBlock};
/// use commentmark::markup::{build_markup, MarkupTable};
///
/// let table = MarkupTable::empty().with(InlineStyle::Bold, "<b>", "</b>");
/// let block = TextBlock::new("hello").with_range(InlineStyle::Bold, 0, 5);
/// let rendered = build_markup(&[block], &table).unwrap();
/// assert_eq!(rendered[0].styled_markup, "<b>hello</b>");
/// ```
///
/// # Errors
///
/// See [`Serializer::serialize`].
pub fn build_markup(
    blocks: &[TextBlock],
    table: &MarkupTable,
) -> Result<Vec<RenderedBlock>, SerializeError> {
    Serializer::new(table).serialize(blocks)
}

/// Converts text blocks into markup using a [`MarkupTable`].
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'t> {
    table: &'t MarkupTable,
    escape_text: bool,
}

impl<'t> Serializer<'t> {
    pub const fn new(table: &'t MarkupTable) -> Self {
        Self {
            table,
            escape_text: false,
        }
    }

    /// Escape HTML special characters in block text. Tags are never escaped.
    #[must_use]
    pub const fn with_escape(mut self, escape_text: bool) -> Self {
        self.escape_text = escape_text;
        self
    }

    /// Check every range before any markup is produced.
    ///
    /// Lengths are checked across all blocks first, then style coverage.
    ///
    /// # Errors
    ///
    /// [`SerializeError::InvalidRange`] for the first range with a
    /// non-positive length, otherwise [`SerializeError::UnknownStyle`] for the
    /// first style missing from the table.
    pub fn validate(&self, blocks: &[TextBlock]) -> Result<(), SerializeError> {
        for (block_index, block) in blocks.iter().enumerate() {
            if let Some(range_index) = block.style_ranges.iter().position(|r| r.length <= 0) {
                return Err(SerializeError::InvalidRange {
                    block_index,
                    range_index,
                });
            }
        }
        let missing = blocks
            .iter()
            .flat_map(|block| &block.style_ranges)
            .find(|range| !self.table.contains(&range.style));
        match missing {
            Some(range) => Err(SerializeError::UnknownStyle(range.style.to_string())),
            None => Ok(()),
        }
    }

    /// Render every block, preserving order.
    ///
    /// # Errors
    ///
    /// Fails without partial output if [`Serializer::validate`] fails.
    pub fn serialize(&self, blocks: &[TextBlock]) -> Result<Vec<RenderedBlock>, SerializeError> {
        let _scope = crate::perf::scope("markup.serialize");
        self.validate(blocks)?;
        debug!(blocks = blocks.len(), escape = self.escape_text, "serializing blocks");

        blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let styled_markup = self.render_block(block)?;
                trace!(index, block_type = %block.block_type, len = styled_markup.len(), "rendered block");
                crate::perf::log_event(
                    "markup.block",
                    format!(
                        "index={index} type={} ranges={}",
                        block.block_type,
                        block.style_ranges.len()
                    ),
                );
                Ok(RenderedBlock::new(block.block_type.clone(), styled_markup))
            })
            .collect()
    }

    /// Render one block's text with its style ranges.
    ///
    /// # Errors
    ///
    /// [`SerializeError::UnknownStyle`] if a style has no tags. Range lengths
    /// are not checked here; non-positive ranges cover nothing.
    pub fn render_block(&self, block: &TextBlock) -> Result<String, SerializeError> {
        let ranges = &block.style_ranges;
        let mut stack = StyleStack::new();
        let mut output = String::with_capacity(block.text.len());
        let len = block.char_len();
        let mut current = styles_at(ranges, 0);

        for (i, ch) in block.text.chars().enumerate() {
            // Nothing is styled past the end of the text, so every open
            // style closes on the last character.
            let next = if i + 1 < len {
                styles_at(ranges, i + 1)
            } else {
                Vec::new()
            };
            let to_open: Vec<&InlineStyle> = current
                .iter()
                .copied()
                .filter(|style| !stack.contains(style))
                .collect();
            let to_close: Vec<&InlineStyle> = current
                .iter()
                .copied()
                .filter(|style| !next.contains(style))
                .collect();

            for style in to_open {
                stack.push(style);
                output.push_str(&self.tags(style)?.open);
            }

            self.push_char(&mut output, ch);

            // Pop innermost-first until nothing that ends here is still open.
            while stack.contains_any(&to_close) {
                let Some(style) = stack.pop() else { break };
                output.push_str(&self.tags(style)?.close);
            }

            current = next;
        }

        debug_assert!(stack.is_empty(), "styles left open at end of block");
        Ok(output)
    }

    fn tags(&self, style: &InlineStyle) -> Result<&'t TagPair, SerializeError> {
        self.table
            .get(style)
            .ok_or_else(|| SerializeError::UnknownStyle(style.to_string()))
    }

    fn push_char(&self, output: &mut String, ch: char) {
        match html_entity(ch) {
            Some(entity) if self.escape_text => output.push_str(entity),
            _ => output.push(ch),
        }
    }
}

/// Entity for an HTML special character.
pub(crate) const fn html_entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// `text` with HTML special characters replaced by entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match html_entity(ch) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(ch),
        }
    }
    escaped
}

/// Styles covering `position`, in range order, each listed once.
fn styles_at(ranges: &[StyleRange], position: usize) -> Vec<&InlineStyle> {
    let mut styles: Vec<&InlineStyle> = Vec::new();
    for range in ranges.iter().filter(|range| range.covers(position)) {
        if !styles.contains(&&range.style) {
            styles.push(&range.style);
        }
    }
    styles
}
