//! Raw content to output text.

use std::borrow::Cow;

use anyhow::{Context, Result};

use crate::comment::{CommentCard, body_html};
use crate::config::{ConfigFlags, OutputFormat};
use crate::content::{RawContent, TextBlock};
use crate::markup::{MarkupTable, Serializer};
use crate::tags::highlight_tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub escape: bool,
    pub highlight_tags: bool,
    pub card: CommentCard,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            escape: false,
            highlight_tags: true,
            card: CommentCard::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        let mut card = flags
            .author
            .as_deref()
            .map_or_else(CommentCard::default, CommentCard::new);
        card.avatar_url.clone_from(&flags.avatar);
        card.date.clone_from(&flags.date);
        Self {
            format: flags.format.unwrap_or_default(),
            escape: flags.escape,
            highlight_tags: !flags.no_tags,
            card,
        }
    }
}

/// The default table, overridden by the `--markup` file if one is set.
pub fn markup_table(flags: &ConfigFlags) -> Result<MarkupTable> {
    let table = MarkupTable::default();
    match &flags.markup {
        Some(path) => Ok(table.merged(MarkupTable::load(path)?)),
        None => Ok(table),
    }
}

/// Serialize `raw` and format it as requested.
pub fn render(raw: &RawContent, table: &MarkupTable, options: &RenderOptions) -> Result<String> {
    let blocks: Cow<'_, [TextBlock]> = if options.highlight_tags {
        Cow::Owned(raw.blocks.iter().map(highlight_tags).collect())
    } else {
        Cow::Borrowed(raw.blocks.as_slice())
    };

    let rendered = Serializer::new(table)
        .with_escape(options.escape)
        .serialize(&blocks)
        .context("Failed to serialize comment")?;

    match options.format {
        OutputFormat::Html => Ok(body_html(&rendered)),
        OutputFormat::Comment => Ok(options.card.render(&rendered)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rendered).context("Failed to encode rendered blocks")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockType, InlineStyle};
    use crate::markup::SerializeError;

    fn raw() -> RawContent {
        RawContent::new(vec![
            TextBlock::new("hi @ann").with_range(InlineStyle::Italic, 0, 2),
            TextBlock::new("quoted").with_type(BlockType::Blockquote),
        ])
    }

    fn options(format: OutputFormat) -> RenderOptions {
        RenderOptions {
            format,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_render_html_highlights_tags() {
        let html = render(&raw(), &MarkupTable::default(), &options(OutputFormat::Html)).unwrap();
        assert_eq!(
            html,
            "<p><em>hi</em> <span class=\"tag\">@ann</span></p><blockquote>quoted</blockquote>"
        );
    }

    #[test]
    fn test_render_without_tags_leaves_text_plain() {
        let opts = RenderOptions {
            highlight_tags: false,
            ..options(OutputFormat::Html)
        };
        let html = render(&raw(), &MarkupTable::default(), &opts).unwrap();
        assert!(html.starts_with("<p><em>hi</em> @ann</p>"));
    }

    #[test]
    fn test_render_json_uses_editor_field_names() {
        let json = render(&raw(), &MarkupTable::default(), &options(OutputFormat::Json)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["blockType"], "blockquote");
        assert_eq!(value[1]["styledMarkup"], "quoted");
    }

    #[test]
    fn test_render_comment_wraps_in_card() {
        let html = render(&raw(), &MarkupTable::default(), &options(OutputFormat::Comment)).unwrap();
        assert!(html.starts_with("<div class=\"comment\">"));
        assert!(html.contains("<blockquote>quoted</blockquote>"));
    }

    #[test]
    fn test_render_surfaces_serialize_error() {
        let raw = RawContent::new(vec![TextBlock::new("x").with_range(InlineStyle::Underline, 0, 1)]);
        let err = render(&raw, &MarkupTable::default(), &RenderOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SerializeError>(),
            Some(&SerializeError::UnknownStyle("UNDERLINE".to_string()))
        );
    }

    #[test]
    fn test_options_from_flags() {
        let flags = ConfigFlags {
            escape: true,
            no_tags: true,
            format: Some(OutputFormat::Json),
            author: Some("Riccardo".to_string()),
            date: Some("MARCH 7, 2016".to_string()),
            ..ConfigFlags::default()
        };
        let opts = RenderOptions::from_flags(&flags);
        assert!(opts.escape);
        assert!(!opts.highlight_tags);
        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(
            opts.card,
            CommentCard::new("Riccardo").with_date("MARCH 7, 2016")
        );
    }

    #[test]
    fn test_markup_table_without_file_is_default() {
        let table = markup_table(&ConfigFlags::default()).unwrap();
        assert_eq!(table, MarkupTable::default());
    }
}
