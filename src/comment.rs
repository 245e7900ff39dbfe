//! Comment HTML.
//!
//! Wraps each rendered block in the element for its block type and places the
//! result inside a comment card for the comments list.

use std::fmt::Write as _;

use crate::content::{BlockType, RenderedBlock};
use crate::markup::escape_html;

const DEFAULT_AUTHOR: &str = "Anonymous";

/// Wrap one block's markup in the HTML element for its type.
///
/// Types other than unstyled, blockquote and code-block render as a
/// paragraph. The comment editor's own submit handler dropped such blocks
/// from the comment entirely.
pub fn block_html(block: &RenderedBlock) -> String {
    let markup = &block.styled_markup;
    match block.block_type {
        BlockType::Blockquote => format!("<blockquote>{markup}</blockquote>"),
        BlockType::CodeBlock => format!(
            "<div class='box'><pre style='white-space: pre-wrap;'><code>{markup}</code></pre></div>"
        ),
        _ => format!("<p>{markup}</p>"),
    }
}

/// Concatenate the HTML of every block, in order.
pub fn body_html(blocks: &[RenderedBlock]) -> String {
    blocks.iter().map(block_html).collect()
}

/// Byline and avatar shown above a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCard {
    pub author: String,
    pub avatar_url: Option<String>,
    pub date: Option<String>,
}

impl Default for CommentCard {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            avatar_url: None,
            date: None,
        }
    }
}

impl CommentCard {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Render the full comment element around `blocks`.
    ///
    /// Author, avatar URL and date are plain text and are always escaped.
    /// Block markup is inserted as is.
    pub fn render(&self, blocks: &[RenderedBlock]) -> String {
        let author = escape_html(&self.author);
        let mut html = String::new();
        html.push_str("<div class=\"comment\">\n");
        html.push_str("  <div class=\"comment-user\">\n    ");
        if let Some(url) = &self.avatar_url {
            let _ = write!(
                html,
                "<div class=\"avatar\"><img src=\"{}\" alt=\"{author}\"/></div>",
                escape_html(url)
            );
        }
        let _ = write!(
            html,
            "<span class=\"user-details\"><span class=\"username\">{author} </span>"
        );
        if let Some(date) = &self.date {
            let _ = write!(html, "<span>on </span><span>{}</span>", escape_html(date));
        }
        html.push_str("</span>\n  </div>\n");
        let _ = writeln!(
            html,
            "  <div class=\"comment-text\">\n    {}\n  </div>",
            body_html(blocks)
        );
        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: BlockType, markup: &str) -> RenderedBlock {
        RenderedBlock::new(block_type, markup.to_string())
    }

    #[test]
    fn test_block_html_wraps_by_type() {
        assert_eq!(
            block_html(&block(BlockType::Unstyled, "<em>hi</em>")),
            "<p><em>hi</em></p>"
        );
        assert_eq!(
            block_html(&block(BlockType::Blockquote, "q")),
            "<blockquote>q</blockquote>"
        );
        assert_eq!(
            block_html(&block(BlockType::CodeBlock, "x = 1")),
            "<div class='box'><pre style='white-space: pre-wrap;'><code>x = 1</code></pre></div>"
        );
    }

    #[test]
    fn test_block_html_falls_back_to_paragraph() {
        assert_eq!(block_html(&block(BlockType::Header(2), "Title")), "<p>Title</p>");
        assert_eq!(
            block_html(&block(BlockType::Other("callout".to_string()), "c")),
            "<p>c</p>"
        );
    }

    #[test]
    fn test_body_html_preserves_order() {
        let blocks = vec![
            block(BlockType::Unstyled, "one"),
            block(BlockType::Blockquote, "two"),
        ];
        assert_eq!(body_html(&blocks), "<p>one</p><blockquote>two</blockquote>");
        assert_eq!(body_html(&[]), "");
    }

    #[test]
    fn test_card_includes_byline_and_body() {
        let card = CommentCard::new("Riccardo")
            .with_avatar("//example.com/a.jpg")
            .with_date("MARCH 7, 2016");
        let html = card.render(&[block(BlockType::Unstyled, "hello")]);

        assert!(html.starts_with("<div class=\"comment\">"));
        assert!(html.contains("<img src=\"//example.com/a.jpg\" alt=\"Riccardo\"/>"));
        assert!(html.contains("<span class=\"username\">Riccardo </span>"));
        assert!(html.contains("<span>MARCH 7, 2016</span>"));
        assert!(html.contains("<div class=\"comment-text\">\n    <p>hello</p>\n  </div>"));
    }

    #[test]
    fn test_card_escapes_byline_fields() {
        let card = CommentCard::new("Jean \"JJ\" <b>")
            .with_avatar("/a.png?x=1&y=\"2\"")
            .with_date("<today>");
        let html = card.render(&[block(BlockType::Unstyled, "<em>kept</em>")]);

        assert!(html.contains(
            "<img src=\"/a.png?x=1&amp;y=&quot;2&quot;\" alt=\"Jean &quot;JJ&quot; &lt;b&gt;\"/>"
        ));
        assert!(html.contains("<span class=\"username\">Jean &quot;JJ&quot; &lt;b&gt; </span>"));
        assert!(html.contains("<span>&lt;today&gt;</span>"));
        assert!(html.contains("<p><em>kept</em></p>"));
    }

    #[test]
    fn test_default_card_omits_avatar_and_date() {
        let html = CommentCard::default().render(&[]);
        assert!(html.contains("Anonymous"));
        assert!(!html.contains("avatar"));
        assert!(!html.contains("<span>on </span>"));
    }
}
