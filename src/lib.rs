// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. markup::MarkupTable)
    clippy::module_name_repetitions
)]

//! # commentmark
//!
//! Turns the raw content of a rich-text comment editor into HTML.
//!
//! The editor exports a list of blocks, each with plain text, a block type
//! and inline style ranges. commentmark:
//! - Serializes style ranges into correctly nested open/close tags
//! - Highlights `@word` tags
//! - Wraps blocks in paragraph, quote, or code elements
//! - Places the result in a comment card
//!
//! ## Modules
//!
//! - [`content`]: Raw editor content model
//! - [`markup`]: Style range serializer and markup tables
//! - [`tags`]: `@word` tag detection
//! - [`comment`]: Block and comment card HTML
//! - [`render`]: End-to-end rendering
//! - [`config`]: Saved defaults
//! - [`perf`]: Timing and debug log

pub mod comment;
pub mod config;
pub mod content;
pub mod markup;
pub mod perf;
pub mod render;
pub mod tags;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::content::{BlockType, InlineStyle, RawContent, RenderedBlock, TextBlock};
    pub use crate::markup::{MarkupTable, SerializeError, Serializer, build_markup};
}
