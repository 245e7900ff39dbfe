//! Inline style markup.
//!
//! Walks each block's characters together with its style ranges and emits
//! matched open/close tags. Open styles live on a [`StyleStack`] and are
//! always closed innermost-first, so the output nests correctly.

mod error;
mod serializer;
mod stack;
mod table;

pub use error::SerializeError;
pub use serializer::{Serializer, build_markup, escape_html};
pub use stack::StyleStack;
pub use table::{MarkupTable, TagPair};
