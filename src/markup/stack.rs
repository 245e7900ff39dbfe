//! Stack of currently open inline styles.

use crate::content::InlineStyle;

/// Open styles, innermost on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleStack<'a> {
    open: Vec<&'a InlineStyle>,
}

impl<'a> StyleStack<'a> {
    pub const fn new() -> Self {
        Self { open: Vec::new() }
    }

    pub fn push(&mut self, style: &'a InlineStyle) {
        self.open.push(style);
    }

    /// The innermost open style.
    pub fn peek(&self) -> Option<&'a InlineStyle> {
        self.open.last().copied()
    }

    pub fn pop(&mut self) -> Option<&'a InlineStyle> {
        self.open.pop()
    }

    pub fn contains(&self, style: &InlineStyle) -> bool {
        self.open.iter().any(|open| *open == style)
    }

    /// Returns true if any of `styles` is still open anywhere on the stack.
    pub fn contains_any(&self, styles: &[&InlineStyle]) -> bool {
        styles.iter().any(|style| self.contains(style))
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }
}
