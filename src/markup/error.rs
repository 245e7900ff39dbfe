use thiserror::Error;

/// Reasons serialization can fail. Either one aborts the whole input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A range uses a style the markup table has no tags for.
    #[error("no markup tags for inline style `{0}`")]
    UnknownStyle(String),

    /// A range has a non-positive length.
    #[error("style range {range_index} of block {block_index} has a non-positive length")]
    InvalidRange {
        block_index: usize,
        range_index: usize,
    },
}
