use crate::row::RowError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("sequence name must not be empty")]
    EmptySequenceName,
    #[error("sequence '{name}' has no letters after normalization")]
    EmptySequenceText { name: String },
    #[error("range {min}..={max} is invalid for sequence '{name}' of length {len}")]
    SequenceRangeOutOfBounds {
        name: String,
        min: usize,
        max: usize,
        len: usize,
    },
    #[error("position {pos} is out of bounds for sequence '{name}' of length {len}")]
    FragmentOutOfBounds {
        name: String,
        pos: usize,
        len: usize,
    },
    #[error("fragment on linear sequence '{name}' cannot wrap the origin")]
    PartedOnLinear { name: String },
    #[error("fragment {id} is not parted")]
    NotParted { id: String },
    #[error("a block must contain at least one fragment")]
    EmptyBlock,
    #[error("all rows of a block must have the same length")]
    UnequalRowLengths,
    #[error("row for fragment {id} has {letters} letters, fragment length is {expected}")]
    RowLetterCountMismatch {
        id: String,
        letters: usize,
        expected: usize,
    },
    #[error("block has no row {index}")]
    BadRowIndex { index: usize },
    #[error(transparent)]
    Row(#[from] RowError),
}
