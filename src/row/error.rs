use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("cannot build an alignment row from empty text")]
    EmptyText,
    #[error("block position {pos} is out of range for a row of length {len}")]
    BlockPosOutOfRange { pos: usize, len: usize },
    #[error("fragment position {pos} is out of range for a fragment of length {len}")]
    FragmentPosOutOfRange { pos: usize, len: usize },
    #[error("fragment text has length {actual}, expected {expected}")]
    FragmentLengthMismatch { actual: usize, expected: usize },
}
