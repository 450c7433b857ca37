mod alignment_row;
mod error;
mod search;

pub use alignment_row::{AlignmentRow, GAP};
pub use error::RowError;
pub use search::upper_bound;
