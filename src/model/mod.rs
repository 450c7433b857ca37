mod block;
mod error;
mod fragment;
mod sequence;

pub use block::Block;
pub use error::ModelError;
pub use fragment::{Fragment, Ori};
pub use sequence::Sequence;
