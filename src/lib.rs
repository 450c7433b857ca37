//! Block alignment model with run-length encoded gapped rows.
//!
//! The [`row`] module holds the core data structure: a compact encoding of
//! one gapped alignment row that translates between block coordinates
//! (alignment columns, gaps included) and fragment coordinates (letters of
//! the underlying ungapped sequence) in logarithmic time. The [`model`]
//! module provides the surrounding domain objects: sequences, oriented
//! fragments of sequences, and blocks that tie fragments to rows.

pub mod model;
pub mod row;
pub mod utils;
