use std::fmt;

use itertools::Itertools;
use log::debug;

use super::error::ModelError;
use super::fragment::Fragment;
use crate::row::{AlignmentRow, GAP};

/// One alignment of a set of fragments. Every fragment contributes one
/// gapped row; all rows have the same length. The block stores only the gap
/// structure of each row and fetches the letters from the fragments when a
/// row text is requested.
#[derive(Debug, Clone)]
pub struct Block {
    fragments: Vec<Fragment>,
    rows: Vec<AlignmentRow>,
}

impl Block {
    /// Builds an unaligned block: each row is the fragment's text padded on
    /// the right with gaps to the length of the longest fragment.
    pub fn new(fragments: Vec<Fragment>) -> Result<Self, ModelError> {
        let width = fragments
            .iter()
            .map(|fragment| fragment.len())
            .max()
            .ok_or(ModelError::EmptyBlock)?;
        let mut rows = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            let mut gapped = fragment.text().into_bytes();
            gapped.resize(width, GAP);
            rows.push(AlignmentRow::new(&gapped)?);
        }
        debug!("built unaligned block of {} rows, length {}", rows.len(), width);
        Ok(Block { fragments, rows })
    }

    /// Builds a block from fragments and their gapped alignment texts. All
    /// texts must have equal length and each text's letter count must match
    /// its fragment's length.
    pub fn from_rows(rows: Vec<(Fragment, &str)>) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyBlock);
        }
        if !rows.iter().map(|(_, text)| text.len()).all_equal() {
            return Err(ModelError::UnequalRowLengths);
        }
        let mut fragments = Vec::with_capacity(rows.len());
        let mut encoded = Vec::with_capacity(rows.len());
        for (fragment, text) in rows {
            let row = AlignmentRow::new(text.as_bytes())?;
            if row.fragment_len() != fragment.len() {
                return Err(ModelError::RowLetterCountMismatch {
                    id: fragment.id(),
                    letters: row.fragment_len(),
                    expected: fragment.len(),
                });
            }
            fragments.push(fragment);
            encoded.push(row);
        }
        debug!(
            "built block of {} rows, length {}",
            encoded.len(),
            encoded[0].len()
        );
        Ok(Block {
            fragments,
            rows: encoded,
        })
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.fragments.len()
    }

    /// Alignment length in block coordinates. Empty blocks are rejected at
    /// construction, so this is always >= 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows[0].len()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn rows(&self) -> &[AlignmentRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fragment, &AlignmentRow)> {
        self.fragments.iter().zip(self.rows.iter())
    }

    fn entry(&self, index: usize) -> Result<(&Fragment, &AlignmentRow), ModelError> {
        match (self.fragments.get(index), self.rows.get(index)) {
            (Some(fragment), Some(row)) => Ok((fragment, row)),
            _ => Err(ModelError::BadRowIndex { index }),
        }
    }

    /// Gapped text of one row, reconstructed from the row encoding and the
    /// fragment's letters.
    pub fn text(&self, index: usize) -> Result<String, ModelError> {
        let (fragment, row) = self.entry(index)?;
        let gapped = row.text(Some(fragment.text().as_bytes()))?;
        Ok(String::from_utf8(gapped).expect("fragment text is normalized ASCII"))
    }

    pub fn block2fragment(
        &self,
        index: usize,
        block_pos: usize,
    ) -> Result<Option<usize>, ModelError> {
        Ok(self.entry(index)?.1.block2fragment(block_pos)?)
    }

    pub fn block2left(&self, index: usize, block_pos: usize) -> Result<Option<usize>, ModelError> {
        Ok(self.entry(index)?.1.block2left(block_pos)?)
    }

    pub fn block2right(&self, index: usize, block_pos: usize) -> Result<Option<usize>, ModelError> {
        Ok(self.entry(index)?.1.block2right(block_pos)?)
    }

    pub fn block2nearest(
        &self,
        index: usize,
        block_pos: usize,
    ) -> Result<Option<usize>, ModelError> {
        Ok(self.entry(index)?.1.block2nearest(block_pos)?)
    }

    pub fn fragment2block(&self, index: usize, fragment_pos: usize) -> Result<usize, ModelError> {
        Ok(self.entry(index)?.1.fragment2block(fragment_pos)?)
    }
}

/// Blocks are equal when they hold the same set of (fragment, row) pairs,
/// regardless of row order.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() {
            return false;
        }
        let sorted = |block: &Block| {
            let mut pairs = block.iter().collect_vec();
            pairs.sort();
            pairs
                .into_iter()
                .map(|(fragment, row)| (fragment.clone(), row.clone()))
                .collect_vec()
        };
        sorted(self) == sorted(other)
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block of {} fragments, length {}", self.size(), self.len())
    }
}
