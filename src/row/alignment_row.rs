use super::error::RowError;
use super::search::upper_bound;

/// Gap marker used in row texts.
pub const GAP: u8 = b'-';

/// Placeholder letter used by [`AlignmentRow::text`] when no fragment
/// letters are supplied.
const PLACEHOLDER: u8 = b'N';

/// Run-length encoding of the gap structure of one aligned row.
///
/// A row is stored as its maximal non-gap runs, in left-to-right order.
/// `starts[i]` is the block coordinate of the first letter of run `i` and
/// `prefix_counts[i]` is the number of letters in all runs before it. Both
/// vectors carry one trailing sentinel entry: `starts[k]` is the row length
/// and `prefix_counts[k]` is the total letter count, which keeps the binary
/// searches free of last-run special cases.
///
/// The encoding is immutable and answers every coordinate query in
/// O(log runs). Two rows are equal iff their encodings are equal; the
/// letters themselves are not part of the row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AlignmentRow {
    starts: Vec<usize>,
    prefix_counts: Vec<usize>,
}

/// Where a block position falls relative to the runs of a row.
enum Lookup {
    /// Before the first letter of the row.
    LeadingGap,
    /// On a letter; payload is its fragment coordinate.
    Letter(usize),
    /// In the gap after run `run`.
    GapAfter { run: usize },
}

impl AlignmentRow {
    /// Builds the encoding from gapped text. Any byte other than `-` counts
    /// as a letter. All-gap text is legal and yields a row without letters;
    /// empty text is rejected.
    pub fn new(text: &[u8]) -> Result<Self, RowError> {
        if text.is_empty() {
            return Err(RowError::EmptyText);
        }
        let mut runs = 0;
        let mut prev = GAP;
        for &byte in text {
            if byte != GAP && prev == GAP {
                runs += 1;
            }
            prev = byte;
        }
        let mut starts = Vec::with_capacity(runs + 1);
        let mut prefix_counts = Vec::with_capacity(runs + 1);
        prefix_counts.push(0);
        let mut letters = 0;
        prev = GAP;
        for (pos, &byte) in text.iter().enumerate() {
            if byte == GAP {
                if prev != GAP {
                    prefix_counts.push(letters);
                }
            } else {
                if prev == GAP {
                    starts.push(pos);
                }
                letters += 1;
            }
            prev = byte;
        }
        if prev != GAP {
            prefix_counts.push(letters);
        }
        starts.push(text.len());
        Ok(AlignmentRow {
            starts,
            prefix_counts,
        })
    }

    fn num_runs(&self) -> usize {
        self.starts.len() - 1
    }

    /// Row length in block coordinates, gap columns included. Always >= 1.
    pub fn len(&self) -> usize {
        self.starts[self.num_runs()]
    }

    /// True when the row has no letters, i.e. it was built from all-gap
    /// text.
    pub fn is_empty(&self) -> bool {
        self.fragment_len() == 0
    }

    /// Number of letters in the row (length of the ungapped fragment).
    pub fn fragment_len(&self) -> usize {
        self.prefix_counts[self.num_runs()]
    }

    fn check_block_pos(&self, pos: usize) -> Result<(), RowError> {
        if pos >= self.len() {
            return Err(RowError::BlockPosOutOfRange {
                pos,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Locates the run containing or preceding `block_pos`. The position
    /// must already be validated against the row length, which guarantees
    /// the search never lands past the sentinel.
    fn run_at(&self, block_pos: usize) -> Lookup {
        let idx = upper_bound(&self.starts, &block_pos);
        if idx == 0 {
            return Lookup::LeadingGap;
        }
        let run = idx - 1;
        let run_len = self.prefix_counts[run + 1] - self.prefix_counts[run];
        let offset = block_pos - self.starts[run];
        if offset < run_len {
            Lookup::Letter(self.prefix_counts[run] + offset)
        } else {
            Lookup::GapAfter { run }
        }
    }

    /// Maps a block coordinate to the fragment coordinate of the letter in
    /// that column, or `None` if the column is a gap for this row.
    pub fn block2fragment(&self, block_pos: usize) -> Result<Option<usize>, RowError> {
        self.check_block_pos(block_pos)?;
        Ok(match self.run_at(block_pos) {
            Lookup::Letter(fragment_pos) => Some(fragment_pos),
            Lookup::LeadingGap | Lookup::GapAfter { .. } => None,
        })
    }

    /// Like [`block2fragment`](Self::block2fragment), but a position in a
    /// gap resolves to the nearest letter on the left. `None` only when no
    /// letter exists to the left.
    pub fn block2left(&self, block_pos: usize) -> Result<Option<usize>, RowError> {
        self.check_block_pos(block_pos)?;
        Ok(match self.run_at(block_pos) {
            Lookup::Letter(fragment_pos) => Some(fragment_pos),
            Lookup::LeadingGap => None,
            Lookup::GapAfter { run } => Some(self.prefix_counts[run + 1] - 1),
        })
    }

    /// Like [`block2fragment`](Self::block2fragment), but a position in a
    /// gap resolves to the nearest letter on the right. `None` only when no
    /// letter exists to the right.
    pub fn block2right(&self, block_pos: usize) -> Result<Option<usize>, RowError> {
        self.check_block_pos(block_pos)?;
        if self.is_empty() {
            return Ok(None);
        }
        Ok(match self.run_at(block_pos) {
            Lookup::Letter(fragment_pos) => Some(fragment_pos),
            Lookup::LeadingGap => Some(0),
            Lookup::GapAfter { run } if run + 1 == self.num_runs() => None,
            Lookup::GapAfter { run } => Some(self.prefix_counts[run + 1]),
        })
    }

    /// Maps a block coordinate to the fragment coordinate of the closest
    /// letter, measured in block columns; ties resolve to the left letter.
    /// `None` only for a row without letters.
    pub fn block2nearest(&self, block_pos: usize) -> Result<Option<usize>, RowError> {
        self.check_block_pos(block_pos)?;
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(match self.run_at(block_pos) {
            Lookup::Letter(fragment_pos) => fragment_pos,
            Lookup::LeadingGap => 0,
            Lookup::GapAfter { run } if run + 1 == self.num_runs() => self.fragment_len() - 1,
            Lookup::GapAfter { run } => {
                let run_len = self.prefix_counts[run + 1] - self.prefix_counts[run];
                let last_letter = self.starts[run] + run_len - 1;
                let left_distance = block_pos - last_letter;
                let right_distance = self.starts[run + 1] - block_pos;
                if left_distance <= right_distance {
                    self.prefix_counts[run + 1] - 1
                } else {
                    self.prefix_counts[run + 1]
                }
            }
        }))
    }

    /// Maps a fragment coordinate to its block coordinate. Always succeeds
    /// for an in-range position: every letter occupies exactly one column.
    pub fn fragment2block(&self, fragment_pos: usize) -> Result<usize, RowError> {
        if fragment_pos >= self.fragment_len() {
            return Err(RowError::FragmentPosOutOfRange {
                pos: fragment_pos,
                len: self.fragment_len(),
            });
        }
        let run = upper_bound(&self.prefix_counts, &fragment_pos) - 1;
        Ok(self.starts[run] + (fragment_pos - self.prefix_counts[run]))
    }

    /// Reconstructs the gapped text of the row. `fragment` supplies the
    /// ungapped letters and must match [`fragment_len`](Self::fragment_len)
    /// exactly; without it every letter position is filled with `N`.
    pub fn text(&self, fragment: Option<&[u8]>) -> Result<Vec<u8>, RowError> {
        if let Some(letters) = fragment {
            if letters.len() != self.fragment_len() {
                return Err(RowError::FragmentLengthMismatch {
                    actual: letters.len(),
                    expected: self.fragment_len(),
                });
            }
        }
        let mut gapped = vec![GAP; self.len()];
        for run in 0..self.num_runs() {
            let lo = self.prefix_counts[run];
            let hi = self.prefix_counts[run + 1];
            let start = self.starts[run];
            let out = &mut gapped[start..start + (hi - lo)];
            match fragment {
                Some(letters) => out.copy_from_slice(&letters[lo..hi]),
                None => out.fill(PLACEHOLDER),
            }
        }
        Ok(gapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rng, Rng};

    fn row(text: &str) -> AlignmentRow {
        AlignmentRow::new(text.as_bytes()).unwrap()
    }

    fn letters(text: &str) -> Vec<u8> {
        text.bytes().filter(|&b| b != GAP).collect()
    }

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(AlignmentRow::new(b""), Err(RowError::EmptyText));
    }

    #[test]
    fn test_two_runs() {
        // Runs [2, 6) and [6, 8) in block coordinates.
        let row = row("--AT--GC-");
        assert_eq!(row.len(), 9);
        assert_eq!(row.fragment_len(), 4);

        assert_eq!(row.block2fragment(0), Ok(None));
        assert_eq!(row.block2fragment(1), Ok(None));
        assert_eq!(row.block2fragment(2), Ok(Some(0)));
        assert_eq!(row.block2fragment(3), Ok(Some(1)));
        assert_eq!(row.block2fragment(4), Ok(None));
        assert_eq!(row.block2fragment(5), Ok(None));
        assert_eq!(row.block2fragment(6), Ok(Some(2)));
        assert_eq!(row.block2fragment(7), Ok(Some(3)));
        assert_eq!(row.block2fragment(8), Ok(None));

        assert_eq!(row.block2left(4), Ok(Some(1)));
        assert_eq!(row.block2right(4), Ok(Some(2)));
        // Distance 1 to the left letter, 2 to the right one.
        assert_eq!(row.block2nearest(4), Ok(Some(1)));
        // Distance 2 to the left letter, 1 to the right one.
        assert_eq!(row.block2nearest(5), Ok(Some(2)));

        assert_eq!(row.fragment2block(0), Ok(2));
        assert_eq!(row.fragment2block(1), Ok(3));
        assert_eq!(row.fragment2block(2), Ok(6));
        assert_eq!(row.fragment2block(3), Ok(7));
    }

    #[test]
    fn test_no_gaps() {
        let row = row("AT");
        assert_eq!(row.len(), 2);
        assert_eq!(row.fragment_len(), 2);
        assert_eq!(row.block2fragment(0), Ok(Some(0)));
        assert_eq!(row.block2fragment(1), Ok(Some(1)));
        assert_eq!(row.fragment2block(1), Ok(1));
    }

    #[test]
    fn test_leading_gap() {
        let row = row("--AT");
        assert_eq!(row.block2left(0), Ok(None));
        assert_eq!(row.block2left(1), Ok(None));
        assert_eq!(row.block2right(0), Ok(Some(0)));
        assert_eq!(row.block2nearest(0), Ok(Some(0)));
    }

    #[test]
    fn test_trailing_gap() {
        let row = row("AT--");
        assert_eq!(row.block2right(2), Ok(None));
        assert_eq!(row.block2right(3), Ok(None));
        assert_eq!(row.block2left(3), Ok(Some(1)));
        assert_eq!(row.block2nearest(3), Ok(Some(1)));
    }

    #[test]
    fn test_is_empty_means_no_letters() {
        assert!(row("---").is_empty());
        assert!(!row("-A-").is_empty());
        assert!(!row("AT").is_empty());
    }

    #[test]
    fn test_all_gaps() {
        let row = row("---");
        assert_eq!(row.len(), 3);
        assert_eq!(row.fragment_len(), 0);
        assert!(row.is_empty());
        for pos in 0..3 {
            assert_eq!(row.block2fragment(pos), Ok(None));
            assert_eq!(row.block2left(pos), Ok(None));
            assert_eq!(row.block2right(pos), Ok(None));
            assert_eq!(row.block2nearest(pos), Ok(None));
        }
        assert_eq!(row.text(None), Ok(b"---".to_vec()));
        assert_eq!(row.text(Some(b"")), Ok(b"---".to_vec()));
        assert_eq!(
            row.fragment2block(0),
            Err(RowError::FragmentPosOutOfRange { pos: 0, len: 0 })
        );
    }

    #[test]
    fn test_out_of_range_positions() {
        let row = row("A-T");
        assert_eq!(
            row.block2fragment(3),
            Err(RowError::BlockPosOutOfRange { pos: 3, len: 3 })
        );
        assert_eq!(
            row.block2nearest(10),
            Err(RowError::BlockPosOutOfRange { pos: 10, len: 3 })
        );
        assert_eq!(
            row.fragment2block(2),
            Err(RowError::FragmentPosOutOfRange { pos: 2, len: 2 })
        );
    }

    #[test]
    fn test_text_reconstruction() {
        let original = "--AT--GC-";
        let row = row(original);
        assert_eq!(
            row.text(Some(&letters(original))),
            Ok(original.as_bytes().to_vec())
        );
        assert_eq!(row.text(None), Ok(b"--NN--NN-".to_vec()));
        assert_eq!(
            row.text(Some(b"ATG")),
            Err(RowError::FragmentLengthMismatch {
                actual: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn test_equality_is_structural() {
        // Only the gap structure matters, not the letters.
        assert_eq!(row("--AT"), row("--GG"));
        assert_ne!(row("A-T"), row("AT-"));
        assert_ne!(row("AT"), row("AT-"));
    }

    #[test]
    fn test_left_right_agree_on_letters() {
        let row = row("-AT--G-CA--");
        for pos in 0..row.len() {
            if let Some(fragment_pos) = row.block2fragment(pos).unwrap() {
                assert_eq!(row.block2left(pos), Ok(Some(fragment_pos)));
                assert_eq!(row.block2right(pos), Ok(Some(fragment_pos)));
            }
        }
    }

    #[test]
    fn test_mapped_positions_strictly_increase() {
        let row = row("-AT--G-CA--");
        let mapped: Vec<usize> = (0..row.len())
            .filter_map(|pos| row.block2fragment(pos).unwrap())
            .collect();
        assert!(mapped.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // Reference implementations that scan the text directly.

    fn fragment_at(text: &[u8], pos: usize) -> Option<usize> {
        Some(text[..pos].iter().filter(|&&b| b != GAP).count())
    }

    fn naive_block2fragment(text: &[u8], pos: usize) -> Option<usize> {
        if text[pos] == GAP {
            None
        } else {
            fragment_at(text, pos)
        }
    }

    fn naive_block2left(text: &[u8], pos: usize) -> Option<usize> {
        (0..=pos)
            .rev()
            .find(|&p| text[p] != GAP)
            .and_then(|p| fragment_at(text, p))
    }

    fn naive_block2right(text: &[u8], pos: usize) -> Option<usize> {
        (pos..text.len())
            .find(|&p| text[p] != GAP)
            .and_then(|p| fragment_at(text, p))
    }

    fn naive_block2nearest(text: &[u8], pos: usize) -> Option<usize> {
        let left = (0..=pos).rev().find(|&p| text[p] != GAP);
        let right = (pos..text.len()).find(|&p| text[p] != GAP);
        match (left, right) {
            (None, None) => None,
            (Some(l), None) => fragment_at(text, l),
            (None, Some(r)) => fragment_at(text, r),
            (Some(l), Some(r)) => {
                if pos - l <= r - pos {
                    fragment_at(text, l)
                } else {
                    fragment_at(text, r)
                }
            }
        }
    }

    fn random_gapped_text(len: usize, gap_prob: f64) -> Vec<u8> {
        let mut rng = rng();
        (0..len)
            .map(|_| {
                if rng.random_bool(gap_prob) {
                    GAP
                } else {
                    b"ATGC"[rng.random_range(0..4)]
                }
            })
            .collect()
    }

    #[test]
    fn test_random_rows_match_naive_scan() {
        let mut rng = rng();
        for _ in 0..200 {
            let len = rng.random_range(1..60);
            let gap_prob = rng.random_range(0.0..1.0);
            let text = random_gapped_text(len, gap_prob);
            let row = AlignmentRow::new(&text).unwrap();
            let fragment: Vec<u8> = text.iter().copied().filter(|&b| b != GAP).collect();

            assert_eq!(row.len(), text.len());
            assert_eq!(row.fragment_len(), fragment.len());
            assert_eq!(row.text(Some(&fragment)).unwrap(), text);

            for pos in 0..text.len() {
                assert_eq!(
                    row.block2fragment(pos).unwrap(),
                    naive_block2fragment(&text, pos)
                );
                assert_eq!(row.block2left(pos).unwrap(), naive_block2left(&text, pos));
                assert_eq!(row.block2right(pos).unwrap(), naive_block2right(&text, pos));
                assert_eq!(
                    row.block2nearest(pos).unwrap(),
                    naive_block2nearest(&text, pos)
                );
                if !fragment.is_empty() {
                    let nearest = row.block2nearest(pos).unwrap().unwrap();
                    assert!(nearest < fragment.len());
                }
            }
            for fragment_pos in 0..fragment.len() {
                let block_pos = row.fragment2block(fragment_pos).unwrap();
                assert_eq!(row.block2fragment(block_pos), Ok(Some(fragment_pos)));
            }
        }
    }
}
