use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::error::ModelError;
use super::sequence::Sequence;
use crate::utils::rev_comp;

/// Orientation of a fragment relative to its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ori {
    Forward,
    Reverse,
}

impl Ori {
    pub fn sign(self) -> i64 {
        match self {
            Ori::Forward => 1,
            Ori::Reverse => -1,
        }
    }
}

/// Oriented sub-range of a sequence, inclusive on both ends.
///
/// `start` is the first position in reading order, so reverse fragments have
/// `start >= stop`. A fragment whose coordinates run backwards with respect
/// to its orientation is *parted*: it wraps the origin of a circular
/// sequence. Parted fragments are rejected on linear sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    seq: Arc<Sequence>,
    start: usize,
    stop: usize,
    ori: Ori,
}

impl Fragment {
    pub fn new(
        seq: Arc<Sequence>,
        start: usize,
        stop: usize,
        ori: Ori,
    ) -> Result<Self, ModelError> {
        for pos in [start, stop] {
            if pos >= seq.len() {
                return Err(ModelError::FragmentOutOfBounds {
                    name: seq.name().to_string(),
                    pos,
                    len: seq.len(),
                });
            }
        }
        let fragment = Fragment {
            seq,
            start,
            stop,
            ori,
        };
        if fragment.parted() && !fragment.seq.circular() {
            return Err(ModelError::PartedOnLinear {
                name: fragment.seq.name().to_string(),
            });
        }
        Ok(fragment)
    }

    pub fn sequence(&self) -> &Arc<Sequence> {
        &self.seq
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn ori(&self) -> Ori {
        self.ori
    }

    /// Signed extent in reading order; negative for parted fragments.
    fn diff(&self) -> i64 {
        (self.stop as i64 - self.start as i64) * self.ori.sign()
    }

    pub fn parted(&self) -> bool {
        self.diff() < 0
    }

    /// Coordinates are inclusive, so a fragment covers at least one letter.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        let diff = self.diff();
        if diff >= 0 {
            (diff + 1) as usize
        } else {
            (self.seq.len() as i64 + diff + 1) as usize
        }
    }

    pub fn min_pos(&self) -> usize {
        self.start.min(self.stop)
    }

    pub fn max_pos(&self) -> usize {
        self.start.max(self.stop)
    }

    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.seq.name(), self.start, self.stop)
    }

    /// Splits a parted fragment at the sequence origin. Callers must check
    /// `parted()` first.
    fn split(&self) -> (Fragment, Fragment) {
        let last = self.seq.len() - 1;
        let (head, tail) = match self.ori {
            Ori::Forward => ((self.start, last), (0, self.stop)),
            Ori::Reverse => ((self.start, 0), (last, self.stop)),
        };
        (
            Fragment {
                seq: Arc::clone(&self.seq),
                start: head.0,
                stop: head.1,
                ori: self.ori,
            },
            Fragment {
                seq: Arc::clone(&self.seq),
                start: tail.0,
                stop: tail.1,
                ori: self.ori,
            },
        )
    }

    /// The two non-parted halves of a parted fragment, in reading order.
    pub fn parts(&self) -> Result<(Fragment, Fragment), ModelError> {
        if !self.parted() {
            return Err(ModelError::NotParted { id: self.id() });
        }
        Ok(self.split())
    }

    /// Letters of the fragment in reading order; reverse fragments yield the
    /// reverse complement of the underlying sequence slice.
    pub fn text(&self) -> String {
        if self.parted() {
            let (head, tail) = self.split();
            let mut text = head.text();
            text.push_str(&tail.text());
            return text;
        }
        let slice = &self.seq.text()[self.min_pos()..=self.max_pos()];
        match self.ori {
            Ori::Forward => slice.to_string(),
            Ori::Reverse => rev_comp(slice),
        }
    }

    /// Number of sequence positions shared with another fragment of the same
    /// sequence, regardless of orientation.
    pub fn common(&self, other: &Fragment) -> usize {
        if self.seq.name() != other.seq.name() {
            return 0;
        }
        if self.parted() {
            let (head, tail) = self.split();
            return head.common(other) + tail.common(other);
        }
        if other.parted() {
            let (head, tail) = other.split();
            return self.common(&head) + self.common(&tail);
        }
        let lo = self.min_pos().max(other.min_pos());
        let hi = self.max_pos().min(other.max_pos());
        if lo > hi {
            0
        } else {
            hi - lo + 1
        }
    }
}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        let ori_rank = |ori: Ori| match ori {
            Ori::Forward => 0,
            Ori::Reverse => 1,
        };
        let key = |f: &Fragment| (f.min_pos(), f.max_pos(), ori_rank(f.ori), f.start);
        self.seq
            .name()
            .cmp(other.seq.name())
            .then(key(self).cmp(&key(other)))
            .then_with(|| self.seq.description().cmp(other.seq.description()))
            .then_with(|| self.seq.text().cmp(other.seq.text()))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
