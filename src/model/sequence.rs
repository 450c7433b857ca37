use std::fmt;

use super::error::ModelError;
use crate::utils::to_atgcn;

/// Immutable named nucleotide sequence. The text is normalized to the ATGCN
/// alphabet at construction, so every byte of [`text`](Self::text) is one of
/// `A`, `T`, `G`, `C`, `N`.
///
/// Names of the form `GENOME&CHROMOSOME&CIRCULARITY` carry structured
/// metadata; other names are treated as opaque labels of a linear sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    description: String,
    text: String,
}

impl Sequence {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        text: &str,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptySequenceName);
        }
        let text = to_atgcn(text);
        if text.is_empty() {
            return Err(ModelError::EmptySequenceText { name });
        }
        Ok(Sequence {
            name,
            description: description.into(),
            text,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sequences without letters are rejected at construction, so this is
    /// always >= 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    fn name_parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.name.split('&');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(genome), Some(chromosome), Some(circularity), None)
                if !genome.is_empty() && !chromosome.is_empty() && !circularity.is_empty() =>
            {
                Some((genome, chromosome, circularity))
            }
            _ => None,
        }
    }

    /// Genome part of a structured name, if the name has one.
    pub fn genome(&self) -> Option<&str> {
        self.name_parts().map(|(genome, _, _)| genome)
    }

    /// Chromosome part of a structured name, if the name has one.
    pub fn chromosome(&self) -> Option<&str> {
        self.name_parts().map(|(_, chromosome, _)| chromosome)
    }

    /// True when the name declares a circular chromosome (circularity field
    /// starting with `c`).
    pub fn circular(&self) -> bool {
        self.name_parts()
            .is_some_and(|(_, _, circularity)| circularity.starts_with('c'))
    }

    /// Slice of the text between two positions, both inclusive.
    pub fn sub(&self, min: usize, max: usize) -> Result<&str, ModelError> {
        if min > max || max >= self.len() {
            return Err(ModelError::SequenceRangeOutOfBounds {
                name: self.name.clone(),
                min,
                max,
                len: self.len(),
            });
        }
        Ok(&self.text[min..=max])
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence {} of length {}", self.name, self.len())
    }
}
