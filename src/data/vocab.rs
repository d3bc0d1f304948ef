//! Frequency-ranked character vocabulary.
//!
//! Every distinct character of a corpus gets a dense code in `[0, size)`.
//! The most frequent character is code 0; equally frequent characters keep
//! the order in which they first appear in the corpus.

use ndarray::Array1;
use std::collections::HashMap;

use crate::core::{BatchError, BatchResult};

/// Character-to-code vocabulary built from a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Characters ordered by code.
    pub chars: Vec<char>,
    /// Occurrence count of each character, parallel to `chars`.
    pub counts: Vec<usize>,
    /// Reverse mapping from character to code.
    pub char_to_idx: HashMap<char, usize>,
}

impl Vocabulary {
    /// Count every character of `text` and rank them by frequency.
    ///
    /// An empty text yields an empty vocabulary.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        // First-appearance order, so the stable sort below breaks ties by it.
        let mut first_seen: HashMap<char, usize> = HashMap::new();
        let mut pairs: Vec<(char, usize)> = Vec::new();
        for c in text.chars() {
            match first_seen.get(&c) {
                Some(&slot) => pairs[slot].1 += 1,
                None => {
                    first_seen.insert(c, pairs.len());
                    pairs.push((c, 1));
                }
            }
        }

        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        let (chars, counts): (Vec<char>, Vec<usize>) = pairs.into_iter().unzip();
        let char_to_idx = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self {
            chars,
            counts,
            char_to_idx,
        }
    }

    /// Number of distinct characters.
    #[must_use]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the code for a character, or `None` if not in vocabulary.
    #[must_use]
    pub fn char_to_index(&self, c: char) -> Option<usize> {
        self.char_to_idx.get(&c).copied()
    }

    /// Get the character for a code, or `None` if out of range.
    #[must_use]
    pub fn index_to_char(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// The ordered `(char, count)` pairs, most frequent first.
    #[must_use]
    pub fn count_pairs(&self) -> Vec<(char, usize)> {
        self.chars
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
            .collect()
    }

    /// Encode text as a sequence of codes.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Encoding`] on the first character that has no code.
    pub fn encode(&self, text: &str) -> BatchResult<Array1<usize>> {
        text.chars()
            .map(|c| self.char_to_index(c).ok_or(BatchError::Encoding(c)))
            .collect::<BatchResult<Vec<usize>>>()
            .map(Array1::from)
    }

    /// Decode codes back to text, or `None` if any code is out of range.
    pub fn decode<'a, I>(&self, codes: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a usize>,
    {
        codes
            .into_iter()
            .map(|&idx| self.index_to_char(idx))
            .collect()
    }
}
