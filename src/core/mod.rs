//! The corpus batcher and its error type.
//!
//! A [`CorpusBatcher`] moves through three stages:
//! - **Loaded**: a [`Corpus`] has been read into memory
//! - **Prepared**: vocabulary built, text encoded, batches computed
//! - **Iterating**: a cursor walks the batches; exhaustion is non-fatal and
//!   [`CorpusBatcher::reset_batch_pointer`] returns to the first batch
//!
//! The derived batches are computed once and only change on
//! [`CorpusBatcher::reconfigure`].

use log::{debug, info};
use ndarray::{Array1, Array2};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::batches::{compute_batches, BatchSet, Batches};
use crate::data::corpus::Corpus;
use crate::data::vocab::Vocabulary;
use crate::Config;

/// Error type for corpus batching.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Corpus file missing, unreadable, or not UTF-8.
    #[error("no dataset found at {}: {source}", .path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Corpus too short for a single `(batch_size, sequence_length)` batch.
    #[error(
        "unable to generate batches: corpus of {corpus_len} characters cannot fill one batch of \
         batch_size {batch_size} x sequence_length {sequence_length}; \
         reduce batch_size or sequence_length"
    )]
    InsufficientData {
        batch_size: usize,
        sequence_length: usize,
        corpus_len: usize,
    },
    /// A corpus character has no vocabulary code.
    #[error("character {0:?} is missing from the vocabulary")]
    Encoding(char),
    /// Invalid batching configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Shape mismatch while laying out batches
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

pub type BatchResult<T> = Result<T, BatchError>;

/// Turns a corpus into `(input, target)` batches for next-character prediction.
#[derive(Debug, Clone)]
pub struct CorpusBatcher {
    corpus: Corpus,
    vocabulary: Vocabulary,
    encoded: Array1<usize>,
    config: Config,
    batches: BatchSet,
    pointer: usize,
}

impl CorpusBatcher {
    /// Load a corpus from `path` and prepare batches.
    ///
    /// `path` may be a text file or a directory containing
    /// [`DEFAULT_CORPUS_FILE`](crate::data::corpus::DEFAULT_CORPUS_FILE).
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::DataSource`] if the corpus cannot be read, or any
    /// error from [`CorpusBatcher::new`].
    pub fn open(path: impl AsRef<Path>, config: Config) -> BatchResult<Self> {
        let corpus = Corpus::load(path)?;
        Self::new(corpus, config)
    }

    /// Build the vocabulary, encode the corpus, and compute batches.
    ///
    /// # Errors
    ///
    /// - [`BatchError::InvalidConfig`] if either size is zero.
    /// - [`BatchError::InsufficientData`] if the corpus cannot fill one batch.
    pub fn new(corpus: Corpus, config: Config) -> BatchResult<Self> {
        config.validate()?;
        let vocabulary = Vocabulary::from_text(corpus.text());
        let encoded = vocabulary.encode(corpus.text())?;
        let batches = compute_batches(&encoded, config.batch_size, config.sequence_length)?;

        let batcher = Self {
            corpus,
            vocabulary,
            encoded,
            config,
            batches,
            pointer: 0,
        };
        batcher.log_summary();
        Ok(batcher)
    }

    /// Recompute batches for new sizes from the already-encoded corpus.
    ///
    /// Resets the batch pointer. On error the current batches are kept.
    ///
    /// # Errors
    ///
    /// Same conditions as [`compute_batches`].
    pub fn reconfigure(&mut self, config: Config) -> BatchResult<()> {
        config.validate()?;
        self.batches = compute_batches(&self.encoded, config.batch_size, config.sequence_length)?;
        self.config = config;
        self.pointer = 0;
        self.log_summary();
        Ok(())
    }

    fn log_summary(&self) {
        info!(
            "tensor size: {}, batch size: {}, sequence length: {}, batches: {}, vocabulary: {}",
            self.batches.usable_length(),
            self.config.batch_size,
            self.config.sequence_length,
            self.batches.batches_count(),
            self.vocabulary.size()
        );
        debug!(
            "discarded {} trailing characters",
            self.encoded.len() - self.batches.usable_length()
        );
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.size()
    }

    /// Full encoded corpus, including the remainder that was cut from the batches.
    #[must_use]
    pub fn encoded(&self) -> &Array1<usize> {
        &self.encoded
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn batches(&self) -> &BatchSet {
        &self.batches
    }

    #[must_use]
    pub fn batches_count(&self) -> usize {
        self.batches.batches_count()
    }

    #[must_use]
    pub fn usable_length(&self) -> usize {
        self.batches.usable_length()
    }

    #[must_use]
    pub fn input_batches(&self) -> &[Array2<usize>] {
        self.batches.input_batches()
    }

    #[must_use]
    pub fn target_batches(&self) -> &[Array2<usize>] {
        self.batches.target_batches()
    }

    #[must_use]
    pub fn batch(&self, index: usize) -> Option<(&Array2<usize>, &Array2<usize>)> {
        self.batches.get(index)
    }

    /// A fresh traversal over every batch, independent of the batch pointer.
    #[must_use]
    pub fn iter(&self) -> Batches<'_> {
        self.batches.iter()
    }

    /// Return the batch at the pointer and advance it, or `None` once exhausted.
    pub fn next_batch(&mut self) -> Option<(&Array2<usize>, &Array2<usize>)> {
        let pair = self.batches.get(self.pointer)?;
        self.pointer += 1;
        Some(pair)
    }

    pub fn reset_batch_pointer(&mut self) {
        self.pointer = 0;
    }

    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }
}

impl<'a> IntoIterator for &'a CorpusBatcher {
    type Item = (&'a Array2<usize>, &'a Array2<usize>);
    type IntoIter = Batches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
