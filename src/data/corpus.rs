//! Corpus loading.
//!
//! A corpus is the full text of a single UTF-8 file, held in memory.

use log::debug;
use std::path::{Path, PathBuf};

use crate::core::{BatchError, BatchResult};

/// File name looked up when a corpus path points at a directory.
pub const DEFAULT_CORPUS_FILE: &str = "input.txt";

/// Raw corpus text. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    text: String,
    source: Option<PathBuf>,
}

impl Corpus {
    /// Read a corpus from `path`.
    ///
    /// If `path` is a directory, the corpus is read from
    /// `path/`[`DEFAULT_CORPUS_FILE`].
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::DataSource`] if the file is missing, unreadable,
    /// or not valid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> BatchResult<Self> {
        let path = resolve_corpus_path(path.as_ref());
        let text = std::fs::read_to_string(&path).map_err(|source| BatchError::DataSource {
            path: path.clone(),
            source,
        })?;
        debug!("loaded {} bytes of corpus from {}", text.len(), path.display());
        Ok(Self {
            text,
            source: Some(path),
        })
    }

    /// Wrap in-memory text as a corpus.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the corpus was read from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Length in characters (not bytes).
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn resolve_corpus_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_CORPUS_FILE)
    } else {
        path.to_path_buf()
    }
}
