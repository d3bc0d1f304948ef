//! # charbatch
//!
//! Character-level corpus batching for next-character prediction.
//!
//! ## Overview
//!
//! A text corpus is read into memory, every distinct character gets a code
//! ranked by frequency, and the encoded text is sliced into equal-shaped
//! `(batch_size, sequence_length)` input batches. Each input batch has a
//! target batch holding the next character at every position.
//!
//! ```no_run
//! use charbatch::{Config, CorpusBatcher};
//!
//! let batcher = CorpusBatcher::open("data/kanye", Config::default())?;
//! for (inputs, targets) in &batcher {
//!     assert_eq!(inputs.shape(), targets.shape());
//! }
//! # Ok::<(), charbatch::BatchError>(())
//! ```
//!
//! ## Structure
//!
//! - [`core`] — The [`CorpusBatcher`] and [`BatchError`]
//! - [`data`] — Corpus loading, vocabulary, and batch slicing

pub mod core;
pub mod data;

pub use crate::core::{BatchError, BatchResult, CorpusBatcher};
pub use data::{compute_batches, BatchSet, Batches, Corpus, Vocabulary};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Batch layout requested by the training driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rows per batch.
    pub batch_size: usize,
    /// Characters per row.
    pub sequence_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: 32,
            sequence_length: 5,
        }
    }
}

impl Config {
    /// Check that both sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] if either size is zero.
    pub fn validate(&self) -> BatchResult<()> {
        if self.batch_size == 0 {
            return Err(BatchError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.sequence_length == 0 {
            return Err(BatchError::InvalidConfig(
                "sequence_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfig`] on malformed JSON or zero sizes.
    pub fn from_json_str(json: &str) -> BatchResult<Self> {
        let partial: PartialConfig = serde_json::from_str(json)
            .map_err(|e| BatchError::InvalidConfig(format!("failed to parse config: {e}")))?;
        let defaults = Self::default();
        let config = Self {
            batch_size: partial.batch_size.unwrap_or(defaults.batch_size),
            sequence_length: partial.sequence_length.unwrap_or(defaults.sequence_length),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::DataSource`] if the file cannot be read, or any
    /// error from [`Config::from_json_str`].
    pub fn from_json_file(path: &Path) -> BatchResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BatchError::DataSource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    batch_size: Option<usize>,
    sequence_length: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.sequence_length, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = Config::from_json_str(r#"{"batch_size": 4, "sequence_length": 16}"#).unwrap();
        assert_eq!(
            config,
            Config {
                batch_size: 4,
                sequence_length: 16
            }
        );
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = Config::from_json_str(r#"{"sequence_length": 8}"#).unwrap();
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.sequence_length, 8);
    }

    #[test]
    fn test_config_rejects_zero() {
        assert!(matches!(
            Config::from_json_str(r#"{"batch_size": 0}"#),
            Err(BatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(Config::from_json_str(r#"{"batch": 4}"#).is_err());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batching.json");
        std::fs::write(&path, r#"{"batch_size": 2, "sequence_length": 3}"#).unwrap();
        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.batch_size, 2);

        assert!(matches!(
            Config::from_json_file(&dir.path().join("missing.json")),
            Err(BatchError::DataSource { .. })
        ));
    }
}
