//! Corpus loading, vocabulary, and batch construction.
//!
//! ## Submodules
//!
//! - [`corpus`] — Reading the corpus text from disk
//! - [`vocab`] — Frequency-ranked character vocabulary and encoding
//! - [`batches`] — Input/target batch slicing for next-character prediction

pub mod batches;
pub mod corpus;
pub mod vocab;

pub use batches::{batches_count, compute_batches, BatchSet, Batches};
pub use corpus::{Corpus, DEFAULT_CORPUS_FILE};
pub use vocab::Vocabulary;
