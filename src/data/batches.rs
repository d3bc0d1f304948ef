//! Input/target batch construction for next-character prediction.
//!
//! The encoded corpus is truncated to a whole number of batches, laid out
//! row-major as a `(batch_size, batches_count * sequence_length)` grid, and
//! split along the column axis into `batches_count` batches of shape
//! `(batch_size, sequence_length)`.
//!
//! Targets are the same sequence shifted left by one:
//! ```text
//! target[i]       = input[i + 1]    for i < usable_length - 1
//! target[last]    = input[0]
//! ```
//! The last target wraps to the start of the *truncated* sequence, not to the
//! next character of the corpus.

use ndarray::{Array1, Array2, Axis};

use crate::core::{BatchError, BatchResult};

/// Materialized input and target batches for one `(batch_size, sequence_length)` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSet {
    inputs: Vec<Array2<usize>>,
    targets: Vec<Array2<usize>>,
    batch_size: usize,
    sequence_length: usize,
}

impl BatchSet {
    #[must_use]
    pub fn batches_count(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Number of encoded characters covered by the batches.
    #[must_use]
    pub fn usable_length(&self) -> usize {
        self.batches_count() * self.batch_size * self.sequence_length
    }

    #[must_use]
    pub fn input_batches(&self) -> &[Array2<usize>] {
        &self.inputs
    }

    #[must_use]
    pub fn target_batches(&self) -> &[Array2<usize>] {
        &self.targets
    }

    /// The `(input, target)` pair at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&Array2<usize>, &Array2<usize>)> {
        Some((self.inputs.get(index)?, self.targets.get(index)?))
    }

    /// A fresh traversal from the first batch.
    #[must_use]
    pub fn iter(&self) -> Batches<'_> {
        Batches {
            inputs: &self.inputs,
            targets: &self.targets,
            pos: 0,
        }
    }
}

impl<'a> IntoIterator for &'a BatchSet {
    type Item = (&'a Array2<usize>, &'a Array2<usize>);
    type IntoIter = Batches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Number of whole batches `total_len` characters can fill.
#[must_use]
pub fn batches_count(total_len: usize, batch_size: usize, sequence_length: usize) -> usize {
    match batch_size.checked_mul(sequence_length) {
        Some(per_batch) if per_batch > 0 => total_len / per_batch,
        _ => 0,
    }
}

/// Slice an encoded sequence into input and target batches.
///
/// # Errors
///
/// - [`BatchError::InvalidConfig`] if `batch_size` or `sequence_length` is zero.
/// - [`BatchError::InsufficientData`] if the sequence cannot fill one batch.
pub fn compute_batches(
    encoded: &Array1<usize>,
    batch_size: usize,
    sequence_length: usize,
) -> BatchResult<BatchSet> {
    if batch_size == 0 || sequence_length == 0 {
        return Err(BatchError::InvalidConfig(format!(
            "batch_size ({batch_size}) and sequence_length ({sequence_length}) must be positive"
        )));
    }

    let count = batches_count(encoded.len(), batch_size, sequence_length);
    if count == 0 {
        return Err(BatchError::InsufficientData {
            batch_size,
            sequence_length,
            corpus_len: encoded.len(),
        });
    }

    let usable_length = count * batch_size * sequence_length;
    let inputs: Vec<usize> = encoded.iter().take(usable_length).copied().collect();

    let mut targets = Vec::with_capacity(usable_length);
    targets.extend_from_slice(&inputs[1..]);
    targets.push(inputs[0]);

    let columns = count * sequence_length;
    let input_grid = Array2::from_shape_vec((batch_size, columns), inputs)
        .map_err(|e| BatchError::ShapeMismatch(format!("input grid: {e}")))?;
    let target_grid = Array2::from_shape_vec((batch_size, columns), targets)
        .map_err(|e| BatchError::ShapeMismatch(format!("target grid: {e}")))?;

    Ok(BatchSet {
        inputs: split_columns(&input_grid, sequence_length),
        targets: split_columns(&target_grid, sequence_length),
        batch_size,
        sequence_length,
    })
}

fn split_columns(grid: &Array2<usize>, sequence_length: usize) -> Vec<Array2<usize>> {
    grid.axis_chunks_iter(Axis(1), sequence_length)
        .map(|chunk| chunk.to_owned())
        .collect()
}

/// Restartable iterator over `(input, target)` batch pairs in batch order.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    inputs: &'a [Array2<usize>],
    targets: &'a [Array2<usize>],
    pos: usize,
}

impl Batches<'_> {
    /// Rewind to the first batch.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Index of the next batch to be yielded.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = (&'a Array2<usize>, &'a Array2<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = (self.inputs.get(self.pos)?, self.targets.get(self.pos)?);
        self.pos += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inputs.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}
