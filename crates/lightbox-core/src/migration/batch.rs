//! Batch arithmetic for the migration pipeline.

use crate::error::{LightboxError, Result};

/// Partition of an ordered file-id sequence into fixed-size batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total: usize,
    pub batch_size: usize,
    pub iterations: usize,
}

impl BatchPlan {
    /// Plan `ceil(total / batch_size)` batches. `total >= 1` and
    /// `batch_size >= 1` are guaranteed by upstream validation.
    pub fn new(total: usize, batch_size: usize) -> Self {
        let mut iterations = total / batch_size;
        if total % batch_size != 0 {
            iterations += 1;
        }
        Self {
            total,
            batch_size,
            iterations,
        }
    }

    /// Consecutive slices in original order, 1-indexed for progress
    /// reporting; the last slice may be shorter.
    pub fn slices<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = (usize, &'a [T])> + 'a {
        items
            .chunks(self.batch_size)
            .enumerate()
            .map(|(i, chunk)| (i + 1, chunk))
    }
}

/// Coerce a caller-supplied batch size to a positive count.
pub(crate) fn normalize_batch_size(raw: i64, context: &str) -> Result<usize> {
    let size = raw.unsigned_abs() as usize;
    if size == 0 {
        return Err(LightboxError::argument(
            context,
            "expected a non-zero integer for \"batch_size\"; instead got 0",
        ));
    }
    Ok(size)
}
