use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;

use rasterkit_image::{PixelBuffer, Rgb};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be valid.
    #[error("row length must be > 0")]
    InvalidRowLength,

    /// Input and output sizes do not match.
    #[error("source and destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply a function to each row of the source and destination images in parallel.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    f: impl Fn(&[Rgb], &mut [Rgb]) + Send + Sync,
) {
    let cols = src.cols();
    if cols == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(src_row, dst_row)| f(src_row, dst_row));
}

/// Apply `op` to the rows of `dst` whose index lies in `rows`.
///
/// `dst` is split into rows of `row_len` pixels; `op` receives the row index
/// and the mutable row. Each row is visited exactly once.
///
/// # Errors
///
/// Returns an error if `row_len` is zero, if `Fixed(0)` is requested or if
/// the thread pool cannot be built.
pub fn for_each_row_with<F>(
    strategy: ExecutionStrategy,
    dst: &mut [Rgb],
    row_len: usize,
    rows: Range<usize>,
    op: F,
) -> Result<(), ParallelError>
where
    F: Fn(usize, &mut [Rgb]) + Sync + Send,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowLength);
    }

    if dst.len() % row_len != 0 {
        return Err(ParallelError::SizeMismatch);
    }

    let num_rows = rows.end.saturating_sub(rows.start);

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .skip(rows.start)
                .take(num_rows)
                .for_each(|(i, row)| op(i, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .skip(rows.start)
                .take(num_rows)
                .for_each(|(i, row)| op(i, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .skip(rows.start)
                    .take(num_rows)
                    .for_each(|(i, row)| op(i, row));
            });
        }
    }
    Ok(())
}
