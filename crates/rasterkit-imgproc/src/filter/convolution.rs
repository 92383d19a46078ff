use rasterkit_image::{PixelBuffer, Rgb};

use super::kernels::Kernel2d;
use crate::{
    error::ImgprocError,
    parallel::{self, ExecutionStrategy},
};

/// Accumulations closer than this to an integer are snapped to it before truncation.
const SNAP_EPSILON: f64 = 1e-9;

/// Truncate an accumulated channel value towards zero.
///
/// A normalized kernel applied to a uniform neighborhood may land a few ulps
/// below the exact integer, so values within [`SNAP_EPSILON`] of an integer
/// are taken as that integer.
fn truncate_channel(acc: f64) -> u16 {
    let nearest = acc.round();
    if (acc - nearest).abs() <= SNAP_EPSILON {
        nearest as u16
    } else {
        acc.trunc() as u16
    }
}

/// Whether a kernel of the given radius leaves at least one interior pixel.
pub(crate) fn has_interior(rows: usize, cols: usize, radius: usize) -> bool {
    radius
        .checked_mul(2)
        .is_some_and(|span| rows > span && cols > span)
}

/// Convolve the interior of an image with a dense 2D kernel.
///
/// Only pixels whose full kernel footprint lies inside the image are
/// recomputed: rows in `[radius, height - radius)` and columns in
/// `[radius, width - radius)`. Every other pixel keeps its input value, no
/// padding or reflection is performed. Each channel is accumulated in `f64`
/// and truncated to an integer.
///
/// An image too small to have an interior is returned unchanged.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `kernel` - The normalized kernel.
/// * `strategy` - How the output rows are distributed across threads.
///
/// # Errors
///
/// Returns an error if the execution strategy is invalid.
pub fn convolve(
    src: &PixelBuffer,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<PixelBuffer, ImgprocError> {
    let mut dst = src.clone();

    let (rows, cols) = (src.rows(), src.cols());
    let radius = kernel.radius();
    let side = kernel.side();

    if !has_interior(rows, cols, radius) {
        log::debug!(
            "kernel radius {} leaves no interior in a {}x{} image",
            radius,
            cols,
            rows
        );
        return Ok(dst);
    }

    let src_data = src.as_slice();
    let weights = kernel.as_slice();
    let max = src.max_color_val();

    parallel::for_each_row_with(
        strategy,
        dst.as_slice_mut(),
        cols,
        radius..rows - radius,
        |row, dst_row| {
            for col in radius..cols - radius {
                let mut acc = [0.0f64; 3];
                for (ki, kernel_row) in weights.chunks_exact(side).enumerate() {
                    let src_row = &src_data[(row + ki - radius) * cols..][..cols];
                    let window = &src_row[col - radius..col + radius + 1];
                    for (px, &w) in window.iter().zip(kernel_row.iter()) {
                        acc[0] += px.r as f64 * w;
                        acc[1] += px.g as f64 * w;
                        acc[2] += px.b as f64 * w;
                    }
                }

                // only out of range inputs can push a channel above max
                dst_row[col] = Rgb::new(
                    truncate_channel(acc[0]),
                    truncate_channel(acc[1]),
                    truncate_channel(acc[2]),
                )
                .map(|c| c.min(max));
            }
        },
    )?;

    Ok(dst)
}
