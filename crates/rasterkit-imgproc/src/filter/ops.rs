use rasterkit_image::PixelBuffer;

use super::{convolution::has_interior, convolve, kernels};
use crate::{error::ImgprocError, parallel::ExecutionStrategy};

/// Blur an image using a gaussian blur filter
///
/// Pixels closer than `radius` to any edge are copied from the input
/// unchanged; see [`convolve`] for the interior rule.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `radius` - The half-width of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Errors
///
/// Returns an error if `sigma` is not positive and finite.
///
/// # Example
///
/// ```
/// use rasterkit_image::{PixelBuffer, Rgb};
/// use rasterkit_imgproc::filter::gaussian_blur;
///
/// let image = PixelBuffer::from_size_val([5, 5].into(), 255, Rgb::new(10, 20, 30)).unwrap();
///
/// let blurred = gaussian_blur(&image, 1, 1.0).unwrap();
///
/// assert_eq!(blurred, image);
/// ```
pub fn gaussian_blur(
    src: &PixelBuffer,
    radius: usize,
    sigma: f64,
) -> Result<PixelBuffer, ImgprocError> {
    gaussian_blur_with(src, radius, sigma, ExecutionStrategy::Serial)
}

/// Blur an image using a gaussian blur filter with an explicit execution strategy.
///
/// The output does not depend on the strategy.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `radius` - The half-width of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
/// * `strategy` - How the output rows are distributed across threads.
///
/// # Errors
///
/// Returns an error if `sigma` is not positive and finite. A radius that
/// leaves no interior returns a copy of `src` without building a kernel.
pub fn gaussian_blur_with(
    src: &PixelBuffer,
    radius: usize,
    sigma: f64,
    strategy: ExecutionStrategy,
) -> Result<PixelBuffer, ImgprocError> {
    kernels::check_sigma(sigma)?;

    if !has_interior(src.rows(), src.cols(), radius) {
        log::debug!(
            "gaussian blur radius {} leaves no interior in a {}x{} image",
            radius,
            src.cols(),
            src.rows()
        );
        return Ok(src.clone());
    }

    let kernel = kernels::gaussian_kernel_2d(radius, sigma)?;
    log::debug!(
        "gaussian blur: {}x{} image, radius {}, sigma {}, {:?}",
        src.cols(),
        src.rows(),
        radius,
        sigma,
        strategy
    );
    convolve(src, &kernel, strategy)
}
