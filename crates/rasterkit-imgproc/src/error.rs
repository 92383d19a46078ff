use rasterkit_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the image processing module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImgprocError {
    /// The gaussian sigma must be a positive finite number.
    #[error("Gaussian sigma must be positive and finite, got {0}")]
    InvalidSigma(f64),

    /// The kernel weights do not describe a normalized square kernel.
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    /// Error raised while building the output image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
