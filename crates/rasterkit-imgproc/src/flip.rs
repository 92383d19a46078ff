use rasterkit_image::PixelBuffer;
use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

/// Flip the input image horizontally.
///
/// Each row is reversed in place with a two-pointer swap that stops at the
/// center, so no swap crosses a row boundary and the middle column of an odd
/// width is left untouched.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use rasterkit_image::{PixelBuffer, Rgb};
/// use rasterkit_imgproc::flip::horizontal_flip;
///
/// let image = PixelBuffer::new(
///     [3, 1].into(),
///     255,
///     vec![Rgb::new(0, 0, 0), Rgb::new(100, 100, 100), Rgb::new(200, 200, 200)],
/// )
/// .unwrap();
///
/// let flipped = horizontal_flip(&image);
///
/// assert_eq!(flipped.get(0, 0), Some(&Rgb::new(200, 200, 200)));
/// assert_eq!(flipped.get(0, 2), Some(&Rgb::new(0, 0, 0)));
/// ```
pub fn horizontal_flip(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    let cols = src.cols();

    if cols == 0 {
        return dst;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .for_each(|row| {
            let mut i = 0;
            let mut j = cols - 1;
            while i < j {
                row.swap(i, j);
                i += 1;
                j -= 1;
            }
        });

    dst
}
