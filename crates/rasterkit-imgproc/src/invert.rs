use rasterkit_image::PixelBuffer;

use crate::parallel;

/// Invert the tones of an image.
///
/// Every channel `c` becomes `max_color_val - c`. Channels above
/// `max_color_val`, only reachable through [`PixelBuffer::as_slice_mut`],
/// become zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W).
///
/// # Returns
///
/// The inverted image.
///
/// # Example
///
/// ```
/// use rasterkit_image::{PixelBuffer, Rgb};
/// use rasterkit_imgproc::invert::invert;
///
/// let image = PixelBuffer::new([1, 1].into(), 255, vec![Rgb::new(30, 60, 90)]).unwrap();
///
/// let inverted = invert(&image);
///
/// assert_eq!(inverted.as_slice(), &[Rgb::new(225, 195, 165)]);
/// ```
pub fn invert(src: &PixelBuffer) -> PixelBuffer {
    let max = src.max_color_val();
    let mut dst = src.clone();

    parallel::par_iter_rows(src, &mut dst, |src_row, dst_row| {
        src_row
            .iter()
            .zip(dst_row.iter_mut())
            .for_each(|(src_pixel, dst_pixel)| {
                *dst_pixel = src_pixel.map(|c| max.saturating_sub(c));
            });
    });

    dst
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rasterkit_image::{ImageError, PixelBuffer, Rgb};

    #[test]
    fn test_invert() -> Result<(), ImageError> {
        let image = PixelBuffer::new([1, 1].into(), 255, vec![Rgb::new(30, 60, 90)])?;
        let inverted = super::invert(&image);
        assert_eq!(inverted.as_slice(), &[Rgb::new(225, 195, 165)]);
        assert_eq!(inverted.max_color_val(), 255);
        // the input is left untouched
        assert_eq!(image.as_slice(), &[Rgb::new(30, 60, 90)]);
        Ok(())
    }

    #[test]
    fn test_invert_custom_max() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            [2, 1].into(),
            15,
            vec![Rgb::new(0, 15, 7), Rgb::new(1, 2, 3)],
        )?;
        let inverted = super::invert(&image);
        assert_eq!(
            inverted.as_slice(),
            &[Rgb::new(15, 0, 8), Rgb::new(14, 13, 12)]
        );
        Ok(())
    }

    #[test]
    fn test_invert_out_of_range_channel() -> Result<(), ImageError> {
        let mut image = PixelBuffer::new([2, 1].into(), 255, vec![Rgb::new(0, 10, 255); 2])?;
        image.as_slice_mut()[1] = Rgb::new(300, u16::MAX, 255);
        let inverted = super::invert(&image);
        assert_eq!(
            inverted.as_slice(),
            &[Rgb::new(255, 245, 0), Rgb::new(0, 0, 0)]
        );
        Ok(())
    }

    #[test]
    fn test_invert_involution() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(7);
        for (width, height) in [(1, 1), (3, 5), (8, 2), (0, 4)] {
            let pixels = (0..width * height)
                .map(|_| {
                    Rgb::new(
                        rng.random_range(0..=255),
                        rng.random_range(0..=255),
                        rng.random_range(0..=255),
                    )
                })
                .collect();
            let image = PixelBuffer::new([width, height].into(), 255, pixels)?;
            assert_eq!(super::invert(&super::invert(&image)), image);
        }
        Ok(())
    }
}
