use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rasterkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// assert_eq!(image_size.num_pixels(), Some(200));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size, or `None` if it overflows `usize`.
    pub fn num_pixels(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

fn checked_num_pixels(size: ImageSize) -> Result<usize, ImageError> {
    size.num_pixels()
        .ok_or(ImageError::ImageSizeOverflow(size.width, size.height))
}

/// A pixel with three independent integer channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
}

impl Rgb {
    /// Create a new pixel from its three channels.
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// The channels in `[r, g, b]` order.
    pub fn channels(&self) -> [u16; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to every channel.
    pub fn map(self, f: impl Fn(u16) -> u16) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// The largest of the three channels.
    pub fn max_channel(&self) -> u16 {
        self.r.max(self.g).max(self.b)
    }
}

impl From<[u16; 3]> for Rgb {
    fn from(c: [u16; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

/// An in-memory RGB raster.
///
/// Pixels are stored row-major: the pixel at row `r` and column `c` lives at
/// index `r * width + c`. Every channel lies in `[0, max_color_val]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: ImageSize,
    max_color_val: u16,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a new pixel buffer from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `max_color_val` - The maximum value shared by all channels.
    /// * `pixels` - The row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns an error if the size overflows, if the pixel count does not
    /// match the size, if `max_color_val` is zero or if any channel exceeds
    /// `max_color_val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::{ImageSize, PixelBuffer, Rgb};
    ///
    /// let image = PixelBuffer::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 1,
    ///     },
    ///     255,
    ///     vec![Rgb::new(0, 0, 0), Rgb::new(255, 128, 0)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 2);
    /// assert_eq!(image.height(), 1);
    /// assert_eq!(image.get(0, 1), Some(&Rgb::new(255, 128, 0)));
    /// ```
    pub fn new(
        size: ImageSize,
        max_color_val: u16,
        pixels: Vec<Rgb>,
    ) -> Result<Self, ImageError> {
        let num_pixels = checked_num_pixels(size)?;
        if pixels.len() != num_pixels {
            return Err(ImageError::InvalidChannelShape(pixels.len(), num_pixels));
        }

        if max_color_val == 0 {
            return Err(ImageError::InvalidMaxColorValue);
        }

        if let Some((index, px)) = pixels
            .iter()
            .enumerate()
            .find(|(_, px)| px.max_channel() > max_color_val)
        {
            return Err(ImageError::ChannelOutOfRange {
                index,
                value: px.max_channel(),
                max: max_color_val,
            });
        }

        Ok(Self {
            size,
            max_color_val,
            pixels,
        })
    }

    /// Create a new pixel buffer where every pixel has the value `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::{PixelBuffer, Rgb};
    ///
    /// let image = PixelBuffer::from_size_val([4, 3].into(), 255, Rgb::new(1, 2, 3)).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 12);
    /// ```
    pub fn from_size_val(
        size: ImageSize,
        max_color_val: u16,
        val: Rgb,
    ) -> Result<Self, ImageError> {
        let num_pixels = checked_num_pixels(size)?;
        Self::new(size, max_color_val, vec![val; num_pixels])
    }

    /// Create a pixel buffer from interleaved `[r, g, b, r, g, b, ...]` channel data.
    pub fn from_interleaved(
        size: ImageSize,
        max_color_val: u16,
        data: &[u16],
    ) -> Result<Self, ImageError> {
        let num_channels = checked_num_pixels(size)?
            .checked_mul(3)
            .ok_or(ImageError::ImageSizeOverflow(size.width, size.height))?;
        if data.len() != num_channels {
            return Err(ImageError::InvalidChannelShape(data.len(), num_channels));
        }

        let pixels = data
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();

        Self::new(size, max_color_val, pixels)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// The maximum value any channel may take.
    pub fn max_color_val(&self) -> u16 {
        self.max_color_val
    }

    /// Get the pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Get the pixel data as a mutable row-major slice.
    ///
    /// Callers writing through this slice must keep every channel within
    /// `[0, max_color_val]`.
    pub fn as_slice_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Consume the buffer and return its pixels.
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Get the pixel at `row`, `col`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Rgb> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.pixels.get(row * self.width() + col)
    }

    /// Set the pixel at `row`, `col`.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or a channel
    /// exceeds the maximum color value.
    pub fn set(&mut self, row: usize, col: usize, px: Rgb) -> Result<(), ImageError> {
        if row >= self.height() || col >= self.width() {
            return Err(ImageError::PixelIndexOutOfBounds(
                col,
                row,
                self.width(),
                self.height(),
            ));
        }

        let index = row * self.width() + col;
        if px.max_channel() > self.max_color_val {
            return Err(ImageError::ChannelOutOfRange {
                index,
                value: px.max_channel(),
                max: self.max_color_val,
            });
        }

        self.pixels[index] = px;
        Ok(())
    }

    /// Get the pixels of a single row.
    pub fn row(&self, row: usize) -> Option<&[Rgb]> {
        if row >= self.height() {
            return None;
        }
        let start = row * self.width();
        Some(&self.pixels[start..start + self.width()])
    }
}
