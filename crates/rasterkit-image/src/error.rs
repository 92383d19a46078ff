/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the pixel count does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the pixel count of a size overflows `usize`.
    #[error("Image size {0}x{1} overflows the addressable pixel count")]
    ImageSizeOverflow(usize, usize),

    /// Error when the maximum channel value is zero.
    #[error("Maximum color value must be positive")]
    InvalidMaxColorValue,

    /// Error when a channel exceeds the maximum color value.
    #[error("Channel value {value} at pixel {index} exceeds the maximum color value {max}")]
    ChannelOutOfRange {
        /// Row-major index of the offending pixel.
        index: usize,
        /// The offending channel value.
        value: u16,
        /// The maximum color value of the buffer.
        max: u16,
    },

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when two images do not have the same size.
    #[error("Image size mismatch ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),
}
