/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] rasterkit_image::ImageError),

    /// The magic number is not `P6`.
    #[error("Invalid PPM magic number: {0:?}")]
    InvalidMagic(String),

    /// A header line is missing or not newline terminated.
    #[error("Missing PPM header line: {0}")]
    MissingHeaderLine(&'static str),

    /// A header value could not be parsed.
    #[error("Invalid PPM header value for {field}: {value:?}")]
    InvalidHeaderValue {
        /// The header field being parsed.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// The image dimensions overflow the addressable size.
    #[error("Image dimensions {0}x{1} are too large")]
    ImageTooLarge(usize, usize),

    /// The pixel payload is shorter than the header announces.
    #[error("Truncated PPM pixel data: expected {expected} bytes, got {actual}")]
    TruncatedPixelData {
        /// Number of payload bytes required by the header.
        expected: usize,
        /// Number of payload bytes available.
        actual: usize,
    },
}
