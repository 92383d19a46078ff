#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and malformed PPM data.
pub mod error;

/// Binary PPM image encoding and decoding.
///
/// Read and write `P6` images with a three line ASCII header followed by
/// interleaved 8-bit RGB samples.
pub mod ppm;

pub use crate::error::IoError;
