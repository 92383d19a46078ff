#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image processing module.
pub mod error;

/// Image filtering module.
pub mod filter;

/// Image flipping module.
pub mod flip;

/// Tonal inversion module.
pub mod invert;

/// Module containing parallelization utilities.
pub mod parallel;

pub use crate::error::ImgprocError;
