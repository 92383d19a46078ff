//! Filter operations
//!
//! This module provides filter operations for image processing.

/// Filter kernels
pub mod kernels;

/// Convolution with dense 2D kernels
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
