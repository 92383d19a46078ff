use crate::error::ImgprocError;

/// Tolerance accepted on the sum of a caller supplied kernel.
const KERNEL_SUM_TOLERANCE: f64 = 1e-6;

/// A square, normalized 2D convolution kernel.
///
/// The kernel has side `2 * radius + 1` and its weights are stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2d {
    radius: usize,
    weights: Vec<f64>,
}

impl Kernel2d {
    /// Create a kernel from row-major weights.
    ///
    /// # Arguments
    ///
    /// * `radius` - Half-width of the kernel, excluding the center.
    /// * `weights` - `(2 * radius + 1)^2` non-negative weights summing to 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights have the wrong length, contain a
    /// negative or non-finite value, or do not sum to 1.
    pub fn new(radius: usize, weights: Vec<f64>) -> Result<Self, ImgprocError> {
        let (_, len) = kernel_dims(radius)?;
        if weights.len() != len {
            return Err(ImgprocError::InvalidKernel(format!(
                "expected {} weights for radius {}, got {}",
                len,
                radius,
                weights.len()
            )));
        }

        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ImgprocError::InvalidKernel(
                "weights must be finite and non-negative".to_string(),
            ));
        }

        let sum = weights.iter().sum::<f64>();
        if (sum - 1.0).abs() > KERNEL_SUM_TOLERANCE {
            return Err(ImgprocError::InvalidKernel(format!(
                "weights must sum to 1, got {sum}"
            )));
        }

        Ok(Self { radius, weights })
    }

    /// Half-width of the kernel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length of the kernel, `2 * radius + 1`.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// Weight at row `i` and column `j`, both in `[0, side)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.side() || j >= self.side() {
            return None;
        }
        self.weights.get(i * self.side() + j).copied()
    }

    /// The row-major weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

pub(crate) fn check_sigma(sigma: f64) -> Result<(), ImgprocError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ImgprocError::InvalidSigma(sigma));
    }
    Ok(())
}

// side and number of weights of a kernel with the given radius
fn kernel_dims(radius: usize) -> Result<(usize, usize), ImgprocError> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .and_then(|side| Some((side, side.checked_mul(side)?)))
        .ok_or_else(|| ImgprocError::InvalidKernel(format!("radius {radius} is too large")))
}

fn try_alloc(len: usize) -> Result<Vec<f64>, ImgprocError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| ImgprocError::InvalidKernel(e.to_string()))?;
    Ok(buf)
}

// unnormalized gaussian profile centered at `radius`
fn gaussian_profile(radius: usize, sigma: f64) -> Result<Vec<f64>, ImgprocError> {
    let (side, _) = kernel_dims(radius)?;
    let mut profile = try_alloc(side)?;
    profile.extend((0..side).map(|i| {
        let x = (i as f64 - radius as f64) / sigma;
        (-(x * x) / 2.0).exp()
    }));
    Ok(profile)
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `radius` - The half-width of the kernel; the kernel has `2 * radius + 1` taps.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the normalized kernel.
///
/// # Errors
///
/// Returns an error if `sigma` is not positive and finite or if the kernel
/// does not fit in memory.
pub fn gaussian_kernel_1d(radius: usize, sigma: f64) -> Result<Vec<f64>, ImgprocError> {
    check_sigma(sigma)?;

    let mut kernel = gaussian_profile(radius, sigma)?;

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a 2D gaussian blur kernel.
///
/// The kernel is the outer product of the 1D gaussian profile with itself,
/// divided by the sum of all its entries.
///
/// # Arguments
///
/// * `radius` - The half-width of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Errors
///
/// Returns an error if `sigma` is not positive and finite or if the kernel
/// does not fit in memory.
///
/// # Example
///
/// ```
/// use rasterkit_imgproc::filter::kernels::gaussian_kernel_2d;
///
/// let kernel = gaussian_kernel_2d(1, 1.0).unwrap();
///
/// assert_eq!(kernel.side(), 3);
/// assert!((kernel.sum() - 1.0).abs() < 1e-9);
/// ```
pub fn gaussian_kernel_2d(radius: usize, sigma: f64) -> Result<Kernel2d, ImgprocError> {
    check_sigma(sigma)?;

    let (_, len) = kernel_dims(radius)?;
    let mut weights = try_alloc(len)?;
    let profile = gaussian_profile(radius, sigma)?;

    let mut sum = 0.0;
    for gi in profile.iter() {
        for gj in profile.iter() {
            let w = gi * gj;
            sum += w;
            weights.push(w);
        }
    }

    weights.iter_mut().for_each(|w| *w /= sum);

    Ok(Kernel2d { radius, weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), ImgprocError> {
        let kernel = gaussian_kernel_1d(1, 1.0)?;
        assert_eq!(kernel.len(), 3);
        assert_relative_eq!(kernel[0], kernel[2]);
        assert_relative_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel[1], 0.451_862_761_877_606, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_values() -> Result<(), ImgprocError> {
        let kernel = gaussian_kernel_2d(1, 1.0)?;
        assert_eq!(kernel.radius(), 1);
        assert_eq!(kernel.side(), 3);
        assert_relative_eq!(kernel.get(1, 1).unwrap(), 0.204_179_955_571_658, epsilon = 1e-12);
        assert_relative_eq!(kernel.get(0, 0).unwrap(), 0.075_113_607_954_111, epsilon = 1e-12);
        assert_relative_eq!(kernel.get(0, 1).unwrap(), 0.123_841_403_152_974, epsilon = 1e-12);
        assert_eq!(kernel.get(3, 0), None);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_symmetric() -> Result<(), ImgprocError> {
        let kernel = gaussian_kernel_2d(3, 1.7)?;
        let side = kernel.side();
        for i in 0..side {
            for j in 0..side {
                let w = kernel.get(i, j).unwrap();
                assert!(w > 0.0);
                assert_eq!(Some(w), kernel.get(j, i));
                assert_eq!(Some(w), kernel.get(side - 1 - i, j));
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_normalized() -> Result<(), ImgprocError> {
        for radius in 0..8 {
            for sigma in [0.1, 0.5, 1.0, 2.5, 10.0, 100.0] {
                let kernel = gaussian_kernel_2d(radius, sigma)?;
                assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_radius_zero() -> Result<(), ImgprocError> {
        let kernel = gaussian_kernel_2d(0, 1.0)?;
        assert_eq!(kernel.as_slice(), &[1.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_invalid_sigma() {
        assert_eq!(
            gaussian_kernel_2d(1, 0.0),
            Err(ImgprocError::InvalidSigma(0.0))
        );
        assert_eq!(
            gaussian_kernel_1d(1, -1.0),
            Err(ImgprocError::InvalidSigma(-1.0))
        );
        assert!(gaussian_kernel_2d(1, f64::NAN).is_err());
        assert!(gaussian_kernel_2d(1, f64::INFINITY).is_err());
    }

    #[test]
    fn test_gaussian_kernel_radius_too_large() {
        for radius in [usize::MAX, usize::MAX / 2, u32::MAX as usize] {
            assert!(matches!(
                gaussian_kernel_2d(radius, 1.0),
                Err(ImgprocError::InvalidKernel(_))
            ));
            assert!(matches!(
                Kernel2d::new(radius, vec![1.0]),
                Err(ImgprocError::InvalidKernel(_))
            ));
        }
        assert!(matches!(
            gaussian_kernel_1d(usize::MAX, 1.0),
            Err(ImgprocError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_kernel2d_new() {
        assert!(Kernel2d::new(0, vec![1.0]).is_ok());
        assert!(Kernel2d::new(1, vec![1.0]).is_err());
        assert!(Kernel2d::new(0, vec![0.5]).is_err());
        let mut weights = vec![0.0; 9];
        weights[4] = 1.5;
        weights[0] = -0.5;
        assert!(Kernel2d::new(1, weights).is_err());
    }
}
