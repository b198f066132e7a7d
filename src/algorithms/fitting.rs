//! Total-least-squares line fitting.
//!
//! Fits the line minimizing squared *perpendicular* distance (orthogonal
//! regression), not ordinary least squares. The direction is the principal
//! eigenvector of the 2x2 sample covariance matrix, obtained in closed form
//! rather than via a general eigendecomposition.

use crate::core::types::{Line, ScanPoint};
use crate::error::{LakshyaError, Result};

/// Fit a line through a point set by total least squares.
///
/// # Algorithm
///
/// With sample mean `(x̄, ȳ)` and Bessel-corrected covariance terms
/// `sxx, sxy, syy`, let `Δ = syy - sxx`. The principal direction is
///
/// ```text
/// v = (2·sxy, Δ + sqrt(Δ² + 4·sxy²))
/// ```
///
/// normalized to unit length; the offset is `r = n·(x̄, ȳ)`.
///
/// # Errors
///
/// [`LakshyaError::DegenerateFit`] for fewer than two points, or when the
/// spread is isotropic (`sxy = 0`, `sxx = syy`, including all points
/// coincident) and no direction dominates.
pub fn fit_line(points: &[ScanPoint]) -> Result<Line> {
    if points.len() < 2 {
        return Err(LakshyaError::DegenerateFit);
    }

    let n = points.len() as f64;
    let inv_n = 1.0 / n;

    let mean_x: f64 = points.iter().map(|p| p.x).sum::<f64>() * inv_n;
    let mean_y: f64 = points.iter().map(|p| p.y).sum::<f64>() * inv_n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let bessel = 1.0 / (n - 1.0);
    sxx *= bessel;
    sxy *= bessel;
    syy *= bessel;

    let delta = syy - sxx;
    let mut vx = 2.0 * sxy;
    let mut vy = delta + (delta * delta + 4.0 * sxy * sxy).sqrt();

    let norm = (vx * vx + vy * vy).sqrt();
    if norm < 1e-12 {
        // The closed form vanishes for sxy = 0, Δ ≤ 0. The x-axis is still
        // well defined when the x spread dominates; otherwise the sample is
        // isotropic and there is no principal direction.
        if sxx > syy {
            vx = 1.0;
            vy = 0.0;
        } else {
            return Err(LakshyaError::DegenerateFit);
        }
    } else {
        vx /= norm;
        vy /= norm;
    }

    // r = n·mean with n = (vy, -vx)
    let r = vy * mean_x - vx * mean_y;
    Ok(Line::new(vx, vy, r))
}
