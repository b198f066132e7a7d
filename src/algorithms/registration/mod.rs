//! Point-to-model ICP registration.
//!
//! Aligns a scan against a fixed piecewise-linear [`ReferenceModel`] by
//! iterating:
//!
//! ```text
//! 1. Map every scan point into model space with the current transform
//! 2. Match each to its nearest model point (linear scan over segments)
//! 3. Reject outliers against an adaptive threshold
//!    (mean residual of the previous pass × outlier multiplier)
//! 4. Solve the closed-form 2D rigid transform over the inlier pairs
//! 5. Stop when the solve reproduces the previous transform bit for bit
//! ```
//!
//! This is not point-to-point ICP over a dynamic cloud: correspondences are
//! always against a small fixed model, so no neighbor search structure is
//! needed.
//!
//! The estimated transform is the *alignment* transform - applying it to the
//! scan points lands them on the model. Its inverse places the model in the
//! sensor frame for display.

mod config;
mod model;

pub use config::IcpConfig;
pub use model::ReferenceModel;

use crate::core::types::{ScanPoint, Transform};
use crate::error::{LakshyaError, Result};

/// Iteration state carried between registration passes.
///
/// Explicit and caller-owned: feeding the state of a finished run back into
/// [`PointToModelIcp::resume`] warm-starts the next one (the adaptive
/// outlier threshold keeps its history). The engine itself holds nothing
/// between calls.
#[derive(Debug, Clone, Copy)]
pub struct IcpState {
    /// Current alignment transform estimate.
    pub transform: Transform,
    /// Mean residual over all points from the last matching pass.
    pub mean_residual: f64,
}

impl IcpState {
    /// Fresh state from an initial guess.
    ///
    /// The mean residual starts at infinity so the first pass admits every
    /// point as an inlier.
    pub fn new(initial_guess: Transform) -> Self {
        Self {
            transform: initial_guess,
            mean_residual: f64::INFINITY,
        }
    }
}

/// Result of a registration run.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Final alignment transform (scan points onto the model).
    pub transform: Transform,
    /// Per-point inlier flag from the final matching pass.
    pub inliers: Vec<bool>,
    /// Outlier threshold used in the final pass.
    pub threshold: f64,
    /// Mean residual over all points from the final pass.
    pub mean_residual: f64,
    /// Number of matching passes performed.
    pub iterations: u32,
    /// Whether successive transforms converged before the budget ran out.
    pub converged: bool,
}

impl Registration {
    /// Number of inliers in the final pass.
    pub fn inlier_count(&self) -> usize {
        self.inliers.iter().filter(|&&good| good).count()
    }

    /// Iteration state for warm-starting a subsequent
    /// [`PointToModelIcp::resume`] call.
    pub fn state(&self) -> IcpState {
        IcpState {
            transform: self.transform,
            mean_residual: self.mean_residual,
        }
    }
}

/// Point-to-model ICP engine.
///
/// Holds only its configuration; every run is independent unless the caller
/// threads an [`IcpState`] through [`Self::resume`].
#[derive(Debug, Clone)]
pub struct PointToModelIcp {
    config: IcpConfig,
}

impl PointToModelIcp {
    /// Create a new engine with the given configuration.
    pub fn new(config: IcpConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &IcpConfig {
        &self.config
    }

    /// Register `points` against `model` starting from `initial_guess`.
    ///
    /// # Errors
    ///
    /// [`LakshyaError::EmptyInput`] for an empty point set;
    /// [`LakshyaError::NoInliers`] when a solving pass rejects every
    /// correspondence.
    pub fn register(
        &self,
        points: &[ScanPoint],
        model: &ReferenceModel,
        initial_guess: &Transform,
    ) -> Result<Registration> {
        self.resume(points, model, IcpState::new(*initial_guess))
    }

    /// Continue a registration from previous iteration state.
    ///
    /// Warm start: the transform *and* the running mean residual carry over,
    /// so the outlier threshold of the first pass reflects the previous
    /// run instead of admitting everything.
    pub fn resume(
        &self,
        points: &[ScanPoint],
        model: &ReferenceModel,
        state: IcpState,
    ) -> Result<Registration> {
        if points.is_empty() {
            return Err(LakshyaError::EmptyInput);
        }

        log::debug!(
            "registering {} points against {} segments (max {} iterations)",
            points.len(),
            model.len(),
            self.config.max_iterations
        );

        let mut transform = state.transform;
        let mut mean_residual = state.mean_residual;
        let mut inliers = vec![false; points.len()];
        let mut threshold = f64::INFINITY;
        let mut iterations = 0u32;
        let mut converged = false;

        for pass in 0..=self.config.max_iterations {
            iterations = pass + 1;
            threshold = mean_residual * self.config.outlier_multiplier;

            // Matching pass: correspondences, residuals, inlier sums.
            let mut sum_dists = 0.0;
            let mut n_inliers = 0usize;
            let mut sum_xa = 0.0;
            let mut sum_ya = 0.0;
            let mut sum_xb = 0.0;
            let mut sum_yb = 0.0;
            let mut sxx = 0.0;
            let mut sxy = 0.0;
            let mut syx = 0.0;
            let mut syy = 0.0;

            for (i, p) in points.iter().enumerate() {
                let moved = transform.apply(p);
                let matched = model.closest_point(&moved);
                let dist = moved.distance(&matched);
                sum_dists += dist;

                let good = dist < threshold;
                inliers[i] = good;
                if !good {
                    continue;
                }

                // a = matched model point, b = original scan point: the
                // solve below maps b onto a.
                n_inliers += 1;
                sum_xa += matched.x;
                sum_ya += matched.y;
                sum_xb += p.x;
                sum_yb += p.y;
                sxx += matched.x * p.x;
                sxy += matched.x * p.y;
                syx += matched.y * p.x;
                syy += matched.y * p.y;
            }

            mean_residual = sum_dists / points.len() as f64;

            // Final scheduled pass only classifies.
            if pass == self.config.max_iterations {
                break;
            }

            if n_inliers == 0 {
                // No correspondences to solve against; substituting an
                // identity transform here would discard all progress.
                return Err(LakshyaError::NoInliers {
                    threshold,
                    iteration: pass,
                });
            }

            // Closed-form 2D absolute orientation (MRPT se2_l2 form) from
            // the accumulated sums.
            let n = n_inliers as f64;
            let inv_n = 1.0 / n;
            let mean_xa = sum_xa * inv_n;
            let mean_ya = sum_ya * inv_n;
            let mean_xb = sum_xb * inv_n;
            let mean_yb = sum_yb * inv_n;

            let ax = n * (sxx + syy) - sum_xa * sum_xb - sum_ya * sum_yb;
            let ay = sum_xa * sum_yb + n * (syx - sxy) - sum_xb * sum_ya;

            let theta = if ax == 0.0 && ay == 0.0 {
                // No rotation signal in the pairs.
                0.0
            } else {
                ay.atan2(ax)
            };
            let (sin, cos) = theta.sin_cos();
            let tx = mean_xa - mean_xb * cos + mean_yb * sin;
            let ty = mean_ya - mean_xb * sin - mean_yb * cos;

            if theta == transform.theta && tx == transform.tx && ty == transform.ty {
                log::debug!("converged on iteration {}", pass);
                converged = true;
                break;
            }
            transform = Transform::with_sin_cos(theta, tx, ty, sin, cos);
        }

        log::debug!("registration result: {}", transform);

        Ok(Registration {
            transform,
            inliers,
            threshold,
            mean_residual,
            iterations,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_model() -> ReferenceModel {
        ReferenceModel::from_endpoints(&[(
            ScanPoint::from_xy(0.0, 0.0),
            ScanPoint::from_xy(0.0, 100.0),
        )])
        .unwrap()
    }

    fn offset_wall_points() -> Vec<ScanPoint> {
        (0..=10)
            .map(|i| ScanPoint::from_xy(5.0, i as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_translates_points_onto_segment() {
        let icp = PointToModelIcp::new(IcpConfig::default());
        let reg = icp
            .register(&offset_wall_points(), &wall_model(), &Transform::identity())
            .unwrap();

        assert!(reg.converged);
        assert_relative_eq!(reg.transform.theta, 0.0, epsilon = 1e-9);
        assert_relative_eq!(reg.transform.tx, -5.0, epsilon = 1e-9);
        assert_relative_eq!(reg.transform.ty, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_input_fails() {
        let icp = PointToModelIcp::new(IcpConfig::default());
        assert_eq!(
            icp.register(&[], &wall_model(), &Transform::identity())
                .unwrap_err(),
            LakshyaError::EmptyInput
        );
    }

    #[test]
    fn test_no_inliers_is_an_error() {
        // Warm state whose mean residual makes the threshold impossibly
        // tight: every correspondence is rejected on the first solving pass.
        let icp = PointToModelIcp::new(IcpConfig::default());
        let state = IcpState {
            transform: Transform::identity(),
            mean_residual: 1e-15,
        };
        let err = icp
            .resume(&offset_wall_points(), &wall_model(), state)
            .unwrap_err();
        assert!(matches!(err, LakshyaError::NoInliers { iteration: 0, .. }));
    }

    #[test]
    fn test_zero_budget_classifies_only() {
        let icp = PointToModelIcp::new(IcpConfig {
            max_iterations: 0,
            ..IcpConfig::default()
        });
        let points = offset_wall_points();
        let reg = icp
            .register(&points, &wall_model(), &Transform::identity())
            .unwrap();

        // Guess untouched, every point admitted under the infinite threshold.
        assert!(!reg.converged);
        assert_eq!(reg.iterations, 1);
        assert_relative_eq!(reg.transform.tx, 0.0);
        assert_eq!(reg.inlier_count(), points.len());
        assert_relative_eq!(reg.mean_residual, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_pass_admits_all_points() {
        let icp = PointToModelIcp::new(IcpConfig {
            max_iterations: 1,
            ..IcpConfig::default()
        });
        let points = offset_wall_points();
        let reg = icp
            .register(&points, &wall_model(), &Transform::identity())
            .unwrap();
        // Threshold of the *final* pass is finite, but the run itself
        // started from an infinite one and solved exactly once.
        assert!(reg.threshold.is_finite());
        assert_relative_eq!(reg.transform.tx, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_resume_after_convergence_is_stable() {
        // Noisy wall: residuals stay positive so the adaptive threshold
        // survives convergence. A generous multiplier keeps the inlier set
        // fixed, making the resumed solve bit-identical.
        let points: Vec<ScanPoint> = (0..=20)
            .map(|i| {
                let jitter = if i % 2 == 0 { 0.05 } else { -0.05 };
                ScanPoint::from_xy(5.0 + jitter, i as f64 * 5.0)
            })
            .collect();
        let icp = PointToModelIcp::new(IcpConfig {
            outlier_multiplier: 4.0,
            ..IcpConfig::default()
        });

        let first = icp
            .register(&points, &wall_model(), &Transform::identity())
            .unwrap();
        assert!(first.converged);

        let second = icp.resume(&points, &wall_model(), first.state()).unwrap();
        assert!(second.converged);
        assert_relative_eq!(
            second.transform.tx,
            first.transform.tx,
            epsilon = 1e-9,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            second.transform.ty,
            first.transform.ty,
            epsilon = 1e-9,
            max_relative = 1e-9
        );
        assert_relative_eq!(second.transform.theta, first.transform.theta, epsilon = 1e-9);
    }

    #[test]
    fn test_outlier_rejected_after_first_pass() {
        // Ten points on the wall plus one far spike: once the threshold
        // tightens, the spike is flagged as an outlier.
        let mut points: Vec<ScanPoint> = (0..10)
            .map(|i| ScanPoint::from_xy(2.0 + 0.01 * i as f64, i as f64 * 10.0))
            .collect();
        points.push(ScanPoint::from_xy(400.0, 50.0));

        let icp = PointToModelIcp::new(IcpConfig::default());
        let reg = icp
            .register(&points, &wall_model(), &Transform::identity())
            .unwrap();

        assert!(!reg.inliers[10], "spike should be rejected");
        assert!(reg.inliers[..10].iter().all(|&good| good));
    }

    #[test]
    fn test_recovers_rotation() {
        // Scan of an L-shaped corner, rotated and shifted away from the
        // model: the solve must recover both components. A small varying
        // jitter keeps the residuals realistic.
        let model = ReferenceModel::from_polyline(&[
            ScanPoint::from_xy(0.0, 200.0),
            ScanPoint::from_xy(0.0, 0.0),
            ScanPoint::from_xy(200.0, 0.0),
        ])
        .unwrap();

        // Ground-truth alignment to undo
        let misalign = Transform::new(0.1, 20.0, -10.0);
        let mut points = Vec::new();
        for i in 0..=20 {
            let jitter = 0.05 * (i as f64 * 0.9).sin();
            points.push(misalign.apply(&ScanPoint::from_xy(jitter, i as f64 * 10.0)));
        }
        for i in 1..=20 {
            let jitter = 0.05 * (i as f64 * 1.3).sin();
            points.push(misalign.apply(&ScanPoint::from_xy(i as f64 * 10.0, jitter)));
        }

        let icp = PointToModelIcp::new(IcpConfig {
            outlier_multiplier: 3.0,
            ..IcpConfig::default()
        });
        let reg = icp
            .register(&points, &model, &Transform::identity())
            .unwrap();

        let expected = misalign.inverse();
        assert!(reg.converged);
        assert_relative_eq!(reg.transform.theta, expected.theta, epsilon = 1e-3);
        assert_relative_eq!(reg.transform.tx, expected.tx, epsilon = 0.2);
        assert_relative_eq!(reg.transform.ty, expected.ty, epsilon = 0.2);
    }
}
