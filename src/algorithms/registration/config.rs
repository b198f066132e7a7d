//! Configuration for point-to-model ICP.

use serde::{Deserialize, Serialize};

/// Configuration for [`PointToModelIcp`](super::PointToModelIcp).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IcpConfig {
    /// Maximum number of solving iterations.
    ///
    /// A final classification-only pass always follows; with 0, the engine
    /// only classifies against the initial guess.
    pub max_iterations: u32,

    /// Outlier rejection multiplier (> 0).
    ///
    /// A point is an inlier when its residual is below
    /// `mean_residual × outlier_multiplier`, where the mean is taken over
    /// all points of the previous pass. The first pass admits everything.
    pub outlier_multiplier: f64,
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            outlier_multiplier: 1.0,
        }
    }
}
