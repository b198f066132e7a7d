//! Error types for LakshyaAlign.

use thiserror::Error;

/// LakshyaAlign error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LakshyaError {
    /// Line fitting found no well-defined principal direction
    /// (fewer than two points, or an isotropic/coincident point set).
    #[error("degenerate line fit: no well-defined direction")]
    DegenerateFit,

    /// A registration pass rejected every correspondence as an outlier.
    #[error("no inlier correspondences under threshold {threshold} (iteration {iteration})")]
    NoInliers { threshold: f64, iteration: u32 },

    /// An operation requiring points was given an empty point set.
    #[error("empty point set")]
    EmptyInput,

    /// A reference model must contain at least one segment.
    #[error("reference model has no segments")]
    EmptyModel,
}

pub type Result<T> = std::result::Result<T, LakshyaError>;
