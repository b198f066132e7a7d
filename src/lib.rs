//! LakshyaAlign - Point-to-model registration for 2D rangefinder scans.
//!
//! Locates a robot relative to a fixed structure by aligning a rotating
//! rangefinder scan against a known piecewise-linear reference shape.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Core algorithms
//! │        (fitting, clustering, registration)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  preprocess/                        │  ← Scan preparation
//! │          (bearing sort, region crop, centroid)      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │           (point, line, segment, transform)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! ```text
//! raw points ──► preprocess (sort, crop) ──► PointToModelIcp ──► Registration
//!        │                                        ▲
//!        └──► DensityClusterer ──► fitted lines   │ ReferenceModel + guess
//!             (diagnostic path)
//! ```
//!
//! # Example
//!
//! ```
//! use lakshya_align::{
//!     IcpConfig, PointToModelIcp, ReferenceModel, ScanPoint, Segment, Transform,
//! };
//!
//! let model = ReferenceModel::from_endpoints(&[(
//!     ScanPoint::from_xy(0.0, 0.0),
//!     ScanPoint::from_xy(0.0, 100.0),
//! )])
//! .unwrap();
//!
//! let points: Vec<ScanPoint> = (0..=10)
//!     .map(|i| ScanPoint::from_xy(5.0, i as f64 * 10.0))
//!     .collect();
//!
//! let icp = PointToModelIcp::new(IcpConfig::default());
//! let registration = icp.register(&points, &model, &Transform::identity()).unwrap();
//! assert!(registration.converged);
//! ```

// ============================================================================
// Layer 1: Core geometry (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Scan preparation (depends on core)
// ============================================================================
pub mod preprocess;

// ============================================================================
// Layer 3: Algorithms (depends on core)
// ============================================================================
pub mod algorithms;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use core::types::{Line, ScanPoint, Segment, Transform};

// Preprocessing
pub use preprocess::{RegionFilter, RegionFilterConfig, centroid, sort_by_bearing};

// Algorithms - Fitting
pub use algorithms::fitting::fit_line;

// Algorithms - Clustering
pub use algorithms::clustering::{Cluster, ClusterConfig, Clustering, DensityClusterer};

// Algorithms - Registration
pub use algorithms::registration::{
    IcpConfig, IcpState, PointToModelIcp, ReferenceModel, Registration,
};

// Errors
pub use error::{LakshyaError, Result};
