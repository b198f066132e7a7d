//! Scan preparation helpers.
//!
//! Small steps between a raw decoded scan and the algorithms: radial
//! ordering, cropping to the region of interest around the target, and the
//! centroid used to seed the initial registration guess.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::types::ScanPoint;

/// Sort points in place by sensor bearing.
///
/// Points sharing a bearing keep an arbitrary relative order; clustering and
/// registration are order-independent, so no secondary key is imposed.
pub fn sort_by_bearing(points: &mut [ScanPoint]) {
    points.sort_by(|a, b| a.bearing.partial_cmp(&b.bearing).unwrap_or(Ordering::Equal));
}

/// Mean point of a set, or `None` when empty.
pub fn centroid(points: &[ScanPoint]) -> Option<ScanPoint> {
    if points.is_empty() {
        return None;
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }
    let inv_n = 1.0 / points.len() as f64;
    Some(ScanPoint::from_xy(sum_x * inv_n, sum_y * inv_n))
}

/// Configuration for [`RegionFilter`].
///
/// Bounds are inclusive and in the same linear units as the points. The
/// default passes everything through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionFilterConfig {
    /// Minimum x coordinate
    pub x_min: f64,
    /// Maximum x coordinate
    pub x_max: f64,
    /// Minimum y coordinate
    pub y_min: f64,
    /// Maximum y coordinate
    pub y_max: f64,
}

impl Default for RegionFilterConfig {
    fn default() -> Self {
        Self {
            x_min: f64::NEG_INFINITY,
            x_max: f64::INFINITY,
            y_min: f64::NEG_INFINITY,
            y_max: f64::INFINITY,
        }
    }
}

/// Axis-aligned crop selecting the points fed to registration.
///
/// Scans see far more than the target structure; restricting registration to
/// a window around the expected target keeps unrelated returns from pulling
/// the alignment.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    config: RegionFilterConfig,
}

impl RegionFilter {
    /// Create a new region filter with the given configuration.
    pub fn new(config: RegionFilterConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RegionFilterConfig {
        &self.config
    }

    /// Check whether a point falls inside the region.
    #[inline]
    pub fn contains(&self, p: &ScanPoint) -> bool {
        p.x >= self.config.x_min
            && p.x <= self.config.x_max
            && p.y >= self.config.y_min
            && p.y <= self.config.y_max
    }

    /// Keep the points inside the region.
    pub fn apply(&self, points: &[ScanPoint]) -> Vec<ScanPoint> {
        points.iter().filter(|p| self.contains(p)).copied().collect()
    }
}
