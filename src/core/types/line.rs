//! Infinite 2D line in normal form.

use super::ScanPoint;
use crate::error::{LakshyaError, Result};

/// An infinite line stored as a unit direction `(vx, vy)` and signed offset `r`.
///
/// With unit normal `n = (vy, -vx)` (the direction rotated -90°), every point
/// `p` on the line satisfies `n·p = r`. The canonical point is `p0 = r·n` and
/// the line is parametrized as `p(t) = p0 + t·(vx, vy)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Unit direction x component
    pub vx: f64,
    /// Unit direction y component
    pub vy: f64,
    /// Signed offset from the origin along the normal
    pub r: f64,
}

impl Line {
    /// Create a line from a unit direction and offset.
    ///
    /// The direction is assumed to already be unit length.
    #[inline]
    pub fn new(vx: f64, vy: f64, r: f64) -> Self {
        Self { vx, vy, r }
    }

    /// Line through two points, directed from `a` to `b`.
    ///
    /// Fails with [`LakshyaError::DegenerateFit`] when the points coincide.
    pub fn from_points(a: &ScanPoint, b: &ScanPoint) -> Result<Self> {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-12 {
            return Err(LakshyaError::DegenerateFit);
        }

        let vx = dx / len;
        let vy = dy / len;
        // r = n·a with n = (vy, -vx)
        let r = vy * a.x - vx * a.y;
        Ok(Self { vx, vy, r })
    }

    /// Canonical point on the line (`r·n`).
    #[inline]
    pub fn origin(&self) -> ScanPoint {
        ScanPoint::from_xy(self.r * self.vy, -self.r * self.vx)
    }

    /// Point at parameter `t` along the direction from the canonical point.
    #[inline]
    pub fn point_at(&self, t: f64) -> ScanPoint {
        let p0 = self.origin();
        ScanPoint::from_xy(p0.x + t * self.vx, p0.y + t * self.vy)
    }

    /// Parameter of the perpendicular projection of `p` onto the line.
    #[inline]
    pub fn project_t(&self, p: &ScanPoint) -> f64 {
        // d·p0 = 0, so the projection parameter reduces to d·p.
        self.vx * p.x + self.vy * p.y
    }

    /// Signed perpendicular distance from `p` to the line (`n·p - r`).
    #[inline]
    pub fn signed_distance(&self, p: &ScanPoint) -> f64 {
        self.vy * p.x - self.vx * p.y - self.r
    }

    /// Unsigned perpendicular distance from `p` to the line.
    #[inline]
    pub fn distance(&self, p: &ScanPoint) -> f64 {
        self.signed_distance(p).abs()
    }
}
