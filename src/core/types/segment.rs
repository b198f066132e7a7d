//! Bounded line segment.

use super::{Line, ScanPoint};
use crate::error::Result;

/// A [`Line`] restricted to the closed parameter interval `[t_min, t_max]`.
///
/// The endpoint points are cached at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Underlying infinite line
    pub line: Line,
    /// Lower parameter bound
    pub t_min: f64,
    /// Upper parameter bound
    pub t_max: f64,
    p_min: ScanPoint,
    p_max: ScanPoint,
}

impl Segment {
    /// Create a segment from a line and a parameter interval.
    pub fn new(line: Line, t_min: f64, t_max: f64) -> Self {
        Self {
            line,
            t_min,
            t_max,
            p_min: line.point_at(t_min),
            p_max: line.point_at(t_max),
        }
    }

    /// Segment between two endpoints.
    ///
    /// Fails when the endpoints coincide (no line direction).
    pub fn from_endpoints(a: &ScanPoint, b: &ScanPoint) -> Result<Self> {
        let line = Line::from_points(a, b)?;
        Ok(Self::new(line, line.project_t(a), line.project_t(b)))
    }

    /// Endpoint at `t_min`.
    #[inline]
    pub fn start(&self) -> &ScanPoint {
        &self.p_min
    }

    /// Endpoint at `t_max`.
    #[inline]
    pub fn end(&self) -> &ScanPoint {
        &self.p_max
    }

    /// Segment length (`t_max - t_min`, the direction being unit length).
    #[inline]
    pub fn length(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Distance from `p` to the segment.
    ///
    /// The projected parameter is clamped to the interval; outside it the
    /// distance is measured to the nearer endpoint.
    pub fn distance(&self, p: &ScanPoint) -> f64 {
        let t = self.line.project_t(p);
        if t <= self.t_min {
            return self.p_min.distance(p);
        }
        if t >= self.t_max {
            return self.p_max.distance(p);
        }
        self.line.distance(p)
    }

    /// Squared distance from `p` to the segment.
    pub fn distance_sq(&self, p: &ScanPoint) -> f64 {
        let t = self.line.project_t(p);
        if t <= self.t_min {
            return self.p_min.distance_sq(p);
        }
        if t >= self.t_max {
            return self.p_max.distance_sq(p);
        }
        let d = self.line.signed_distance(p);
        d * d
    }

    /// Closest point on the segment to `p`.
    pub fn closest_point(&self, p: &ScanPoint) -> ScanPoint {
        let t = self.line.project_t(p);
        if t <= self.t_min {
            return self.p_min;
        }
        if t >= self.t_max {
            return self.p_max;
        }
        self.line.point_at(t)
    }
}
