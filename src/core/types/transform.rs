//! 2D rigid transform.

use super::{Line, ScanPoint, Segment};

/// Rigid 2D transform: rotate about the origin by `theta`, then translate
/// by `(tx, ty)`.
///
/// The sine and cosine of `theta` are cached at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation about the origin in radians
    pub theta: f64,
    /// Translation x component
    pub tx: f64,
    /// Translation y component
    pub ty: f64,
    sin: f64,
    cos: f64,
}

impl Transform {
    /// Create a transform from a rotation and translation.
    #[inline]
    pub fn new(theta: f64, tx: f64, ty: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            theta,
            tx,
            ty,
            sin,
            cos,
        }
    }

    /// Construct from precomputed sine/cosine.
    ///
    /// `sin`/`cos` must equal `theta.sin_cos()`; used where the solver
    /// already has them in hand.
    #[inline]
    pub(crate) fn with_sin_cos(theta: f64, tx: f64, ty: f64, sin: f64, cos: f64) -> Self {
        Self {
            theta,
            tx,
            ty,
            sin,
            cos,
        }
    }

    /// Identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self {
            theta: 0.0,
            tx: 0.0,
            ty: 0.0,
            sin: 0.0,
            cos: 1.0,
        }
    }

    /// Apply to a point: rotate, then translate.
    ///
    /// The result is a rectangular point; polar fields are not carried over.
    #[inline]
    pub fn apply(&self, p: &ScanPoint) -> ScanPoint {
        ScanPoint::from_xy(
            p.x * self.cos - p.y * self.sin + self.tx,
            p.x * self.sin + p.y * self.cos + self.ty,
        )
    }

    /// Apply to an infinite line.
    ///
    /// Rotates the direction and recomputes the offset from the transformed
    /// canonical point, preserving the line's geometric identity.
    pub fn apply_line(&self, l: &Line) -> Line {
        let vx = l.vx * self.cos - l.vy * self.sin;
        let vy = l.vx * self.sin + l.vy * self.cos;
        let p0 = self.apply(&l.origin());
        Line::new(vx, vy, vy * p0.x - vx * p0.y)
    }

    /// Apply to a segment.
    ///
    /// The parameter interval shifts by the projection of the transformed
    /// canonical point (rotation and translation preserve arc length along
    /// the line), so the endpoints map exactly.
    pub fn apply_segment(&self, s: &Segment) -> Segment {
        let line = self.apply_line(&s.line);
        let start = self.apply(s.start());
        let end = self.apply(s.end());
        Segment::new(line, line.project_t(&start), line.project_t(&end))
    }

    /// Compose two transforms: applying the result equals applying `other`,
    /// then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform::new(
            self.theta + other.theta,
            other.tx * self.cos - other.ty * self.sin + self.tx,
            other.tx * self.sin + other.ty * self.cos + self.ty,
        )
    }

    /// Closed-form inverse: the transform that undoes this one.
    pub fn inverse(&self) -> Transform {
        Transform::with_sin_cos(
            -self.theta,
            -self.tx * self.cos - self.ty * self.sin,
            self.tx * self.sin - self.ty * self.cos,
            -self.sin,
            self.cos,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.3}° <{:.3}, {:.3}>]",
            self.theta.to_degrees(),
            self.tx,
            self.ty
        )
    }
}
