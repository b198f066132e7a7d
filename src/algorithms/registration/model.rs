//! Piecewise-linear reference model.

use crate::core::types::{ScanPoint, Segment, Transform};
use crate::error::{LakshyaError, Result};

/// The known target shape: an ordered, non-empty list of segments.
///
/// Segments may be disjoint - the model approximates a rigid physical shape
/// as a set of faces, not necessarily a closed loop. With a handful of
/// segments, nearest-point queries are linear scans.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    segments: Vec<Segment>,
}

impl ReferenceModel {
    /// Create a model from segments.
    ///
    /// Fails with [`LakshyaError::EmptyModel`] when `segments` is empty.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(LakshyaError::EmptyModel);
        }
        Ok(Self { segments })
    }

    /// Build a model from endpoint pairs, one segment per pair.
    pub fn from_endpoints(pairs: &[(ScanPoint, ScanPoint)]) -> Result<Self> {
        let segments = pairs
            .iter()
            .map(|(a, b)| Segment::from_endpoints(a, b))
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }

    /// Build a model from a polyline: one segment per consecutive vertex pair.
    pub fn from_polyline(vertices: &[ScanPoint]) -> Result<Self> {
        let segments = vertices
            .windows(2)
            .map(|w| Segment::from_endpoints(&w[0], &w[1]))
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }

    /// The model's segments, in order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: the constructor rejects empty models.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Closest point on the model to `p`: the minimum over all segments.
    pub fn closest_point(&self, p: &ScanPoint) -> ScanPoint {
        let mut min_dist = f64::INFINITY;
        // Non-empty invariant makes the first segment always win initially.
        let mut closest = &self.segments[0];
        for s in &self.segments {
            let dist = s.distance_sq(p);
            if dist < min_dist {
                min_dist = dist;
                closest = s;
            }
        }
        closest.closest_point(p)
    }

    /// Distance from `p` to the model.
    pub fn distance(&self, p: &ScanPoint) -> f64 {
        self.segments
            .iter()
            .map(|s| s.distance_sq(p))
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }
}

impl Transform {
    /// Apply to a whole reference model, mapping every segment.
    pub fn apply_model(&self, model: &ReferenceModel) -> ReferenceModel {
        ReferenceModel {
            segments: model
                .segments
                .iter()
                .map(|s| self.apply_segment(s))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Three faces of a rectangular tower, open toward -X.
    fn tower_model(depth: f64, width: f64) -> ReferenceModel {
        let half = width / 2.0;
        ReferenceModel::from_polyline(&[
            ScanPoint::from_xy(depth, -half),
            ScanPoint::from_xy(0.0, -half),
            ScanPoint::from_xy(0.0, half),
            ScanPoint::from_xy(depth, half),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_model_rejected() {
        assert_eq!(
            ReferenceModel::new(Vec::new()).unwrap_err(),
            LakshyaError::EmptyModel
        );
        assert_eq!(
            ReferenceModel::from_endpoints(&[]).unwrap_err(),
            LakshyaError::EmptyModel
        );
        assert_eq!(
            ReferenceModel::from_polyline(&[ScanPoint::from_xy(0.0, 0.0)]).unwrap_err(),
            LakshyaError::EmptyModel
        );
    }

    #[test]
    fn test_from_polyline_segment_count() {
        let model = tower_model(500.0, 400.0);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_closest_point_interior() {
        let model = ReferenceModel::from_endpoints(&[(
            ScanPoint::from_xy(0.0, 0.0),
            ScanPoint::from_xy(0.0, 100.0),
        )])
        .unwrap();

        let cp = model.closest_point(&ScanPoint::from_xy(5.0, 40.0));
        assert_relative_eq!(cp.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cp.y, 40.0, epsilon = 1e-12);
        assert_relative_eq!(model.distance(&ScanPoint::from_xy(5.0, 40.0)), 5.0);
    }

    #[test]
    fn test_closest_point_picks_nearest_segment() {
        let model = tower_model(500.0, 400.0);

        // Near the front face (x = 0)
        let cp = model.closest_point(&ScanPoint::from_xy(-10.0, 50.0));
        assert_relative_eq!(cp.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cp.y, 50.0, epsilon = 1e-12);

        // Near the +Y face (y = 200)
        let cp = model.closest_point(&ScanPoint::from_xy(250.0, 260.0));
        assert_relative_eq!(cp.y, 200.0, epsilon = 1e-12);
        assert_relative_eq!(cp.x, 250.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_point_clamps_to_corner() {
        let model = tower_model(500.0, 400.0);
        // Beyond the open end of the -Y face
        let cp = model.closest_point(&ScanPoint::from_xy(600.0, -250.0));
        assert_relative_eq!(cp.x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(cp.y, -200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_transformed_model_queries_consistently() {
        let model = tower_model(500.0, 400.0);
        let t = Transform::new(0.6, 120.0, -80.0);
        let moved = t.apply_model(&model);
        assert_eq!(moved.len(), model.len());

        // A query against the moved model matches moving the query instead.
        let p = ScanPoint::from_xy(-30.0, 40.0);
        let expected = t.apply(&model.closest_point(&t.inverse().apply(&p)));
        let got = moved.closest_point(&p);
        assert_relative_eq!(got.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(got.y, expected.y, epsilon = 1e-9);
    }
}
