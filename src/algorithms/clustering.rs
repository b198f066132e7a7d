//! Density clustering of scan points.
//!
//! Groups points into connected components under a fixed-radius proximity
//! relation (single-linkage): two points share a cluster iff a chain of
//! points connects them with every hop within the cluster radius. This is
//! not DBSCAN - there is no core-point rule, a lone pair within radius is a
//! cluster of two.
//!
//! The partition is a pure function of the point *set*: permuting the input
//! only permutes cluster labels, never membership.

use serde::{Deserialize, Serialize};

use super::fitting::fit_line;
use crate::core::types::{ScanPoint, Segment};

/// Configuration for [`DensityClusterer`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Neighbor-inclusion distance (inclusive, same units as the points).
    ///
    /// Default 300.0, tuned for millimeter-scale rangefinder scans.
    pub radius: f64,

    /// Minimum member count for a cluster to be valid.
    ///
    /// Smaller clusters are still produced and their points assigned; they
    /// just carry no fitted line.
    pub min_points: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: 300.0,
            min_points: 5,
        }
    }
}

/// A group of mutually reachable points.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Indices into the clustered point set, in discovery order
    /// (not semantically significant).
    pub indices: Vec<usize>,
    /// Whether the cluster met the size threshold.
    pub valid: bool,
    /// Fitted segment for valid clusters: total-least-squares line bounded
    /// by the extreme member projections. `None` for invalid clusters and
    /// for the rare valid cluster whose fit is degenerate.
    pub fit: Option<Segment>,
}

impl Cluster {
    /// Number of member points.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the cluster has no members (never true for produced clusters).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Span of the member projections along the fitted line, if any.
    #[inline]
    pub fn length(&self) -> Option<f64> {
        self.fit.map(|s| s.length())
    }
}

/// Result of a clustering pass.
///
/// Owns the point-to-cluster mapping: `labels[i]` is the index into
/// `clusters` for point `i` of the input. Points never reference their
/// cluster directly.
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    /// All discovered clusters, valid or not.
    pub clusters: Vec<Cluster>,
    /// Cluster index per input point.
    pub labels: Vec<usize>,
}

impl Clustering {
    /// Number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether no clusters were found (empty input).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterate over the valid clusters only.
    pub fn valid_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|c| c.valid)
    }
}

/// Single-linkage density clusterer.
#[derive(Debug, Clone)]
pub struct DensityClusterer {
    config: ClusterConfig,
}

impl DensityClusterer {
    /// Create a new clusterer with the given configuration.
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ClusterConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Partition `points` into clusters.
    ///
    /// Flood fill over the proximity graph: seed a cluster from any free
    /// point, then repeatedly pull every free point within radius of a point
    /// already in the cluster until none remain reachable. Total over any
    /// input, including empty.
    pub fn cluster(&self, points: &[ScanPoint]) -> Clustering {
        let radius_sq = self.config.radius * self.config.radius;
        let mut labels = vec![usize::MAX; points.len()];
        let mut clusters = Vec::new();

        for seed in 0..points.len() {
            if labels[seed] != usize::MAX {
                continue;
            }

            let cluster_id = clusters.len();
            let mut indices = vec![seed];
            labels[seed] = cluster_id;

            // Frontier walk: indices[cursor..] are members whose neighbors
            // have not been scanned yet.
            let mut cursor = 0;
            while cursor < indices.len() {
                let current = points[indices[cursor]];
                cursor += 1;
                for (i, p) in points.iter().enumerate() {
                    if labels[i] == usize::MAX && current.distance_sq(p) <= radius_sq {
                        labels[i] = cluster_id;
                        indices.push(i);
                    }
                }
            }

            let valid = indices.len() >= self.config.min_points;
            let fit = if valid {
                self.fit_cluster(points, &indices)
            } else {
                None
            };

            clusters.push(Cluster {
                indices,
                valid,
                fit,
            });
        }

        Clustering { clusters, labels }
    }

    /// Fit a bounded segment to a cluster's members.
    fn fit_cluster(&self, points: &[ScanPoint], indices: &[usize]) -> Option<Segment> {
        let members: Vec<ScanPoint> = indices.iter().map(|&i| points[i]).collect();
        let line = fit_line(&members).ok()?;

        let mut t_min = f64::INFINITY;
        let mut t_max = f64::NEG_INFINITY;
        for p in &members {
            let t = line.project_t(p);
            t_min = t_min.min(t);
            t_max = t_max.max(t);
        }
        Some(Segment::new(line, t_min, t_max))
    }
}
