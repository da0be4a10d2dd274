//! Closest-pair search over cluster centroids.
//!
//! Two finders share one contract: return the globally minimal pair under
//! the lexicographic order on `(distance, idx1, idx2)`, so equal distances
//! always resolve to the smallest index pair.
//!
//! - [`slow_closest_pair`]: exhaustive O(n²) scan, the ground truth.
//! - [`fast_closest_pair`]: divide and conquer over a horizontally sorted
//!   sequence, O(n log² n) per call.

mod brute_force;
mod divide_and_conquer;

pub use brute_force::slow_closest_pair;
pub use divide_and_conquer::{closest_pair_strip, fast_closest_pair};

pub(crate) use brute_force::brute_force;
pub(crate) use divide_and_conquer::divide_and_conquer;

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::data_format::Cluster;
use crate::error::{ClusterError, Result};
use crate::types::ClusterIndex;

/// Which closest-pair finder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosestPairMethod {
    /// Exhaustive pairwise scan.
    BruteForce,
    /// Divide and conquer with strip scan.
    #[default]
    DivideAndConquer,
}

impl ClosestPairMethod {
    /// Run the finder on a horizontally sorted sequence of at least two
    /// clusters.
    pub(crate) fn find(self, clusters: &[Cluster]) -> Result<ClosestPair> {
        let pair = match self {
            ClosestPairMethod::BruteForce => brute_force(clusters),
            ClosestPairMethod::DivideAndConquer => divide_and_conquer(clusters),
        };
        pair.ok_or_else(|| ClusterError::internal("closest pair requested on fewer than two clusters"))
    }
}

/// A pair of cluster indices and the distance between their centroids.
///
/// `idx1 < idx2` always holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClosestPair {
    /// Euclidean distance between the two centroids.
    pub distance: f64,
    /// Smaller index.
    pub idx1: ClusterIndex,
    /// Larger index.
    pub idx2: ClusterIndex,
}

impl ClosestPair {
    /// Create a pair, normalizing index order.
    pub fn new(distance: f64, a: ClusterIndex, b: ClusterIndex) -> Self {
        Self {
            distance,
            idx1: a.min(b),
            idx2: a.max(b),
        }
    }

    /// The pair formed by `clusters[a]` and `clusters[b]`.
    #[inline]
    pub(crate) fn between(clusters: &[Cluster], a: ClusterIndex, b: ClusterIndex) -> Self {
        Self::new(clusters[a].distance(&clusters[b]), a, b)
    }

    /// Shift both indices by `by`.
    #[inline]
    pub(crate) fn offset(self, by: usize) -> Self {
        Self {
            distance: self.distance,
            idx1: self.idx1 + by,
            idx2: self.idx2 + by,
        }
    }

    #[inline]
    fn key(&self) -> (OrderedFloat<f64>, ClusterIndex, ClusterIndex) {
        (OrderedFloat(self.distance), self.idx1, self.idx2)
    }
}

impl PartialEq for ClosestPair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ClosestPair {}

impl PartialOrd for ClosestPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClosestPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

fn ensure_pair(clusters: &[Cluster]) -> Result<()> {
    if clusters.len() < 2 {
        return Err(ClusterError::invalid_argument(format!(
            "closest pair needs at least two clusters, got {}",
            clusters.len()
        )));
    }
    Ok(())
}

/// Sort clusters by ascending horizontal center.
///
/// The sort is stable, so clusters with equal horizontal centers keep their
/// relative order.
pub fn sort_by_horiz(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| a.horiz_center().total_cmp(&b.horiz_center()));
}

/// True if horizontal centers are in ascending order.
pub fn is_sorted_by_horiz(clusters: &[Cluster]) -> bool {
    clusters
        .windows(2)
        .all(|w| w[0].horiz_center() <= w[1].horiz_center())
}
