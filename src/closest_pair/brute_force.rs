//! Exhaustive closest-pair search.

use super::{ensure_pair, ClosestPair};
use crate::data_format::Cluster;
use crate::error::Result;

/// Closest pair by examining every unordered pair. O(n²).
///
/// Works on any ordering of `clusters`. Returns `InvalidArgument` for fewer
/// than two clusters.
pub fn slow_closest_pair(clusters: &[Cluster]) -> Result<ClosestPair> {
    ensure_pair(clusters)?;
    super::ClosestPairMethod::BruteForce.find(clusters)
}

/// Minimum over all pairs, or `None` for fewer than two clusters.
pub(crate) fn brute_force(clusters: &[Cluster]) -> Option<ClosestPair> {
    let n = clusters.len();
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| ClosestPair::between(clusters, i, j)))
        .min()
}
