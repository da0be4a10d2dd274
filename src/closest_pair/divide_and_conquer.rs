//! Divide-and-conquer closest-pair search.
//!
//! The sequence is split at its midpoint, each half is solved recursively,
//! and the combine step scans a vertical strip around the split line. Inside
//! the strip, clusters are ordered by `(vertical center, index)` and each one
//! is only compared with successors whose vertical gap does not exceed the
//! best distance `d` found by the halves.
//!
//! For `d > 0` the clusters of either half are pairwise at least `d` apart,
//! so a `2d x d` window holds at most eight of them and each scan visits a
//! constant number of successors. For `d == 0` the window only holds exact
//! duplicates; the first one already beats every later successor under the
//! `(distance, idx1, idx2)` order, so the scan stops there.

use super::{brute_force, ensure_pair, is_sorted_by_horiz, ClosestPair};
use crate::data_format::Cluster;
use crate::error::{ClusterError, Result};
use crate::types::ClusterIndex;

/// Below this size the recursion falls back to the exhaustive scan.
const BRUTE_FORCE_CUTOFF: usize = 3;

/// Closest pair of a sequence sorted by ascending horizontal center.
///
/// Returns `InvalidArgument` for fewer than two clusters and
/// `FailedPrecondition` when the sequence is not sorted. The result is
/// identical to [`slow_closest_pair`](super::slow_closest_pair) on the same
/// sequence.
pub fn fast_closest_pair(clusters: &[Cluster]) -> Result<ClosestPair> {
    ensure_pair(clusters)?;
    if !is_sorted_by_horiz(clusters) {
        return Err(ClusterError::failed_precondition(
            "clusters must be sorted by ascending horizontal center",
        ));
    }
    super::ClosestPairMethod::DivideAndConquer.find(clusters)
}

/// Recursive core. `clusters` must be sorted by horizontal center.
pub(crate) fn divide_and_conquer(clusters: &[Cluster]) -> Option<ClosestPair> {
    let n = clusters.len();
    if n <= BRUTE_FORCE_CUTOFF {
        return brute_force(clusters);
    }

    let middle = n / 2;
    let left = divide_and_conquer(&clusters[..middle]);
    let right = divide_and_conquer(&clusters[middle..]).map(|pair| pair.offset(middle));

    let half_width = left
        .into_iter()
        .chain(right)
        .min()
        .map_or(f64::INFINITY, |pair| pair.distance);
    let mid = (clusters[middle - 1].horiz_center() + clusters[middle].horiz_center()) / 2.0;
    let strip = closest_pair_strip(clusters, mid, half_width);

    left.into_iter().chain(right).chain(strip).min()
}

/// Closest pair among clusters whose horizontal center lies within
/// `half_width` of `horiz_center`.
///
/// Indices refer to `clusters`. Returns `None` when fewer than two clusters
/// fall inside the strip.
pub fn closest_pair_strip(clusters: &[Cluster], horiz_center: f64, half_width: f64) -> Option<ClosestPair> {
    let mut strip: Vec<ClusterIndex> = (0..clusters.len())
        .filter(|&i| (clusters[i].horiz_center() - horiz_center).abs() <= half_width)
        .collect();
    strip.sort_by(|&a, &b| {
        clusters[a]
            .vert_center()
            .total_cmp(&clusters[b].vert_center())
            .then(a.cmp(&b))
    });

    let mut best: Option<ClosestPair> = None;
    for (pos, &i) in strip.iter().enumerate() {
        let vert = clusters[i].vert_center();
        for &j in &strip[pos + 1..] {
            if clusters[j].vert_center() - vert > half_width {
                break;
            }
            let candidate = ClosestPair::between(clusters, i, j);
            if best.map_or(true, |b| candidate < b) {
                best = Some(candidate);
            }
            if candidate.distance == 0.0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closest_pair::slow_closest_pair;
    use crate::error::ErrorCode;

    fn points(coords: &[(f64, f64)]) -> Vec<Cluster> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Cluster::singleton(i.to_string(), x, y, 1, 0.0))
            .collect()
    }

    #[test]
    fn test_small_inputs_match_brute_force() {
        let clusters = points(&[(0.0, 0.0), (1.0, 5.0), (2.0, 0.5)]);
        assert_eq!(
            fast_closest_pair(&clusters).unwrap(),
            slow_closest_pair(&clusters).unwrap()
        );
    }

    #[test]
    fn test_cross_pair_found_in_strip() {
        // halves each have far-apart pairs; the closest pair straddles the split
        let clusters = points(&[(0.0, 0.0), (1.0, 10.0), (4.9, 3.0), (5.1, 3.1), (9.0, 0.0), (10.0, 10.0)]);
        let pair = fast_closest_pair(&clusters).unwrap();
        assert_eq!((pair.idx1, pair.idx2), (2, 3));
        assert_eq!(pair, slow_closest_pair(&clusters).unwrap());
    }

    #[test]
    fn test_equal_distance_tie_matches_brute_force() {
        let clusters = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0), (5.0, 0.0)]);
        let pair = fast_closest_pair(&clusters).unwrap();
        assert_eq!((pair.idx1, pair.idx2), (0, 1));
        assert_eq!(pair.distance, 1.0);
    }

    #[test]
    fn test_split_line_pileup() {
        // many clusters on the split line, a single close pair far up the column
        let mut coords: Vec<(f64, f64)> = vec![(-5.0, 0.0), (-4.0, 50.0)];
        for i in 0..12 {
            coords.push((0.0, i as f64 * 2.0));
        }
        coords.push((0.0, 40.0));
        coords.push((0.0, 40.25));
        coords.push((4.0, 50.0));
        coords.push((5.0, 0.0));
        coords.sort_by(|a, b| a.0.total_cmp(&b.0));
        let clusters = points(&coords);

        let fast = fast_closest_pair(&clusters).unwrap();
        let slow = slow_closest_pair(&clusters).unwrap();
        assert_eq!(fast, slow);
        assert_eq!(fast.distance, 0.25);
    }

    #[test]
    fn test_duplicates() {
        let clusters = points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let pair = fast_closest_pair(&clusters).unwrap();
        assert_eq!(pair.distance, 0.0);
        assert_eq!((pair.idx1, pair.idx2), (1, 2));
    }

    #[test]
    fn test_many_duplicates_match_brute_force() {
        let mut coords: Vec<(f64, f64)> = vec![(0.0, 0.0); 40];
        coords.extend(vec![(0.0, 5.0); 40]);
        coords.push((-1.0, 2.0));
        coords.push((1.0, 2.0));
        coords.sort_by(|a, b| a.0.total_cmp(&b.0));
        let clusters = points(&coords);

        let fast = fast_closest_pair(&clusters).unwrap();
        assert_eq!(fast, slow_closest_pair(&clusters).unwrap());
        assert_eq!(fast.distance, 0.0);
    }

    #[test]
    fn test_strip_stops_at_duplicate() {
        // every later successor of index 0 is also a duplicate; the pair with
        // the smallest indices must still win
        let clusters = points(&[(2.0, 1.0), (2.0, 1.0), (2.0, 1.0), (2.0, 1.0)]);
        let pair = closest_pair_strip(&clusters, 2.0, 0.0).unwrap();
        assert_eq!((pair.idx1, pair.idx2), (0, 1));
        assert_eq!(pair.distance, 0.0);
    }

    #[test]
    fn test_unsorted_rejected() {
        let clusters = points(&[(3.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        let err = fast_closest_pair(&clusters).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FailedPrecondition);
    }

    #[test]
    fn test_strip_empty_and_single() {
        let clusters = points(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(closest_pair_strip(&clusters, 5.0, 1.0).is_none());
        assert!(closest_pair_strip(&clusters, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_strip_uses_original_indices() {
        let clusters = points(&[(0.0, 0.0), (4.0, 0.0), (4.5, 3.0), (5.5, 3.5), (10.0, 0.0)]);
        let pair = closest_pair_strip(&clusters, 5.0, 1.0).unwrap();
        assert_eq!((pair.idx1, pair.idx2), (2, 3));
    }
}
