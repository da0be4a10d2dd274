//! Distortion as a function of cluster count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::compute_distortion;
use crate::clustering::{hierarchical_clustering, kmeans_clustering};
use crate::data_format::DataTable;
use crate::error::{ClusterError, Result};

/// Distortion of one clustering in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionPoint {
    /// Number of clusters produced.
    pub num_clusters: usize,
    /// Distortion of that clustering.
    pub distortion: f64,
}

fn validate_range(table: &DataTable, min_clusters: usize, max_clusters: usize) -> Result<()> {
    if min_clusters == 0 {
        return Err(ClusterError::invalid_argument("minimum cluster count must be at least 1"));
    }
    if min_clusters > max_clusters {
        return Err(ClusterError::invalid_argument(format!(
            "empty cluster count range {min_clusters}..={max_clusters}"
        )));
    }
    if max_clusters > table.len() {
        return Err(ClusterError::invalid_argument(format!(
            "cannot form {max_clusters} clusters from {} records",
            table.len()
        )));
    }
    Ok(())
}

/// Hierarchical distortion for every count in `min_clusters..=max_clusters`.
///
/// Clusters once down to `max_clusters`, then keeps agglomerating the
/// previous result, so the sweep costs about as much as a single run to
/// `min_clusters`. Points are ordered by ascending cluster count.
pub fn hierarchical_distortion_curve(
    table: &DataTable,
    min_clusters: usize,
    max_clusters: usize,
) -> Result<Vec<DistortionPoint>> {
    validate_range(table, min_clusters, max_clusters)?;

    let mut clusters = hierarchical_clustering(&table.singletons(), max_clusters)?;
    let mut curve = Vec::with_capacity(max_clusters - min_clusters + 1);
    curve.push(DistortionPoint {
        num_clusters: max_clusters,
        distortion: compute_distortion(&clusters, table)?,
    });

    for count in (min_clusters..max_clusters).rev() {
        clusters = hierarchical_clustering(&clusters, count)?;
        curve.push(DistortionPoint {
            num_clusters: count,
            distortion: compute_distortion(&clusters, table)?,
        });
    }

    curve.reverse();
    debug!(points = curve.len(), "hierarchical distortion curve computed");
    Ok(curve)
}

/// K-means distortion for every count in `min_clusters..=max_clusters`,
/// each from a fresh run on the table's singletons.
pub fn kmeans_distortion_curve(
    table: &DataTable,
    min_clusters: usize,
    max_clusters: usize,
    iterations: usize,
) -> Result<Vec<DistortionPoint>> {
    validate_range(table, min_clusters, max_clusters)?;

    let singletons = table.singletons();
    let curve = (min_clusters..=max_clusters)
        .map(|count| {
            let clusters = kmeans_clustering(&singletons, count, iterations)?;
            Ok(DistortionPoint {
                num_clusters: count,
                distortion: compute_distortion(&clusters, table)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(points = curve.len(), "k-means distortion curve computed");
    Ok(curve)
}
