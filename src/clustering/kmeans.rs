//! K-means clustering implementation.
//!
//! Seeds are the centers of the `k` most populous input clusters; each
//! round assigns every input cluster to its nearest seed, merges it into a
//! fresh accumulator for that seed, and takes the accumulators' centroids as
//! the next round's seeds. The number of rounds is fixed; there is no
//! convergence test, so identical inputs always give bit-identical output.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{validate_request, ClusteringStrategy};
use crate::data_format::Cluster;
use crate::error::{ClusterError, Result};
use crate::types::ClusterIndex;

/// Configuration for K-means clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub num_clusters: usize,

    /// Number of refinement rounds.
    pub num_iterations: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            num_clusters: 10,
            num_iterations: 5,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the given number of clusters.
    pub fn new(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            ..Default::default()
        }
    }

    /// Set the number of refinement rounds.
    pub fn with_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }
}

/// K-means clustering algorithm.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Create a new K-means instance with the given configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Create a K-means instance with the given number of clusters.
    pub fn with_clusters(num_clusters: usize) -> Self {
        Self::new(KMeansConfig::new(num_clusters))
    }

    /// The configuration in use.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Fit K-means to `clusters`, returning exactly `num_clusters` clusters.
    ///
    /// With zero iterations the result is the seed placeholders: empty
    /// membership and zero population at the seed positions.
    pub fn fit(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        let k = self.config.num_clusters;
        validate_request(clusters, k, "number of clusters")?;
        if k > clusters.len() {
            return Err(ClusterError::invalid_argument(format!(
                "cannot seed {k} clusters from {} inputs",
                clusters.len()
            )));
        }

        let mut ordered = clusters.to_vec();
        ordered.sort_by_key(Cluster::population);

        let mut centers = initialize_centers(&ordered, k);
        debug!(
            input = ordered.len(),
            k,
            iterations = self.config.num_iterations,
            "starting k-means clustering"
        );

        let mut accumulators = placeholders(&centers);
        for round in 0..self.config.num_iterations {
            accumulators = placeholders(&centers);
            for cluster in &ordered {
                let nearest = nearest_center(cluster, &centers);
                accumulators[nearest].merge(cluster);
            }
            centers = accumulators
                .iter()
                .map(|acc| (acc.horiz_center(), acc.vert_center()))
                .collect();
            trace!(round, "k-means round complete");
        }

        debug!(output = accumulators.len(), "k-means clustering finished");
        Ok(accumulators)
    }
}

impl ClusteringStrategy for KMeans {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn cluster(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        self.fit(clusters)
    }
}

/// Cluster `clusters` into `k` groups with `iterations` rounds of k-means.
///
/// The input is never modified.
pub fn kmeans_clustering(clusters: &[Cluster], k: usize, iterations: usize) -> Result<Vec<Cluster>> {
    KMeans::new(KMeansConfig::new(k).with_iterations(iterations)).fit(clusters)
}

/// Centers of the `k` most populous clusters of a population-ascending list.
fn initialize_centers(ordered: &[Cluster], k: usize) -> Vec<(f64, f64)> {
    ordered[ordered.len() - k..]
        .iter()
        .map(|c| (c.horiz_center(), c.vert_center()))
        .collect()
}

fn placeholders(centers: &[(f64, f64)]) -> Vec<Cluster> {
    centers
        .iter()
        .map(|&(horiz, vert)| Cluster::placeholder(horiz, vert))
        .collect()
}

/// Index of the center nearest to `cluster`; the first one wins ties.
fn nearest_center(cluster: &Cluster, centers: &[(f64, f64)]) -> ClusterIndex {
    let mut min_dist = f64::INFINITY;
    let mut min_idx = 0;
    for (i, &(horiz, vert)) in centers.iter().enumerate() {
        let dist = (cluster.horiz_center() - horiz).hypot(cluster.vert_center() - vert);
        if dist < min_dist {
            min_dist = dist;
            min_idx = i;
        }
    }
    min_idx
}
