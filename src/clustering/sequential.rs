//! Order-based partitioning.
//!
//! Splits the input, in its given order, into consecutive runs of roughly
//! equal length and merges each run. Useful as a baseline when comparing
//! distortion against the geometric strategies.

use tracing::debug;

use super::{validate_request, ClusteringStrategy};
use crate::data_format::Cluster;
use crate::error::Result;

/// Consecutive-run partitioning into a target number of clusters.
#[derive(Debug, Clone, Copy)]
pub struct SequentialClustering {
    num_clusters: usize,
}

impl SequentialClustering {
    /// Create a partitioner aiming for `num_clusters` runs.
    pub fn new(num_clusters: usize) -> Self {
        Self { num_clusters }
    }

    /// Partition `clusters` by order.
    ///
    /// Run boundaries are computed in floating point, so the result may hold
    /// `num_clusters + 1` clusters. Asking for more clusters than inputs
    /// returns a copy of the input.
    pub fn fit(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        validate_request(clusters, self.num_clusters, "number of clusters")?;

        let run_length = clusters.len() as f64 / self.num_clusters as f64;
        let run_of = |idx: f64| (idx / run_length).floor();

        let mut result: Vec<Cluster> = Vec::with_capacity(self.num_clusters + 1);
        for (idx, cluster) in clusters.iter().enumerate() {
            let starts_run = run_of(idx as f64) != run_of(idx as f64 - 1.0);
            if starts_run {
                result.push(cluster.clone());
            } else if let Some(last) = result.last_mut() {
                last.merge(cluster);
            }
        }

        debug!(
            input = clusters.len(),
            output = result.len(),
            "sequential clustering finished"
        );
        Ok(result)
    }
}

impl ClusteringStrategy for SequentialClustering {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn cluster(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        self.fit(clusters)
    }
}

/// Partition `clusters` by their order into about `num_clusters` runs.
pub fn sequential_clustering(clusters: &[Cluster], num_clusters: usize) -> Result<Vec<Cluster>> {
    SequentialClustering::new(num_clusters).fit(clusters)
}
