//! Hierarchical agglomerative clustering.
//!
//! Starting from the input clusters, the closest pair of centroids is merged
//! until the requested number of clusters remains. The working list is an
//! owned copy: slot indices address clusters within one round, and the
//! absorbed slot is removed (order-preserving) after each merge.

use tracing::{debug, trace};

use super::{validate_request, ClusteringStrategy};
use crate::closest_pair::{sort_by_horiz, ClosestPairMethod};
use crate::data_format::Cluster;
use crate::error::Result;

/// Closest-pair agglomeration down to a target cluster count.
#[derive(Debug, Clone, Copy)]
pub struct HierarchicalClustering {
    target_count: usize,
    closest_pair: ClosestPairMethod,
}

impl HierarchicalClustering {
    /// Create a clusterer producing `target_count` clusters.
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            closest_pair: ClosestPairMethod::DivideAndConquer,
        }
    }

    /// Choose the closest-pair finder used for each merge.
    pub fn with_closest_pair(mut self, method: ClosestPairMethod) -> Self {
        self.closest_pair = method;
        self
    }

    /// Target number of clusters.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Run the agglomeration.
    ///
    /// If `target_count` is at least the input length, the input is returned
    /// as an unchanged copy.
    pub fn fit(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        validate_request(clusters, self.target_count, "target cluster count")?;

        let mut working = clusters.to_vec();
        debug!(
            input = working.len(),
            target = self.target_count,
            "starting hierarchical clustering"
        );

        while working.len() > self.target_count {
            sort_by_horiz(&mut working);
            let pair = self.closest_pair.find(&working)?;

            let absorbed = working.remove(pair.idx2);
            working[pair.idx1].merge(&absorbed);
            trace!(
                distance = pair.distance,
                idx1 = pair.idx1,
                idx2 = pair.idx2,
                remaining = working.len(),
                "merged closest pair"
            );
        }

        debug!(output = working.len(), "hierarchical clustering finished");
        Ok(working)
    }
}

impl ClusteringStrategy for HierarchicalClustering {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn cluster(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
        self.fit(clusters)
    }
}

/// Reduce `clusters` to `target_count` clusters by repeatedly merging the
/// closest pair.
pub fn hierarchical_clustering(clusters: &[Cluster], target_count: usize) -> Result<Vec<Cluster>> {
    HierarchicalClustering::new(target_count).fit(clusters)
}
