//! Clustering strategies.
//!
//! Every strategy reduces a list of clusters to a smaller list while
//! conserving total population:
//!
//! - [`HierarchicalClustering`]: repeatedly merges the closest pair.
//! - [`KMeans`]: fixed-iteration centroid refinement from
//!   population-biased seeds.
//! - [`SequentialClustering`]: partitions by input order, a baseline.

pub(crate) mod hierarchical;
pub(crate) mod kmeans;
pub(crate) mod sequential;

pub use hierarchical::{hierarchical_clustering, HierarchicalClustering};
pub use kmeans::{kmeans_clustering, KMeans, KMeansConfig};
pub use sequential::{sequential_clustering, SequentialClustering};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_format::Cluster;
use crate::error::{ClusterError, Result};

/// A clustering algorithm with its parameters bound.
pub trait ClusteringStrategy {
    /// Short name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Cluster `clusters`. The input is never modified.
    fn cluster(&self, clusters: &[Cluster]) -> Result<Vec<Cluster>>;
}

/// Available clustering algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringMethod {
    /// Closest-pair agglomeration.
    #[default]
    Hierarchical,
    /// Lloyd-style k-means.
    #[serde(rename = "kmeans")]
    KMeans,
    /// Order-based partition.
    Sequential,
}

impl ClusteringMethod {
    /// Name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusteringMethod::Hierarchical => "hierarchical",
            ClusteringMethod::KMeans => "kmeans",
            ClusteringMethod::Sequential => "sequential",
        }
    }
}

impl fmt::Display for ClusteringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusteringMethod {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hierarchical" => Ok(Self::Hierarchical),
            "kmeans" | "k-means" | "k_means" => Ok(Self::KMeans),
            "sequential" => Ok(Self::Sequential),
            _ => Err(ClusterError::invalid_argument(format!(
                "unsupported clustering method: {s}"
            ))),
        }
    }
}

/// Shared input validation for all strategies.
pub(crate) fn validate_request(clusters: &[Cluster], num_clusters: usize, what: &str) -> Result<()> {
    if num_clusters == 0 {
        return Err(ClusterError::invalid_argument(format!("{what} must be at least 1")));
    }
    if clusters.is_empty() {
        return Err(ClusterError::invalid_argument("cannot cluster an empty list"));
    }
    Ok(())
}
