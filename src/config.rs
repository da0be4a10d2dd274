//! Configuration types for geocluster.
//!
//! A [`ClusteringConfig`] names a clustering method and its parameters and
//! can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::clustering::{
    ClusteringMethod, ClusteringStrategy, HierarchicalClustering, KMeans, KMeansConfig, SequentialClustering,
};
use crate::error::{ClusterError, Result};

/// Main configuration for a clustering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Clustering method to use.
    pub method: ClusteringMethod,

    /// Number of clusters to produce.
    pub num_clusters: usize,

    /// Refinement rounds (k-means only).
    pub num_iterations: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            method: ClusteringMethod::Hierarchical,
            num_clusters: 15,
            num_iterations: 5,
        }
    }
}

impl ClusteringConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ClusterError::invalid_argument(format!("invalid clustering config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the clustering method.
    pub fn with_method(mut self, method: ClusteringMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the number of clusters.
    pub fn with_num_clusters(mut self, num_clusters: usize) -> Self {
        self.num_clusters = num_clusters;
        self
    }

    /// Set the number of k-means iterations.
    pub fn with_num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.num_clusters == 0 {
            return Err(ClusterError::invalid_argument("num_clusters must be at least 1"));
        }
        Ok(())
    }

    /// Build the configured strategy.
    pub fn build_strategy(&self) -> Result<Box<dyn ClusteringStrategy>> {
        self.validate()?;
        let strategy: Box<dyn ClusteringStrategy> = match self.method {
            ClusteringMethod::Hierarchical => Box::new(HierarchicalClustering::new(self.num_clusters)),
            ClusteringMethod::KMeans => Box::new(KMeans::new(
                KMeansConfig::new(self.num_clusters).with_iterations(self.num_iterations),
            )),
            ClusteringMethod::Sequential => Box::new(SequentialClustering::new(self.num_clusters)),
        };
        Ok(strategy)
    }
}
