//! # geocluster - weighted geographic clustering
//!
//! Groups weighted 2D entities (a position, a population and a risk value)
//! into a target number of clusters while keeping population-weighted
//! centroid semantics on every merge.
//!
//! ## Overview
//!
//! - **Closest pair**: exhaustive O(n²) and divide-and-conquer
//!   O(n log² n) finders with a deterministic `(distance, idx1, idx2)`
//!   tie-break
//! - **Hierarchical clustering**: merge the closest pair until the target
//!   count remains
//! - **K-means**: fixed-iteration refinement seeded at the most populous
//!   clusters
//! - **Sequential clustering**: order-based baseline partition
//! - **Distortion**: quality metric for comparing clusterings
//!
//! ## Quick Start
//!
//! ```rust
//! use geocluster::prelude::*;
//!
//! let table = DataTable::from_csv_str(
//!     "a,0.0,0.0,10,0.1\n\
//!      b,1.0,0.0,10,0.2\n\
//!      c,9.0,9.0,30,0.3\n\
//!      d,9.5,9.0,10,0.1\n",
//! )
//! .unwrap();
//!
//! let clusters = hierarchical_clustering(&table.singletons(), 2).unwrap();
//! assert_eq!(clusters.len(), 2);
//!
//! let distortion = compute_distortion(&clusters, &table).unwrap();
//! println!("distortion: {distortion:.3}");
//! ```
//!
//! ## Comparing strategies
//!
//! ```rust
//! use geocluster::prelude::*;
//!
//! let table = RandomSampler::with_seed(42).uniform_table(200, 100.0, 100.0).unwrap();
//! let singletons = table.singletons();
//!
//! let hierarchical = hierarchical_clustering(&singletons, 9).unwrap();
//! let kmeans = kmeans_clustering(&singletons, 9, 5).unwrap();
//!
//! let h = compute_distortion(&hierarchical, &table).unwrap();
//! let k = compute_distortion(&kmeans, &table).unwrap();
//! println!("hierarchical {h:.1} vs k-means {k:.1}");
//! ```
//!
//! ## Input ownership
//!
//! All entry points take `&[Cluster]` and return fresh clusters; callers'
//! lists are never modified. Hierarchical clustering merges in place on a
//! private working copy.
//!
//! ## Module Overview
//!
//! - [`data_format`]: clusters, records and tables
//! - [`closest_pair`]: closest-pair finders
//! - [`clustering`]: hierarchical, k-means and sequential strategies
//! - [`evaluation`]: distortion and distortion curves
//! - [`utils`]: synthetic data generation

pub mod closest_pair;
pub mod clustering;
pub mod data_format;
pub mod evaluation;
pub mod utils;

mod config;
mod error;
mod types;

pub use closest_pair::{closest_pair_strip, fast_closest_pair, slow_closest_pair, ClosestPair, ClosestPairMethod};
pub use clustering::{
    hierarchical_clustering, kmeans_clustering, sequential_clustering, ClusteringMethod, ClusteringStrategy,
};
pub use config::ClusteringConfig;
pub use error::{ClusterError, ErrorCode, Result};
pub use evaluation::{compute_distortion, compute_weighted_distortion};
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::closest_pair::{
        closest_pair_strip, fast_closest_pair, is_sorted_by_horiz, slow_closest_pair, sort_by_horiz, ClosestPair,
        ClosestPairMethod,
    };
    pub use crate::clustering::{
        hierarchical_clustering, kmeans_clustering, sequential_clustering, ClusteringMethod, ClusteringStrategy,
        HierarchicalClustering, KMeans, KMeansConfig, SequentialClustering,
    };
    pub use crate::config::ClusteringConfig;
    pub use crate::data_format::{Cluster, DataRecord, DataTable};
    pub use crate::error::{ClusterError, ErrorCode, Result};
    pub use crate::evaluation::{
        compute_distortion, compute_weighted_distortion, hierarchical_distortion_curve, kmeans_distortion_curve,
        DistortionPoint,
    };
    pub use crate::types::*;
    pub use crate::utils::{random_singletons, RandomSampler};
}
