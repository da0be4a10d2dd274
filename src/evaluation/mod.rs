//! Clustering quality evaluation.
//!
//! Distortion measures how tightly a clustering fits the original data:
//!
//! | Metric | Formula |
//! |--------|---------|
//! | Distortion | Σ clusters Σ members ‖member − centroid‖² |
//! | Weighted distortion | Σ clusters Σ members population · ‖member − centroid‖² |
//!
//! Lower is better. The clustering algorithms never call into this module;
//! it exists for callers comparing strategies.

mod curve;
mod distortion;

pub use curve::{hierarchical_distortion_curve, kmeans_distortion_curve, DistortionPoint};
pub use distortion::{compute_distortion, compute_weighted_distortion};
