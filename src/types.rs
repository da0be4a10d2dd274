//! Core type definitions for geocluster.

/// Identifier of an original data entity (for example a county code).
pub type EntityId = String;

/// Position of a cluster within a working list.
///
/// Indices identify clusters only for the duration of a single pass; any
/// sort or removal invalidates them.
pub type ClusterIndex = usize;

/// Aggregate population weight of a cluster.
pub type Population = u64;
