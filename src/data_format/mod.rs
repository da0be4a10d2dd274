//! Data format types for geocluster.
//!
//! This module provides the cluster value the algorithms operate on and the
//! raw record table clusters are built from.

mod cluster;
mod record;

pub use cluster::Cluster;
pub use record::{DataRecord, DataTable};
