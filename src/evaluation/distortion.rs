//! Distortion of a clustering against its source table.

use crate::data_format::{Cluster, DataTable};
use crate::error::Result;

/// Sum over clusters of the squared distances from each member's original
/// position to the cluster centroid.
///
/// Returns `NotFound` if a member id is missing from `table`.
pub fn compute_distortion(clusters: &[Cluster], table: &DataTable) -> Result<f64> {
    clusters.iter().map(|c| c.cluster_error(table)).sum()
}

/// Population-weighted distortion: each member's squared distance is
/// multiplied by its population.
pub fn compute_weighted_distortion(clusters: &[Cluster], table: &DataTable) -> Result<f64> {
    clusters.iter().map(|c| c.weighted_cluster_error(table)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_format::DataRecord;
    use crate::error::ErrorCode;

    fn table() -> DataTable {
        DataTable::new(vec![
            DataRecord::new("a", 0.0, 0.0, 2, 0.0),
            DataRecord::new("b", 2.0, 0.0, 2, 0.0),
            DataRecord::new("c", 10.0, 10.0, 5, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_singletons_have_zero_distortion() {
        let table = table();
        let singletons = table.singletons();
        assert_eq!(compute_distortion(&singletons, &table).unwrap(), 0.0);
        assert_eq!(compute_weighted_distortion(&singletons, &table).unwrap(), 0.0);
    }

    #[test]
    fn test_merged_distortion() {
        let table = table();
        let singletons = table.singletons();
        let mut ab = singletons[0].clone();
        ab.merge(&singletons[1]);
        let clusters = vec![ab, singletons[2].clone()];

        // members at distance 1 from the midpoint
        assert!((compute_distortion(&clusters, &table).unwrap() - 2.0).abs() < 1e-12);
        assert!((compute_weighted_distortion(&clusters, &table).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_member() {
        let table = table();
        let clusters = vec![Cluster::singleton("zz", 0.0, 0.0, 1, 0.0)];
        let err = compute_distortion(&clusters, &table).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_empty_placeholder_contributes_nothing() {
        let table = table();
        let clusters = vec![Cluster::placeholder(100.0, 100.0)];
        assert_eq!(compute_distortion(&clusters, &table).unwrap(), 0.0);
    }
}
