//! Cluster representation.
//!
//! A [`Cluster`] aggregates one or more original entities into a single
//! weighted point: the population-weighted centroid of its members, their
//! total population, and their population-weighted average risk.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data_format::DataTable;
use crate::error::{ClusterError, Result};
use crate::types::{EntityId, Population};

/// An aggregate of entities with a weighted centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Identifiers of the aggregated entities.
    members: BTreeSet<EntityId>,

    /// Horizontal coordinate of the weighted centroid.
    horiz_center: f64,

    /// Vertical coordinate of the weighted centroid.
    vert_center: f64,

    /// Sum of member populations.
    population: Population,

    /// Population-weighted average risk.
    risk: f64,
}

impl Cluster {
    /// Create a cluster from its parts.
    pub fn new(
        members: BTreeSet<EntityId>,
        horiz_center: f64,
        vert_center: f64,
        population: Population,
        risk: f64,
    ) -> Self {
        Self {
            members,
            horiz_center,
            vert_center,
            population,
            risk,
        }
    }

    /// Create a cluster holding exactly one entity.
    pub fn singleton(
        id: impl Into<EntityId>,
        horiz_center: f64,
        vert_center: f64,
        population: Population,
        risk: f64,
    ) -> Self {
        let mut members = BTreeSet::new();
        members.insert(id.into());
        Self::new(members, horiz_center, vert_center, population, risk)
    }

    /// Create an empty zero-population cluster fixed at a position.
    ///
    /// Used as a k-means accumulator: its centroid stays put until a
    /// cluster with positive population is merged into it.
    pub fn placeholder(horiz_center: f64, vert_center: f64) -> Self {
        Self::new(BTreeSet::new(), horiz_center, vert_center, 0, 0.0)
    }

    /// Member entity identifiers.
    pub fn members(&self) -> &BTreeSet<EntityId> {
        &self.members
    }

    /// Horizontal coordinate of the centroid.
    #[inline]
    pub fn horiz_center(&self) -> f64 {
        self.horiz_center
    }

    /// Vertical coordinate of the centroid.
    #[inline]
    pub fn vert_center(&self) -> f64 {
        self.vert_center
    }

    /// Total population.
    #[inline]
    pub fn population(&self) -> Population {
        self.population
    }

    /// Population-weighted average risk.
    #[inline]
    pub fn risk(&self) -> f64 {
        self.risk
    }

    /// Number of member entities.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no entity has been aggregated.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True for a zero-population cluster.
    pub fn is_placeholder(&self) -> bool {
        self.population == 0
    }

    /// Euclidean distance between the two centroids.
    #[inline]
    pub fn distance(&self, other: &Cluster) -> f64 {
        let dx = self.horiz_center - other.horiz_center;
        let dy = self.vert_center - other.vert_center;
        dx.hypot(dy)
    }

    /// Merge `other` into `self`.
    ///
    /// The receiver becomes the population-weighted combination of both
    /// clusters; `other` is left untouched. When the combined population is
    /// zero the receiver keeps its centroid and risk. The population sum
    /// saturates at `Population::MAX`.
    pub fn merge(&mut self, other: &Cluster) -> &mut Self {
        self.members.extend(other.members.iter().cloned());

        let total = self.population.saturating_add(other.population);
        if total > 0 {
            let self_weight = self.population as f64;
            let other_weight = other.population as f64;
            let weighted =
                |mine: f64, theirs: f64| (self_weight * mine + other_weight * theirs) / (self_weight + other_weight);
            self.horiz_center = weighted(self.horiz_center, other.horiz_center);
            self.vert_center = weighted(self.vert_center, other.vert_center);
            self.risk = weighted(self.risk, other.risk);
        }
        self.population = total;
        self
    }

    /// Deep, independent copy.
    pub fn copy(&self) -> Cluster {
        self.clone()
    }

    /// Sum of squared distances from each member's original position to
    /// this centroid.
    pub fn cluster_error(&self, table: &DataTable) -> Result<f64> {
        self.error_with(table, |_| 1.0)
    }

    /// Like [`cluster_error`](Self::cluster_error), but each member's term
    /// is weighted by its population.
    pub fn weighted_cluster_error(&self, table: &DataTable) -> Result<f64> {
        self.error_with(table, |population| population as f64)
    }

    fn error_with(&self, table: &DataTable, weight: impl Fn(Population) -> f64) -> Result<f64> {
        let mut total = 0.0;
        for id in &self.members {
            let record = table
                .get(id)
                .ok_or_else(|| ClusterError::not_found(format!("entity {id} is not in the data table")))?;
            let dx = record.horiz - self.horiz_center;
            let dy = record.vert - self.vert_center;
            total += weight(record.population) * (dx * dx + dy * dy);
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_format::DataRecord;

    #[test]
    fn test_distance() {
        let a = Cluster::singleton("a", 0.0, 0.0, 1, 0.0);
        let b = Cluster::singleton("b", 3.0, 4.0, 1, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_merge_weighted() {
        let mut a = Cluster::singleton("a", 0.0, 0.0, 1, 1.0);
        let b = Cluster::singleton("b", 4.0, 8.0, 3, 2.0);
        a.merge(&b);

        assert_eq!(a.population(), 4);
        assert!((a.horiz_center() - 3.0).abs() < 1e-12);
        assert!((a.vert_center() - 6.0).abs() < 1e-12);
        assert!((a.risk() - 1.75).abs() < 1e-12);
        assert_eq!(a.len(), 2);

        // argument is untouched
        assert_eq!(b.population(), 3);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_merge_into_placeholder() {
        let mut acc = Cluster::placeholder(100.0, 100.0);
        let b = Cluster::singleton("b", 2.0, 3.0, 10, 0.5);
        acc.merge(&b);

        assert_eq!(acc.horiz_center(), 2.0);
        assert_eq!(acc.vert_center(), 3.0);
        assert_eq!(acc.risk(), 0.5);
        assert_eq!(acc.population(), 10);
    }

    #[test]
    fn test_merge_zero_total_keeps_receiver() {
        let mut a = Cluster::singleton("a", 1.0, 2.0, 0, 0.3);
        let b = Cluster::singleton("b", 9.0, 9.0, 0, 0.9);
        a.merge(&b);

        assert_eq!(a.horiz_center(), 1.0);
        assert_eq!(a.vert_center(), 2.0);
        assert_eq!(a.risk(), 0.3);
        assert_eq!(a.population(), 0);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_merge_population_saturates() {
        let mut a = Cluster::singleton("a", 0.0, 0.0, Population::MAX, 0.0);
        let b = Cluster::singleton("b", 2.0, 0.0, 5, 0.0);
        a.merge(&b);

        assert_eq!(a.population(), Population::MAX);
        assert_eq!(a.len(), 2);
        assert!(a.horiz_center().is_finite());
    }

    #[test]
    fn test_merge_chains() {
        let mut a = Cluster::singleton("a", 0.0, 0.0, 1, 0.0);
        let b = Cluster::singleton("b", 2.0, 0.0, 1, 0.0);
        let c = Cluster::singleton("c", 4.0, 0.0, 2, 0.0);
        a.merge(&b).merge(&c);

        assert_eq!(a.population(), 4);
        assert!((a.horiz_center() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Cluster::singleton("a", 0.0, 0.0, 1, 0.0);
        let mut copy = original.copy();
        copy.merge(&Cluster::singleton("b", 1.0, 1.0, 1, 0.0));

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_cluster_error() {
        let table = DataTable::new(vec![
            DataRecord::new("a", 0.0, 0.0, 1, 0.0),
            DataRecord::new("b", 2.0, 0.0, 3, 0.0),
        ])
        .unwrap();
        let mut cluster = Cluster::singleton("a", 0.0, 0.0, 1, 0.0);
        cluster.merge(&Cluster::singleton("b", 2.0, 0.0, 3, 0.0));

        // centroid at 1.5: 1.5^2 + 0.5^2
        assert!((cluster.cluster_error(&table).unwrap() - 2.5).abs() < 1e-12);
        // 1 * 2.25 + 3 * 0.25
        assert!((cluster.weighted_cluster_error(&table).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cluster_error_unknown_member() {
        let table = DataTable::new(vec![DataRecord::new("a", 0.0, 0.0, 1, 0.0)]).unwrap();
        let cluster = Cluster::singleton("zzz", 0.0, 0.0, 1, 0.0);
        let err = cluster.cluster_error(&table).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::NotFound);
    }
}
