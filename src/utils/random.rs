//! Random data generation.
//!
//! Seeded generators for synthetic entity tables, used by the report binary
//! when no data file is given, and by tests and benchmarks.

use rand::prelude::*;

use crate::data_format::{Cluster, DataRecord, DataTable};
use crate::error::{ClusterError, Result};

/// Largest population drawn for a synthetic entity.
const MAX_POPULATION: u64 = 100_000;

/// Random generator for synthetic entities.
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Create a new sampler with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a new sampler with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Get a random float in [low, high).
    ///
    /// Returns `InvalidArgument` unless `low < high` and the width of the
    /// range is finite.
    pub fn random_range(&mut self, low: f64, high: f64) -> Result<f64> {
        if !(low < high) || !(high - low).is_finite() {
            return Err(ClusterError::invalid_argument(format!(
                "cannot sample from range [{low}, {high})"
            )));
        }
        Ok(self.rng.gen_range(low..high))
    }

    /// One entity at the given position with random population and risk.
    fn record_at(&mut self, idx: usize, horiz: f64, vert: f64) -> DataRecord {
        let population = self.rng.gen_range(1..=MAX_POPULATION);
        let risk = self.rng.gen_range(0.0..1e-4);
        DataRecord::new(format!("{idx:05}"), horiz, vert, population, risk)
    }

    /// `n` entities spread uniformly over `[0, width) x [0, height)`.
    pub fn uniform_table(&mut self, n: usize, width: f64, height: f64) -> Result<DataTable> {
        check_extent("width", width)?;
        check_extent("height", height)?;
        let records = (0..n)
            .map(|i| {
                let horiz = self.random_range(0.0, width)?;
                let vert = self.random_range(0.0, height)?;
                Ok(self.record_at(i, horiz, vert))
            })
            .collect::<Result<Vec<_>>>()?;
        DataTable::new(records)
    }

    /// `n` entities scattered around `num_centers` random centers within
    /// `[0, width) x [0, height)`, each at most `spread` away per axis.
    ///
    /// `spread` must be finite and non-negative; zero places every entity
    /// exactly on its center.
    pub fn clustered_table(
        &mut self,
        n: usize,
        num_centers: usize,
        width: f64,
        height: f64,
        spread: f64,
    ) -> Result<DataTable> {
        check_extent("width", width)?;
        check_extent("height", height)?;
        if !spread.is_finite() || spread < 0.0 {
            return Err(ClusterError::invalid_argument(format!(
                "spread must be finite and non-negative, got {spread}"
            )));
        }

        let num_centers = num_centers.max(1);
        let centers = (0..num_centers)
            .map(|_| Ok((self.random_range(0.0, width)?, self.random_range(0.0, height)?)))
            .collect::<Result<Vec<(f64, f64)>>>()?;

        let records = (0..n)
            .map(|i| {
                let (cx, cy) = centers[i % num_centers];
                let (horiz, vert) = if spread > 0.0 {
                    (cx + self.random_range(-spread, spread)?, cy + self.random_range(-spread, spread)?)
                } else {
                    (cx, cy)
                };
                Ok(self.record_at(i, horiz, vert))
            })
            .collect::<Result<Vec<_>>>()?;
        DataTable::new(records)
    }
}

fn check_extent(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ClusterError::invalid_argument(format!(
            "{name} must be finite and positive, got {value}"
        )));
    }
    Ok(())
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` singleton clusters at uniform random positions in a 1000 x 1000 box.
pub fn random_singletons(n: usize, seed: u64) -> Result<Vec<Cluster>> {
    let table = RandomSampler::with_seed(seed).uniform_table(n, 1000.0, 1000.0)?;
    Ok(table.singletons())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_tables_repeat() {
        let a = RandomSampler::with_seed(7).uniform_table(50, 10.0, 10.0).unwrap();
        let b = RandomSampler::with_seed(7).uniform_table(50, 10.0, 10.0).unwrap();
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn test_uniform_bounds() {
        let table = RandomSampler::with_seed(1).uniform_table(200, 5.0, 2.0).unwrap();
        assert_eq!(table.len(), 200);
        for r in table.records() {
            assert!((0.0..5.0).contains(&r.horiz));
            assert!((0.0..2.0).contains(&r.vert));
            assert!(r.population >= 1);
        }
    }

    #[test]
    fn test_clustered_spread() {
        let table = RandomSampler::with_seed(3)
            .clustered_table(90, 3, 100.0, 100.0, 1.0)
            .unwrap();
        assert_eq!(table.len(), 90);
        let first = &table.records()[0];
        let fourth = &table.records()[3];
        // same center, within two spreads of each other
        assert!((first.horiz - fourth.horiz).abs() <= 2.0);
        assert!((first.vert - fourth.vert).abs() <= 2.0);
    }

    #[test]
    fn test_degenerate_extents_rejected() {
        let mut sampler = RandomSampler::with_seed(1);
        for (width, height) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
            let err = sampler.uniform_table(5, width, height).unwrap_err();
            assert_eq!(err.code(), crate::error::ErrorCode::InvalidArgument);
            assert!(sampler.clustered_table(5, 2, width, height, 1.0).is_err());
        }
        assert!(sampler.clustered_table(5, 2, 10.0, 10.0, -1.0).is_err());
        assert!(sampler.clustered_table(5, 2, 10.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_random_range_bounds() {
        let mut sampler = RandomSampler::with_seed(2);
        let value = sampler.random_range(-1.0, 1.0).unwrap();
        assert!((-1.0..1.0).contains(&value));
        assert!(sampler.random_range(1.0, 1.0).is_err());
        assert!(sampler.random_range(2.0, 1.0).is_err());
        assert!(sampler.random_range(-f64::MAX, f64::MAX).is_err());
    }

    #[test]
    fn test_zero_spread_stacks_on_centers() {
        let table = RandomSampler::with_seed(4)
            .clustered_table(6, 2, 50.0, 50.0, 0.0)
            .unwrap();
        let records = table.records();
        assert_eq!((records[0].horiz, records[0].vert), (records[2].horiz, records[2].vert));
        assert_eq!((records[1].horiz, records[1].vert), (records[5].horiz, records[5].vert));
    }

    #[test]
    fn test_random_singletons() {
        let clusters = random_singletons(20, 11).unwrap();
        assert_eq!(clusters.len(), 20);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }
}
