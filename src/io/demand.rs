// src/io/demand.rs

use crate::error::{InventoryError, Result};
use crate::model::distribution::DemandDistribution;
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

/// Draws `periods` independent demands from a discrete distribution.
///
/// # Arguments
/// * `distribution` - Probability of each demand level, starting at 0.
/// * `periods` - Length of the schedule, normally the solver's horizon.
/// * `rng` - Source of randomness; pass a seeded generator for reproducible runs.
pub fn generate_demand<R: Rng + ?Sized>(
    distribution: &DemandDistribution,
    periods: usize,
    rng: &mut R,
) -> Result<Vec<u32>> {
    let sampler = WeightedIndex::new(distribution.probabilities()).map_err(|e| {
        InventoryError::InvalidConfiguration(format!("cannot sample demand: {}", e))
    })?;

    Ok((0..periods).map(|_| sampler.sample(rng) as u32).collect())
}
