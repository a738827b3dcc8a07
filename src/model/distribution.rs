// src/model/distribution.rs

use crate::error::{InventoryError, Result};

/// Allowed drift of the probability mass away from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Largest demand a point-mass distribution may sit on.
pub const MAX_POINT_DEMAND: u32 = 1 << 20;

/// A stationary, discrete demand distribution.
///
/// Entry `l` is the probability that demand in any period equals `l`.
/// The same distribution drives the solver's expectations and the demand generator.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandDistribution {
    probabilities: Vec<f64>,
}

impl DemandDistribution {
    /// Validates and wraps a probability vector.
    ///
    /// Every entry must be finite and non-negative, and the entries must sum to 1
    /// within [`PROBABILITY_TOLERANCE`].
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(InventoryError::InvalidConfiguration(
                "demand distribution is empty".to_string(),
            ));
        }

        if let Some((level, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(InventoryError::InvalidConfiguration(format!(
                "demand probability for level {} is {}, expected a finite value >= 0",
                level, p
            )));
        }

        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(InventoryError::InvalidConfiguration(format!(
                "demand probabilities sum to {}, expected 1",
                total
            )));
        }

        Ok(Self { probabilities })
    }

    /// A distribution where demand is always `value`.
    ///
    /// Allocates `value + 1` entries, so `value` is capped at [`MAX_POINT_DEMAND`].
    pub fn deterministic(value: u32) -> Result<Self> {
        if value > MAX_POINT_DEMAND {
            return Err(InventoryError::InvalidConfiguration(format!(
                "point demand {} exceeds {}",
                value, MAX_POINT_DEMAND
            )));
        }
        let mut probabilities = vec![0.0; value as usize + 1];
        probabilities[value as usize] = 1.0;
        Ok(Self { probabilities })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Demand levels with non-zero probability, in ascending order.
    pub fn support(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0.0)
            .map(|(level, p)| (level as u32, *p))
    }

    pub fn mean(&self) -> f64 {
        self.support().map(|(level, p)| level as f64 * p).sum()
    }
}
