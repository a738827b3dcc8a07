// src/simulation/config.rs

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Problem and run parameters for the command-line harness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub horizon: usize,
    pub max_stock: u32,
    /// Cost per stock level left after the last period. `None` means all zeros.
    pub terminal_cost: Option<Vec<f64>>,
    /// Probability of each demand level, starting at demand 0.
    pub demand_distribution: Vec<f64>,
    pub initial_stock: u32,
    /// Seed for the demand generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl ModelConfig {
    /// The three-period example: demand is 1, 2 or 3 with probability 0.1, 0.7, 0.2.
    pub fn small_example() -> Self {
        Self {
            horizon: 3,
            max_stock: 3,
            terminal_cost: Some(vec![0.0; 4]),
            demand_distribution: vec![0.0, 0.10, 0.70, 0.20],
            initial_stock: 0,
            seed: None,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Terminal cost vector handed to the solver.
    pub fn terminal_cost(&self) -> Vec<f64> {
        self.terminal_cost
            .clone()
            .unwrap_or_else(|| vec![0.0; self.max_stock as usize + 1])
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            horizon: 61,
            max_stock: 10,
            terminal_cost: None,
            demand_distribution: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 0.25, 0.025, 0.05, 0.05, 0.20, 0.20, 0.05, 0.05, 0.05,
                0.025, 0.025, 0.025,
            ],
            initial_stock: 0,
            seed: None,
        }
    }
}
