// src/error.rs

use thiserror::Error;

/// Errors surfaced by the solver, the simulator and the export helpers.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Solver or simulator inputs that can never produce a valid result.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The replayed stock left `[0, max_stock]`; the policy and the run disagree.
    #[error("stock {stock} out of range [0, {max_stock}] in period {period}")]
    StateOutOfRange {
        period: usize,
        stock: u64,
        max_stock: u32,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
