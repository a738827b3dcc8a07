//! Finite-horizon inventory control solved by backward induction.
//!
//! [`strategy::optimization`] builds the optimal policy and cost-to-go tables,
//! [`simulation::engine`] replays a policy against a demand sequence, and [`io`]
//! holds the demand generator and the CSV/plotting helpers around them.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{InventoryError, Result};
pub use model::distribution::DemandDistribution;
pub use model::tables::{CostTable, PolicyTable};
pub use simulation::config::ModelConfig;
pub use simulation::engine::{simulate, PolicySimulator, SimulationTrace, TraceRecord};
pub use strategy::implementations::BaseStockPolicy;
pub use strategy::optimization::{solve, solve_one_period, PolicySolver};
pub use strategy::traits::OrderPolicy;
