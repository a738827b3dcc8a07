// src/strategy/optimization.rs

//! Backward-induction solver for the finite-horizon inventory problem.
//!
//! Every period charges the order quantity plus the squared net position once demand
//! is realized. Stock after demand is floored at zero and carried into the next
//! period, where it is priced by that period's cost-to-go (or by the terminal cost
//! after the last period).

use crate::error::{InventoryError, Result};
use crate::model::distribution::DemandDistribution;
use crate::model::tables::{CostTable, PolicyTable};
use crate::simulation::config::ModelConfig;
use rayon::prelude::*;
use tracing::{debug, info};

/// Expected one-period-ahead cost of ordering `action` units with `stock` on hand.
///
/// # Formula
/// E[cost] = Σ_l p(l) · ( a + (x + a − l)² + next[max(0, x + a − l)] )
///
/// # Arguments
/// * `stock` - Units on hand at the start of the period (x).
/// * `action` - Units ordered (a).
/// * `next_period_cost` - Cost-to-go by stock level for the following period.
/// * `demand` - Demand distribution; zero-probability levels contribute nothing.
///
/// # Errors
/// `InvalidConfiguration` if `stock + action` has no entry in `next_period_cost`.
pub fn expected_cost(
    stock: u32,
    action: u32,
    next_period_cost: &[f64],
    demand: &DemandDistribution,
) -> Result<f64> {
    let position = stock as u64 + action as u64;
    if position >= next_period_cost.len() as u64 {
        return Err(InventoryError::InvalidConfiguration(format!(
            "post-order stock {} has no cost-to-go entry ({} levels)",
            position,
            next_period_cost.len()
        )));
    }
    Ok(expected_cost_at(stock, action, next_period_cost, demand))
}

/// Best order quantity for a single (period, stock) pair.
///
/// Scans every feasible action `0..=max_stock - stock` in ascending order and keeps
/// the incumbent unless a candidate is strictly cheaper, so ties go to the smallest
/// action.
///
/// # Returns
/// `(action, expected_cost)` of the optimal choice.
///
/// # Errors
/// `InvalidConfiguration` if `stock > max_stock` or `next_period_cost` does not have
/// `max_stock + 1` entries.
pub fn solve_one_period(
    stock: u32,
    next_period_cost: &[f64],
    demand: &DemandDistribution,
    max_stock: u32,
) -> Result<(u32, f64)> {
    if stock > max_stock {
        return Err(InventoryError::InvalidConfiguration(format!(
            "stock {} exceeds max stock {}",
            stock, max_stock
        )));
    }
    if next_period_cost.len() != max_stock as usize + 1 {
        return Err(InventoryError::InvalidConfiguration(format!(
            "next period cost has {} entries, expected {}",
            next_period_cost.len(),
            max_stock as usize + 1
        )));
    }
    Ok(best_order(stock, next_period_cost, demand, max_stock))
}

// Callers guarantee stock + action < next_period_cost.len().
fn expected_cost_at(
    stock: u32,
    action: u32,
    next_period_cost: &[f64],
    demand: &DemandDistribution,
) -> f64 {
    let position = stock as i64 + action as i64;

    demand
        .support()
        .map(|(level, probability)| {
            // Negative net position is a shortage; it is penalized but not carried.
            let net = position - level as i64;
            let carried = net.max(0) as usize;
            let gap = net as f64;
            probability * (action as f64 + gap * gap + next_period_cost[carried])
        })
        .sum()
}

// Callers guarantee stock <= max_stock and next_period_cost.len() == max_stock + 1.
fn best_order(
    stock: u32,
    next_period_cost: &[f64],
    demand: &DemandDistribution,
    max_stock: u32,
) -> (u32, f64) {
    let mut best_action = 0;
    let mut best_cost = expected_cost_at(stock, 0, next_period_cost, demand);

    for action in 1..=max_stock - stock {
        let cost = expected_cost_at(stock, action, next_period_cost, demand);
        if cost < best_cost {
            best_action = action;
            best_cost = cost;
        }
    }

    (best_action, best_cost)
}

/// Validated solver inputs.
#[derive(Debug, Clone)]
pub struct PolicySolver {
    horizon: usize,
    max_stock: u32,
    terminal_cost: Vec<f64>,
    demand: DemandDistribution,
}

impl PolicySolver {
    /// Checks the problem shape before any work is done.
    ///
    /// # Arguments
    /// * `horizon` - Number of decision periods, at least 1.
    /// * `max_stock` - Largest stock level that may be held.
    /// * `terminal_cost` - Scrap cost by stock level left after the last period, `max_stock + 1` entries.
    /// * `demand` - Per-period demand distribution.
    pub fn new(
        horizon: usize,
        max_stock: u32,
        terminal_cost: Vec<f64>,
        demand: DemandDistribution,
    ) -> Result<Self> {
        if horizon == 0 {
            return Err(InventoryError::InvalidConfiguration(
                "horizon must be at least 1".to_string(),
            ));
        }

        let states = max_stock as usize + 1;
        if terminal_cost.len() != states {
            return Err(InventoryError::InvalidConfiguration(format!(
                "terminal cost has {} entries, expected {} (max stock {} + 1)",
                terminal_cost.len(),
                states,
                max_stock
            )));
        }

        if let Some(level) = terminal_cost.iter().position(|c| !c.is_finite()) {
            return Err(InventoryError::InvalidConfiguration(format!(
                "terminal cost for stock {} is not finite",
                level
            )));
        }

        Ok(Self {
            horizon,
            max_stock,
            terminal_cost,
            demand,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let demand = DemandDistribution::new(config.demand_distribution.clone())?;
        Self::new(
            config.horizon,
            config.max_stock,
            config.terminal_cost(),
            demand,
        )
    }

    pub fn demand(&self) -> &DemandDistribution {
        &self.demand
    }

    /// Runs backward induction from the last period to the first.
    ///
    /// The returned tables are indexed in forward time: row 0 is the first period.
    pub fn solve(&self) -> (PolicyTable, CostTable) {
        let mut policy_rows: Vec<Vec<u32>> = Vec::with_capacity(self.horizon);
        let mut cost_rows: Vec<Vec<f64>> = Vec::with_capacity(self.horizon);

        for period in (0..self.horizon).rev() {
            let next_period_cost = cost_rows
                .last()
                .map(Vec::as_slice)
                .unwrap_or(self.terminal_cost.as_slice());

            // States are independent within a period; collect keeps stock order.
            let solved: Vec<(u32, f64)> = (0..=self.max_stock)
                .into_par_iter()
                .map(|stock| best_order(stock, next_period_cost, &self.demand, self.max_stock))
                .collect();
            let (controls, costs): (Vec<u32>, Vec<f64>) = solved.into_iter().unzip();

            debug!(
                period,
                order_at_empty = controls[0],
                cost_at_empty = costs[0],
                "solved period"
            );

            policy_rows.push(controls);
            cost_rows.push(costs);
        }

        policy_rows.reverse();
        cost_rows.reverse();

        info!(
            horizon = self.horizon,
            max_stock = self.max_stock,
            "backward induction complete"
        );

        (
            PolicyTable::new(self.max_stock, policy_rows),
            CostTable::new(cost_rows),
        )
    }
}

/// Solves the problem in one call.
///
/// # Errors
/// `InvalidConfiguration` when the horizon is zero, the terminal cost length is not
/// `max_stock + 1`, or the demand probabilities are negative or do not sum to 1.
pub fn solve(
    horizon: usize,
    max_stock: u32,
    terminal_cost: Vec<f64>,
    demand_probabilities: Vec<f64>,
) -> Result<(PolicyTable, CostTable)> {
    let demand = DemandDistribution::new(demand_probabilities)?;
    let solver = PolicySolver::new(horizon, max_stock, terminal_cost, demand)?;
    Ok(solver.solve())
}
