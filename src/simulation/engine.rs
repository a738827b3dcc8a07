// src/simulation/engine.rs

use crate::error::{InventoryError, Result};
use crate::strategy::traits::OrderPolicy;
use serde::Serialize;
use tracing::trace;

// Serialize so a trace can be written straight to CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    pub period: usize,
    pub action: u32,
    pub stock_after_order: u32,
    pub stock_after_demand: u32,
    pub demand: u32,
    /// Stock after ordering minus demand. Negative values are shortages.
    pub unmet_demand: i64,
}

/// Per-period records of one replay, in time order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationTrace {
    pub records: Vec<TraceRecord>,
}

impl SimulationTrace {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceRecord> {
        self.records.iter()
    }
}

/// Replays a fixed policy against a supplied demand sequence.
///
/// The simulator never generates demand; any sequence no longer than the policy's
/// horizon is accepted.
#[derive(Debug)]
pub struct PolicySimulator<'a, P: OrderPolicy + ?Sized> {
    policy: &'a P,
}

impl<'a, P: OrderPolicy + ?Sized> PolicySimulator<'a, P> {
    pub fn new(policy: &'a P) -> Self {
        Self { policy }
    }

    pub fn run(&self, demand: &[u32], initial_stock: u32) -> Result<SimulationTrace> {
        if demand.len() > self.policy.horizon() {
            return Err(InventoryError::InvalidConfiguration(format!(
                "demand sequence has {} periods but the policy covers {}",
                demand.len(),
                self.policy.horizon()
            )));
        }

        let mut records = Vec::with_capacity(demand.len());
        let mut stock = initial_stock;

        for (period, &period_demand) in demand.iter().enumerate() {
            let record = self.step(period, stock, period_demand)?;
            stock = record.stock_after_demand;
            records.push(record);
        }

        Ok(SimulationTrace { records })
    }

    fn step(&self, period: usize, stock: u32, demand: u32) -> Result<TraceRecord> {
        let max_stock = self.policy.max_stock();
        let out_of_range = |stock: u64| InventoryError::StateOutOfRange {
            period,
            stock,
            max_stock,
        };

        if stock > max_stock {
            return Err(out_of_range(stock as u64));
        }

        // 1. How much to buy?
        let action = self
            .policy
            .calculate_order(period, stock)
            .ok_or_else(|| out_of_range(stock as u64))?;

        // 2. Stock once the order arrives
        let stock_after_order = stock as u64 + action as u64;
        if stock_after_order > max_stock as u64 {
            return Err(out_of_range(stock_after_order));
        }
        let stock_after_order = stock_after_order as u32;

        // 3. Demand hits; shortage is lost, not carried
        let unmet_demand = stock_after_order as i64 - demand as i64;
        let stock_after_demand = stock_after_order.saturating_sub(demand);

        trace!(period, stock, action, demand, unmet_demand, "simulated period");

        Ok(TraceRecord {
            period,
            action,
            stock_after_order,
            stock_after_demand,
            demand,
            unmet_demand,
        })
    }
}

/// Replays `policy` against `demand` starting from `initial_stock` units.
///
/// # Errors
/// * `InvalidConfiguration` if `demand` is longer than the policy's horizon.
/// * `StateOutOfRange` if stock leaves `[0, max_stock]` during the replay.
pub fn simulate<P: OrderPolicy + ?Sized>(
    policy: &P,
    demand: &[u32],
    initial_stock: u32,
) -> Result<SimulationTrace> {
    PolicySimulator::new(policy).run(demand, initial_stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::implementations::BaseStockPolicy;
    use crate::strategy::optimization::solve;

    #[test]
    fn replays_example_policy() {
        // Optimal actions for the 3-period example are [2, 1, 0, 0] in every period.
        let (policy, _) = solve(3, 3, vec![0.0; 4], vec![0.0, 0.10, 0.70, 0.20]).unwrap();
        let trace = simulate(&policy, &[3, 1, 2], 0).unwrap();

        let expected = vec![
            TraceRecord {
                period: 0,
                action: 2,
                stock_after_order: 2,
                stock_after_demand: 0,
                demand: 3,
                unmet_demand: -1,
            },
            TraceRecord {
                period: 1,
                action: 2,
                stock_after_order: 2,
                stock_after_demand: 1,
                demand: 1,
                unmet_demand: 1,
            },
            TraceRecord {
                period: 2,
                action: 1,
                stock_after_order: 2,
                stock_after_demand: 0,
                demand: 2,
                unmet_demand: 0,
            },
        ];
        assert_eq!(trace.records, expected);
    }

    #[test]
    fn short_demand_sequence_is_accepted() {
        let (policy, _) = solve(5, 2, vec![0.0; 3], vec![0.5, 0.5]).unwrap();
        let trace = simulate(&policy, &[1, 1], 1).unwrap();
        assert_eq!(trace.len(), 2);
        assert!(simulate(&policy, &[], 0).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_initial_stock() {
        let (policy, _) = solve(2, 2, vec![0.0; 3], vec![0.5, 0.5]).unwrap();
        let err = simulate(&policy, &[1, 1], 3).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::StateOutOfRange {
                period: 0,
                stock: 3,
                max_stock: 2
            }
        ));
    }

    #[test]
    fn rejects_demand_longer_than_horizon() {
        let (policy, _) = solve(2, 2, vec![0.0; 3], vec![0.5, 0.5]).unwrap();
        assert!(matches!(
            simulate(&policy, &[1, 1, 1], 0),
            Err(InventoryError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn base_stock_replay_stays_in_range() {
        let policy = BaseStockPolicy::new(4, 4, 3);
        let trace = simulate(&policy, &[2, 5, 0], 1).unwrap();
        let actions: Vec<u32> = trace.iter().map(|r| r.action).collect();
        let unmet: Vec<i64> = trace.iter().map(|r| r.unmet_demand).collect();
        assert_eq!(actions, vec![3, 2, 4]);
        assert_eq!(unmet, vec![2, -1, 4]);
    }
}
