// src/strategy/implementations.rs

use crate::model::tables::PolicyTable;
use crate::strategy::traits::OrderPolicy;

// =========================================================================
// 1. Optimal Policy (Backward Induction Table)
// =========================================================================

impl OrderPolicy for PolicyTable {
    fn calculate_order(&self, period: usize, stock: u32) -> Option<u32> {
        self.action(period, stock)
    }

    fn max_stock(&self) -> u32 {
        PolicyTable::max_stock(self)
    }

    fn horizon(&self) -> usize {
        PolicyTable::horizon(self)
    }
}

// =========================================================================
// 2. Base Stock Policy (Order-Up-To)
// =========================================================================

/// Heuristic baseline that ignores the cost structure.
///
/// Every period it orders enough to bring stock up to `target`, capped at
/// `max_stock`. If stock is already at or above the target it orders 0.
#[derive(Debug, Clone)]
pub struct BaseStockPolicy {
    target: u32,
    max_stock: u32,
    horizon: usize,
}

impl BaseStockPolicy {
    pub fn new(target: u32, max_stock: u32, horizon: usize) -> Self {
        Self {
            target: target.min(max_stock),
            max_stock,
            horizon,
        }
    }

    /// Order-up-to level at the rounded mean demand.
    pub fn at_mean_demand(mean_demand: f64, max_stock: u32, horizon: usize) -> Self {
        let target = if mean_demand <= 0.0 {
            0
        } else {
            mean_demand.round() as u32
        };
        Self::new(target, max_stock, horizon)
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

impl OrderPolicy for BaseStockPolicy {
    fn calculate_order(&self, period: usize, stock: u32) -> Option<u32> {
        if period >= self.horizon || stock > self.max_stock {
            return None;
        }
        Some(self.target.saturating_sub(stock))
    }

    fn max_stock(&self) -> u32 {
        self.max_stock
    }

    fn horizon(&self) -> usize {
        self.horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_stock_orders_up_to_target() {
        let policy = BaseStockPolicy::new(6, 10, 5);
        assert_eq!(policy.calculate_order(0, 0), Some(6));
        assert_eq!(policy.calculate_order(4, 4), Some(2));
        assert_eq!(policy.calculate_order(1, 9), Some(0));
        assert_eq!(policy.calculate_order(5, 0), None);
        assert_eq!(policy.calculate_order(0, 11), None);
    }

    #[test]
    fn base_stock_target_is_capped() {
        let policy = BaseStockPolicy::at_mean_demand(9.6, 8, 3);
        assert_eq!(policy.target(), 8);
        assert_eq!(BaseStockPolicy::at_mean_demand(-1.0, 8, 3).target(), 0);
    }
}
