// src/model/tables.rs

/// Optimal order quantity for every (period, stock) pair, indexed in forward time.
///
/// Built once by the solver and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    max_stock: u32,
    rows: Vec<Vec<u32>>,
}

impl PolicyTable {
    pub(crate) fn new(max_stock: u32, rows: Vec<Vec<u32>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == max_stock as usize + 1));
        Self { max_stock, rows }
    }

    pub fn horizon(&self) -> usize {
        self.rows.len()
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    /// Order quantity for `stock` units on hand at the start of `period`.
    pub fn action(&self, period: usize, stock: u32) -> Option<u32> {
        self.rows.get(period)?.get(stock as usize).copied()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }
}

/// Minimum expected cost-to-go for every (period, stock) pair, same shape as [`PolicyTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    rows: Vec<Vec<f64>>,
}

impl CostTable {
    pub(crate) fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn horizon(&self) -> usize {
        self.rows.len()
    }

    pub fn cost(&self, period: usize, stock: u32) -> Option<f64> {
        self.rows.get(period)?.get(stock as usize).copied()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_outside_the_table_are_none() {
        let table = PolicyTable::new(1, vec![vec![1, 0], vec![0, 0]]);
        assert_eq!(table.horizon(), 2);
        assert_eq!(table.action(0, 0), Some(1));
        assert_eq!(table.action(0, 2), None);
        assert_eq!(table.action(2, 0), None);
    }
}
