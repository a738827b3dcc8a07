//! Property-based tests for the solver and the simulator.

use proptest::prelude::*;

use inventory_dp::{simulate, solve, OrderPolicy};

/// Strategy: a normalized demand distribution over 1-5 levels, zeros allowed.
fn distribution_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u32..10, 1..=5)
        .prop_filter("at least one level needs weight", |w| w.iter().any(|x| *x > 0))
        .prop_map(|weights| {
            let total: u32 = weights.iter().sum();
            weights.iter().map(|w| *w as f64 / total as f64).collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Tables have shape [horizon][max_stock + 1] and actions stay feasible
    #[test]
    fn tables_have_expected_shape(
        horizon in 1usize..6,
        max_stock in 0u32..6,
        dist in distribution_strategy(),
    ) {
        let terminal = vec![0.0; max_stock as usize + 1];
        let (policy, cost) = solve(horizon, max_stock, terminal, dist).unwrap();

        prop_assert_eq!(policy.horizon(), horizon);
        prop_assert_eq!(cost.horizon(), horizon);
        for (period, row) in policy.rows().iter().enumerate() {
            prop_assert_eq!(row.len(), max_stock as usize + 1);
            prop_assert_eq!(cost.rows()[period].len(), max_stock as usize + 1);
            for (stock, action) in row.iter().enumerate() {
                prop_assert!(*action <= max_stock - stock as u32,
                    "period={period} stock={stock} action={action}");
            }
        }
    }

    // 2. Solving is deterministic down to the bit
    #[test]
    fn solve_is_idempotent(
        horizon in 1usize..6,
        max_stock in 0u32..6,
        dist in distribution_strategy(),
    ) {
        let terminal: Vec<f64> = (0..=max_stock).map(|s| s as f64 * 0.5).collect();
        let first = solve(horizon, max_stock, terminal.clone(), dist.clone()).unwrap();
        let second = solve(horizon, max_stock, terminal, dist).unwrap();
        prop_assert_eq!(&first.0, &second.0);
        let bits = |rows: &[Vec<f64>]| -> Vec<u64> {
            rows.iter().flatten().map(|c| c.to_bits()).collect()
        };
        prop_assert_eq!(bits(first.1.rows()), bits(second.1.rows()));
    }

    // 3. With zero terminal cost, more periods left never costs less
    #[test]
    fn cost_to_go_shrinks_toward_the_end(
        horizon in 2usize..6,
        max_stock in 0u32..5,
        dist in distribution_strategy(),
    ) {
        let terminal = vec![0.0; max_stock as usize + 1];
        let (_, cost) = solve(horizon, max_stock, terminal, dist).unwrap();
        for period in 0..horizon - 1 {
            for stock in 0..=max_stock {
                let now = cost.cost(period, stock).unwrap();
                let later = cost.cost(period + 1, stock).unwrap();
                prop_assert!(now >= later - 1e-9, "period={period} stock={stock}");
            }
        }
    }

    // 4. Replays stay within [0, max_stock] and follow the transition rule
    #[test]
    fn replay_respects_transition(
        max_stock in 0u32..6,
        dist in distribution_strategy(),
        demand in prop::collection::vec(0u32..8, 0..8),
        initial in 0u32..6,
    ) {
        let initial = initial.min(max_stock);
        let terminal = vec![0.0; max_stock as usize + 1];
        let (policy, _) = solve(8, max_stock, terminal, dist).unwrap();

        let trace = simulate(&policy, &demand, initial).unwrap();
        prop_assert_eq!(trace.len(), demand.len());

        let mut stock = initial;
        for record in trace.iter() {
            prop_assert_eq!(record.action, policy.calculate_order(record.period, stock).unwrap());
            prop_assert_eq!(record.stock_after_order, stock + record.action);
            prop_assert!(record.stock_after_order <= max_stock);
            prop_assert_eq!(
                record.unmet_demand,
                record.stock_after_order as i64 - record.demand as i64
            );
            prop_assert_eq!(record.stock_after_demand as i64, record.unmet_demand.max(0));
            stock = record.stock_after_demand;
        }

        // Same inputs, same trace
        prop_assert_eq!(trace, simulate(&policy, &demand, initial).unwrap());
    }
}
