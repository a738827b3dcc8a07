// src/strategy/traits.rs

use std::fmt::Debug;

/// Decision rule for how much to order at the start of a period.
///
/// `Send` + `Sync` so one policy can back many concurrent simulation runs.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Order quantity for `stock` units on hand at the start of `period`.
    ///
    /// Returns `None` when the pair lies outside the policy's domain.
    fn calculate_order(&self, period: usize, stock: u32) -> Option<u32>;

    /// Upper bound on stock the policy was built for.
    fn max_stock(&self) -> u32;

    /// Number of periods the policy covers.
    fn horizon(&self) -> usize;
}
