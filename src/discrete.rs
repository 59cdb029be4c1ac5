//! Grid searches over Edgeworth-box allocations.
//!
//! Every grid point `(x1A, x2A)` leaves agent B the residual
//! `(1 - x1A, 1 - x2A)` of the unit total supply. Points are scanned with
//! `x1A` in the outer loop and `x2A` in the inner loop; rows are evaluated
//! in parallel but results always keep that scan order.

use rayon::prelude::*;
use serde::Serialize;

use crate::economy::{Bundle, ExchangeEconomy};
use crate::error::{EconError, Result};
use crate::params::TOTAL_SUPPLY;

/// Points per axis used by [`solve_discrete`].
pub const DEFAULT_GRID_SIZE: usize = 75;

/// `n` evenly spaced points on `[0, 1]`, endpoints included.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| TOTAL_SUPPLY * i as f64 / last).collect()
        }
    }
}

/// Retained individually rational allocations for agent A, as parallel
/// coordinate sequences in scan order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiscreteAllocations {
    /// Agent A's good-1 holdings of the retained points.
    pub x1a: Vec<f64>,
    /// Agent A's good-2 holdings of the retained points.
    pub x2a: Vec<f64>,
}

impl DiscreteAllocations {
    /// Number of retained allocations.
    pub fn len(&self) -> usize {
        self.x1a.len()
    }

    /// Whether no grid point was retained.
    pub fn is_empty(&self) -> bool {
        self.x1a.is_empty()
    }

    /// Agent A's retained bundles in scan order.
    pub fn bundles(&self) -> impl Iterator<Item = Bundle> + '_ {
        self.x1a
            .iter()
            .zip(self.x2a.iter())
            .map(|(&x1, &x2)| Bundle::new(x1, x2))
    }

    /// Allocation in the retained set that agent A prefers most, i.e. the
    /// outcome when A chooses B's allocation subject to B not losing out.
    ///
    /// Ties resolve to the earliest point in scan order.
    pub fn market_maker_optimum(&self, economy: &ExchangeEconomy) -> Result<AllocationChoice> {
        let mut best: Option<AllocationChoice> = None;
        for bundle in self.bundles() {
            let choice = AllocationChoice::for_agent_a(economy, bundle);
            if best.map_or(true, |current| choice.utility_a > current.utility_a) {
                best = Some(choice);
            }
        }
        best.ok_or_else(|| EconError::no_feasible("market maker search over the retained set"))
    }
}

/// An allocation of the whole endowment and the utilities it yields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AllocationChoice {
    /// Agent A's bundle.
    pub allocation_a: Bundle,
    /// Agent B's bundle, the residual of the total supply.
    pub allocation_b: Bundle,
    /// Agent A's utility at `allocation_a`.
    pub utility_a: f64,
    /// Agent B's utility at `allocation_b`.
    pub utility_b: f64,
}

impl AllocationChoice {
    fn for_agent_a(economy: &ExchangeEconomy, allocation_a: Bundle) -> Self {
        let allocation_b = Bundle::new(TOTAL_SUPPLY, TOTAL_SUPPLY) - allocation_a;
        Self {
            allocation_a,
            allocation_b,
            utility_a: economy.utility_a(allocation_a.x, allocation_a.y),
            utility_b: economy.utility_b(allocation_b.x, allocation_b.y),
        }
    }

    /// Combined utility of both agents.
    pub fn total_utility(&self) -> f64 {
        self.utility_a + self.utility_b
    }
}

/// Allocations on the default 75x75 grid that leave both agents at least as
/// well off as their initial endowment.
pub fn solve_discrete(economy: &ExchangeEconomy) -> DiscreteAllocations {
    solve_discrete_with(economy, DEFAULT_GRID_SIZE)
}

/// [`solve_discrete`] on an `n x n` grid.
pub fn solve_discrete_with(economy: &ExchangeEconomy, n: usize) -> DiscreteAllocations {
    let endowment = economy.endowment();
    let initial_a = endowment.agent_a();
    let initial_b = endowment.agent_b();
    let reservation_a = economy.utility_a(initial_a.x, initial_a.y);
    let reservation_b = economy.utility_b(initial_b.x, initial_b.y);

    let grid = linspace(n);
    let rows: Vec<Vec<AllocationChoice>> = grid
        .par_iter()
        .map(|&x1| {
            grid.iter()
                .map(|&x2| AllocationChoice::for_agent_a(economy, Bundle::new(x1, x2)))
                .filter(|choice| {
                    choice.utility_a >= reservation_a && choice.utility_b >= reservation_b
                })
                .collect()
        })
        .collect();

    let mut retained = DiscreteAllocations::default();
    for choice in rows.into_iter().flatten() {
        retained.x1a.push(choice.allocation_a.x);
        retained.x2a.push(choice.allocation_a.y);
    }
    log::debug!(
        "retained {} of {} grid allocations",
        retained.len(),
        grid.len() * grid.len()
    );
    retained
}

/// Grid allocation maximizing the sum of both agents' utilities.
pub fn utilitarian_optimum(economy: &ExchangeEconomy, n: usize) -> Result<AllocationChoice> {
    let grid = linspace(n);
    let mut best: Option<AllocationChoice> = None;
    for &x1 in &grid {
        for &x2 in &grid {
            let choice = AllocationChoice::for_agent_a(economy, Bundle::new(x1, x2));
            if best.map_or(true, |current| choice.total_utility() > current.total_utility()) {
                best = Some(choice);
            }
        }
    }
    best.ok_or_else(|| EconError::no_feasible("utilitarian grid search"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_endpoints() {
        let points = linspace(75);
        assert_eq!(points.len(), 75);
        assert_eq!(points[0], 0.0);
        assert_eq!(points[74], 1.0);
        assert_eq!(linspace(1), vec![0.0]);
        assert!(linspace(0).is_empty());
    }

    #[test]
    fn retained_points_are_individually_rational() {
        let economy = ExchangeEconomy::default();
        let retained = solve_discrete(&economy);
        assert_eq!(retained.x1a.len(), retained.x2a.len());
        assert!(!retained.is_empty());

        let floor_a = economy.utility_a(0.8, 0.3);
        let floor_b = economy.utility_b(1.0 - 0.8, 1.0 - 0.3);
        for bundle in retained.bundles() {
            assert!(economy.utility_a(bundle.x, bundle.y) >= floor_a);
            assert!(economy.utility_b(1.0 - bundle.x, 1.0 - bundle.y) >= floor_b);
        }
    }

    #[test]
    fn rejected_points_fail_a_reservation_utility() {
        let economy = ExchangeEconomy::default();
        let n = 20;
        let retained = solve_discrete_with(&economy, n);
        let kept: Vec<(f64, f64)> = retained
            .bundles()
            .map(|bundle| (bundle.x, bundle.y))
            .collect();

        let floor_a = economy.utility_a(0.8, 0.3);
        let floor_b = economy.utility_b(1.0 - 0.8, 1.0 - 0.3);
        let mut expected = Vec::new();
        for &x1 in &linspace(n) {
            for &x2 in &linspace(n) {
                if economy.utility_a(x1, x2) >= floor_a
                    && economy.utility_b(1.0 - x1, 1.0 - x2) >= floor_b
                {
                    expected.push((x1, x2));
                }
            }
        }
        assert_eq!(kept, expected);
    }

    #[test]
    fn market_maker_never_leaves_agent_a_worse_off() {
        let economy = ExchangeEconomy::default();
        let retained = solve_discrete(&economy);
        let choice = retained.market_maker_optimum(&economy).unwrap();
        assert!(choice.utility_a >= economy.utility_a(0.8, 0.3));
        assert!(choice.utility_b >= economy.utility_b(1.0 - 0.8, 1.0 - 0.3));
        for bundle in retained.bundles() {
            assert!(economy.utility_a(bundle.x, bundle.y) <= choice.utility_a);
        }

        let empty = DiscreteAllocations::default();
        assert!(matches!(
            empty.market_maker_optimum(&economy),
            Err(EconError::NoFeasibleAllocation { .. })
        ));
    }

    #[test]
    fn utilitarian_optimum_dominates_endowment_total() {
        let economy = ExchangeEconomy::default();
        let choice = utilitarian_optimum(&economy, 50).unwrap();
        let at_endowment = economy.utility_a(0.8, 0.3) + economy.utility_b(1.0 - 0.8, 1.0 - 0.3);
        assert!(choice.total_utility() >= at_endowment);
        assert_relative_eq!(
            choice.allocation_a + choice.allocation_b,
            Bundle::new(1.0, 1.0),
            epsilon = 1e-12
        );
    }
}
