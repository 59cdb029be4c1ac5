//! Price-grid analyses: the excess-demand curve and price setting by agent A.

use serde::Serialize;

use crate::economy::{Bundle, ExcessDemand, ExchangeEconomy};
use crate::error::{EconError, Result};
use crate::params::TOTAL_SUPPLY;

/// Lowest price on the grid produced by [`price_grid`].
pub const PRICE_GRID_START: f64 = 0.5;
/// Width of the price interval covered by [`price_grid`].
pub const PRICE_GRID_SPAN: f64 = 2.0;

/// Prices `0.5 + 2i/n` for `i = 0..=n`.
pub fn price_grid(n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![PRICE_GRID_START];
    }
    (0..=n)
        .map(|i| PRICE_GRID_START + PRICE_GRID_SPAN * i as f64 / n as f64)
        .collect()
}

/// Excess demand for both goods at every price in `prices`.
pub fn excess_demand_curve(
    economy: &ExchangeEconomy,
    prices: &[f64],
) -> Result<Vec<(f64, ExcessDemand)>> {
    prices
        .iter()
        .map(|&p1| Ok((p1, economy.check_market_clearing(p1)?)))
        .collect()
}

/// Outcome when agent A sets the price and B trades at it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PriceSetting {
    /// Price of good 1 chosen by agent A.
    pub p1: f64,
    /// What remains for A after B's purchases.
    pub allocation_a: Bundle,
    /// Agent B's demand at `p1`.
    pub allocation_b: Bundle,
    /// Agent A's utility at `allocation_a`.
    pub utility_a: f64,
}

/// Price in `prices` that maximizes A's utility when B consumes its demand
/// and A keeps the rest.
///
/// Prices at which B would demand more than the total supply of a good are
/// skipped.
pub fn price_setting_optimum(economy: &ExchangeEconomy, prices: &[f64]) -> Result<PriceSetting> {
    let supply = Bundle::new(TOTAL_SUPPLY, TOTAL_SUPPLY);
    let mut best: Option<PriceSetting> = None;

    for &p1 in prices {
        let allocation_b = economy.demand_b(p1)?;
        let allocation_a = supply - allocation_b;
        if allocation_a.x < 0.0 || allocation_a.y < 0.0 {
            log::trace!("skipping p1 = {p1}: B demands more than the total supply");
            continue;
        }
        let utility_a = economy.utility_a(allocation_a.x, allocation_a.y);
        if best.map_or(true, |current| utility_a > current.utility_a) {
            best = Some(PriceSetting {
                p1,
                allocation_a,
                allocation_b,
                utility_a,
            });
        }
    }

    best.ok_or_else(|| EconError::no_feasible("price setting over the price grid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn price_grid_spans_half_to_two_and_a_half() {
        let prices = price_grid(75);
        assert_eq!(prices.len(), 76);
        assert_relative_eq!(prices[0], 0.5);
        assert_relative_eq!(prices[75], 2.5, epsilon = 1e-12);
        assert_eq!(price_grid(0), vec![0.5]);
    }

    #[test]
    fn excess_demand_curve_obeys_walras_law() {
        let economy = ExchangeEconomy::default();
        let curve = excess_demand_curve(&economy, &price_grid(20)).unwrap();
        assert_eq!(curve.len(), 21);
        for (p1, excess) in curve {
            assert_relative_eq!(p1 * excess.z1 + excess.z2, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn price_setter_picks_best_feasible_price() {
        let economy = ExchangeEconomy::default();
        let prices = price_grid(75);
        let outcome = price_setting_optimum(&economy, &prices).unwrap();
        assert!(prices.contains(&outcome.p1));

        for &p1 in &prices {
            let residual = Bundle::new(1.0, 1.0) - economy.demand_b(p1).unwrap();
            if residual.x >= 0.0 && residual.y >= 0.0 {
                assert!(economy.utility_a(residual.x, residual.y) <= outcome.utility_a);
            }
        }
    }

    #[test]
    fn price_setter_fails_when_no_price_is_feasible() {
        let economy = ExchangeEconomy::default();
        // B demands more than one unit of good 1 at very low prices.
        let result = price_setting_optimum(&economy, &[0.01, 0.02]);
        assert!(matches!(
            result,
            Err(EconError::NoFeasibleAllocation { .. })
        ));
    }
}
