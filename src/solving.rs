//! Equilibrium solvers, the solved equilibrium, and its textual report.

use std::fmt;

use serde::Serialize;

use crate::economy::{Bundle, ExchangeEconomy};
use crate::error::{EconError, Result};
use crate::params::Parameters;

/// Strategy that locates the market-clearing price of good 1.
pub trait EquilibriumSolver {
    /// Returns the equilibrium of `economy`, starting from `p1_guess` where applicable.
    fn solve(&self, economy: &ExchangeEconomy, p1_guess: f64) -> Result<Equilibrium>;
}

/// Fixed-step damped price adjustment: `p1 <- p1 + kappa * Z1 / 2`.
///
/// Tolerance, iteration cap, and step size come from the economy's
/// [`Parameters`]. Convergence is not guaranteed for every step size.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tatonnement;

impl EquilibriumSolver for Tatonnement {
    fn solve(&self, economy: &ExchangeEconomy, p1_guess: f64) -> Result<Equilibrium> {
        let params = economy.params();
        let mut p1 = p1_guess;
        let mut iteration = 0usize;

        let excess_demand = loop {
            let z1 = economy.check_market_clearing(p1)?.z1;

            if z1.abs() < params.eps || iteration >= params.maxiter {
                log::info!("{iteration:3}: p1 = {p1:12.8} -> excess demand -> {z1:14.8}");
                break z1;
            }

            log::debug!("{iteration:3}: p1 = {p1:12.8}, excess demand {z1:14.8}");
            p1 += params.kappa * z1 / 2.0;
            iteration += 1;

            // An overshooting step leaves the positive prices; the loop cannot recover.
            if !(p1.is_finite() && p1 > 0.0) {
                log::warn!("price left the positive range after {iteration} iterations: p1 = {p1}");
                return Err(EconError::DidNotConverge {
                    iterations: iteration,
                    p1,
                    excess_demand: z1,
                });
            }
        };

        if excess_demand.abs() < params.eps {
            Equilibrium::at_price(economy, p1, iteration)
        } else {
            log::warn!("equilibrium not found after {iteration} iterations");
            Err(EconError::DidNotConverge {
                iterations: iteration,
                p1,
                excess_demand,
            })
        }
    }
}

/// Analytic equilibrium of the Cobb-Douglas economy; ignores the initial guess.
///
/// Setting `Z1 = 0` gives `p1 = (alpha*w2A + beta*(1-w2A)) / (1 - alpha*w1A - beta*(1-w1A))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosedForm;

impl EquilibriumSolver for ClosedForm {
    fn solve(&self, economy: &ExchangeEconomy, _p1_guess: f64) -> Result<Equilibrium> {
        let params = economy.params();
        let endowment = economy.endowment();
        let numerator = params.alpha * endowment.w2a + params.beta * (1.0 - endowment.w2a);
        let denominator =
            1.0 - params.alpha * endowment.w1a - params.beta * (1.0 - endowment.w1a);
        Equilibrium::at_price(economy, numerator / denominator, 0)
    }
}

/// A market-clearing price together with the excess demands realized there.
#[derive(Clone, Debug, Serialize)]
pub struct Equilibrium {
    /// Price of good 1 relative to the numeraire good 2.
    pub p1_star: f64,
    /// Excess demand for good 1 at `p1_star`.
    pub z1: f64,
    /// Excess demand for good 2 at `p1_star`.
    pub z2: f64,
    /// Number of price updates the solver performed.
    pub iterations: usize,
    /// Parameters the equilibrium was solved under.
    pub parameters: Parameters,
}

impl Equilibrium {
    /// Records the equilibrium at `p1_star`, warning if good 2 fails to clear.
    fn at_price(economy: &ExchangeEconomy, p1_star: f64, iterations: usize) -> Result<Self> {
        let excess = economy.check_market_clearing(p1_star)?;
        let equilibrium = Self {
            p1_star,
            z1: excess.z1,
            z2: excess.z2,
            iterations,
            parameters: *economy.params(),
        };
        if !equilibrium.walras_consistent() {
            log::warn!("the market for good 2 was not cleared: Z2 = {}", equilibrium.z2);
        }
        Ok(equilibrium)
    }

    /// Whether good 2 also clears within tolerance, as Walras' law predicts.
    pub fn walras_consistent(&self) -> bool {
        self.z2.abs() < self.parameters.eps
    }

    fn economy(&self) -> Result<ExchangeEconomy> {
        ExchangeEconomy::new(self.parameters)
    }

    /// Agent A's consumption at the equilibrium price.
    pub fn allocation_a(&self) -> Result<Bundle> {
        self.economy()?.demand_a(self.p1_star)
    }

    /// Agent B's consumption at the equilibrium price.
    pub fn allocation_b(&self) -> Result<Bundle> {
        self.economy()?.demand_b(self.p1_star)
    }

    /// Builds the printable solution report.
    pub fn solution(&self) -> Result<SolutionReport> {
        Ok(SolutionReport {
            p1_star: self.p1_star,
            allocation_a: self.allocation_a()?,
            allocation_b: self.allocation_b()?,
        })
    }
}

/// Equilibrium price and the allocation each agent consumes there.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolutionReport {
    /// Equilibrium price of good 1.
    pub p1_star: f64,
    /// Agent A's demand at `p1_star`.
    pub allocation_a: Bundle,
    /// Agent B's demand at `p1_star`.
    pub allocation_b: Bundle,
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution to market equilibrium:")?;
        writeln!(f, "p1 = {:5.3}", self.p1_star)?;
        writeln!(f)?;
        writeln!(f, "The allocations are:")?;
        writeln!(
            f,
            "(x1A, x2A) = ({:.6}, {:.6})",
            self.allocation_a.x, self.allocation_a.y
        )?;
        write!(
            f,
            "(x1B, x2B) = ({:.6}, {:.6})",
            self.allocation_b.x, self.allocation_b.y
        )
    }
}
