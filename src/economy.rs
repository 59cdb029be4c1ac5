//! Agent primitives: Cobb-Douglas utility, Marshallian demand, and excess demand.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{EconError, Result};
use crate::params::{Endowment, Parameters, TOTAL_SUPPLY};
use crate::solving::{Equilibrium, EquilibriumSolver, Tatonnement};

/// Consumption bundle `(x1, x2)`.
pub type Bundle = Vector2<f64>;

/// Price of good 2, which serves as numeraire.
pub const NUMERAIRE_PRICE: f64 = 1.0;

/// Aggregate excess demand for both goods at a given price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExcessDemand {
    /// Excess demand for good 1.
    pub z1: f64,
    /// Excess demand for good 2.
    pub z2: f64,
}

impl ExcessDemand {
    /// Returns true when both markets clear within `tolerance`.
    pub fn clears(&self, tolerance: f64) -> bool {
        self.z1.abs() < tolerance && self.z2.abs() < tolerance
    }
}

/// Edgeworth-box economy with two Cobb-Douglas agents and unit total supply.
///
/// The value is an immutable snapshot of [`Parameters`]; operations that
/// change the endowment return a new economy.
#[derive(Clone, Debug, Default)]
pub struct ExchangeEconomy {
    params: Parameters,
}

impl ExchangeEconomy {
    /// Builds an economy after validating the parameters.
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Accessor for the parameter snapshot.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Agent A's endowment.
    pub fn endowment(&self) -> Endowment {
        self.params.endowment()
    }

    /// Returns a new economy with agent A's endowment replaced.
    pub fn with_endowment(&self, w1a: f64, w2a: f64) -> Result<Self> {
        let endowment = Endowment::new(w1a, w2a)?;
        Ok(Self {
            params: self.params.with_endowment(endowment),
        })
    }

    /// Agent A's utility `x1^alpha * x2^(1 - alpha)`. Inputs are not range checked.
    pub fn utility_a(&self, x1: f64, x2: f64) -> f64 {
        cobb_douglas(self.params.alpha, x1, x2)
    }

    /// Agent B's utility `x1^beta * x2^(1 - beta)`. Inputs are not range checked.
    pub fn utility_b(&self, x1: f64, x2: f64) -> f64 {
        cobb_douglas(self.params.beta, x1, x2)
    }

    /// Agent A's utility-maximizing bundle given the price of good 1.
    pub fn demand_a(&self, p1: f64) -> Result<Bundle> {
        marshallian_demand(self.params.alpha, &self.endowment().agent_a(), p1)
    }

    /// Agent B's utility-maximizing bundle given the price of good 1.
    pub fn demand_b(&self, p1: f64) -> Result<Bundle> {
        marshallian_demand(self.params.beta, &self.endowment().agent_b(), p1)
    }

    /// Aggregate excess demand for both goods at price `p1`.
    pub fn check_market_clearing(&self, p1: f64) -> Result<ExcessDemand> {
        let supply = Bundle::new(TOTAL_SUPPLY, TOTAL_SUPPLY);
        let excess = self.demand_a(p1)? + self.demand_b(p1)? - supply;
        Ok(ExcessDemand {
            z1: excess.x,
            z2: excess.y,
        })
    }

    /// Runs the tâtonnement solver from `p1_guess` on a copy of the economy
    /// endowed with `(w1a, w2a)`.
    ///
    /// `p2` is accepted for call-site compatibility only: good 2 is always
    /// the numeraire, and any other value is ignored with a warning.
    pub fn find_equilibrium(
        &self,
        p1_guess: f64,
        p2: f64,
        w1a: f64,
        w2a: f64,
    ) -> Result<Equilibrium> {
        if p2 != NUMERAIRE_PRICE {
            log::warn!("ignoring p2 = {p2}; good 2 is the numeraire with price {NUMERAIRE_PRICE}");
        }
        self.with_endowment(w1a, w2a)?
            .find_equilibrium_with(&Tatonnement, p1_guess)
    }

    /// Finds an equilibrium with an arbitrary solver and the current endowment.
    pub fn find_equilibrium_with<S: EquilibriumSolver + ?Sized>(
        &self,
        solver: &S,
        p1_guess: f64,
    ) -> Result<Equilibrium> {
        solver.solve(self, p1_guess)
    }
}

fn cobb_douglas(exponent: f64, x1: f64, x2: f64) -> f64 {
    x1.powf(exponent) * x2.powf(1.0 - exponent)
}

/// Closed-form Cobb-Douglas demand: a fixed budget share `exponent` goes to good 1.
fn marshallian_demand(exponent: f64, endowment: &Bundle, p1: f64) -> Result<Bundle> {
    if !(p1.is_finite() && p1 > 0.0) {
        return Err(EconError::NonPositivePrice { price: p1 });
    }
    let prices = Vector2::new(p1, NUMERAIRE_PRICE);
    let income = prices.dot(endowment);
    Ok(Bundle::new(
        exponent * income / p1,
        (1.0 - exponent) * income / NUMERAIRE_PRICE,
    ))
}
