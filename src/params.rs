//! Preference, endowment, and solver parameters for the two-agent economy.

use serde::{Deserialize, Serialize};

use crate::economy::Bundle;
use crate::error::{EconError, Result};

/// Total supply of each good, shared between agents A and B.
pub const TOTAL_SUPPLY: f64 = 1.0;

/// Agent A's endowment; agent B holds the residual of the unit total supply.
///
/// Deserialization goes through [`Endowment::new`], so both holdings stay in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EndowmentFields")]
pub struct Endowment {
    /// Agent A's endowment of good 1.
    pub w1a: f64,
    /// Agent A's endowment of good 2.
    pub w2a: f64,
}

impl Endowment {
    /// Creates an endowment after checking both holdings lie in `[0, 1]`.
    pub fn new(w1a: f64, w2a: f64) -> Result<Self> {
        check_share("w1A", w1a)?;
        check_share("w2A", w2a)?;
        Ok(Self { w1a, w2a })
    }

    /// Agent A's initial bundle.
    pub fn agent_a(&self) -> Bundle {
        Bundle::new(self.w1a, self.w2a)
    }

    /// Agent B's initial bundle, `(1 - w1A, 1 - w2A)`.
    pub fn agent_b(&self) -> Bundle {
        Bundle::new(TOTAL_SUPPLY - self.w1a, TOTAL_SUPPLY - self.w2a)
    }
}

#[derive(Deserialize)]
struct EndowmentFields {
    w1a: f64,
    w2a: f64,
}

impl TryFrom<EndowmentFields> for Endowment {
    type Error = EconError;

    fn try_from(fields: EndowmentFields) -> Result<Self> {
        Self::new(fields.w1a, fields.w2a)
    }
}

/// Model configuration: Cobb-Douglas exponents, agent A's endowment, and
/// the tuning constants of the price adjustment loop.
///
/// Missing fields in serialized configs fall back to [`Parameters::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Agent A's exponent on good 1.
    pub alpha: f64,
    /// Agent B's exponent on good 1.
    pub beta: f64,
    /// Agent A's endowment of good 1.
    pub w1a: f64,
    /// Agent A's endowment of good 2.
    pub w2a: f64,
    /// Convergence tolerance on excess demand.
    pub eps: f64,
    /// Maximum number of price updates.
    pub maxiter: usize,
    /// Step-size scalar for price adjustment.
    pub kappa: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            alpha: 1.0 / 3.0,
            beta: 2.0 / 3.0,
            w1a: 0.8,
            w2a: 0.3,
            eps: 1e-8,
            maxiter: 1_000,
            kappa: 0.1,
        }
    }
}

impl Parameters {
    /// Starts a builder seeded with the default parameters.
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Agent A's endowment as a standalone value.
    pub fn endowment(&self) -> Endowment {
        Endowment {
            w1a: self.w1a,
            w2a: self.w2a,
        }
    }

    /// Returns a copy with agent A's endowment replaced.
    pub fn with_endowment(mut self, endowment: Endowment) -> Self {
        self.w1a = endowment.w1a;
        self.w2a = endowment.w2a;
        self
    }

    /// Checks every field against its admissible range.
    pub fn validate(&self) -> Result<()> {
        check_exponent("alpha", self.alpha)?;
        check_exponent("beta", self.beta)?;
        check_share("w1A", self.w1a)?;
        check_share("w2A", self.w2a)?;
        check_positive("eps", self.eps)?;
        check_positive("kappa", self.kappa)?;
        Ok(())
    }
}

/// Builder that validates ranges before producing [`Parameters`].
#[derive(Clone, Debug, Default)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl ParametersBuilder {
    /// Sets agent A's exponent on good 1.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Sets agent B's exponent on good 1.
    pub fn beta(mut self, beta: f64) -> Self {
        self.params.beta = beta;
        self
    }

    /// Sets agent A's endowment of both goods.
    pub fn endowment(mut self, w1a: f64, w2a: f64) -> Self {
        self.params.w1a = w1a;
        self.params.w2a = w2a;
        self
    }

    /// Sets the convergence tolerance.
    pub fn eps(mut self, eps: f64) -> Self {
        self.params.eps = eps;
        self
    }

    /// Sets the iteration cap. Zero is allowed and only evaluates the initial guess.
    pub fn maxiter(mut self, maxiter: usize) -> Self {
        self.params.maxiter = maxiter;
        self
    }

    /// Sets the price adjustment step size.
    pub fn kappa(mut self, kappa: f64) -> Self {
        self.params.kappa = kappa;
        self
    }

    /// Finalizes construction after validating every field.
    pub fn build(self) -> Result<Parameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}

fn check_exponent(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(EconError::invalid_parameter(name, "in the open interval (0, 1)", value))
    }
}

fn check_share(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=TOTAL_SUPPLY).contains(&value) {
        Ok(())
    } else {
        Err(EconError::invalid_parameter(name, "in [0, 1]", value))
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EconError::invalid_parameter(name, "positive and finite", value))
    }
}
