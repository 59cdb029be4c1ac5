use thiserror::Error;

/// Unified error type for `edgeworth` operations.
#[derive(Debug, Error)]
pub enum EconError {
    /// Raised when a model parameter falls outside its admissible range.
    #[error("parameter `{name}` must be {requirement}, found {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the admissible range.
        requirement: &'static str,
        /// The value that was actually supplied.
        value: f64,
    },

    /// Raised when demand is requested at a price that cannot support a budget.
    #[error("price of good 1 must be positive and finite, found {price}")]
    NonPositivePrice {
        /// The rejected price of good 1.
        price: f64,
    },

    /// Raised when the price adjustment loop exhausts its iteration cap.
    #[error(
        "equilibrium not found after {iterations} iterations; p1 = {p1}, excess demand {excess_demand}"
    )]
    DidNotConverge {
        /// Number of price updates performed before termination.
        iterations: usize,
        /// Price of good 1 when the loop stopped.
        p1: f64,
        /// Excess demand for good 1 at that price.
        excess_demand: f64,
    },

    /// Raised when a search over candidate allocations or prices retains nothing.
    #[error("no feasible allocation found during {context}")]
    NoFeasibleAllocation {
        /// The search that came up empty.
        context: &'static str,
    },
}

impl EconError {
    /// Helper to format an [`InvalidParameter`](EconError::InvalidParameter) error.
    pub fn invalid_parameter(name: &'static str, requirement: &'static str, value: f64) -> Self {
        Self::InvalidParameter {
            name,
            requirement,
            value,
        }
    }

    /// Helper for searches that end up with an empty candidate set.
    pub fn no_feasible(context: &'static str) -> Self {
        Self::NoFeasibleAllocation { context }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, EconError>;
