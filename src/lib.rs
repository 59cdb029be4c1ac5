//! Two-good, two-agent pure exchange economy in an Edgeworth box.
//!
//! Agents A and B hold Cobb-Douglas preferences and split a total supply of
//! one unit of each good. The crate provides
//!
//! - validated model configuration (`params` module),
//! - utility, Marshallian demand, and excess demand (`economy` module),
//! - tâtonnement and closed-form equilibrium solvers (`solving` module),
//! - grid searches for individually rational and planner-optimal
//!   allocations (`discrete` module),
//! - price-grid analyses such as price setting by agent A (`pricing` module), and
//! - random endowment draws with batch equilibria (`sampling` module).
//!
//! Good 2 is the numeraire throughout, so every price is the price of good 1.
//! The library never prints: solver progress and advisories go through the
//! [`log`] facade and the host application chooses the logger.
//!
//! # Quick start
//!
//! ```no_run
//! use edgeworth::{ExchangeEconomy, Parameters};
//! use edgeworth::discrete::solve_discrete;
//!
//! let economy = ExchangeEconomy::new(Parameters::default()).expect("valid parameters");
//!
//! let improving = solve_discrete(&economy);
//! println!("{} Pareto-improving grid allocations", improving.len());
//!
//! let equilibrium = economy
//!     .find_equilibrium(1.5, 1.0, 0.8, 0.3)
//!     .expect("tâtonnement converged");
//! println!("{}", equilibrium.solution().expect("positive price"));
//! ```

pub mod discrete;
pub mod economy;
pub mod error;
pub mod params;
pub mod pricing;
pub mod sampling;
pub mod solving;

pub use economy::{Bundle, ExcessDemand, ExchangeEconomy, NUMERAIRE_PRICE};
pub use error::{EconError, Result};
pub use params::{Endowment, Parameters, ParametersBuilder};
pub use solving::{ClosedForm, Equilibrium, EquilibriumSolver, SolutionReport, Tatonnement};
