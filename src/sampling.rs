//! Random endowment draws and batch equilibria over them.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;

use crate::economy::ExchangeEconomy;
use crate::error::Result;
use crate::params::Endowment;
use crate::solving::{Equilibrium, EquilibriumSolver, Tatonnement};

/// Draws `count` endowments with `(w1A, w2A)` uniform on `[0, 1]^2`.
pub fn sample_endowments(count: usize, seed: u64) -> Vec<Endowment> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let unit = Uniform::new_inclusive(0.0, 1.0);
    (0..count)
        .map(|_| Endowment {
            w1a: unit.sample(&mut rng),
            w2a: unit.sample(&mut rng),
        })
        .collect()
}

/// Solves the economy once per endowment with [`Tatonnement`], in parallel.
///
/// Results are returned in the order of `endowments`.
pub fn equilibria_for(
    economy: &ExchangeEconomy,
    endowments: &[Endowment],
    p1_guess: f64,
) -> Vec<Result<Equilibrium>> {
    equilibria_with(economy, &Tatonnement, endowments, p1_guess)
}

/// [`equilibria_for`] with an arbitrary solver.
pub fn equilibria_with<S: EquilibriumSolver + Sync>(
    economy: &ExchangeEconomy,
    solver: &S,
    endowments: &[Endowment],
    p1_guess: f64,
) -> Vec<Result<Equilibrium>> {
    endowments
        .par_iter()
        .map(|endowment| {
            economy
                .with_endowment(endowment.w1a, endowment.w2a)?
                .find_equilibrium_with(solver, p1_guess)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solving::ClosedForm;
    use approx::assert_relative_eq;

    #[test]
    fn draws_are_reproducible_and_in_unit_square() {
        let first = sample_endowments(50, 7);
        let second = sample_endowments(50, 7);
        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
        for endowment in &first {
            assert!(Endowment::new(endowment.w1a, endowment.w2a).is_ok());
        }
        assert_ne!(first, sample_endowments(50, 8));
    }

    #[test]
    fn batch_equilibria_preserve_input_order() {
        let economy = ExchangeEconomy::default();
        let endowments = sample_endowments(12, 42);
        let results = equilibria_with(&economy, &ClosedForm, &endowments, 1.0);
        assert_eq!(results.len(), endowments.len());

        for (endowment, result) in endowments.iter().zip(results) {
            let equilibrium = result.unwrap();
            assert_relative_eq!(equilibrium.parameters.w1a, endowment.w1a);
            assert_relative_eq!(equilibrium.parameters.w2a, endowment.w2a);
            assert!(equilibrium.z1.abs() < 1e-10);
        }
    }
}
