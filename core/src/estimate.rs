//! Distance "estimation" reported when a round runs out of attempts.
//!
//! Rather than subtracting the two coordinates, the estimator runs a secant-style iteration over
//! `f(x) = |x - fixed| + 0.01`, starting from the two coordinates as the initial guesses. The
//! reported value is wherever that iteration settles, rounded, which is generally not the true
//! absolute difference: equal inputs settle immediately on the input itself, and distinct inputs
//! tend to run away until the guesses stop being finite.

use serde::{Deserialize, Serialize};

/// Guesses closer than this are considered converged.
pub const CONVERGENCE_TOLERANCE: f64 = 0.01;

/// Lower bound for the secant slope, keeps the step from dividing by zero.
pub const MIN_SLOPE: f64 = 0.01;

/// Added to `|x - fixed|` so the function being rooted never reaches zero.
pub const RESIDUAL_OFFSET: f64 = 0.01;

/// Hard bound on secant steps; hitting it counts as a failed estimate.
pub const MAX_ITERATIONS: u32 = 10_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateOutcome {
    /// Guesses came within tolerance at a finite point.
    Converged,
    /// The iteration produced a non-finite guess.
    Diverged,
    /// [`MAX_ITERATIONS`] steps were taken without converging.
    IterationLimit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub value: i64,
    pub iterations: u32,
    pub outcome: EstimateOutcome,
}

impl Estimate {
    pub const fn is_converged(&self) -> bool {
        matches!(self.outcome, EstimateOutcome::Converged)
    }
}

/// Estimates the distance between `a` and `b`, holding `fixed` as the point the residual is
/// measured against. Returns `0` whenever the iteration fails to settle.
pub fn estimate(a: f64, b: f64, fixed: f64) -> i64 {
    estimate_detailed(a, b, fixed).value
}

/// Same as [`estimate`] but also reports how the iteration ended.
pub fn estimate_detailed(a: f64, b: f64, fixed: f64) -> Estimate {
    let residual = |x: f64| (x - fixed).abs() + RESIDUAL_OFFSET;

    let (mut prev, mut curr) = (a, b);
    let mut iterations = 0;

    // NaN differences compare false and end the loop.
    while (prev - curr).abs() > CONVERGENCE_TOLERANCE {
        if iterations == MAX_ITERATIONS {
            log::warn!(
                "Estimate of ({}, {}) around {} did not converge after {} iterations",
                a,
                b,
                fixed,
                iterations
            );
            return Estimate {
                value: 0,
                iterations,
                outcome: EstimateOutcome::IterationLimit,
            };
        }

        let slope = MIN_SLOPE.max(residual(curr) - residual(prev));
        let next = curr - ((curr - prev) / slope) * residual(curr);
        prev = curr;
        curr = next;
        iterations += 1;
    }

    if curr.is_finite() {
        log::trace!(
            "Estimate of ({}, {}) around {} settled on {} after {} iterations",
            a,
            b,
            fixed,
            curr,
            iterations
        );
        Estimate {
            value: curr.round_ties_even() as i64,
            iterations,
            outcome: EstimateOutcome::Converged,
        }
    } else {
        log::warn!(
            "Estimate of ({}, {}) around {} diverged after {} iterations",
            a,
            b,
            fixed,
            iterations
        );
        Estimate {
            value: 0,
            iterations,
            outcome: EstimateOutcome::Diverged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_inputs_settle_immediately_on_the_input() {
        let result = estimate_detailed(5.0, 5.0, 1.0);

        assert_eq!(result.iterations, 0);
        assert_eq!(result.outcome, EstimateOutcome::Converged);
        assert_eq!(result.value, 5);
        assert_eq!(estimate(2.0, 2.0, 0.0), 2);
        assert_eq!(estimate(0.0, 0.0, 4.0), 0);
    }

    #[test]
    fn nearly_equal_inputs_round_their_second_guess() {
        assert_eq!(estimate(3.004, 3.0, 7.0), 3);
        assert_eq!(estimate(2.5, 2.5, 0.0), 2);
    }

    #[test]
    fn distinct_inputs_diverge_to_zero() {
        let result = estimate_detailed(0.0, 3.0, 2.0);

        assert_eq!(result.outcome, EstimateOutcome::Diverged);
        assert_eq!(result.value, 0);
        assert!(result.iterations > 0);
        assert!(result.iterations < MAX_ITERATIONS);
    }

    #[test]
    fn runaway_iteration_is_capped() {
        let result = estimate_detailed(0.0, 1.0, 0.0);

        assert_eq!(result.outcome, EstimateOutcome::IterationLimit);
        assert_eq!(result.iterations, MAX_ITERATIONS);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn swapping_the_guesses_gives_the_same_estimate() {
        for a in 0..12 {
            for b in 0..12 {
                for fixed in 0..12 {
                    let (a, b, fixed) = (f64::from(a), f64::from(b), f64::from(fixed));
                    assert_eq!(
                        estimate(a, b, fixed),
                        estimate(b, a, fixed),
                        "estimate({a}, {b}, {fixed})"
                    );
                }
            }
        }
    }

    #[test]
    fn grid_coordinates_always_terminate() {
        for a in 0..40 {
            for b in 0..40 {
                let result = estimate_detailed(f64::from(a), f64::from(b), f64::from((a + b) % 7));
                assert!(result.iterations <= MAX_ITERATIONS);
            }
        }
    }
}
