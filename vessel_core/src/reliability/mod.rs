//! # Probabilistic Reliability
//!
//! Monte Carlo estimation of failure probability for limit states built from
//! the deterministic vessel and fatigue results.
//!
//! ## Modules
//!
//! - [`distributions`] - Random variables (normal, lognormal, Weibull, uniform)
//! - [`monte_carlo`] - Seedable, optionally parallel simulation driver
//! - [`limit_states`] - Burst and fatigue limit-state factories
//!
//! ## Reliability Index
//!
//! ```text
//! β = Φ⁻¹(1 − p_f)
//! ```
//!
//! Common targets: β = 3.0 (p_f ≈ 1.35e-3) for screening, β ≥ 3.7 for
//! safety-critical pressure equipment.

pub mod distributions;
pub mod limit_states;
pub mod monte_carlo;

pub use distributions::{Distribution, RandomVariable};
pub use limit_states::{burst_limit_state, fatigue_limit_state, LimitStateModel, FATIGUE_WEIBULL_SHAPE};
pub use monte_carlo::{run_monte_carlo, LimitState, MonteCarloConfig, MonteCarloResult, PercentileValue, DEFAULT_SAMPLES};

use crate::equations::statistics::inverse_normal_cdf;
use crate::errors::{CalcError, CalcResult};

/// Default target reliability index
pub const DEFAULT_TARGET_BETA: f64 = 3.0;

/// Reliability index β for a failure probability.
///
/// `p_f = 0` gives `+∞`, `p_f = 1` gives `−∞`.
///
/// # Errors
/// `InvalidInput` if `p_f` is NaN or outside `[0, 1]`.
pub fn reliability_index(p_failure: f64) -> CalcResult<f64> {
    if !(0.0..=1.0).contains(&p_failure) {
        return Err(CalcError::invalid_input(
            "p_failure",
            p_failure.to_string(),
            "Failure probability must be in [0, 1]",
        ));
    }
    inverse_normal_cdf(1.0 - p_failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reliability_index_reference_values() {
        assert_abs_diff_eq!(reliability_index(0.5).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(reliability_index(0.1587).unwrap(), 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(reliability_index(0.0228).unwrap(), 2.0, epsilon = 2e-3);
        assert_abs_diff_eq!(reliability_index(0.00135).unwrap(), 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_reliability_index_limits() {
        assert_eq!(reliability_index(0.0).unwrap(), f64::INFINITY);
        assert_eq!(reliability_index(1.0).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_reliability_index_domain() {
        assert!(reliability_index(-0.01).is_err());
        assert!(reliability_index(1.01).is_err());
        let err = reliability_index(f64::NAN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_index_decreases_with_probability() {
        let betas: Vec<f64> = [1e-6, 1e-4, 1e-2, 0.3, 0.7]
            .iter()
            .map(|&p| reliability_index(p).unwrap())
            .collect();
        assert!(betas.windows(2).all(|w| w[0] > w[1]));
    }
}
