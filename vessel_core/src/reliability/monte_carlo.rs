//! Monte Carlo driver
//!
//! Draws every random variable, evaluates the limit state `g` and counts
//! `g < 0` as failure. Samples are drawn in fixed-size chunks, each with its
//! own generator seeded from `base_seed + chunk_index`, so a seeded run gives
//! identical results whether chunks are evaluated serially or on the rayon
//! pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::statistics::{mean_and_std_dev, percentile, wald_interval, ConfidenceInterval};
use crate::errors::{CalcError, CalcResult};
use crate::reliability::distributions::RandomVariable;
use crate::reliability::reliability_index;

/// Default sample count
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Percentiles of `g` reported with every run
pub const REPORTED_PERCENTILES: [u32; 5] = [1, 5, 50, 95, 99];

/// Samples per independently seeded chunk
const CHUNK_SIZE: usize = 1024;

/// A limit-state function `g(x)`; `g < 0` is failure.
///
/// `values` holds one draw per random variable, in the order the variables
/// were passed to [`run_monte_carlo`]. Any `Fn(&[f64]) -> f64 + Sync` closure
/// is a limit state.
pub trait LimitState: Sync {
    fn evaluate(&self, values: &[f64]) -> f64;
}

impl<F> LimitState for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, values: &[f64]) -> f64 {
        self(values)
    }
}

/// Simulation controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub samples: usize,
    /// Fixed seed for reproducible runs; drawn from the thread RNG when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Evaluate chunks on the rayon thread pool
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig {
            samples: DEFAULT_SAMPLES,
            seed: None,
            parallel: false,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_seed(samples: usize, seed: u64) -> Self {
        MonteCarloConfig {
            samples,
            seed: Some(seed),
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcome of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub samples: usize,
    pub failures: usize,
    /// failures / samples
    pub p_failure: f64,
    /// 95% Wald interval on `p_failure`
    pub confidence_interval: ConfidenceInterval,
    /// Mean of `g`
    pub mean: f64,
    /// Population standard deviation of `g`
    pub std_dev: f64,
    /// Percentiles of `g` at levels 1, 5, 50, 95 and 99, ascending
    pub percentiles: Vec<PercentileValue>,
    /// Seed the run used, for replay
    pub seed: u64,
}

/// One reported percentile of the limit-state values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    /// Percentile level (0-100)
    pub level: u32,
    pub value: f64,
}

impl MonteCarloResult {
    pub fn percentile(&self, level: u32) -> Option<f64> {
        self.percentiles.iter().find(|p| p.level == level).map(|p| p.value)
    }

    /// β = Φ⁻¹(1 − p_f) of the estimated failure probability
    pub fn reliability_index(&self) -> CalcResult<f64> {
        reliability_index(self.p_failure)
    }
}

/// Estimate the failure probability of `limit_state` over `variables`.
///
/// # Errors
/// - `InvalidInput` if `samples` is zero
/// - `InvalidDistribution` if any variable is malformed
/// - `CalculationFailed` if the limit state returns NaN
pub fn run_monte_carlo<L>(
    limit_state: &L,
    variables: &[RandomVariable],
    config: &MonteCarloConfig,
) -> CalcResult<MonteCarloResult>
where
    L: LimitState + ?Sized,
{
    if config.samples == 0 {
        return Err(CalcError::invalid_input(
            "samples",
            "0",
            "Sample count must be positive",
        ));
    }
    for variable in variables {
        variable.validate()?;
    }

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let chunks = config.samples.div_ceil(CHUNK_SIZE);
    debug!(
        samples = config.samples,
        chunks,
        seed,
        parallel = config.parallel,
        variables = variables.len(),
        "starting Monte Carlo run"
    );

    let run_chunk = |chunk: usize| {
        let start = chunk * CHUNK_SIZE;
        let len = CHUNK_SIZE.min(config.samples - start);
        simulate_chunk(limit_state, variables, seed.wrapping_add(chunk as u64), len)
    };
    let chunk_values: Vec<Vec<f64>> = if config.parallel {
        (0..chunks).into_par_iter().map(run_chunk).collect::<CalcResult<_>>()?
    } else {
        (0..chunks).map(run_chunk).collect::<CalcResult<_>>()?
    };

    let mut g_values: Vec<f64> = chunk_values.into_iter().flatten().collect();
    let samples = g_values.len();
    let failures = g_values.iter().filter(|&&g| g < 0.0).count();
    let p_failure = failures as f64 / samples as f64;
    let (mean, std_dev) = mean_and_std_dev(&g_values);

    g_values.sort_by(f64::total_cmp);
    let percentiles = REPORTED_PERCENTILES
        .iter()
        .map(|&level| {
            percentile(&g_values, f64::from(level)).map(|value| PercentileValue { level, value })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    debug!(samples, failures, p_failure, mean, std_dev, "Monte Carlo run complete");

    Ok(MonteCarloResult {
        samples,
        failures,
        p_failure,
        confidence_interval: wald_interval(p_failure, samples),
        mean,
        std_dev,
        percentiles,
        seed,
    })
}

fn simulate_chunk<L>(
    limit_state: &L,
    variables: &[RandomVariable],
    seed: u64,
    len: usize,
) -> CalcResult<Vec<f64>>
where
    L: LimitState + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut draw = vec![0.0; variables.len()];
    let mut g_values = Vec::with_capacity(len);
    for _ in 0..len {
        for (slot, variable) in draw.iter_mut().zip(variables) {
            *slot = variable.sample(&mut rng);
        }
        let g = limit_state.evaluate(&draw);
        if g.is_nan() {
            return Err(CalcError::calculation_failed(
                "Monte Carlo",
                format!("Limit state returned NaN for draw {draw:?}"),
            ));
        }
        g_values.push(g);
    }
    Ok(g_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn strength_vs_load() -> Vec<RandomVariable> {
        vec![
            RandomVariable::normal("strength", 100.0, 10.0),
            RandomVariable::normal("load", 80.0, 10.0),
        ]
    }

    fn margin(x: &[f64]) -> f64 {
        x[0] - x[1]
    }

    #[test]
    fn test_always_safe() {
        let result = run_monte_carlo(&|_: &[f64]| 1.0, &[], &MonteCarloConfig::with_seed(500, 1)).unwrap();
        assert_eq!(result.failures, 0);
        assert_eq!(result.p_failure, 0.0);
        assert_eq!(result.reliability_index().unwrap(), f64::INFINITY);
        assert_eq!(result.confidence_interval.lower, 0.0);
        assert_eq!(result.confidence_interval.upper, 0.0);
    }

    #[test]
    fn test_always_fails() {
        let result = run_monte_carlo(&|_: &[f64]| -1.0, &[], &MonteCarloConfig::with_seed(500, 1)).unwrap();
        assert_eq!(result.failures, 500);
        assert_eq!(result.p_failure, 1.0);
        assert_eq!(result.reliability_index().unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_is_not_failure() {
        let result = run_monte_carlo(&|_: &[f64]| 0.0, &[], &MonteCarloConfig::with_seed(100, 1)).unwrap();
        assert_eq!(result.failures, 0);
    }

    #[test]
    fn test_strength_load_interference() {
        // g ~ N(20, 10√2): p_f = Φ(−1.4142) = 0.0786
        let config = MonteCarloConfig::with_seed(50_000, 7);
        let result = run_monte_carlo(&margin, &strength_vs_load(), &config).unwrap();
        assert_abs_diff_eq!(result.p_failure, 0.0786, epsilon = 0.006);
        assert_abs_diff_eq!(result.mean, 20.0, epsilon = 0.3);
        assert_abs_diff_eq!(result.std_dev, 14.142, epsilon = 0.3);
        assert_abs_diff_eq!(result.reliability_index().unwrap(), 1.4142, epsilon = 0.05);
        assert!(result.confidence_interval.contains(result.p_failure));
        assert!(result.percentile(5).unwrap() < result.percentile(50).unwrap());
        assert!(result.percentile(50).unwrap() < result.percentile(95).unwrap());
        assert_eq!(result.percentiles.len(), REPORTED_PERCENTILES.len());
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = MonteCarloConfig::with_seed(3000, 99);
        let a = run_monte_carlo(&margin, &strength_vs_load(), &config).unwrap();
        let b = run_monte_carlo(&margin, &strength_vs_load(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let serial = MonteCarloConfig::with_seed(5000, 3);
        let parallel = serial.clone().parallel(true);
        let a = run_monte_carlo(&margin, &strength_vs_load(), &serial).unwrap();
        let b = run_monte_carlo(&margin, &strength_vs_load(), &parallel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = run_monte_carlo(&margin, &strength_vs_load(), &MonteCarloConfig::with_seed(2000, 1)).unwrap();
        let b = run_monte_carlo(&margin, &strength_vs_load(), &MonteCarloConfig::with_seed(2000, 2)).unwrap();
        assert_ne!(a.mean, b.mean);
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let config = MonteCarloConfig {
            samples: 1500,
            ..MonteCarloConfig::default()
        };
        let first = run_monte_carlo(&margin, &strength_vs_load(), &config).unwrap();
        let replay = run_monte_carlo(
            &margin,
            &strength_vs_load(),
            &MonteCarloConfig::with_seed(1500, first.seed),
        )
        .unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_sample_count_not_multiple_of_chunk() {
        let result = run_monte_carlo(&margin, &strength_vs_load(), &MonteCarloConfig::with_seed(1500, 5)).unwrap();
        assert_eq!(result.samples, 1500);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = run_monte_carlo(&margin, &strength_vs_load(), &MonteCarloConfig::with_seed(0, 5)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_variable_rejected() {
        let vars = vec![RandomVariable::normal("strength", 100.0, -1.0)];
        let err = run_monte_carlo(&|x: &[f64]| x[0], &vars, &MonteCarloConfig::with_seed(10, 5)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DISTRIBUTION");
    }

    #[test]
    fn test_nan_limit_state_is_error() {
        let err = run_monte_carlo(&|_: &[f64]| f64::NAN, &[], &MonteCarloConfig::with_seed(10, 5)).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: MonteCarloConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MonteCarloConfig::default());
        assert_eq!(config.samples, 10_000);

        let config: MonteCarloConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.seed, Some(42));
    }
}
