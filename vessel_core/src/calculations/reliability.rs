//! # Reliability Check
//!
//! Monte Carlo failure probability of a burst or fatigue limit state, with
//! the reliability index compared against the design target.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::reliability::{burst_limit_state, fatigue_limit_state, LimitStateModel, MonteCarloResult};
use crate::settings::AnalysisSettings;

/// Limit state to simulate, with its nominal values and scatter.
///
/// ## JSON Serialization
///
/// ```json
/// { "kind": "burst", "nominal_burst_mpa": 160.0, "burst_cov": 0.05,
///   "working_pressure_mpa": 70.0, "pressure_cov": 0.02 }
/// { "kind": "fatigue", "predicted_life": 45000.0, "required_cycles": 11000.0,
///   "cycles_cov": 0.1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LimitStateDefinition {
    Burst {
        nominal_burst_mpa: f64,
        burst_cov: f64,
        working_pressure_mpa: f64,
        pressure_cov: f64,
    },
    Fatigue {
        predicted_life: f64,
        required_cycles: f64,
        cycles_cov: f64,
    },
}

impl LimitStateDefinition {
    /// Build the sampled model
    pub fn build(&self) -> CalcResult<LimitStateModel> {
        match *self {
            LimitStateDefinition::Burst {
                nominal_burst_mpa,
                burst_cov,
                working_pressure_mpa,
                pressure_cov,
            } => burst_limit_state(nominal_burst_mpa, burst_cov, working_pressure_mpa, pressure_cov),
            LimitStateDefinition::Fatigue {
                predicted_life,
                required_cycles,
                cycles_cov,
            } => fatigue_limit_state(predicted_life, required_cycles, cycles_cov),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LimitStateDefinition::Burst { .. } => "burst",
            LimitStateDefinition::Fatigue { .. } => "fatigue",
        }
    }
}

/// Input parameters for a reliability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityInput {
    pub label: String,

    pub limit_state: LimitStateDefinition,

    /// Sample count override; the design setting when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,

    /// Seed override; the design setting when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Results from a reliability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// "burst" or "fatigue"
    pub limit_state: String,

    pub monte_carlo: MonteCarloResult,

    /// β = Φ⁻¹(1 − p_f)
    #[serde(with = "crate::units::unbounded")]
    pub reliability_index: f64,

    pub target_reliability_index: f64,
}

impl ReliabilityResult {
    /// β at or above target
    pub fn passes(&self) -> bool {
        self.reliability_index >= self.target_reliability_index
    }

    pub fn p_failure(&self) -> f64 {
        self.monte_carlo.p_failure
    }
}

/// Run the reliability check.
pub fn calculate(input: &ReliabilityInput, settings: &AnalysisSettings) -> CalcResult<ReliabilityResult> {
    let mut config = settings.monte_carlo.clone();
    if let Some(samples) = input.samples {
        if samples == 0 {
            return Err(CalcError::invalid_input(
                "samples",
                "0",
                "Sample count must be positive",
            ));
        }
        config.samples = samples;
    }
    if input.seed.is_some() {
        config.seed = input.seed;
    }

    let model = input.limit_state.build()?;
    let monte_carlo = model.simulate(&config)?;
    let reliability_index = monte_carlo.reliability_index()?;

    debug!(
        label = %input.label,
        limit_state = input.limit_state.kind(),
        p_failure = monte_carlo.p_failure,
        beta = reliability_index,
        "reliability check"
    );
    Ok(ReliabilityResult {
        limit_state: input.limit_state.kind().to_string(),
        monte_carlo,
        reliability_index,
        target_reliability_index: settings.target_reliability_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(nominal: f64) -> ReliabilityInput {
        ReliabilityInput {
            label: "Burst".to_string(),
            limit_state: LimitStateDefinition::Burst {
                nominal_burst_mpa: nominal,
                burst_cov: 0.05,
                working_pressure_mpa: 70.0,
                pressure_cov: 0.02,
            },
            samples: Some(20_000),
            seed: Some(42),
        }
    }

    #[test]
    fn test_sound_design_meets_target() {
        let result = calculate(&burst(160.0), &AnalysisSettings::default()).unwrap();
        assert_eq!(result.limit_state, "burst");
        assert_eq!(result.monte_carlo.samples, 20_000);
        assert_eq!(result.monte_carlo.seed, 42);
        assert_eq!(result.p_failure(), 0.0);
        assert!(result.reliability_index.is_infinite());
        assert!(result.passes());
    }

    #[test]
    fn test_marginal_design_misses_target() {
        // Reference 114 MPa burst against 70 MPa with 20% burst scatter
        let mut input = burst(114.29);
        input.limit_state = LimitStateDefinition::Burst {
            nominal_burst_mpa: 114.29,
            burst_cov: 0.2,
            working_pressure_mpa: 70.0,
            pressure_cov: 0.05,
        };
        let result = calculate(&input, &AnalysisSettings::default()).unwrap();
        assert!(result.p_failure() > 0.0);
        assert!(result.reliability_index < 3.0);
        assert!(!result.passes());
    }

    #[test]
    fn test_overrides_and_settings() {
        let mut settings = AnalysisSettings::default();
        settings.monte_carlo.samples = 3_000;
        settings.monte_carlo.seed = Some(9);
        let mut input = burst(160.0);
        input.samples = None;
        input.seed = None;
        let result = calculate(&input, &settings).unwrap();
        assert_eq!(result.monte_carlo.samples, 3_000);
        assert_eq!(result.monte_carlo.seed, 9);

        input.samples = Some(0);
        assert!(calculate(&input, &settings).is_err());
    }

    #[test]
    fn test_fatigue_limit_state() {
        let input = ReliabilityInput {
            label: "Fatigue".to_string(),
            limit_state: LimitStateDefinition::Fatigue {
                predicted_life: 45_000.0,
                required_cycles: 11_000.0,
                cycles_cov: 0.1,
            },
            samples: Some(10_000),
            seed: Some(1),
        };
        let result = calculate(&input, &AnalysisSettings::default()).unwrap();
        assert_eq!(result.limit_state, "fatigue");
        // Weibull k = 2 scatter leaves p_f near 6%
        assert!(result.p_failure() > 0.03 && result.p_failure() < 0.09);

        let mut input = input;
        input.limit_state = LimitStateDefinition::Fatigue {
            predicted_life: f64::INFINITY,
            required_cycles: 11_000.0,
            cycles_cov: 0.1,
        };
        assert!(calculate(&input, &AnalysisSettings::default()).is_err());
    }

    #[test]
    fn test_limit_state_json() {
        let json = r#"{ "kind": "fatigue", "predicted_life": 45000.0, "required_cycles": 11000.0, "cycles_cov": 0.1 }"#;
        let definition: LimitStateDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.kind(), "fatigue");
    }
}
