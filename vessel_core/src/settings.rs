//! # Analysis Settings
//!
//! Design-wide defaults shared by every calculation in a design case. Each
//! field falls back to its default when missing from JSON, so a settings file
//! only needs the values it overrides.
//!
//! ```json
//! { "safety_factor": 2.25, "monte_carlo": { "samples": 50000, "seed": 7 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::ply::{DEFAULT_F12_COEFFICIENT, FPF_TEST_PRESSURE};
use crate::equations::vessel::DEFAULT_SAFETY_FACTOR;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::reliability::{MonteCarloConfig, DEFAULT_TARGET_BETA};

/// Global analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Safety factor applied when sizing the wall thickness
    pub safety_factor: f64,

    /// Minimum burst / working pressure ratio for a vessel to pass
    pub min_burst_ratio: f64,

    /// Tsai-Wu interaction coefficient k in `F12 = k·√(F11·F22)`
    pub tsai_wu_interaction: f64,

    /// Pressure at which first-ply stresses are evaluated before
    /// extrapolation (MPa)
    pub fpf_test_pressure_mpa: f64,

    /// Default Monte Carlo controls
    pub monte_carlo: MonteCarloConfig,

    /// Reliability index a design must reach
    pub target_reliability_index: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            safety_factor: DEFAULT_SAFETY_FACTOR,
            min_burst_ratio: DEFAULT_SAFETY_FACTOR,
            tsai_wu_interaction: DEFAULT_F12_COEFFICIENT,
            fpf_test_pressure_mpa: FPF_TEST_PRESSURE,
            monte_carlo: MonteCarloConfig::default(),
            target_reliability_index: DEFAULT_TARGET_BETA,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("safety_factor", self.safety_factor, "Safety factor must be positive")?;
        require_positive("min_burst_ratio", self.min_burst_ratio, "Minimum burst ratio must be positive")?;
        require_positive(
            "fpf_test_pressure_mpa",
            self.fpf_test_pressure_mpa,
            "First-ply test pressure must be positive",
        )?;
        if !(-1.0..=1.0).contains(&self.tsai_wu_interaction) {
            return Err(CalcError::invalid_input(
                "tsai_wu_interaction",
                self.tsai_wu_interaction.to_string(),
                "Interaction coefficient must be in [-1, 1]",
            ));
        }
        if self.monte_carlo.samples == 0 {
            return Err(CalcError::invalid_input(
                "monte_carlo.samples",
                "0",
                "Sample count must be positive",
            ));
        }
        if !self.target_reliability_index.is_finite() {
            return Err(CalcError::invalid_input(
                "target_reliability_index",
                self.target_reliability_index.to_string(),
                "Target reliability index must be finite",
            ));
        }
        Ok(())
    }
}
