//! # Fatigue Check
//!
//! Pressure-cycling fatigue of a vessel wall: amplitude and mean stress of
//! the fill cycle, optional Goodman mean-stress correction, S-N life and
//! Palmgren-Miner damage over the required cycles plus any extra load blocks.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::fatigue::{calculate, FatigueInput};
//! use vessel_core::equations::StressComponent;
//! use vessel_core::materials::{SnCurve, SnSource};
//!
//! let input = FatigueInput {
//!     label: "Fill cycles".to_string(),
//!     radius_mm: 87.5,
//!     thickness_mm: 5.0,
//!     min_pressure_mpa: 2.0,
//!     max_pressure_mpa: 70.0,
//!     component: StressComponent::Hoop,
//!     sn: SnSource::from(SnCurve::CarbonEpoxyT700),
//!     goodman: true,
//!     required_cycles: 11_000.0,
//!     additional_blocks: vec![],
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::fatigue::{
    allowable_stress,
    cumulative_damage,
    fatigue_life,
    fatigue_safety_factor,
    goodman_correction,
    mean_stress,
    stress_amplitude,
    LoadBlock,
    StressComponent,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::SnSource;

fn default_goodman() -> bool {
    true
}

/// Input parameters for a fatigue check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Fill cycles",
///   "radius_mm": 87.5,
///   "thickness_mm": 5.0,
///   "min_pressure_mpa": 2.0,
///   "max_pressure_mpa": 70.0,
///   "component": "hoop",
///   "sn": { "type": "Library", "curve": "CFRP-T700" },
///   "required_cycles": 11000.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueInput {
    pub label: String,

    /// Inner radius (mm)
    pub radius_mm: f64,

    /// Wall thickness carrying the cycle (mm)
    pub thickness_mm: f64,

    /// Pressure at the bottom of the cycle (MPa)
    pub min_pressure_mpa: f64,

    /// Pressure at the top of the cycle (MPa)
    pub max_pressure_mpa: f64,

    #[serde(default)]
    pub component: StressComponent,

    /// S-N data and the ultimate strength for the Goodman correction
    pub sn: SnSource,

    /// Apply the Goodman mean-stress correction
    #[serde(default = "default_goodman")]
    pub goodman: bool,

    /// Service cycles the vessel must survive
    pub required_cycles: f64,

    /// Extra constant-amplitude blocks for the damage sum
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_blocks: Vec<LoadBlock>,
}

impl FatigueInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("radius_mm", self.radius_mm, "Radius must be positive")?;
        require_positive("thickness_mm", self.thickness_mm, "Thickness must be positive")?;
        require_positive("max_pressure_mpa", self.max_pressure_mpa, "Maximum pressure must be positive")?;
        if self.min_pressure_mpa.is_nan() || self.min_pressure_mpa > self.max_pressure_mpa {
            return Err(CalcError::invalid_input(
                "min_pressure_mpa",
                self.min_pressure_mpa.to_string(),
                "Minimum pressure must not exceed maximum pressure",
            ));
        }
        require_positive("required_cycles", self.required_cycles, "Required cycles must be positive")?;
        self.sn.parameters().validate()?;
        require_positive(
            "ultimate_strength_mpa",
            self.sn.ultimate_strength_mpa(),
            "Ultimate strength must be positive",
        )?;
        for block in &self.additional_blocks {
            if block.cycles.is_nan() || block.cycles < 0.0 {
                return Err(CalcError::invalid_input(
                    "additional_blocks.cycles",
                    block.cycles.to_string(),
                    "Block cycles cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a fatigue check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueResult {
    /// Half the stress range of the pressure cycle (MPa)
    pub stress_amplitude_mpa: f64,

    /// Mean stress of the pressure cycle (MPa)
    pub mean_stress_mpa: f64,

    /// Amplitude used for the life lookup, Goodman-corrected if enabled (MPa)
    pub equivalent_amplitude_mpa: f64,

    /// Cycles to failure at the equivalent amplitude (∞ below endurance)
    #[serde(with = "crate::units::unbounded")]
    pub predicted_life: f64,

    /// Amplitude that exactly reaches the required cycles (MPa)
    pub allowable_amplitude_mpa: f64,

    /// Predicted over required life
    #[serde(with = "crate::units::unbounded")]
    pub safety_factor: f64,

    /// Palmgren-Miner damage sum
    pub damage: f64,
}

impl FatigueResult {
    /// Damage below 1.0
    pub fn passes(&self) -> bool {
        self.damage < 1.0
    }

    /// Equivalent over allowable amplitude
    pub fn amplitude_unity(&self) -> f64 {
        self.equivalent_amplitude_mpa / self.allowable_amplitude_mpa
    }
}

/// Run the fatigue check.
pub fn calculate(input: &FatigueInput) -> CalcResult<FatigueResult> {
    input.validate()?;

    let sn = input.sn.parameters();
    let sigma_min = input
        .component
        .stress(input.min_pressure_mpa, input.radius_mm, input.thickness_mm)?;
    let sigma_max = input
        .component
        .stress(input.max_pressure_mpa, input.radius_mm, input.thickness_mm)?;
    let amplitude = stress_amplitude(
        input.min_pressure_mpa,
        input.max_pressure_mpa,
        input.radius_mm,
        input.thickness_mm,
        input.component,
    )?;
    let mean = mean_stress(sigma_min, sigma_max);

    let equivalent = if input.goodman {
        goodman_correction(amplitude, mean, input.sn.ultimate_strength_mpa())?
    } else {
        amplitude
    };

    let predicted_life = fatigue_life(equivalent, &sn);
    let mut blocks = Vec::with_capacity(1 + input.additional_blocks.len());
    blocks.push(LoadBlock::new(input.required_cycles, equivalent));
    blocks.extend_from_slice(&input.additional_blocks);

    let result = FatigueResult {
        stress_amplitude_mpa: amplitude,
        mean_stress_mpa: mean,
        equivalent_amplitude_mpa: equivalent,
        predicted_life,
        allowable_amplitude_mpa: allowable_stress(input.required_cycles, &sn)?,
        safety_factor: fatigue_safety_factor(predicted_life, input.required_cycles)?,
        damage: cumulative_damage(&blocks, &sn),
    };
    debug!(
        label = %input.label,
        amplitude_mpa = equivalent,
        life = predicted_life,
        damage = result.damage,
        "fatigue check"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::SnCurve;
    use approx::assert_relative_eq;

    fn fill_cycles(curve: SnCurve) -> FatigueInput {
        FatigueInput {
            label: "Fill".to_string(),
            radius_mm: 87.5,
            thickness_mm: 5.0,
            min_pressure_mpa: 2.0,
            max_pressure_mpa: 70.0,
            component: StressComponent::Hoop,
            sn: SnSource::from(curve),
            goodman: true,
            required_cycles: 11_000.0,
            additional_blocks: vec![],
        }
    }

    #[test]
    fn test_cycle_stresses() {
        let result = calculate(&fill_cycles(SnCurve::CarbonEpoxyT700)).unwrap();
        // Hoop: 35 → 1225 MPa
        assert_relative_eq!(result.stress_amplitude_mpa, 595.0, max_relative = 1e-12);
        assert_relative_eq!(result.mean_stress_mpa, 630.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.stress_amplitude_mpa,
            stress_amplitude(2.0, 70.0, 87.5, 5.0, StressComponent::Hoop).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_goodman_raises_amplitude() {
        let result = calculate(&fill_cycles(SnCurve::CarbonEpoxyT700)).unwrap();
        assert_relative_eq!(
            result.equivalent_amplitude_mpa,
            595.0 / (1.0 - 630.0 / 2550.0),
            max_relative = 1e-12
        );

        let mut input = fill_cycles(SnCurve::CarbonEpoxyT700);
        input.goodman = false;
        let uncorrected = calculate(&input).unwrap();
        assert_eq!(uncorrected.equivalent_amplitude_mpa, 595.0);
        assert!(uncorrected.predicted_life > result.predicted_life);
    }

    #[test]
    fn test_carbon_overwrap_passes() {
        let result = calculate(&fill_cycles(SnCurve::CarbonEpoxyT700)).unwrap();
        assert!(result.passes());
        assert!(result.safety_factor > 1.0);
        assert!(result.amplitude_unity() < 1.0);
        assert_relative_eq!(result.damage, 11_000.0 / result.predicted_life, max_relative = 1e-12);
    }

    #[test]
    fn test_steel_liner_fails() {
        // Mean stress close to the 670 MPa ultimate blows up the Goodman amplitude
        let result = calculate(&fill_cycles(SnCurve::Steel4130)).unwrap();
        assert!(!result.passes());
        assert!(result.safety_factor < 1.0);
        assert!(result.damage > 1.0);
    }

    #[test]
    fn test_mean_above_ultimate_is_error() {
        // 630 MPa mean on 310 MPa aluminium
        assert!(calculate(&fill_cycles(SnCurve::Aluminum6061T6)).is_err());
    }

    #[test]
    fn test_infinite_life_below_endurance() {
        let mut input = fill_cycles(SnCurve::Aluminum6061T6);
        input.thickness_mm = 100.0;
        input.goodman = false;
        // Amplitude 29.75 MPa < 65 MPa endurance limit
        let result = calculate(&input).unwrap();
        assert!(result.predicted_life.is_infinite());
        assert!(result.safety_factor.is_infinite());
        assert_eq!(result.damage, 0.0);
        assert!(result.damage.is_sign_positive());
        assert!(result.passes());
    }

    #[test]
    fn test_infinite_life_survives_json() {
        let mut input = fill_cycles(SnCurve::Aluminum6061T6);
        input.thickness_mm = 100.0;
        input.goodman = false;
        let result = calculate(&input).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""predicted_life":"inf""#));
        assert!(json.contains(r#""safety_factor":"inf""#));
        assert!(json.contains(r#""damage":0.0"#));

        let back: FatigueResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predicted_life, f64::INFINITY);
        assert_eq!(back.safety_factor, f64::INFINITY);
        assert_eq!(back.equivalent_amplitude_mpa, result.equivalent_amplitude_mpa);
        assert!(back.passes());
    }

    #[test]
    fn test_finite_life_survives_json() {
        let result = calculate(&fill_cycles(SnCurve::CarbonEpoxyT700)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: FatigueResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predicted_life, result.predicted_life);
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }

    #[test]
    fn test_additional_blocks_add_damage() {
        let base = calculate(&fill_cycles(SnCurve::CarbonEpoxyT700)).unwrap();
        let mut input = fill_cycles(SnCurve::CarbonEpoxyT700);
        let overload_life = fatigue_life(1200.0, &SnCurve::CarbonEpoxyT700.parameters());
        input.additional_blocks = vec![LoadBlock::new(overload_life / 2.0, 1200.0)];
        let result = calculate(&input).unwrap();
        assert_relative_eq!(result.damage, base.damage + 0.5, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = fill_cycles(SnCurve::CarbonEpoxyT700);
        input.min_pressure_mpa = 80.0;
        assert!(calculate(&input).is_err());

        let mut input = fill_cycles(SnCurve::CarbonEpoxyT700);
        input.required_cycles = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = fill_cycles(SnCurve::CarbonEpoxyT700);
        input.additional_blocks = vec![LoadBlock::new(-1.0, 100.0)];
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "label": "Fill",
            "radius_mm": 87.5,
            "thickness_mm": 5.0,
            "min_pressure_mpa": 2.0,
            "max_pressure_mpa": 70.0,
            "sn": { "type": "Library", "curve": "CFRP-T700" },
            "required_cycles": 11000.0
        }"#;
        let input: FatigueInput = serde_json::from_str(json).unwrap();
        assert!(input.goodman);
        assert_eq!(input.component, StressComponent::Hoop);
        assert!(input.additional_blocks.is_empty());
    }
}
