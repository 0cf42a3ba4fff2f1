//! # Fatigue Life Formulas
//!
//! Stress-life (S-N) fatigue for pressure-cycled vessels: Basquin life,
//! amplitude from a pressure cycle, Goodman mean-stress correction and
//! Palmgren-Miner damage accumulation.
//!
//! ## Notation
//!
//! - `S` = Stress amplitude (MPa), half the stress range
//! - `N` = Cycles to failure
//! - `C`, `m` = Basquin constants, `N = C / S^m`
//! - `σ_m` = Mean stress, `σ_u` = Ultimate strength (MPa)
//!
//! Infinite life is a valid result, represented as `f64::INFINITY`.

use serde::{Deserialize, Serialize};

use crate::equations::vessel::{axial_stress, hoop_stress};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::SnParameters;

/// Membrane stress component a pressure cycle is evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressComponent {
    /// Circumferential stress P·r/t
    #[default]
    Hoop,
    /// Longitudinal stress P·r/(2t)
    Axial,
}

impl StressComponent {
    /// Membrane stress of this component at pressure `p`
    pub fn stress(&self, pressure: f64, radius: f64, thickness: f64) -> CalcResult<f64> {
        match self {
            StressComponent::Hoop => hoop_stress(pressure, radius, thickness),
            StressComponent::Axial => axial_stress(pressure, radius, thickness),
        }
    }
}

/// A block of constant-amplitude cycles for damage summation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadBlock {
    /// Number of applied cycles n_i
    pub cycles: f64,
    /// Stress amplitude of the block (MPa)
    pub stress_amplitude_mpa: f64,
}

impl LoadBlock {
    pub fn new(cycles: f64, stress_amplitude_mpa: f64) -> Self {
        LoadBlock {
            cycles,
            stress_amplitude_mpa,
        }
    }
}

/// Cycles to failure at a given stress amplitude
///
/// ```text
/// N = C / S^m
/// ```
///
/// Returns `f64::INFINITY` when `S ≤ 0` or when `S` is below the endurance
/// limit (if the curve has one).
pub fn fatigue_life(stress_amplitude: f64, sn: &SnParameters) -> f64 {
    if stress_amplitude <= 0.0 {
        return f64::INFINITY;
    }
    if let Some(limit) = sn.endurance_limit_mpa {
        if stress_amplitude < limit {
            return f64::INFINITY;
        }
    }
    sn.c / stress_amplitude.powf(sn.m)
}

/// Stress amplitude that gives exactly `target_cycles` of life
///
/// ```text
/// S = (C / N)^(1/m)
/// ```
///
/// # Errors
/// `InvalidInput` if `target_cycles ≤ 0`.
pub fn allowable_stress(target_cycles: f64, sn: &SnParameters) -> CalcResult<f64> {
    require_positive("target_cycles", target_cycles, "Target cycles must be positive")?;
    Ok((sn.c / target_cycles).powf(1.0 / sn.m))
}

/// Stress amplitude of a pressure cycle between `min_pressure` and
/// `max_pressure`, evaluated in the chosen membrane component
///
/// ```text
/// S = (σ(P_max) − σ(P_min)) / 2
/// ```
pub fn stress_amplitude(
    min_pressure: f64,
    max_pressure: f64,
    radius: f64,
    thickness: f64,
    component: StressComponent,
) -> CalcResult<f64> {
    let sigma_min = component.stress(min_pressure, radius, thickness)?;
    let sigma_max = component.stress(max_pressure, radius, thickness)?;
    Ok((sigma_max - sigma_min) / 2.0)
}

/// Mean stress of a cycle
#[inline]
pub fn mean_stress(min_stress: f64, max_stress: f64) -> f64 {
    (max_stress + min_stress) / 2.0
}

/// Goodman equivalent fully-reversed amplitude
///
/// ```text
/// S_eq = S_a / (1 − σ_m/σ_u)
/// ```
///
/// # Errors
/// `InvalidInput` if `σ_u ≤ 0` or `σ_m ≥ σ_u` (the cycle is already past
/// static failure).
pub fn goodman_correction(amplitude: f64, mean: f64, ultimate: f64) -> CalcResult<f64> {
    require_positive("ultimate", ultimate, "Ultimate strength must be positive")?;
    if mean >= ultimate {
        return Err(CalcError::invalid_input(
            "mean",
            mean.to_string(),
            format!("Mean stress must be below the ultimate strength ({ultimate} MPa)"),
        ));
    }
    Ok(amplitude / (1.0 - mean / ultimate))
}

/// Palmgren-Miner cumulative damage `D = Σ n_i / N_i`
///
/// Blocks with infinite life contribute nothing. Failure is predicted when
/// `D ≥ 1`; that check is left to the caller.
pub fn cumulative_damage(blocks: &[LoadBlock], sn: &SnParameters) -> f64 {
    blocks
        .iter()
        .filter_map(|block| {
            let life = fatigue_life(block.stress_amplitude_mpa, sn);
            life.is_finite().then(|| block.cycles / life)
        })
        .fold(0.0, |damage, d| damage + d)
}

/// Ratio of predicted to required life
///
/// Infinite predicted life gives an infinite factor.
///
/// # Errors
/// `InvalidInput` if `required ≤ 0`.
pub fn fatigue_safety_factor(predicted: f64, required: f64) -> CalcResult<f64> {
    require_positive("required", required, "Required cycles must be positive")?;
    if predicted.is_infinite() {
        return Ok(f64::INFINITY);
    }
    Ok(predicted / required)
}
