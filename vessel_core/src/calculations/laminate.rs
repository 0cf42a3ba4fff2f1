//! # Laminate Check
//!
//! Ply-by-ply evaluation of a filament-wound cylinder wall at working
//! pressure (Tsai-Wu, Hashin, max-stress) plus its first-ply failure
//! pressure.
//!
//! Loading is the closed-end cylinder case: `Nx = P·r/2`, `Ny = P·r`,
//! `Nxy = 0`, shared by every ply and divided by the total wall thickness.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::ply::{
    first_ply_failure_with,
    hashin_indices,
    max_stress_margins,
    ply_stress,
    FirstPlyFailure,
    HashinResult,
    MaxStressMargins,
    PlyStress,
    TsaiWuCoefficients,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::PlyMaterial;
use crate::settings::AnalysisSettings;

/// Input parameters for a laminate check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Hoop/helical overwrap",
///   "layup": [90.0, 15.0, -15.0, 90.0],
///   "radius_mm": 87.5,
///   "thickness_mm": 20.0,
///   "material": { "type": "Library", "grade": "T700" },
///   "working_pressure_mpa": 70.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateInput {
    pub label: String,

    /// Ply angles from the inside out (degrees from the axis)
    pub layup: Vec<f64>,

    /// Mid-wall radius (mm)
    pub radius_mm: f64,

    /// Total laminate thickness (mm)
    pub thickness_mm: f64,

    #[serde(default)]
    pub material: PlyMaterial,

    /// Pressure the plies are checked at (MPa)
    pub working_pressure_mpa: f64,
}

impl LaminateInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.layup.is_empty() {
            return Err(CalcError::invalid_input("layup", "[]", "Layup must contain at least one ply"));
        }
        if let Some(angle) = self.layup.iter().find(|a| !a.is_finite()) {
            return Err(CalcError::invalid_input(
                "layup",
                angle.to_string(),
                "Ply angles must be finite",
            ));
        }
        require_positive("radius_mm", self.radius_mm, "Radius must be positive")?;
        require_positive("thickness_mm", self.thickness_mm, "Thickness must be positive")?;
        require_positive(
            "working_pressure_mpa",
            self.working_pressure_mpa,
            "Working pressure must be positive",
        )?;
        self.material.validated_properties()?;
        Ok(())
    }
}

/// One ply's checks at working pressure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyEvaluation {
    pub ply_index: usize,
    pub angle_deg: f64,
    pub stress: PlyStress,
    pub tsai_wu_index: f64,
    pub hashin: HashinResult,
    pub margins: MaxStressMargins,
}

impl PlyEvaluation {
    pub fn passes(&self) -> bool {
        self.tsai_wu_index < 1.0
    }
}

/// Results from a laminate check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateResult {
    /// Per-ply checks at working pressure, in layup order
    pub plies: Vec<PlyEvaluation>,

    /// First-ply failure extrapolated from the test pressure
    pub first_ply_failure: FirstPlyFailure,

    /// First-ply failure pressure over working pressure
    #[serde(with = "crate::units::unbounded")]
    pub fpf_ratio: f64,
}

impl LaminateResult {
    /// Every ply has a Tsai-Wu index below 1 at working pressure
    pub fn passes(&self) -> bool {
        self.plies.iter().all(PlyEvaluation::passes)
    }

    /// Highest Tsai-Wu index across plies
    pub fn max_tsai_wu_index(&self) -> f64 {
        self.plies
            .iter()
            .map(|p| p.tsai_wu_index)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Ply with the highest Tsai-Wu index
    pub fn critical_ply(&self) -> Option<&PlyEvaluation> {
        self.plies
            .iter()
            .max_by(|a, b| a.tsai_wu_index.total_cmp(&b.tsai_wu_index))
    }

    pub fn governing_condition(&self) -> &'static str {
        self.first_ply_failure.mode.description()
    }
}

/// Run the laminate check.
pub fn calculate(input: &LaminateInput, settings: &AnalysisSettings) -> CalcResult<LaminateResult> {
    input.validate()?;

    let props = input.material.properties();
    let p = input.working_pressure_mpa;
    let nx = p * input.radius_mm / 2.0;
    let ny = p * input.radius_mm;
    let coefficients = TsaiWuCoefficients::from_strengths(&props, settings.tsai_wu_interaction);

    let plies = input
        .layup
        .iter()
        .enumerate()
        .map(|(ply_index, &angle_deg)| {
            let stress = ply_stress(angle_deg, nx, ny, 0.0, input.thickness_mm)?;
            Ok(PlyEvaluation {
                ply_index,
                angle_deg,
                stress,
                tsai_wu_index: coefficients.index(&stress),
                hashin: hashin_indices(&stress, &props),
                margins: max_stress_margins(&stress, &props),
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let first_ply_failure = first_ply_failure_with(
        &input.layup,
        input.radius_mm,
        input.thickness_mm,
        &props,
        settings.tsai_wu_interaction,
        settings.fpf_test_pressure_mpa,
    )?;
    let fpf_ratio = first_ply_failure.failure_pressure_mpa / p;

    let result = LaminateResult {
        plies,
        first_ply_failure,
        fpf_ratio,
    };
    debug!(
        label = %input.label,
        plies = result.plies.len(),
        max_tsai_wu = result.max_tsai_wu_index(),
        fpf_mpa = result.first_ply_failure.failure_pressure_mpa,
        "laminate check"
    );
    Ok(result)
}
