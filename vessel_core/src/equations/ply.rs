//! # Composite Ply Failure Criteria
//!
//! Per-ply stress recovery and failure indices for a laminate loaded by
//! membrane force resultants.
//!
//! ## Notation
//!
//! - `Nx`, `Ny`, `Nxy` = Laminate force resultants (N/mm); x is the vessel
//!   axis, y the hoop direction
//! - `θ` = Ply angle from the x axis (degrees)
//! - `σ1`, `σ2`, `τ12` = Material-axis ply stresses (MPa)
//! - `Xt`, `Xc`, `Yt`, `Yc`, `S` = Ply strengths (compressive as magnitudes)
//!
//! ## Sign Conventions
//!
//! - Tension positive
//! - A stress of exactly zero selects the tension branch of Hashin and of the
//!   maximum-stress margins
//!
//! ## References
//!
//! - Tsai & Wu, "A General Theory of Strength for Anisotropic Materials", 1971
//! - Hashin, "Failure Criteria for Unidirectional Fiber Composites", 1980
//! - Daniel & Ishai, Engineering Mechanics of Composite Materials, Ch. 6

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::PlyProperties;
use crate::units::{Degrees, Megapascals, Millimeters, NewtonsPerMm, Radians};

/// Default Tsai-Wu interaction coefficient `k` in `F12 = k·√(F11·F22)`.
///
/// An empirical stand-in for a measured biaxial strength; tunable through
/// `AnalysisSettings::tsai_wu_interaction`.
pub const DEFAULT_F12_COEFFICIENT: f64 = -0.5;

/// Pressure used to evaluate the laminate before extrapolating to failure (MPa)
pub const FPF_TEST_PRESSURE: f64 = 1.0;

/// Material-axis ply stress state (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlyStress {
    /// Fibre-direction normal stress σ1
    pub sigma1: f64,
    /// Transverse normal stress σ2
    pub sigma2: f64,
    /// In-plane shear stress τ12
    pub tau12: f64,
}

impl PlyStress {
    pub fn new(sigma1: f64, sigma2: f64, tau12: f64) -> Self {
        PlyStress { sigma1, sigma2, tau12 }
    }

    /// Scale every component (linear-elastic load scaling)
    pub fn scaled(&self, factor: f64) -> Self {
        PlyStress::new(self.sigma1 * factor, self.sigma2 * factor, self.tau12 * factor)
    }
}

/// Rotate laminate-average stresses into a ply's material axes.
///
/// The laminate is treated as a single membrane of total thickness `t`:
/// `σx = Nx/t`, `σy = Ny/t`, `τxy = Nxy/t`. With `m = cos θ`, `n = sin θ`:
///
/// ```text
/// σ1  =  m²σx + n²σy + 2mn·τxy
/// σ2  =  n²σx + m²σy − 2mn·τxy
/// τ12 = −mn·σx + mn·σy + (m² − n²)·τxy
/// ```
///
/// # Errors
/// `InvalidInput` if `thickness ≤ 0`.
pub fn ply_stress(angle_deg: f64, nx: f64, ny: f64, nxy: f64, thickness: f64) -> CalcResult<PlyStress> {
    require_positive("thickness", thickness, "Laminate thickness must be positive")?;

    let sigma_x = nx / thickness;
    let sigma_y = ny / thickness;
    let tau_xy = nxy / thickness;

    let theta: Radians = Degrees(angle_deg).into();
    let m = theta.0.cos();
    let n = theta.0.sin();
    let (m2, n2, mn) = (m * m, n * n, m * n);

    Ok(PlyStress {
        sigma1: m2 * sigma_x + n2 * sigma_y + 2.0 * mn * tau_xy,
        sigma2: n2 * sigma_x + m2 * sigma_y - 2.0 * mn * tau_xy,
        tau12: -mn * sigma_x + mn * sigma_y + (m2 - n2) * tau_xy,
    })
}

/// Tsai-Wu strength tensor coefficients for a ply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TsaiWuCoefficients {
    pub f1: f64,
    pub f2: f64,
    pub f11: f64,
    pub f22: f64,
    pub f66: f64,
    pub f12: f64,
}

impl TsaiWuCoefficients {
    /// Derive coefficients from the five ply strengths.
    ///
    /// ```text
    /// F1  = 1/Xt − 1/Xc      F11 = 1/(Xt·Xc)
    /// F2  = 1/Yt − 1/Yc      F22 = 1/(Yt·Yc)
    /// F66 = 1/S²             F12 = k·√(F11·F22)
    /// ```
    pub fn from_strengths(props: &PlyProperties, interaction: f64) -> Self {
        let f11 = 1.0 / (props.xt_mpa * props.xc_mpa);
        let f22 = 1.0 / (props.yt_mpa * props.yc_mpa);
        TsaiWuCoefficients {
            f1: 1.0 / props.xt_mpa - 1.0 / props.xc_mpa,
            f2: 1.0 / props.yt_mpa - 1.0 / props.yc_mpa,
            f11,
            f22,
            f66: 1.0 / props.s12_mpa.powi(2),
            f12: interaction * (f11 * f22).sqrt(),
        }
    }

    /// Evaluate the quadratic failure index
    pub fn index(&self, s: &PlyStress) -> f64 {
        self.f1 * s.sigma1
            + self.f2 * s.sigma2
            + self.f11 * s.sigma1.powi(2)
            + self.f22 * s.sigma2.powi(2)
            + self.f66 * s.tau12.powi(2)
            + 2.0 * self.f12 * s.sigma1 * s.sigma2
    }
}

/// Tsai-Wu failure index with the default interaction term.
///
/// `< 1` safe, `= 1` on the failure envelope, `> 1` failed.
pub fn tsai_wu_index(stress: &PlyStress, props: &PlyProperties) -> f64 {
    tsai_wu_index_with(stress, props, DEFAULT_F12_COEFFICIENT)
}

/// Tsai-Wu failure index with an explicit `F12` coefficient `k`.
pub fn tsai_wu_index_with(stress: &PlyStress, props: &PlyProperties, interaction: f64) -> f64 {
    TsaiWuCoefficients::from_strengths(props, interaction).index(stress)
}

// =============================================================================
// HASHIN
// Each mode is selected by the sign of its normal stress; every branch is a
// separate formula so it can be checked on its own.
// =============================================================================

/// Fibre failure branch, selected by the sign of σ1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiberMode {
    Tension,
    Compression,
}

impl FiberMode {
    pub fn from_stress(sigma1: f64) -> Self {
        if sigma1 >= 0.0 {
            FiberMode::Tension
        } else {
            FiberMode::Compression
        }
    }

    /// Fibre failure index for this branch
    ///
    /// ```text
    /// tension:     (σ1/Xt)² + (τ12/S)²
    /// compression: (σ1/Xc)²
    /// ```
    pub fn index(&self, s: &PlyStress, props: &PlyProperties) -> f64 {
        match self {
            FiberMode::Tension => {
                (s.sigma1 / props.xt_mpa).powi(2) + (s.tau12 / props.s12_mpa).powi(2)
            }
            FiberMode::Compression => (s.sigma1 / props.xc_mpa).powi(2),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FiberMode::Tension => "tension",
            FiberMode::Compression => "compression",
        }
    }
}

/// Matrix failure branch, selected by the sign of σ2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixMode {
    Tension,
    Compression,
}

impl MatrixMode {
    pub fn from_stress(sigma2: f64) -> Self {
        if sigma2 >= 0.0 {
            MatrixMode::Tension
        } else {
            MatrixMode::Compression
        }
    }

    /// Matrix failure index for this branch
    ///
    /// ```text
    /// tension:     (σ2/Yt)² + (τ12/S)²
    /// compression: (σ2/2S)² + ((Yc/2S)² − 1)·σ2/Yc + (τ12/S)²
    /// ```
    pub fn index(&self, s: &PlyStress, props: &PlyProperties) -> f64 {
        let shear = (s.tau12 / props.s12_mpa).powi(2);
        match self {
            MatrixMode::Tension => (s.sigma2 / props.yt_mpa).powi(2) + shear,
            MatrixMode::Compression => {
                let two_s = 2.0 * props.s12_mpa;
                (s.sigma2 / two_s).powi(2)
                    + ((props.yc_mpa / two_s).powi(2) - 1.0) * s.sigma2 / props.yc_mpa
                    + shear
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatrixMode::Tension => "tension",
            MatrixMode::Compression => "compression",
        }
    }
}

/// The four Hashin failure modes, used to tag the governing mode of a ply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    FiberTension,
    FiberCompression,
    MatrixTension,
    MatrixCompression,
}

impl FailureMode {
    pub fn description(&self) -> &'static str {
        match self {
            FailureMode::FiberTension => "Fiber tension",
            FailureMode::FiberCompression => "Fiber compression",
            FailureMode::MatrixTension => "Matrix tension",
            FailureMode::MatrixCompression => "Matrix compression",
        }
    }
}

impl From<FiberMode> for FailureMode {
    fn from(mode: FiberMode) -> Self {
        match mode {
            FiberMode::Tension => FailureMode::FiberTension,
            FiberMode::Compression => FailureMode::FiberCompression,
        }
    }
}

impl From<MatrixMode> for FailureMode {
    fn from(mode: MatrixMode) -> Self {
        match mode {
            MatrixMode::Tension => FailureMode::MatrixTension,
            MatrixMode::Compression => FailureMode::MatrixCompression,
        }
    }
}

/// Hashin fibre and matrix indices with the branches that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HashinResult {
    pub fiber_index: f64,
    pub matrix_index: f64,
    pub fiber_mode: FiberMode,
    pub matrix_mode: MatrixMode,
}

impl HashinResult {
    /// Mode with the larger index (fibre wins ties)
    pub fn dominant_mode(&self) -> FailureMode {
        if self.fiber_index >= self.matrix_index {
            self.fiber_mode.into()
        } else {
            self.matrix_mode.into()
        }
    }

    /// Larger of the two indices
    pub fn max_index(&self) -> f64 {
        self.fiber_index.max(self.matrix_index)
    }
}

/// Hashin fibre and matrix failure indices
pub fn hashin_indices(stress: &PlyStress, props: &PlyProperties) -> HashinResult {
    let fiber_mode = FiberMode::from_stress(stress.sigma1);
    let matrix_mode = MatrixMode::from_stress(stress.sigma2);
    HashinResult {
        fiber_index: fiber_mode.index(stress, props),
        matrix_index: matrix_mode.index(stress, props),
        fiber_mode,
        matrix_mode,
    }
}

/// Maximum-stress margins of safety `allowable/|applied| − 1`
///
/// Zero applied stress gives an infinite margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxStressMargins {
    #[serde(with = "crate::units::unbounded")]
    pub fiber: f64,
    #[serde(with = "crate::units::unbounded")]
    pub transverse: f64,
    #[serde(with = "crate::units::unbounded")]
    pub shear: f64,
}

impl MaxStressMargins {
    /// Smallest of the three margins
    pub fn min(&self) -> f64 {
        self.fiber.min(self.transverse).min(self.shear)
    }
}

/// Maximum-stress criterion margins, allowable chosen by stress sign
pub fn max_stress_margins(stress: &PlyStress, props: &PlyProperties) -> MaxStressMargins {
    let fiber_allowable = if stress.sigma1 >= 0.0 { props.xt_mpa } else { props.xc_mpa };
    let transverse_allowable = if stress.sigma2 >= 0.0 { props.yt_mpa } else { props.yc_mpa };
    MaxStressMargins {
        fiber: margin(fiber_allowable, stress.sigma1),
        transverse: margin(transverse_allowable, stress.sigma2),
        shear: margin(props.s12_mpa, stress.tau12),
    }
}

#[inline]
fn margin(allowable: f64, applied: f64) -> f64 {
    if applied == 0.0 {
        f64::INFINITY
    } else {
        allowable / applied.abs() - 1.0
    }
}

// =============================================================================
// FIRST-PLY FAILURE
// =============================================================================

/// One ply's state at the test pressure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyFailureEstimate {
    /// Position in the layup (0 = innermost)
    pub ply_index: usize,
    /// Ply angle (degrees)
    pub angle_deg: f64,
    /// Material-axis stresses at the test pressure
    pub stress: PlyStress,
    /// Tsai-Wu index at the test pressure
    pub tsai_wu_index: f64,
    /// Extrapolated failure pressure `P_test/√index` (MPa, ∞ if index ≤ 0)
    #[serde(with = "crate::units::unbounded")]
    pub failure_pressure_mpa: f64,
    /// Dominant Hashin mode at the test pressure
    pub hashin_mode: FailureMode,
}

/// First-ply failure of a layup under closed-end cylinder loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstPlyFailure {
    /// Lowest extrapolated failure pressure over all plies (MPa)
    #[serde(with = "crate::units::unbounded")]
    pub failure_pressure_mpa: f64,
    /// Index of the governing ply
    pub governing_ply: usize,
    /// Angle of the governing ply (degrees)
    pub governing_angle_deg: f64,
    /// Dominant Hashin mode of the governing ply
    pub mode: FailureMode,
    /// Every ply's estimate, in layup order
    pub plies: Vec<PlyFailureEstimate>,
}

/// First-ply failure pressure with the default Tsai-Wu interaction term.
///
/// See [`first_ply_failure_with`].
pub fn first_ply_failure(
    layup: &[f64],
    radius: f64,
    thickness: f64,
    props: &PlyProperties,
) -> CalcResult<FirstPlyFailure> {
    first_ply_failure_with(
        layup,
        radius,
        thickness,
        props,
        DEFAULT_F12_COEFFICIENT,
        FPF_TEST_PRESSURE,
    )
}

/// First-ply failure pressure of a wound cylinder.
///
/// Resultants are evaluated at `test_pressure` (normally
/// [`FPF_TEST_PRESSURE`]) with closed-end cylinder loading and no shear:
///
/// ```text
/// Nx = P·r/2,  Ny = P·r,  Nxy = 0
/// ```
///
/// Each ply's Tsai-Wu index at the test pressure is extrapolated to a failure
/// pressure `P_test/√index`. This relies on the index scaling with the square
/// of a linearly growing stress; the linear `F1`/`F2` terms make it an
/// approximation, and the reference results are defined by it. The lowest
/// pressure across plies governs. An index `≤ 0` extrapolates to an infinite
/// pressure.
///
/// # Errors
/// `InvalidInput` for an empty layup or a non-positive radius, thickness or
/// test pressure.
pub fn first_ply_failure_with(
    layup: &[f64],
    radius: f64,
    thickness: f64,
    props: &PlyProperties,
    interaction: f64,
    test_pressure: f64,
) -> CalcResult<FirstPlyFailure> {
    if layup.is_empty() {
        return Err(CalcError::invalid_input("layup", "[]", "Layup must contain at least one ply"));
    }
    if let Some(angle) = layup.iter().find(|angle| !angle.is_finite()) {
        return Err(CalcError::invalid_input("layup", angle.to_string(), "Ply angles must be finite"));
    }
    require_positive("radius", radius, "Radius must be positive")?;
    require_positive("thickness", thickness, "Laminate thickness must be positive")?;
    require_positive("test_pressure", test_pressure, "Test pressure must be positive")?;

    let NewtonsPerMm(ny) = Megapascals(test_pressure) * Millimeters(radius);
    let nx = ny / 2.0;
    let coefficients = TsaiWuCoefficients::from_strengths(props, interaction);

    let mut plies = Vec::with_capacity(layup.len());
    for (ply_index, &angle_deg) in layup.iter().enumerate() {
        let stress = ply_stress(angle_deg, nx, ny, 0.0, thickness)?;
        let index = coefficients.index(&stress);
        if index.is_nan() {
            return Err(CalcError::calculation_failed(
                "first_ply_failure",
                format!("Tsai-Wu index is NaN for ply {ply_index} at {angle_deg}°"),
            ));
        }
        let failure_pressure_mpa = if index > 0.0 {
            test_pressure / index.sqrt()
        } else {
            warn!(ply_index, angle_deg, index, "non-positive Tsai-Wu index, failure pressure unbounded");
            f64::INFINITY
        };
        plies.push(PlyFailureEstimate {
            ply_index,
            angle_deg,
            stress,
            tsai_wu_index: index,
            failure_pressure_mpa,
            hashin_mode: hashin_indices(&stress, props).dominant_mode(),
        });
    }

    let governing = plies
        .iter()
        .min_by(|a, b| a.failure_pressure_mpa.total_cmp(&b.failure_pressure_mpa))
        .copied()
        .ok_or_else(|| CalcError::calculation_failed("first_ply_failure", "no plies evaluated"))?;

    Ok(FirstPlyFailure {
        failure_pressure_mpa: governing.failure_pressure_mpa,
        governing_ply: governing.ply_index,
        governing_angle_deg: governing.angle_deg,
        mode: governing.hashin_mode,
        plies,
    })
}
