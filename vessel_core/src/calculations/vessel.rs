//! # Vessel Check
//!
//! Thin-wall check of a cylindrical tank with hemispherical ends: membrane
//! stresses at working pressure, burst pressure and burst ratio, required
//! wall thickness, internal volume and shell weight.
//!
//! ## Assumptions
//!
//! - Thin wall (r/t > 10); no Lamé correction
//! - Burst is governed by hoop stress reaching the overwrap strength
//! - Shell weight uses the overwrap density over cylinder and domes
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::vessel::{calculate, VesselGeometry, VesselInput};
//! use vessel_core::materials::{CompositeGrade, PlyMaterial};
//! use vessel_core::settings::AnalysisSettings;
//!
//! let input = VesselInput {
//!     label: "Type IV 70 MPa".to_string(),
//!     geometry: VesselGeometry {
//!         inner_radius_mm: 87.5,
//!         thickness_mm: 5.0,
//!         cylinder_length_mm: 800.0,
//!     },
//!     working_pressure_mpa: 70.0,
//!     material: PlyMaterial::from(CompositeGrade::T700Epoxy),
//!     ultimate_strength_mpa: Some(2000.0),
//!     min_burst_ratio: None,
//! };
//!
//! let result = calculate(&input, &AnalysisSettings::default()).unwrap();
//! assert!(!result.passes()); // 114 MPa burst is only 1.63 × working
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::vessel::{
    axial_stress,
    burst_pressure,
    burst_ratio,
    cylinder_volume,
    hoop_stress,
    required_thickness,
    tank_weight,
    von_mises_stress,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::PlyMaterial;
use crate::settings::AnalysisSettings;
use crate::units::{Kilograms, Liters};

/// Cylinder-with-hemispherical-domes geometry.
///
/// ## JSON Example
///
/// ```json
/// { "inner_radius_mm": 87.5, "thickness_mm": 5.0, "cylinder_length_mm": 800.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselGeometry {
    /// Inner radius r (mm)
    pub inner_radius_mm: f64,

    /// Wall thickness t (mm)
    pub thickness_mm: f64,

    /// Length of the cylindrical section, domes excluded (mm)
    pub cylinder_length_mm: f64,
}

impl VesselGeometry {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("inner_radius_mm", self.inner_radius_mm, "Radius must be positive")?;
        require_positive("thickness_mm", self.thickness_mm, "Thickness must be positive")?;
        if self.cylinder_length_mm.is_nan() || self.cylinder_length_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "cylinder_length_mm",
                self.cylinder_length_mm.to_string(),
                "Cylinder length cannot be negative",
            ));
        }
        Ok(())
    }

    /// Radius-to-thickness ratio
    pub fn r_over_t(&self) -> f64 {
        self.inner_radius_mm / self.thickness_mm
    }

    /// Enclosed volume
    pub fn internal_volume(&self) -> Liters {
        cylinder_volume(self.inner_radius_mm, self.cylinder_length_mm)
    }

    /// Shell weight at `density` (kg/m³)
    pub fn shell_weight(&self, density_kg_m3: f64) -> Kilograms {
        tank_weight(
            self.inner_radius_mm,
            self.thickness_mm,
            self.cylinder_length_mm,
            density_kg_m3,
        )
    }
}

/// Input parameters for a vessel check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Type IV 70 MPa",
///   "geometry": { "inner_radius_mm": 87.5, "thickness_mm": 5.0, "cylinder_length_mm": 800.0 },
///   "working_pressure_mpa": 70.0,
///   "material": { "type": "Library", "grade": "T700" },
///   "ultimate_strength_mpa": 2000.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselInput {
    /// User label (e.g., "Tank A", "Rear 70 MPa")
    pub label: String,

    pub geometry: VesselGeometry,

    /// Nominal working pressure (MPa)
    pub working_pressure_mpa: f64,

    /// Overwrap material; supplies density and default strength
    #[serde(default)]
    pub material: PlyMaterial,

    /// Hoop ultimate strength override (MPa); the ply Xt when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimate_strength_mpa: Option<f64>,

    /// Minimum burst ratio override; the design setting when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_burst_ratio: Option<f64>,
}

impl VesselInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        require_positive(
            "working_pressure_mpa",
            self.working_pressure_mpa,
            "Working pressure must be positive",
        )?;
        if let Some(strength) = self.ultimate_strength_mpa {
            require_positive("ultimate_strength_mpa", strength, "Ultimate strength must be positive")?;
        }
        if let Some(ratio) = self.min_burst_ratio {
            require_positive("min_burst_ratio", ratio, "Minimum burst ratio must be positive")?;
        }
        self.material.validated_properties()?;
        Ok(())
    }

    /// Strength used for burst and sizing (MPa)
    pub fn ultimate_strength(&self) -> f64 {
        self.ultimate_strength_mpa
            .unwrap_or_else(|| self.material.properties().xt_mpa)
    }
}

/// Results from a vessel check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "hoop_stress_mpa": 1225.0,
///   "axial_stress_mpa": 612.5,
///   "von_mises_stress_mpa": 1060.9,
///   "burst_pressure_mpa": 114.29,
///   "burst_ratio": 1.63,
///   "min_burst_ratio": 2.25,
///   "required_thickness_mm": 6.89,
///   "internal_volume": 22.05,
///   "shell_weight": 2.23
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselResult {
    /// Hoop stress at working pressure (MPa)
    pub hoop_stress_mpa: f64,

    /// Axial stress at working pressure (MPa)
    pub axial_stress_mpa: f64,

    /// Von Mises equivalent of the biaxial membrane state (MPa)
    pub von_mises_stress_mpa: f64,

    /// Hoop-governed burst pressure (MPa)
    pub burst_pressure_mpa: f64,

    /// Burst over working pressure
    pub burst_ratio: f64,

    /// Minimum burst ratio the check was made against
    pub min_burst_ratio: f64,

    /// Wall thickness needed for the design safety factor (mm)
    pub required_thickness_mm: f64,

    /// Provided over required thickness
    pub thickness_ratio: f64,

    /// Strength used for burst and sizing (MPa)
    pub ultimate_strength_mpa: f64,

    pub internal_volume: Liters,

    pub shell_weight: Kilograms,
}

impl VesselResult {
    /// Required over achieved burst ratio (≤ 1.0 passes)
    pub fn burst_unity(&self) -> f64 {
        self.min_burst_ratio / self.burst_ratio
    }

    /// Required over provided thickness (≤ 1.0 passes)
    pub fn thickness_unity(&self) -> f64 {
        1.0 / self.thickness_ratio
    }

    /// Check if the vessel passes both burst and sizing checks
    pub fn passes(&self) -> bool {
        self.burst_unity() <= 1.0 && self.thickness_unity() <= 1.0
    }

    /// Get the governing check
    pub fn governing_condition(&self) -> &'static str {
        if self.burst_unity() >= self.thickness_unity() {
            "Burst ratio"
        } else {
            "Wall thickness"
        }
    }
}

/// Run the vessel check.
///
/// # Arguments
///
/// * `input` - Geometry, working pressure and material
/// * `settings` - Safety factor and default minimum burst ratio
///
/// # Returns
///
/// * `Ok(VesselResult)` - Stresses, burst and sizing checks
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &VesselInput, settings: &AnalysisSettings) -> CalcResult<VesselResult> {
    input.validate()?;

    let g = &input.geometry;
    let p = input.working_pressure_mpa;
    let r = g.inner_radius_mm;
    let t = g.thickness_mm;
    let strength = input.ultimate_strength();
    let min_burst_ratio = input.min_burst_ratio.unwrap_or(settings.min_burst_ratio);

    let hoop = hoop_stress(p, r, t)?;
    let axial = axial_stress(p, r, t)?;
    let burst = burst_pressure(strength, t, r)?;
    let ratio = burst_ratio(burst, p)?;
    let t_req = required_thickness(p, r, strength, settings.safety_factor)?;
    let density = input.material.properties().density_kg_m3;

    let result = VesselResult {
        hoop_stress_mpa: hoop,
        axial_stress_mpa: axial,
        von_mises_stress_mpa: von_mises_stress(hoop, axial),
        burst_pressure_mpa: burst,
        burst_ratio: ratio,
        min_burst_ratio,
        required_thickness_mm: t_req,
        thickness_ratio: t / t_req,
        ultimate_strength_mpa: strength,
        internal_volume: g.internal_volume(),
        shell_weight: g.shell_weight(density),
    };

    debug!(
        label = %input.label,
        burst_mpa = burst,
        burst_ratio = ratio,
        passes = result.passes(),
        "vessel check"
    );
    Ok(result)
}
