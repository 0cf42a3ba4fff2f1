//! # Thin-Wall Pressure Vessel Formulas
//!
//! Membrane stresses, burst pressure and envelope properties for a cylindrical
//! vessel with hemispherical end caps.
//!
//! These are thin-wall (membrane) approximations, not the thick-wall Lamé
//! solution. They are accurate for r/t above roughly 10, which covers wound
//! hydrogen tanks, and they are the relations design screening thresholds are
//! written against.
//!
//! ## Notation
//!
//! - `P` = Internal pressure (MPa)
//! - `r` = Inner radius (mm)
//! - `t` = Wall thickness (mm)
//! - `L` = Cylindrical length, excluding end caps (mm)
//! - `σ_θ` = Hoop stress, `σ_z` = Axial stress (MPa)
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 13.1
//! - ISO 11119-3 / EC 79 burst ratio requirements (2.25 for carbon overwraps)

use std::f64::consts::PI;

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::units::{CubicMillimeters, Kilograms, Liters};

/// Default design safety factor (minimum burst ratio for carbon fibre overwraps)
pub const DEFAULT_SAFETY_FACTOR: f64 = 2.25;

/// Hoop (circumferential) membrane stress
///
/// # Formula
/// ```text
/// σ_θ = P·r / t
/// ```
///
/// # Errors
/// `InvalidInput` if `t ≤ 0`.
pub fn hoop_stress(pressure: f64, radius: f64, thickness: f64) -> CalcResult<f64> {
    require_positive("thickness", thickness, "Wall thickness must be positive")?;
    Ok(pressure * radius / thickness)
}

/// Axial (longitudinal) membrane stress
///
/// # Formula
/// ```text
/// σ_z = P·r / (2t)
/// ```
///
/// # Errors
/// `InvalidInput` if `t ≤ 0`.
pub fn axial_stress(pressure: f64, radius: f64, thickness: f64) -> CalcResult<f64> {
    require_positive("thickness", thickness, "Wall thickness must be positive")?;
    Ok(pressure * radius / (2.0 * thickness))
}

/// Plane-stress von Mises equivalent of the biaxial membrane state
///
/// # Formula
/// ```text
/// σ_vm = √(σ_θ² + σ_z² − σ_θ·σ_z)
/// ```
#[inline]
pub fn von_mises_stress(hoop: f64, axial: f64) -> f64 {
    (hoop.powi(2) + axial.powi(2) - hoop * axial).sqrt()
}

/// Wall thickness needed to keep the hoop stress at `σ_allow / SF`
///
/// # Formula
/// ```text
/// t_req = P·r·SF / σ_allow
/// ```
///
/// Pass [`DEFAULT_SAFETY_FACTOR`] for the standard 2.25 burst ratio.
///
/// # Errors
/// `InvalidInput` if `σ_allow ≤ 0`.
pub fn required_thickness(
    pressure: f64,
    radius: f64,
    allowable_stress: f64,
    safety_factor: f64,
) -> CalcResult<f64> {
    require_positive(
        "allowable_stress",
        allowable_stress,
        "Allowable stress must be positive",
    )?;
    Ok(pressure * radius * safety_factor / allowable_stress)
}

/// Pressure at which hoop stress reaches the ultimate strength
///
/// # Formula
/// ```text
/// P_burst = σ_u·t / r
/// ```
///
/// # Errors
/// `InvalidInput` if `r ≤ 0`.
pub fn burst_pressure(ultimate_strength: f64, thickness: f64, radius: f64) -> CalcResult<f64> {
    require_positive("radius", radius, "Radius must be positive")?;
    Ok(ultimate_strength * thickness / radius)
}

/// Burst ratio: burst pressure over working pressure
///
/// # Errors
/// `InvalidInput` if the working pressure is `≤ 0`.
pub fn burst_ratio(burst: f64, working: f64) -> CalcResult<f64> {
    require_positive("working_pressure", working, "Working pressure must be positive")?;
    Ok(burst / working)
}

/// Stress ratio R = σ_min / σ_max for a load cycle
///
/// # Errors
/// `InvalidInput` if `max == 0`.
pub fn r_ratio(min: f64, max: f64) -> CalcResult<f64> {
    if max == 0.0 {
        return Err(CalcError::invalid_input(
            "max",
            max.to_string(),
            "Maximum stress must be non-zero",
        ));
    }
    Ok(min / max)
}

/// Enclosed volume of a cylinder of radius `r` and length `L` closed by two
/// hemispherical caps (together one full sphere)
///
/// ```text
/// V = π·r²·L + (4/3)·π·r³
/// ```
pub fn capsule_volume_mm3(radius: f64, length: f64) -> CubicMillimeters {
    CubicMillimeters(PI * radius.powi(2) * length + 4.0 / 3.0 * PI * radius.powi(3))
}

/// Internal volume in litres (mm³ → L)
pub fn cylinder_volume(radius: f64, length: f64) -> Liters {
    capsule_volume_mm3(radius, length).into()
}

/// Shell mass: outer solid of revolution minus inner, times density
///
/// `density` is in kg/m³.
pub fn tank_weight(radius: f64, thickness: f64, length: f64, density: f64) -> Kilograms {
    let outer = capsule_volume_mm3(radius + thickness, length);
    let inner = capsule_volume_mm3(radius, length);
    (outer - inner).mass_at(density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_membrane_stresses() {
        // r = 87.5 mm, t = 5 mm, P = 70 MPa (700 bar)
        let hoop = hoop_stress(70.0, 87.5, 5.0).unwrap();
        let axial = axial_stress(70.0, 87.5, 5.0).unwrap();

        assert_relative_eq!(hoop, 1225.0, epsilon = 1e-9);
        assert_relative_eq!(axial, 612.5, epsilon = 1e-9);
        assert!((von_mises_stress(hoop, axial) - 1061.2).abs() < 0.5);
    }

    #[test]
    fn test_von_mises_of_cylinder_state() {
        let hoop = 800.0;
        assert_relative_eq!(
            von_mises_stress(hoop, hoop / 2.0),
            hoop * 3.0_f64.sqrt() / 2.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_von_mises_uniaxial() {
        assert_relative_eq!(von_mises_stress(500.0, 0.0), 500.0);
    }

    #[test]
    fn test_non_positive_thickness_rejected() {
        assert!(hoop_stress(70.0, 87.5, 0.0).is_err());
        assert!(axial_stress(70.0, 87.5, -1.0).is_err());
    }

    #[test]
    fn test_reference_burst() {
        let burst = burst_pressure(2000.0, 5.0, 87.5).unwrap();
        assert!((burst - 114.29).abs() < 0.01);

        let ratio = burst_ratio(burst, 70.0).unwrap();
        assert!((ratio - 1.63).abs() < 0.01);
        assert!(ratio < DEFAULT_SAFETY_FACTOR);
    }

    #[test]
    fn test_burst_errors() {
        assert!(burst_pressure(2000.0, 5.0, 0.0).is_err());
        assert!(burst_ratio(114.0, 0.0).is_err());
        assert!(burst_ratio(114.0, -70.0).is_err());
    }

    #[test]
    fn test_required_thickness_hits_safety_factor() {
        let t = required_thickness(70.0, 87.5, 2550.0, DEFAULT_SAFETY_FACTOR).unwrap();
        let burst = burst_pressure(2550.0, t, 87.5).unwrap();
        assert_relative_eq!(burst_ratio(burst, 70.0).unwrap(), 2.25, max_relative = 1e-12);

        assert!(required_thickness(70.0, 87.5, 0.0, 2.25).is_err());
    }

    #[test]
    fn test_r_ratio() {
        assert_relative_eq!(r_ratio(61.25, 1225.0).unwrap(), 0.05);
        assert!(r_ratio(10.0, 0.0).is_err());
        // Negative maximum is allowed (compressive cycles)
        assert_relative_eq!(r_ratio(-50.0, -100.0).unwrap(), 0.5);
    }

    #[test]
    fn test_volume_sphere_only() {
        // Zero-length cylinder is a sphere: r = 100 mm → 4.18879 L
        let v = cylinder_volume(100.0, 0.0);
        assert_relative_eq!(v.0, 4.0 / 3.0 * PI * 1.0e6 / 1.0e6, max_relative = 1e-12);
    }

    #[test]
    fn test_volume_reference_tank() {
        // r = 87.5, L = 800: π·87.5²·800 + 4/3·π·87.5³ = 19.24 L + 2.81 L
        let v = cylinder_volume(87.5, 800.0);
        assert!((v.0 - 22.05).abs() < 0.01);
    }

    #[test]
    fn test_weight_thin_shell() {
        // Thin shell mass ≈ area × t × ρ
        let (r, t, l, rho) = (87.5, 0.01, 800.0, 1550.0);
        let area = 2.0 * PI * r * l + 4.0 * PI * r.powi(2);
        let expected = area * t * 1.0e-9 * rho;
        assert_relative_eq!(tank_weight(r, t, l, rho).0, expected, max_relative = 1e-3);
    }
}
