//! # Unit Types
//!
//! Type-safe wrappers for the units used by the analysis engine. These are
//! plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## SI-mm Units (Primary)
//!
//! The engine works in a consistent N-mm-MPa system:
//! - Length: millimetres (mm)
//! - Stress / pressure: megapascals (MPa = N/mm²)
//! - Force resultant: newtons per millimetre (N/mm = MPa·mm)
//! - Volume: litres (L) for reporting, mm³ internally
//! - Mass: kilograms (kg)
//! - Angles: degrees at the API, radians internally
//!
//! Hydrogen tanks are usually rated in bar, so [`Bar`] converts to and from
//! [`Megapascals`] (700 bar = 70 MPa).
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::units::{Bar, Megapascals, CubicMillimeters, Liters};
//!
//! let working: Megapascals = Bar(700.0).into();
//! assert!((working.0 - 70.0).abs() < 1e-12);
//!
//! let volume: Liters = CubicMillimeters(2.5e6).into();
//! assert!((volume.0 - 2.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

// ============================================================================
// Stress / Pressure Units
// ============================================================================

/// Stress or pressure in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Pressure in bar (1 bar = 0.1 MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

impl From<Bar> for Megapascals {
    fn from(bar: Bar) -> Self {
        Megapascals(bar.0 / 10.0)
    }
}

impl From<Megapascals> for Bar {
    fn from(mpa: Megapascals) -> Self {
        Bar(mpa.0 * 10.0)
    }
}

// ============================================================================
// Force Resultant Units
// ============================================================================

/// Laminate force resultant (force per unit width) in N/mm
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMm(pub f64);

impl Mul<Millimeters> for Megapascals {
    type Output = NewtonsPerMm;

    /// Pressure times radius gives a membrane resultant (MPa·mm = N/mm)
    fn mul(self, rhs: Millimeters) -> NewtonsPerMm {
        NewtonsPerMm(self.0 * rhs.0)
    }
}

// ============================================================================
// Volume and Mass Units
// ============================================================================

/// Volume in cubic millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMillimeters(pub f64);

/// Volume in litres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// 1 L = 1e6 mm³
const MM3_PER_LITER: f64 = 1.0e6;

/// 1 m³ = 1e9 mm³
const MM3_PER_M3: f64 = 1.0e9;

impl From<CubicMillimeters> for Liters {
    fn from(v: CubicMillimeters) -> Self {
        Liters(v.0 / MM3_PER_LITER)
    }
}

impl From<Liters> for CubicMillimeters {
    fn from(v: Liters) -> Self {
        CubicMillimeters(v.0 * MM3_PER_LITER)
    }
}

impl CubicMillimeters {
    /// Mass of this volume at a density given in kg/m³
    pub fn mass_at(self, density_kg_m3: f64) -> Kilograms {
        Kilograms(self.0 / MM3_PER_M3 * density_kg_m3)
    }
}

impl Add for CubicMillimeters {
    type Output = CubicMillimeters;

    fn add(self, rhs: Self) -> Self::Output {
        CubicMillimeters(self.0 + rhs.0)
    }
}

impl Sub for CubicMillimeters {
    type Output = CubicMillimeters;

    fn sub(self, rhs: Self) -> Self::Output {
        CubicMillimeters(self.0 - rhs.0)
    }
}

impl Add for Kilograms {
    type Output = Kilograms;

    fn add(self, rhs: Self) -> Self::Output {
        Kilograms(self.0 + rhs.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees (ply orientation relative to the vessel axis)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl std::fmt::Display for Millimeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} mm", self.0)
    }
}

impl std::fmt::Display for Megapascals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} MPa", self.0)
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} bar", self.0)
    }
}

impl std::fmt::Display for Liters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} L", self.0)
    }
}

impl std::fmt::Display for Kilograms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

// ============================================================================
// Unbounded values
// ============================================================================

/// Serde adapter for `f64` fields that may legitimately be ±∞ (infinite
/// fatigue life, β at p_f = 0). JSON has no infinity, so these are written
/// as the strings `"inf"` / `"-inf"`; finite values stay plain numbers.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Life {
///     #[serde(with = "vessel_core::units::unbounded")]
///     cycles: f64,
/// }
///
/// let json = serde_json::to_string(&Life { cycles: f64::INFINITY }).unwrap();
/// assert_eq!(json, r#"{"cycles":"inf"}"#);
/// ```
pub mod unbounded {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITY: &str = "inf";
    const NEG_INFINITY: &str = "-inf";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *value == f64::INFINITY {
            serializer.serialize_str(INFINITY)
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str(NEG_INFINITY)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_mpa_conversion() {
        let mpa: Megapascals = Bar(700.0).into();
        assert!((mpa.0 - 70.0).abs() < 1e-12);

        let bar: Bar = Megapascals(35.0).into();
        assert!((bar.0 - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_times_radius() {
        let n = Megapascals(70.0) * Millimeters(87.5);
        assert_eq!(n, NewtonsPerMm(6125.0));
    }

    #[test]
    fn test_volume_conversions() {
        let liters: Liters = CubicMillimeters(1.0e6).into();
        assert_eq!(liters.0, 1.0);

        let back: CubicMillimeters = Liters(2.0).into();
        assert_eq!(back.0, 2.0e6);
    }

    #[test]
    fn test_mass_at_density() {
        // 1e9 mm³ = 1 m³ of CFRP at 1600 kg/m³
        let mass = CubicMillimeters(1.0e9).mass_at(1600.0);
        assert!((mass.0 - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_conversion() {
        let rad: Radians = Degrees(90.0).into();
        assert!((rad.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let deg: Degrees = Radians(std::f64::consts::PI).into();
        assert!((deg.0 - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Megapascals(70.0)), "70.00 MPa");
        assert_eq!(format!("{}", Bar(700.0)), "700 bar");
        assert_eq!(format!("{}", Liters(36.25)), "36.25 L");
    }

    #[test]
    fn test_serialization_transparent() {
        let json = serde_json::to_string(&Millimeters(87.5)).unwrap();
        assert_eq!(json, "87.5");
        let parsed: Millimeters = serde_json::from_str("5.0").unwrap();
        assert_eq!(parsed, Millimeters(5.0));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Bound {
        #[serde(with = "unbounded")]
        value: f64,
    }

    #[test]
    fn test_unbounded_infinities_survive_json() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, 1225.0, -0.5] {
            let json = serde_json::to_string(&Bound { value }).unwrap();
            let back: Bound = serde_json::from_str(&json).unwrap();
            assert_eq!(back.value, value);
        }
        assert_eq!(serde_json::to_string(&Bound { value: f64::NEG_INFINITY }).unwrap(), r#"{"value":"-inf"}"#);
        assert_eq!(serde_json::to_string(&Bound { value: 2.5 }).unwrap(), r#"{"value":2.5}"#);
    }

    #[test]
    fn test_unbounded_rejects_other_strings() {
        assert!(serde_json::from_str::<Bound>(r#"{"value":"huge"}"#).is_err());
        assert!(serde_json::from_str::<Bound>(r#"{"value":null}"#).is_err());
    }
}
