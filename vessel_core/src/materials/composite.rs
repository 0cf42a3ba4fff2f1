//! Unidirectional Ply Property Tables
//!
//! Lamina-level elastic constants and strengths for the fibre/resin systems
//! commonly wound onto Type III/IV hydrogen tanks. Values are typical
//! manufacturer data-sheet numbers at room temperature and 60% fibre volume
//! fraction; they are reference values for design screening, not allowables.
//!
//! ## Conventions
//!
//! - Direction 1 is along the fibre, 2 is transverse in-plane
//! - Compressive strengths `Xc`/`Yc` are stored as positive magnitudes
//! - Stresses and moduli in MPa, density in kg/m³

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Lamina properties for a unidirectional ply.
///
/// ## JSON Example
///
/// ```json
/// {
///   "e1_mpa": 135000.0, "e2_mpa": 8800.0, "g12_mpa": 4600.0, "nu12": 0.30,
///   "xt_mpa": 2550.0, "xc_mpa": 1470.0, "yt_mpa": 60.0, "yc_mpa": 200.0,
///   "s12_mpa": 90.0, "density_kg_m3": 1550.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyProperties {
    /// Longitudinal modulus E1 (MPa)
    pub e1_mpa: f64,
    /// Transverse modulus E2 (MPa)
    pub e2_mpa: f64,
    /// In-plane shear modulus G12 (MPa)
    pub g12_mpa: f64,
    /// Major Poisson's ratio ν12
    pub nu12: f64,
    /// Longitudinal tensile strength Xt (MPa)
    pub xt_mpa: f64,
    /// Longitudinal compressive strength Xc (MPa, magnitude)
    pub xc_mpa: f64,
    /// Transverse tensile strength Yt (MPa)
    pub yt_mpa: f64,
    /// Transverse compressive strength Yc (MPa, magnitude)
    pub yc_mpa: f64,
    /// In-plane shear strength S12 (MPa)
    pub s12_mpa: f64,
    /// Cured ply density (kg/m³)
    pub density_kg_m3: f64,
}

impl PlyProperties {
    /// Validate that moduli, strengths and density are positive.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("e1_mpa", self.e1_mpa),
            ("e2_mpa", self.e2_mpa),
            ("g12_mpa", self.g12_mpa),
            ("xt_mpa", self.xt_mpa),
            ("xc_mpa", self.xc_mpa),
            ("yt_mpa", self.yt_mpa),
            ("yc_mpa", self.yc_mpa),
            ("s12_mpa", self.s12_mpa),
            ("density_kg_m3", self.density_kg_m3),
        ];
        for (field, value) in positive {
            require_positive(field, value, "Ply property must be positive")?;
        }
        if !(0.0..0.5).contains(&self.nu12) {
            return Err(CalcError::invalid_input(
                "nu12",
                self.nu12.to_string(),
                "Poisson's ratio must be in [0, 0.5)",
            ));
        }
        Ok(())
    }

    /// Minor Poisson's ratio ν21 = ν12·E2/E1
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e2_mpa / self.e1_mpa
    }
}

/// Named fibre/resin systems with tabulated ply properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeGrade {
    /// Toray T700S / epoxy, the workhorse of wound hydrogen tanks
    #[serde(rename = "T700")]
    T700Epoxy,
    /// Toray T800H / epoxy, higher-modulus intermediate fibre
    #[serde(rename = "T800")]
    T800Epoxy,
    /// Hexcel IM7 / 8552 prepreg
    #[serde(rename = "IM7-8552")]
    Im7_8552,
    /// E-glass / epoxy, used for impact-protection outer layers
    #[serde(rename = "E-glass")]
    EGlassEpoxy,
}

impl CompositeGrade {
    /// All grades in table order
    pub const ALL: [CompositeGrade; 4] = [
        CompositeGrade::T700Epoxy,
        CompositeGrade::T800Epoxy,
        CompositeGrade::Im7_8552,
        CompositeGrade::EGlassEpoxy,
    ];

    /// Tabulated ply properties for this grade
    pub fn properties(&self) -> PlyProperties {
        match self {
            CompositeGrade::T700Epoxy => T700_EPOXY,
            CompositeGrade::T800Epoxy => T800_EPOXY,
            CompositeGrade::Im7_8552 => IM7_8552,
            CompositeGrade::EGlassEpoxy => E_GLASS_EPOXY,
        }
    }

    /// Short code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            CompositeGrade::T700Epoxy => "T700",
            CompositeGrade::T800Epoxy => "T800",
            CompositeGrade::Im7_8552 => "IM7-8552",
            CompositeGrade::EGlassEpoxy => "E-glass",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CompositeGrade::T700Epoxy => "T700S/Epoxy",
            CompositeGrade::T800Epoxy => "T800H/Epoxy",
            CompositeGrade::Im7_8552 => "IM7/8552",
            CompositeGrade::EGlassEpoxy => "E-Glass/Epoxy",
        }
    }
}

impl FromStr for CompositeGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompositeGrade::ALL
            .into_iter()
            .find(|grade| grade.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

pub const T700_EPOXY: PlyProperties = PlyProperties {
    e1_mpa: 135_000.0,
    e2_mpa: 8_800.0,
    g12_mpa: 4_600.0,
    nu12: 0.30,
    xt_mpa: 2_550.0,
    xc_mpa: 1_470.0,
    yt_mpa: 60.0,
    yc_mpa: 200.0,
    s12_mpa: 90.0,
    density_kg_m3: 1_550.0,
};

pub const T800_EPOXY: PlyProperties = PlyProperties {
    e1_mpa: 162_000.0,
    e2_mpa: 9_000.0,
    g12_mpa: 5_000.0,
    nu12: 0.30,
    xt_mpa: 2_900.0,
    xc_mpa: 1_490.0,
    yt_mpa: 64.0,
    yc_mpa: 197.0,
    s12_mpa: 98.0,
    density_kg_m3: 1_570.0,
};

pub const IM7_8552: PlyProperties = PlyProperties {
    e1_mpa: 161_000.0,
    e2_mpa: 11_380.0,
    g12_mpa: 5_170.0,
    nu12: 0.32,
    xt_mpa: 2_724.0,
    xc_mpa: 1_690.0,
    yt_mpa: 111.0,
    yc_mpa: 214.0,
    s12_mpa: 120.0,
    density_kg_m3: 1_570.0,
};

pub const E_GLASS_EPOXY: PlyProperties = PlyProperties {
    e1_mpa: 45_600.0,
    e2_mpa: 16_200.0,
    g12_mpa: 5_830.0,
    nu12: 0.278,
    xt_mpa: 1_280.0,
    xc_mpa: 800.0,
    yt_mpa: 40.0,
    yc_mpa: 145.0,
    s12_mpa: 73.0,
    density_kg_m3: 2_000.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_grades_valid() {
        for grade in CompositeGrade::ALL {
            assert!(grade.properties().validate().is_ok(), "{} invalid", grade.code());
        }
    }

    #[test]
    fn test_grade_lookup() {
        assert_eq!("t700".parse::<CompositeGrade>().unwrap(), CompositeGrade::T700Epoxy);
        assert_eq!("IM7-8552".parse::<CompositeGrade>().unwrap(), CompositeGrade::Im7_8552);

        let err = "T1100".parse::<CompositeGrade>().unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_negative_strength_rejected() {
        let mut props = T700_EPOXY;
        props.xc_mpa = -1470.0;
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_poisson_range() {
        let mut props = T800_EPOXY;
        props.nu12 = 0.6;
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_minor_poisson() {
        // ν21 = 0.30 * 8800 / 135000
        assert!((T700_EPOXY.nu21() - 0.019_555).abs() < 1e-5);
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&CompositeGrade::EGlassEpoxy).unwrap();
        assert_eq!(json, "\"E-glass\"");
        let parsed: CompositeGrade = serde_json::from_str("\"T800\"").unwrap();
        assert_eq!(parsed, CompositeGrade::T800Epoxy);
    }
}
