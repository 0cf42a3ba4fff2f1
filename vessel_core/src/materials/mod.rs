//! # Materials Database
//!
//! Immutable reference tables for the analysis engine. Nothing here is
//! mutable at runtime: callers either pick a named entry or pass their own
//! property record.
//!
//! ## Material Types
//!
//! - **Composite plies**: unidirectional lamina properties ([`composite`])
//! - **S-N curves**: Basquin fatigue parameters ([`sn_curves`])
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::{CompositeGrade, PlyMaterial};
//!
//! let overwrap = PlyMaterial::Library { grade: CompositeGrade::T700Epoxy };
//! let props = overwrap.properties();
//! println!("Xt = {} MPa, E1 = {} MPa", props.xt_mpa, props.e1_mpa);
//! ```

pub mod composite;
pub mod sn_curves;

pub use composite::{CompositeGrade, PlyProperties};
pub use sn_curves::{SnCurve, SnParameters};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// Ply material: a named library grade or explicit properties.
///
/// ## JSON Serialization
///
/// ```json
/// // Library grade
/// { "type": "Library", "grade": "T700" }
///
/// // Custom lamina data
/// { "type": "Custom", "e1_mpa": 140000.0, "e2_mpa": 9000.0, ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlyMaterial {
    /// Tabulated fibre/resin system
    Library { grade: CompositeGrade },
    /// Project-specific lamina data
    Custom(PlyProperties),
}

impl PlyMaterial {
    /// Resolve to a property record
    pub fn properties(&self) -> PlyProperties {
        match self {
            PlyMaterial::Library { grade } => grade.properties(),
            PlyMaterial::Custom(props) => *props,
        }
    }

    /// Resolve and validate
    pub fn validated_properties(&self) -> CalcResult<PlyProperties> {
        let props = self.properties();
        props.validate()?;
        Ok(props)
    }

    /// Display name for reports
    pub fn display_name(&self) -> String {
        match self {
            PlyMaterial::Library { grade } => grade.display_name().to_string(),
            PlyMaterial::Custom(_) => "Custom ply".to_string(),
        }
    }
}

impl Default for PlyMaterial {
    fn default() -> Self {
        PlyMaterial::Library {
            grade: CompositeGrade::T700Epoxy,
        }
    }
}

impl From<CompositeGrade> for PlyMaterial {
    fn from(grade: CompositeGrade) -> Self {
        PlyMaterial::Library { grade }
    }
}

impl std::fmt::Display for PlyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// S-N data source: a named curve or explicit parameters with their ultimate
/// strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SnSource {
    /// Tabulated curve
    Library { curve: SnCurve },
    /// Project-specific fit
    Custom {
        parameters: SnParameters,
        ultimate_strength_mpa: f64,
    },
}

impl SnSource {
    /// Basquin parameters
    pub fn parameters(&self) -> SnParameters {
        match self {
            SnSource::Library { curve } => curve.parameters(),
            SnSource::Custom { parameters, .. } => *parameters,
        }
    }

    /// Static ultimate strength used for the Goodman correction (MPa)
    pub fn ultimate_strength_mpa(&self) -> f64 {
        match self {
            SnSource::Library { curve } => curve.ultimate_strength_mpa(),
            SnSource::Custom {
                ultimate_strength_mpa,
                ..
            } => *ultimate_strength_mpa,
        }
    }
}

impl From<SnCurve> for SnSource {
    fn from(curve: SnCurve) -> Self {
        SnSource::Library { curve }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_material() {
        let mat = PlyMaterial::from(CompositeGrade::T800Epoxy);
        assert_eq!(mat.properties().xt_mpa, 2900.0);
        assert_eq!(mat.display_name(), "T800H/Epoxy");
    }

    #[test]
    fn test_custom_material_validation() {
        let mut props = composite::T700_EPOXY;
        props.s12_mpa = 0.0;
        let mat = PlyMaterial::Custom(props);
        assert!(mat.validated_properties().is_err());
    }

    #[test]
    fn test_material_serialization() {
        let lib = PlyMaterial::default();
        let json = serde_json::to_string(&lib).unwrap();
        assert_eq!(json, r#"{"type":"Library","grade":"T700"}"#);
        let parsed: PlyMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lib);

        let custom = PlyMaterial::Custom(composite::IM7_8552);
        let json = serde_json::to_string(&custom).unwrap();
        assert!(json.contains("\"type\":\"Custom\""));
        let parsed: PlyMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, custom);
    }

    #[test]
    fn test_sn_source() {
        let lib = SnSource::from(SnCurve::Steel4130);
        assert_eq!(lib.ultimate_strength_mpa(), 670.0);
        assert_eq!(lib.parameters().m, 6.0);

        let custom = SnSource::Custom {
            parameters: SnParameters { c: 1.0e20, m: 5.0, endurance_limit_mpa: None },
            ultimate_strength_mpa: 900.0,
        };
        let json = serde_json::to_string(&custom).unwrap();
        let parsed: SnSource = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, custom);
    }
}
