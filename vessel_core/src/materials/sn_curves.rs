//! S-N Curve Parameter Sets
//!
//! Basquin-form fatigue curves `N = C / S^m` for the structural materials of a
//! tank: the composite overwrap and the metallic liners/bosses. `S` is the
//! stress amplitude in MPa.
//!
//! The tabulated sets are representative fits for screening. Projects with
//! coupon data should pass their own [`SnParameters`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Basquin S-N curve parameters.
///
/// ## JSON Example
///
/// ```json
/// { "c": 1.0e25, "m": 9.0, "endurance_limit_mpa": 65.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnParameters {
    /// Material constant C (cycles·MPa^m)
    pub c: f64,
    /// Basquin slope m
    pub m: f64,
    /// Stress amplitude below which life is infinite (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endurance_limit_mpa: Option<f64>,
}

impl SnParameters {
    /// Validate C > 0 and m > 0 (and a non-negative endurance limit)
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("c", self.c, "S-N constant C must be positive")?;
        require_positive("m", self.m, "S-N slope m must be positive")?;
        if let Some(limit) = self.endurance_limit_mpa {
            if limit.is_nan() || limit < 0.0 {
                return Err(CalcError::invalid_input(
                    "endurance_limit_mpa",
                    limit.to_string(),
                    "Endurance limit cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Named S-N curves with their static ultimate strength for mean-stress
/// correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnCurve {
    /// Hoop-wound T700/epoxy, fibre-direction stress amplitude
    #[serde(rename = "CFRP-T700")]
    CarbonEpoxyT700,
    /// 6061-T6 aluminium liner (Type III)
    #[serde(rename = "Al-6061-T6")]
    Aluminum6061T6,
    /// 4130 chromoly steel (bosses, Type I/II shells)
    #[serde(rename = "Steel-4130")]
    Steel4130,
}

impl SnCurve {
    /// All curves in table order
    pub const ALL: [SnCurve; 3] = [
        SnCurve::CarbonEpoxyT700,
        SnCurve::Aluminum6061T6,
        SnCurve::Steel4130,
    ];

    /// Basquin parameters for this curve
    pub fn parameters(&self) -> SnParameters {
        match self {
            SnCurve::CarbonEpoxyT700 => CFRP_T700_SN,
            SnCurve::Aluminum6061T6 => AL_6061_T6_SN,
            SnCurve::Steel4130 => STEEL_4130_SN,
        }
    }

    /// Static ultimate tensile strength (MPa)
    pub fn ultimate_strength_mpa(&self) -> f64 {
        match self {
            SnCurve::CarbonEpoxyT700 => 2_550.0,
            SnCurve::Aluminum6061T6 => 310.0,
            SnCurve::Steel4130 => 670.0,
        }
    }

    /// Short code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            SnCurve::CarbonEpoxyT700 => "CFRP-T700",
            SnCurve::Aluminum6061T6 => "Al-6061-T6",
            SnCurve::Steel4130 => "Steel-4130",
        }
    }
}

impl FromStr for SnCurve {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnCurve::ALL
            .into_iter()
            .find(|curve| curve.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

/// 1e6 cycles at 1200 MPa amplitude, flat composite curve
pub const CFRP_T700_SN: SnParameters = SnParameters {
    c: 1.283_918_464_548_864e49,
    m: 14.0,
    endurance_limit_mpa: None,
};

/// 1e7 cycles at 100 MPa, fatigue strength at 5e8 cycles taken as the limit
pub const AL_6061_T6_SN: SnParameters = SnParameters {
    c: 1.0e25,
    m: 9.0,
    endurance_limit_mpa: Some(65.0),
};

/// 1e6 cycles at 400 MPa
pub const STEEL_4130_SN: SnParameters = SnParameters {
    c: 4.096e21,
    m: 6.0,
    endurance_limit_mpa: Some(300.0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_curves_valid() {
        for curve in SnCurve::ALL {
            assert!(curve.parameters().validate().is_ok());
            assert!(curve.ultimate_strength_mpa() > 0.0);
        }
    }

    #[test]
    fn test_anchor_points() {
        let cfrp = CFRP_T700_SN;
        let n = cfrp.c / 1200.0_f64.powf(cfrp.m);
        assert!((n / 1.0e6 - 1.0).abs() < 1e-6);

        let steel = STEEL_4130_SN;
        let n = steel.c / 400.0_f64.powf(steel.m);
        assert!((n / 1.0e6 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = SnParameters { c: 1.0e20, m: 0.0, endurance_limit_mpa: None };
        assert!(bad.validate().is_err());

        let bad = SnParameters { c: -1.0, m: 5.0, endurance_limit_mpa: None };
        assert!(bad.validate().is_err());

        let bad = SnParameters { c: 1.0e20, m: 5.0, endurance_limit_mpa: Some(-3.0) };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_curve_lookup() {
        assert_eq!("al-6061-t6".parse::<SnCurve>().unwrap(), SnCurve::Aluminum6061T6);
        assert!("titanium".parse::<SnCurve>().is_err());
    }

    #[test]
    fn test_endurance_limit_optional_in_json() {
        let params: SnParameters = serde_json::from_str(r#"{"c": 1e20, "m": 5.0}"#).unwrap();
        assert_eq!(params.endurance_limit_mpa, None);
    }
}
