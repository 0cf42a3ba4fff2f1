//! # Design Calculations
//!
//! Each calculation drives the equations for one aspect of a tank design and
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`vessel`] - Membrane stresses, burst ratio, sizing, volume and weight
//! - [`laminate`] - Ply failure indices and first-ply failure pressure
//! - [`fatigue`] - S-N life and Miner damage under pressure cycling
//! - [`reliability`] - Monte Carlo failure probability and reliability index

pub mod fatigue;
pub mod laminate;
pub mod reliability;
pub mod vessel;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::AnalysisSettings;

pub use fatigue::{FatigueInput, FatigueResult};
pub use laminate::{LaminateInput, LaminateResult, PlyEvaluation};
pub use reliability::{LimitStateDefinition, ReliabilityInput, ReliabilityResult};
pub use vessel::{VesselGeometry, VesselInput, VesselResult};

/// Enum wrapper for all calculation types.
///
/// Lets a design case hold heterogeneous calculations in one list with
/// clean tagged serialization:
///
/// ```json
/// { "type": "Vessel", "label": "Tank A", ... }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Vessel(VesselInput),
    Laminate(LaminateInput),
    Fatigue(FatigueInput),
    Reliability(ReliabilityInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Vessel(v) => &v.label,
            CalculationItem::Laminate(l) => &l.label,
            CalculationItem::Fatigue(f) => &f.label,
            CalculationItem::Reliability(r) => &r.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Vessel(_) => "Vessel",
            CalculationItem::Laminate(_) => "Laminate",
            CalculationItem::Fatigue(_) => "Fatigue",
            CalculationItem::Reliability(_) => "Reliability",
        }
    }

    /// Run the calculation under the given settings
    pub fn calculate(&self, settings: &AnalysisSettings) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::Vessel(input) => CalculationOutput::Vessel(vessel::calculate(input, settings)?),
            CalculationItem::Laminate(input) => CalculationOutput::Laminate(laminate::calculate(input, settings)?),
            CalculationItem::Fatigue(input) => CalculationOutput::Fatigue(fatigue::calculate(input)?),
            CalculationItem::Reliability(input) => {
                CalculationOutput::Reliability(reliability::calculate(input, settings)?)
            }
        })
    }
}

/// Result of any calculation, tagged like [`CalculationItem`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Vessel(VesselResult),
    Laminate(LaminateResult),
    Fatigue(FatigueResult),
    Reliability(ReliabilityResult),
}

impl CalculationOutput {
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutput::Vessel(r) => r.passes(),
            CalculationOutput::Laminate(r) => r.passes(),
            CalculationOutput::Fatigue(r) => r.passes(),
            CalculationOutput::Reliability(r) => r.passes(),
        }
    }
}
