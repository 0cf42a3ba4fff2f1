//! # Design Cases
//!
//! A `DesignCase` bundles analysis settings with the calculations to run for
//! one candidate tank. Design files are JSON.
//!
//! ## Structure
//!
//! ```text
//! DesignCase
//! ├── meta: DesignMeta (schema version, name, description)
//! ├── settings: AnalysisSettings (defaults when omitted)
//! └── items: Vec<CalculationItem> (evaluated in order)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::CalcResult;
use crate::settings::AnalysisSettings;

/// Current schema version for design files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root design container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignCase {
    pub meta: DesignMeta,

    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Calculations, evaluated in list order
    #[serde(default)]
    pub items: Vec<CalculationItem>,
}

impl DesignCase {
    /// Create an empty design with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        DesignCase {
            meta: DesignMeta {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                description: None,
            },
            settings: AnalysisSettings::default(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: CalculationItem) {
        self.items.push(item);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Run every item under this design's settings.
    ///
    /// Stops at the first item that fails to calculate.
    pub fn evaluate(&self) -> CalcResult<DesignReport> {
        self.settings.validate()?;
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let output = item.calculate(&self.settings)?;
            debug!(label = item.label(), calc_type = item.calc_type(), passes = output.passes(), "evaluated item");
            items.push(ItemReport {
                label: item.label().to_string(),
                passes: output.passes(),
                output,
            });
        }
        Ok(DesignReport {
            name: self.meta.name.clone(),
            items,
        })
    }
}

/// Design metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMeta {
    /// Schema version (for compatibility checks)
    pub version: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One evaluated calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub label: String,
    pub passes: bool,
    pub output: CalculationOutput,
}

/// Every calculation of a design, in item order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReport {
    pub name: String,
    pub items: Vec<ItemReport>,
}

impl DesignReport {
    pub fn all_pass(&self) -> bool {
        self.items.iter().all(|item| item.passes)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| !item.passes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{VesselGeometry, VesselInput};
    use crate::materials::{CompositeGrade, PlyMaterial};

    fn vessel(label: &str, thickness_mm: f64) -> CalculationItem {
        CalculationItem::Vessel(VesselInput {
            label: label.to_string(),
            geometry: VesselGeometry {
                inner_radius_mm: 87.5,
                thickness_mm,
                cylinder_length_mm: 800.0,
            },
            working_pressure_mpa: 70.0,
            material: PlyMaterial::from(CompositeGrade::T700Epoxy),
            ultimate_strength_mpa: Some(2000.0),
            min_burst_ratio: None,
        })
    }

    #[test]
    fn test_new_design() {
        let design = DesignCase::new("H2 tank");
        assert_eq!(design.meta.version, SCHEMA_VERSION);
        assert_eq!(design.item_count(), 0);
        assert!(design.evaluate().unwrap().all_pass());
    }

    #[test]
    fn test_evaluate_in_order() {
        let mut design = DesignCase::new("H2 tank");
        design.add_item(vessel("thin", 5.0));
        design.add_item(vessel("thick", 7.0));
        let report = design.evaluate().unwrap();
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].label, "thin");
        assert!(!report.items[0].passes);
        assert!(report.items[1].passes);
        assert!(!report.all_pass());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut design = DesignCase::new("H2 tank");
        design.settings.safety_factor = -1.0;
        assert!(design.evaluate().is_err());
    }

    #[test]
    fn test_item_error_stops_evaluation() {
        let mut design = DesignCase::new("H2 tank");
        design.add_item(vessel("bad", 0.0));
        assert!(design.evaluate().is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{ "meta": { "version": "0.1.0", "name": "Minimal" } }"#;
        let design: DesignCase = serde_json::from_str(json).unwrap();
        assert_eq!(design.settings, AnalysisSettings::default());
        assert!(design.items.is_empty());

        let design = DesignCase::new("Roundtrip");
        let json = serde_json::to_string_pretty(&design).unwrap();
        let roundtrip: DesignCase = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.name, "Roundtrip");
    }
}
