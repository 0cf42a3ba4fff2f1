//! # vessel_core - Composite Pressure-Vessel Analysis Engine
//!
//! `vessel_core` evaluates candidate composite pressure-vessel (hydrogen tank)
//! designs: thin-wall stress mechanics, composite ply failure criteria,
//! fatigue life and Monte Carlo reliability. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All records implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types; no NaN results, no silent clamping
//! - **Reproducible**: Monte Carlo runs take an optional seed
//!
//! ## Quick Start
//!
//! ```rust
//! use vessel_core::equations::vessel::{burst_pressure, burst_ratio, hoop_stress};
//! use vessel_core::reliability::{burst_limit_state, MonteCarloConfig};
//!
//! let hoop = hoop_stress(70.0, 87.5, 5.0).unwrap(); // 1225 MPa
//! let burst = burst_pressure(2000.0, 5.0, 87.5).unwrap(); // 114.29 MPa
//! assert!(burst_ratio(burst, 70.0).unwrap() < 2.25);
//!
//! let model = burst_limit_state(burst, 0.1, 70.0, 0.05).unwrap();
//! let result = model.simulate(&MonteCarloConfig::with_seed(10_000, 42)).unwrap();
//! println!("hoop = {hoop} MPa, p_f = {:.2e}", result.p_failure);
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Closed-form mechanics, ply failure, fatigue and statistics
//! - [`reliability`] - Distributions, Monte Carlo driver, limit states, β
//! - [`calculations`] - Design-level calculation records (vessel, laminate, fatigue, reliability)
//! - [`materials`] - Ply property and S-N reference tables
//! - [`settings`] - Analysis settings with defaults
//! - [`design`] - Design case container and evaluation report
//! - [`file_io`] - Read-only design and settings loading
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod reliability;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use design::{DesignCase, DesignReport, SCHEMA_VERSION};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_design, load_settings, parse_design};
pub use reliability::{reliability_index, MonteCarloConfig, MonteCarloResult, RandomVariable};
pub use settings::AnalysisSettings;
