//! # File I/O Module
//!
//! Read-only loading of design cases and settings files, with schema
//! version validation for designs. The engine never writes files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vessel_core::file_io::load_design;
//! use std::path::Path;
//!
//! let design = load_design(Path::new("tank.json")).unwrap();
//! let report = design.evaluate().unwrap();
//! println!("{}: all pass = {}", report.name, report.all_pass());
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::design::{DesignCase, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::settings::AnalysisSettings;

/// Load a design case from a JSON file.
///
/// # Errors
///
/// - `FileError` if the file cannot be read
/// - `SerializationError` if the JSON is malformed
/// - `VersionMismatch` if the schema version is incompatible
pub fn load_design(path: &Path) -> CalcResult<DesignCase> {
    let design: DesignCase = read_json(path)?;
    validate_version(&design.meta.version)?;
    Ok(design)
}

/// Parse a design case from a JSON string.
pub fn parse_design(json: &str) -> CalcResult<DesignCase> {
    let design: DesignCase = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid design JSON: {e}"),
    })?;
    validate_version(&design.meta.version)?;
    Ok(design)
}

/// Load analysis settings from a JSON file; missing fields take defaults.
pub fn load_settings(path: &Path) -> CalcResult<AnalysisSettings> {
    let settings: AnalysisSettings = read_json(path)?;
    settings.validate()?;
    Ok(settings)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };

    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;
    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_major == 0 {
        let file_minor = file_parts.get(1).copied().unwrap_or(0);
        let current_minor = current_parts.get(1).copied().unwrap_or(0);
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}
