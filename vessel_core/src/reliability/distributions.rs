//! Random-variable definitions and samplers
//!
//! Each distribution draws from uniform variates supplied by the caller's
//! RNG, so a seeded generator reproduces the same sample stream.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Probability distribution of an uncertain input.
///
/// ## JSON Serialization
///
/// ```json
/// { "kind": "normal", "mean": 114.3, "std_dev": 5.7 }
/// { "kind": "lognormal", "mean": 2550.0, "std_dev": 127.5 }
/// { "kind": "weibull", "shape": 2.0, "scale": 45000.0 }
/// { "kind": "uniform", "min": 68.0, "max": 72.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Distribution {
    /// Gaussian with arithmetic mean and standard deviation
    Normal { mean: f64, std_dev: f64 },
    /// Lognormal specified by the arithmetic mean and standard deviation of
    /// the variable itself (not of its logarithm)
    Lognormal { mean: f64, std_dev: f64 },
    /// Two-parameter Weibull
    Weibull { shape: f64, scale: f64 },
    /// Uniform on `[min, max]`
    Uniform { min: f64, max: f64 },
}

impl Distribution {
    /// Check the distribution's parameter invariants
    pub fn validate(&self, variable: &str) -> CalcResult<()> {
        let fail = |reason: &str| Err(CalcError::invalid_distribution(variable, reason));
        match *self {
            Distribution::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return fail("mean must be finite");
                }
                if !(std_dev >= 0.0 && std_dev.is_finite()) {
                    return fail("std_dev must be finite and non-negative");
                }
            }
            Distribution::Lognormal { mean, std_dev } => {
                if !(mean > 0.0 && mean.is_finite()) {
                    return fail("lognormal mean must be finite and positive");
                }
                if !(std_dev >= 0.0 && std_dev.is_finite()) {
                    return fail("std_dev must be finite and non-negative");
                }
            }
            Distribution::Weibull { shape, scale } => {
                if !(shape > 0.0 && shape.is_finite()) {
                    return fail("Weibull shape must be finite and positive");
                }
                if !(scale > 0.0 && scale.is_finite()) {
                    return fail("Weibull scale must be finite and positive");
                }
            }
            Distribution::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite()) {
                    return fail("uniform bounds must be finite");
                }
                if min > max {
                    return fail("uniform min must not exceed max");
                }
            }
        }
        Ok(())
    }

    /// Draw one value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Distribution::Normal { mean, std_dev } => mean + std_dev * standard_normal(rng),
            Distribution::Lognormal { mean, std_dev } => {
                let (mu, sigma) = lognormal_log_parameters(mean, std_dev);
                (mu + sigma * standard_normal(rng)).exp()
            }
            Distribution::Weibull { shape, scale } => {
                let u: f64 = rng.random();
                scale * (-(1.0 - u).ln()).powf(1.0 / shape)
            }
            Distribution::Uniform { min, max } => {
                let u: f64 = rng.random();
                min + u * (max - min)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Distribution::Normal { .. } => "normal",
            Distribution::Lognormal { .. } => "lognormal",
            Distribution::Weibull { .. } => "weibull",
            Distribution::Uniform { .. } => "uniform",
        }
    }
}

/// Box-Muller transform, one standard normal deviate per call
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps ln finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Log-space parameters matching a lognormal's arithmetic mean and std-dev
///
/// ```text
/// σ_ln² = ln(1 + (sd/mean)²)
/// μ_ln  = ln(mean) − σ_ln²/2
/// ```
pub fn lognormal_log_parameters(mean: f64, std_dev: f64) -> (f64, f64) {
    let variance_ln = (1.0 + (std_dev / mean).powi(2)).ln();
    (mean.ln() - variance_ln / 2.0, variance_ln.sqrt())
}

/// A named uncertain input to a limit state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomVariable {
    pub name: String,
    pub distribution: Distribution,
}

impl RandomVariable {
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        RandomVariable {
            name: name.into(),
            distribution,
        }
    }

    pub fn normal(name: impl Into<String>, mean: f64, std_dev: f64) -> Self {
        Self::new(name, Distribution::Normal { mean, std_dev })
    }

    pub fn lognormal(name: impl Into<String>, mean: f64, std_dev: f64) -> Self {
        Self::new(name, Distribution::Lognormal { mean, std_dev })
    }

    pub fn weibull(name: impl Into<String>, shape: f64, scale: f64) -> Self {
        Self::new(name, Distribution::Weibull { shape, scale })
    }

    pub fn uniform(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(name, Distribution::Uniform { min, max })
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.distribution.validate(&self.name)
    }

    /// Draw one value from this variable's distribution
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.distribution.sample(rng)
    }
}
