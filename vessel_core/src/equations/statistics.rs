//! # Statistics Helpers
//!
//! Numerical helpers for the reliability engine: the inverse standard normal
//! CDF, sample moments, interpolated percentiles and the Wald binomial
//! interval.
//!
//! ## Inverse Normal CDF
//!
//! Acklam's rational approximation, split into a lower tail, a central region
//! and an upper tail at `p_low = 0.02425`. Relative error is below 1.15e-9
//! over the open unit interval. The coefficient tables below are the
//! compatibility surface for reliability indices and must not be altered.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Central-region numerator coefficients
const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Central-region denominator coefficients
const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Tail numerator coefficients
const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Tail denominator coefficients
const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Boundary between the lower tail and the central region
pub const P_LOW: f64 = 0.02425;

/// Boundary between the central region and the upper tail
pub const P_HIGH: f64 = 1.0 - P_LOW;

/// z-value of a two-sided 95% interval
pub const Z_95: f64 = 1.96;

/// Standard normal quantile Φ⁻¹(p).
///
/// `p = 0` gives `−∞` and `p = 1` gives `+∞`.
///
/// # Errors
/// `InvalidInput` if `p` is NaN or outside `[0, 1]`.
pub fn inverse_normal_cdf(p: f64) -> CalcResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CalcError::invalid_input(
            "p",
            p.to_string(),
            "Probability must be in [0, 1]",
        ));
    }
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }

    let z = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail(q)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail(q)
    };
    Ok(z)
}

#[inline]
fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

/// Two-sided confidence interval on a probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// 95% Wald interval `p ± 1.96·√(p(1−p)/n)`, bounded to `[0, 1]`.
///
/// Adequate at the sample sizes used for tank screening; it collapses to a
/// zero-width interval at `p = 0` or `p = 1` and undercovers very small `p`
/// with few samples.
pub fn wald_interval(p: f64, n: usize) -> ConfidenceInterval {
    let half_width = Z_95 * (p * (1.0 - p) / n as f64).sqrt();
    ConfidenceInterval {
        lower: (p - half_width).max(0.0),
        upper: (p + half_width).min(1.0),
    }
}

/// Mean and population standard deviation
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Percentile (0–100) of an ascending-sorted slice by linear interpolation
/// between closest ranks.
///
/// # Errors
/// `InvalidInput` for an empty slice or a percentile outside `[0, 100]`.
pub fn percentile(sorted: &[f64], pct: f64) -> CalcResult<f64> {
    if sorted.is_empty() {
        return Err(CalcError::invalid_input("values", "[]", "Need at least one value"));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(CalcError::invalid_input(
            "percentile",
            pct.to_string(),
            "Percentile must be in [0, 100]",
        ));
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
