//! Limit-state factories
//!
//! Wrap nominal deterministic results in random variables and a closure
//! `g(x)` ready for [`run_monte_carlo`](super::run_monte_carlo).

use std::fmt;

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::reliability::distributions::RandomVariable;
use crate::reliability::monte_carlo::{run_monte_carlo, LimitState, MonteCarloConfig, MonteCarloResult};

/// Weibull shape used for scatter in fatigue life
pub const FATIGUE_WEIBULL_SHAPE: f64 = 2.0;

type LimitFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Random variables paired with the limit state evaluated over them
pub struct LimitStateModel {
    pub name: String,
    pub variables: Vec<RandomVariable>,
    function: LimitFn,
}

impl LimitStateModel {
    pub fn new(
        name: impl Into<String>,
        variables: Vec<RandomVariable>,
        function: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        LimitStateModel {
            name: name.into(),
            variables,
            function: Box::new(function),
        }
    }

    /// Run a Monte Carlo simulation over this model's variables
    pub fn simulate(&self, config: &MonteCarloConfig) -> CalcResult<MonteCarloResult> {
        run_monte_carlo(self, &self.variables, config)
    }
}

impl LimitState for LimitStateModel {
    fn evaluate(&self, values: &[f64]) -> f64 {
        (self.function)(values)
    }
}

impl fmt::Debug for LimitStateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitStateModel")
            .field("name", &self.name)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

fn require_cov(field: &str, cov: f64) -> CalcResult<()> {
    if cov.is_nan() || cov < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            cov.to_string(),
            "Coefficient of variation must be non-negative",
        ));
    }
    Ok(())
}

/// Burst margin `g = burst − operating`
///
/// - `burst_pressure` ~ Normal(nominal, cov·nominal)
/// - `operating_pressure` ~ Normal(working, cov·working)
pub fn burst_limit_state(
    nominal_burst_mpa: f64,
    burst_cov: f64,
    working_pressure_mpa: f64,
    pressure_cov: f64,
) -> CalcResult<LimitStateModel> {
    require_positive("nominal_burst_mpa", nominal_burst_mpa, "Burst pressure must be positive")?;
    require_positive("working_pressure_mpa", working_pressure_mpa, "Working pressure must be positive")?;
    require_cov("burst_cov", burst_cov)?;
    require_cov("pressure_cov", pressure_cov)?;

    let variables = vec![
        RandomVariable::normal("burst_pressure", nominal_burst_mpa, burst_cov * nominal_burst_mpa),
        RandomVariable::normal("operating_pressure", working_pressure_mpa, pressure_cov * working_pressure_mpa),
    ];
    Ok(LimitStateModel::new("burst", variables, |x| x[0] - x[1]))
}

/// Fatigue margin `g = life − required`
///
/// - `fatigue_life` ~ Weibull(shape 2, scale = predicted life)
/// - `required_cycles` ~ Normal(required, cov·required)
///
/// # Errors
/// `InvalidInput` if the predicted life is infinite: there is nothing to
/// scatter and the run would never fail.
pub fn fatigue_limit_state(
    predicted_life: f64,
    required_cycles: f64,
    cycles_cov: f64,
) -> CalcResult<LimitStateModel> {
    if predicted_life.is_infinite() {
        return Err(CalcError::invalid_input(
            "predicted_life",
            "inf",
            "Infinite fatigue life cannot be sampled",
        ));
    }
    require_positive("predicted_life", predicted_life, "Predicted life must be positive")?;
    require_positive("required_cycles", required_cycles, "Required cycles must be positive")?;
    require_cov("cycles_cov", cycles_cov)?;

    let variables = vec![
        RandomVariable::weibull("fatigue_life", FATIGUE_WEIBULL_SHAPE, predicted_life),
        RandomVariable::normal("required_cycles", required_cycles, cycles_cov * required_cycles),
    ];
    Ok(LimitStateModel::new("fatigue", variables, |x| x[0] - x[1]))
}
