use std::cell::Cell;
use std::time::{
    Duration,
    Instant
};

use serde::{
    Deserialize,
    Serialize
};
use solvr::integrate::{
    quad,
    QuadOptions
};
use tracing::{
    debug,
    info
};

use crate::integrand::integrand::Integrand;
use crate::integrationerror::IntegrationError;

/// Stopping criteria of the adaptive reference integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceOptions {
    pub absolute_tolerance: f64,
    pub relative_tolerance: f64,
    pub subdivision_limit: usize
}

impl Default for ReferenceOptions {
    fn default() -> ReferenceOptions {
        ReferenceOptions {
            absolute_tolerance: 1.49e-8,
            relative_tolerance: 1e-12,
            subdivision_limit: 2000
        }
    }
}

impl ReferenceOptions {
    /// Error bound the integrator has to reach for a given estimate.
    pub fn tolerance(&self, estimate: f64) -> f64 {
        self.absolute_tolerance + self.relative_tolerance * estimate.abs()
    }

    fn quad_options(&self) -> QuadOptions {
        QuadOptions {
            atol: self.absolute_tolerance,
            rtol: self.relative_tolerance,
            limit: self.subdivision_limit
        }
    }
}

/// Ground-truth value the composite rules are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceEstimate {
    pub estimate: f64,
    pub error_bound: f64,
    #[serde(rename = "elapsed_seconds", serialize_with = "crate::benchmark::runresult::serialize_seconds")]
    pub elapsed: Duration,
    pub evaluations: usize
}

/// Adaptive integration of `integrand` over `[start, stop]`.
///
/// Returns `(estimate, error_bound)`.
pub fn reference_integrate<I>(integrand: &I,
                              start: f64,
                              stop: f64) -> Result<(f64, f64), IntegrationError> where
    I: Integrand + ?Sized {
    let reference = reference_integrate_with(integrand, start, stop, &ReferenceOptions::default())?;
    Ok((reference.estimate, reference.error_bound))
}

/// Delegates to solvr's adaptive Gauss-Kronrod `quad`. A run that stops
/// at the subdivision limit is an error, never a low-confidence baseline.
pub fn reference_integrate_with<I>(integrand: &I,
                                   start: f64,
                                   stop: f64,
                                   options: &ReferenceOptions) -> Result<ReferenceEstimate, IntegrationError> where
    I: Integrand + ?Sized {
    if !start.is_finite() || !stop.is_finite() || start > stop {
        return Err(IntegrationError::invalid_range(start, stop, stop - start));
    }

    let clock = Instant::now();
    // solvr rejects a >= b
    if start == stop {
        return Ok(ReferenceEstimate {
            estimate: 0.0,
            error_bound: 0.0,
            elapsed: clock.elapsed(),
            evaluations: 0
        });
    }

    // a NaN fed into the subdivision order would abort inside solvr
    let non_finite_at: Cell<Option<f64>> = Cell::new(None);
    let guarded = |x: f64| {
        let y = integrand.value(x);
        if y.is_finite() {
            y
        } else {
            if non_finite_at.get().is_none() {
                non_finite_at.set(Some(x));
            }
            0.0
        }
    };

    let result = quad(guarded, start, stop, &options.quad_options())
        .map_err(|error| IntegrationError::InvalidInput(error.to_string()))?;

    if let Some(x) = non_finite_at.get() {
        return Err(IntegrationError::InvalidInput(format!("integrand is not finite at x = {}", x)));
    }
    if !result.converged {
        return Err(IntegrationError::ReferenceIntegration {
            subdivision_limit: options.subdivision_limit,
            error_estimate: result.error,
            tolerance: options.tolerance(result.integral)
        });
    }

    let elapsed = clock.elapsed();
    debug!(evaluations = result.neval, "reference integration converged");
    info!(estimate = result.integral,
          error_bound = result.error,
          elapsed_ms = elapsed.as_secs_f64() * 1e3,
          "reference integral");

    Ok(ReferenceEstimate {
        estimate: result.integral,
        error_bound: result.error,
        elapsed,
        evaluations: result.neval
    })
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_cubic_is_exact() {
        let (estimate, error_bound) = reference_integrate(&|x: f64| 2.0 * x * x * x + 1.0, 0.0, 10.0).unwrap();
        assert_relative_eq!(estimate, 5010.0, max_relative = 1e-13);
        assert!(error_bound <= ReferenceOptions::default().tolerance(estimate));
    }

    #[test]
    fn test_oscillatory_integrand() {
        let options = ReferenceOptions::default();
        let reference = reference_integrate_with(&|x: f64| x.sin(), 0.0, 1000.0, &options).unwrap();
        assert_relative_eq!(reference.estimate, 1.0 - 1000f64.cos(), epsilon = 1e-7);
        assert!(reference.evaluations > 0);
    }

    #[test]
    fn test_degenerate_interval() {
        assert_eq!(reference_integrate(&|x: f64| x, 3.0, 3.0).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_reversed_interval_is_rejected() {
        assert!(matches!(
            reference_integrate(&|x: f64| x, 3.0, 1.0),
            Err(IntegrationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_subdivision_limit_surfaces_error() {
        let options = ReferenceOptions { subdivision_limit: 1, ..ReferenceOptions::default() };
        let result = reference_integrate_with(&|x: f64| (50.0 * x).sin(), 0.0, 100.0, &options);
        assert!(matches!(result, Err(IntegrationError::ReferenceIntegration { subdivision_limit: 1, .. })));
    }

    #[test]
    fn test_non_finite_integrand_is_rejected() {
        let options = ReferenceOptions { subdivision_limit: 10, ..ReferenceOptions::default() };
        let result = reference_integrate_with(&|_x: f64| f64::NAN, 0.0, 1.0, &options);
        assert!(matches!(result, Err(IntegrationError::InvalidInput(_))));
    }
}
