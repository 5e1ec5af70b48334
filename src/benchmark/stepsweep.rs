use std::time::Instant;

use tracing::debug;

use crate::benchmark::runresult::{
    deviation_percent,
    RunResult
};
use crate::benchmark::sweepresult::SweepResult;
use crate::integrand::integrand::Integrand;
use crate::integrationerror::IntegrationError;
use crate::quadrature::cell::build_cells;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::sampling::sampler::sample;

/// Largest iteration count whose final step `initial_step · 0.5^(n-1)`
/// is still a normal `f64`. Zero for a non-positive or non-finite step.
pub fn max_iterations(initial_step: f64) -> usize {
    if !initial_step.is_finite() || initial_step < f64::MIN_POSITIVE {
        return 0;
    }
    let mut iterations = 1;
    let mut step = initial_step;
    while step * 0.5 >= f64::MIN_POSITIVE {
        step *= 0.5;
        iterations += 1;
    }
    iterations
}

/// Where a sweep stands between iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepState {
    Pending {
        iteration: usize,
        step: f64
    },
    Completed,
    Failed {
        iteration: usize
    }
}

/// Everything an iteration reads; never mutated by the sweep.
pub struct SweepInputs<'a, I: Integrand + ?Sized> {
    pub integrand: &'a I,
    pub start: f64,
    pub stop: f64,
    pub reference: f64,
    pub deviation_scale: f64
}

/// Geometric step sweep driven one iteration at a time.
///
/// `step_i = initial_step · 0.5^i`. The caller may stop calling `advance`
/// at any iteration boundary; `finish` hands back whatever was recorded.
pub struct StepSweep<'a, I: Integrand + ?Sized> {
    inputs: SweepInputs<'a, I>,
    rule: &'a dyn QuadratureRule,
    iterations: usize,
    state: SweepState,
    result: SweepResult
}

impl<'a, I: Integrand + ?Sized> StepSweep<'a, I> {
    pub fn new(inputs: SweepInputs<'a, I>,
               rule: &'a dyn QuadratureRule,
               iterations: usize,
               initial_step: f64) -> Result<StepSweep<'a, I>, IntegrationError> {
        if !initial_step.is_finite() || initial_step <= 0.0 {
            return Err(IntegrationError::invalid_range(inputs.start, inputs.stop, initial_step));
        }
        let limit = max_iterations(initial_step);
        if iterations > limit {
            return Err(IntegrationError::InvalidInput(format!(
                "{} iterations would halve step {} below the smallest normal f64 (at most {})",
                iterations, initial_step, limit
            )));
        }
        let state = if iterations == 0 {
            SweepState::Completed
        } else {
            SweepState::Pending { iteration: 0, step: initial_step }
        };
        Ok(StepSweep {
            inputs,
            rule,
            iterations,
            state,
            result: SweepResult::new(rule.kind(), iterations)
        })
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn result(&self) -> &SweepResult {
        &self.result
    }

    /// Runs the pending iteration. `None` once the sweep is completed or failed.
    pub fn advance(&mut self) -> Option<Result<RunResult, IntegrationError>> {
        let (iteration, step) = match self.state {
            SweepState::Pending { iteration, step } => (iteration, step),
            SweepState::Completed | SweepState::Failed { .. } => return None
        };

        match self.measure(iteration, step) {
            Ok(run) => {
                debug!(rule = self.rule.name(),
                       iteration,
                       step,
                       estimate = run.estimate(),
                       elapsed_ms = run.elapsed().as_secs_f64() * 1e3,
                       "sweep iteration");
                self.result.record(run);
                self.state = if iteration + 1 < self.iterations {
                    SweepState::Pending { iteration: iteration + 1, step: step * 0.5 }
                } else {
                    SweepState::Completed
                };
                Some(Ok(run))
            },
            Err(error) => {
                self.state = SweepState::Failed { iteration };
                Some(Err(error))
            }
        }
    }

    fn measure(&self, iteration: usize, step: f64) -> Result<RunResult, IntegrationError> {
        let inputs = &self.inputs;
        let clock = Instant::now();
        let samples = sample(inputs.integrand, inputs.start, inputs.stop, step)?;
        let cells = build_cells(&samples);
        let estimate = self.rule.area(&cells)?;
        let elapsed = clock.elapsed();

        let deviation = deviation_percent(estimate, inputs.reference, inputs.deviation_scale);
        Ok(RunResult::new(iteration, step, estimate, elapsed, deviation))
    }

    pub fn finish(self) -> SweepResult {
        self.result
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::rectanglerule::RectangleRule;
    use crate::quadrature::trapezoidrule::TrapezoidRule;

    fn inputs<'a, F: Fn(f64) -> f64>(f: &'a F, start: f64, stop: f64) -> SweepInputs<'a, F> {
        SweepInputs { integrand: f, start, stop, reference: 10.0, deviation_scale: 1000.0 }
    }

    #[test]
    fn test_steps_halve_each_iteration() {
        let f = |_x: f64| 1.0;
        let mut sweep = StepSweep::new(inputs(&f, 0.0, 10.0), &RectangleRule, 4, 2.0).unwrap();
        assert_eq!(sweep.state(), SweepState::Pending { iteration: 0, step: 2.0 });
        while let Some(outcome) = sweep.advance() {
            assert!(outcome.is_ok());
        }
        assert_eq!(sweep.state(), SweepState::Completed);
        let result = sweep.finish();
        assert!(result.is_complete());
        assert_eq!(result.steps(), vec![2.0, 1.0, 0.5, 0.25]);
        assert!(result.runs().iter().all(|run| run.deviation_percent() == Some(0.0)));
    }

    #[test]
    fn test_caller_can_stop_between_iterations() {
        let f = |x: f64| x;
        let mut sweep = StepSweep::new(inputs(&f, 0.0, 10.0), &RectangleRule, 10, 1.0).unwrap();
        sweep.advance();
        sweep.advance();
        assert_eq!(sweep.state(), SweepState::Pending { iteration: 2, step: 0.25 });
        let partial = sweep.finish();
        assert_eq!(partial.len(), 2);
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_failure_stops_the_sweep() {
        // one sample only: start == stop
        let f = |x: f64| x;
        let mut sweep = StepSweep::new(inputs(&f, 3.0, 3.0), &TrapezoidRule, 3, 1.0).unwrap();
        assert!(matches!(sweep.advance(), Some(Err(IntegrationError::InsufficientSamples { .. }))));
        assert_eq!(sweep.state(), SweepState::Failed { iteration: 0 });
        assert!(sweep.advance().is_none());
        assert!(sweep.finish().is_empty());
    }

    #[test]
    fn test_zero_iterations_is_complete() {
        let f = |x: f64| x;
        let mut sweep = StepSweep::new(inputs(&f, 0.0, 1.0), &RectangleRule, 0, 1.0).unwrap();
        assert!(sweep.advance().is_none());
        assert!(sweep.finish().is_complete());
    }

    #[test]
    fn test_max_iterations() {
        assert_eq!(max_iterations(1.0), 1023);
        assert_eq!(max_iterations(f64::MIN_POSITIVE), 1);
        assert_eq!(max_iterations(0.0), 0);
        assert_eq!(max_iterations(f64::INFINITY), 0);
    }

    #[test]
    fn test_rejects_iterations_that_underflow_the_step() {
        let f = |x: f64| x;
        assert!(matches!(
            StepSweep::new(inputs(&f, 0.0, 1.0), &RectangleRule, usize::MAX, 1.0),
            Err(IntegrationError::InvalidInput(_))
        ));
        assert!(StepSweep::new(inputs(&f, 0.0, 1.0), &RectangleRule, 1023, 1.0).is_ok());
        assert!(StepSweep::new(inputs(&f, 0.0, 1.0), &RectangleRule, 1024, 1.0).is_err());
    }

    #[test]
    fn test_rejects_non_positive_initial_step() {
        let f = |x: f64| x;
        assert!(matches!(
            StepSweep::new(inputs(&f, 0.0, 1.0), &RectangleRule, 3, 0.0),
            Err(IntegrationError::InvalidRange { .. })
        ));
    }
}
