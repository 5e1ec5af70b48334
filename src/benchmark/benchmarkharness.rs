use serde::Serialize;
use thiserror::Error;
use tracing::{
    info,
    warn
};

use crate::benchmark::stepsweep::{
    StepSweep,
    SweepInputs
};
use crate::benchmark::sweepresult::SweepResult;
use crate::configuration::{
    BenchmarkConfiguration,
    ConfigurationError
};
use crate::integrand::integrand::Integrand;
use crate::integrand::polynomialsineintegrand::PolynomialSineIntegrand;
use crate::integrationerror::IntegrationError;
use crate::quadrature::quadraturerule::{
    QuadratureRule,
    QuadratureRuleKind
};
use crate::reference::referenceintegrator::{
    reference_integrate_with,
    ReferenceEstimate
};
use crate::sampling::sampler::check_range;

/// A sweep that stopped on its first failing iteration.
#[derive(Debug, Error)]
#[error("{rule} sweep aborted after {completed} iteration(s): {source}", rule = .partial.rule(), completed = .partial.len())]
pub struct SweepError {
    pub source: IntegrationError,
    pub partial: SweepResult
}

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error(transparent)]
    Sweep(#[from] SweepError)
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub reference: ReferenceEstimate,
    pub sweeps: Vec<SweepResult>
}

/// Runs step sweeps of composite rules against a reference integral
/// computed once at construction.
pub struct BenchmarkHarness<I: Integrand = PolynomialSineIntegrand> {
    configuration: BenchmarkConfiguration,
    integrand: I,
    reference: ReferenceEstimate
}

impl BenchmarkHarness<PolynomialSineIntegrand> {
    pub fn new(configuration: BenchmarkConfiguration) -> Result<BenchmarkHarness<PolynomialSineIntegrand>, BenchmarkError> {
        let integrand = PolynomialSineIntegrand::new(&configuration.coefficients)?;
        BenchmarkHarness::with_integrand(integrand, configuration)
    }
}

impl<I: Integrand> BenchmarkHarness<I> {
    /// Uses `integrand` instead of the configured coefficients.
    pub fn with_integrand(integrand: I, configuration: BenchmarkConfiguration) -> Result<BenchmarkHarness<I>, BenchmarkError> {
        configuration.validate()?;
        check_range(configuration.start, configuration.stop, configuration.initial_step)?;
        let reference = reference_integrate_with(&integrand,
                                                 configuration.start,
                                                 configuration.stop,
                                                 &configuration.reference)?;
        Ok(BenchmarkHarness { configuration, integrand, reference })
    }

    pub fn configuration(&self) -> &BenchmarkConfiguration {
        &self.configuration
    }

    pub fn integrand(&self) -> &I {
        &self.integrand
    }

    pub fn reference(&self) -> &ReferenceEstimate {
        &self.reference
    }

    /// A sweep positioned before its first iteration.
    pub fn sweep<'a>(&'a self,
                     rule: &'a dyn QuadratureRule,
                     iterations: usize,
                     initial_step: f64) -> Result<StepSweep<'a, I>, IntegrationError> {
        let inputs = SweepInputs {
            integrand: &self.integrand,
            start: self.configuration.start,
            stop: self.configuration.stop,
            reference: self.reference.estimate,
            deviation_scale: self.configuration.deviation_scale
        };
        StepSweep::new(inputs, rule, iterations, initial_step)
    }

    pub fn run_sweep(&self,
                     rule: &dyn QuadratureRule,
                     iterations: usize,
                     initial_step: f64) -> Result<SweepResult, SweepError> {
        let mut sweep = match self.sweep(rule, iterations, initial_step) {
            Ok(sweep) => sweep,
            Err(source) => {
                return Err(SweepError { source, partial: SweepResult::new(rule.kind(), iterations) });
            }
        };
        info!(rule = rule.name(), iterations, initial_step, "sweep started");

        while let Some(outcome) = sweep.advance() {
            if let Err(source) = outcome {
                let partial = sweep.finish();
                warn!(rule = rule.name(), completed = partial.len(), error = %source, "sweep aborted");
                return Err(SweepError { source, partial });
            }
        }

        let result = sweep.finish();
        info!(rule = rule.name(), runs = result.len(), "sweep finished");
        Ok(result)
    }

    /// One configured sweep per rule kind.
    pub fn run_all(&self) -> Result<BenchmarkReport, BenchmarkError> {
        let mut sweeps = Vec::with_capacity(QuadratureRuleKind::ALL.len());
        for kind in QuadratureRuleKind::ALL {
            let rule = kind.rule();
            sweeps.push(self.run_sweep(rule.as_ref(), self.configuration.iterations, self.configuration.initial_step)?);
        }
        Ok(BenchmarkReport { reference: self.reference, sweeps })
    }
}
