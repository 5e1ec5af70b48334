use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::benchmark::stepsweep::max_iterations;
use crate::integrand::coefficientmapping::CoefficientMapping;
use crate::reference::referenceintegrator::ReferenceOptions;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid setting '{setting}': {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String
    }
}

impl ConfigurationError {
    fn invalid(setting: &'static str, reason: &str) -> ConfigurationError {
        ConfigurationError::InvalidSetting { setting, reason: reason.to_owned() }
    }
}

/// Inputs of one benchmark: integrand coefficients, bounds, sweep shape and
/// reference stopping criteria. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfiguration {
    pub coefficients: CoefficientMapping,
    pub start: f64,
    pub stop: f64,
    pub initial_step: f64,
    pub iterations: usize,
    pub deviation_scale: f64,
    pub reference: ReferenceOptions
}

impl Default for BenchmarkConfiguration {
    fn default() -> BenchmarkConfiguration {
        BenchmarkConfiguration {
            coefficients: default_coefficients(),
            start: 0.0,
            stop: 1000.0,
            initial_step: 1.0,
            iterations: 13,
            deviation_scale: 1000.0,
            reference: ReferenceOptions::default()
        }
    }
}

/// `c` is set twice; the second value replaces the first.
pub fn default_coefficients() -> CoefficientMapping {
    CoefficientMapping::new()
        .with("c", 1.0)
        .with("a", 2.0)
        .with("b", 5.0)
        .with("c", 7.0)
        .with("z", 4.0)
}

impl BenchmarkConfiguration {
    pub fn new() -> BenchmarkConfiguration {
        BenchmarkConfiguration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<BenchmarkConfiguration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: BenchmarkConfiguration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<BenchmarkConfiguration, ConfigurationError> {
        let configuration: BenchmarkConfiguration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Checks the settings that have no integration error of their own.
    /// Bounds, step and coefficients are checked where they are used.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.deviation_scale.is_finite() {
            return Err(ConfigurationError::invalid("deviation_scale", "must be finite"));
        }
        let reference = &self.reference;
        if !(reference.absolute_tolerance >= 0.0 && reference.absolute_tolerance.is_finite()) {
            return Err(ConfigurationError::invalid("reference.absolute_tolerance", "must be a finite non-negative number"));
        }
        if !(reference.relative_tolerance >= 0.0 && reference.relative_tolerance.is_finite()) {
            return Err(ConfigurationError::invalid("reference.relative_tolerance", "must be a finite non-negative number"));
        }
        if reference.absolute_tolerance == 0.0 && reference.relative_tolerance == 0.0 {
            return Err(ConfigurationError::invalid("reference", "absolute and relative tolerance cannot both be zero"));
        }
        if reference.subdivision_limit == 0 {
            return Err(ConfigurationError::invalid("reference.subdivision_limit", "must be at least 1"));
        }
        if self.initial_step.is_finite() && self.initial_step > 0.0 {
            let limit = max_iterations(self.initial_step);
            if self.iterations > limit {
                return Err(ConfigurationError::invalid(
                    "iterations",
                    &format!("at most {} halvings of initial_step {} stay above the smallest normal f64", limit, self.initial_step)
                ));
            }
        }
        Ok(())
    }
}
