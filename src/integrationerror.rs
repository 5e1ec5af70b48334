use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid range: start = {start}, stop = {stop}, step = {step} (need finite start <= stop and step > 0)")]
    InvalidRange {
        start: f64,
        stop: f64,
        step: f64
    },

    #[error("insufficient samples: {required} required, {found} found")]
    InsufficientSamples {
        required: usize,
        found: usize
    },

    #[error("reference integration did not converge within {subdivision_limit} subdivisions (error estimate {error_estimate:.3e} > tolerance {tolerance:.3e})")]
    ReferenceIntegration {
        subdivision_limit: usize,
        error_estimate: f64,
        tolerance: f64
    }
}

impl IntegrationError {
    pub fn invalid_range(start: f64, stop: f64, step: f64) -> IntegrationError {
        IntegrationError::InvalidRange { start, stop, step }
    }

    pub fn empty_coefficients() -> IntegrationError {
        IntegrationError::InvalidInput("coefficient mapping must hold at least one entry".to_owned())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IntegrationError::invalid_range(5.0, 3.0, 1.0);
        assert!(err.to_string().contains("start = 5"));

        let err = IntegrationError::InsufficientSamples { required: 2, found: 1 };
        assert_eq!(err.to_string(), "insufficient samples: 2 required, 1 found");

        let err = IntegrationError::ReferenceIntegration {
            subdivision_limit: 50,
            error_estimate: 1.0,
            tolerance: 1e-8
        };
        assert!(err.to_string().contains("50 subdivisions"));

        assert!(IntegrationError::empty_coefficients().to_string().starts_with("invalid input"));
    }
}
