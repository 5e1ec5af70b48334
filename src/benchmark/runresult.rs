use std::time::Duration;

use serde::{
    Serialize,
    Serializer
};

/// `(|100 · estimate / reference| - 100) · scale`
///
/// Undefined when the reference is zero or not finite.
pub fn deviation_percent(estimate: f64, reference: f64, scale: f64) -> Option<f64> {
    if reference == 0.0 || !reference.is_finite() {
        return None;
    }
    Some(((100.0 * estimate / reference).abs() - 100.0) * scale)
}

pub(crate) fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Outcome of one sweep iteration. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunResult {
    iteration: usize,
    step: f64,
    estimate: f64,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_seconds")]
    elapsed: Duration,
    deviation_percent: Option<f64>
}

impl RunResult {
    pub fn new(iteration: usize,
               step: f64,
               estimate: f64,
               elapsed: Duration,
               deviation_percent: Option<f64>) -> RunResult {
        RunResult { iteration, step, estimate, elapsed, deviation_percent }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn deviation_percent(&self) -> Option<f64> {
        self.deviation_percent
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_deviation_is_scaled() {
        assert_relative_eq!(deviation_percent(100.001, 100.0, 1000.0).unwrap(), 1.0, max_relative = 1e-9);
        assert_relative_eq!(deviation_percent(99.999, 100.0, 1.0).unwrap(), -0.001, max_relative = 1e-9);
        assert_eq!(deviation_percent(50.0, 50.0, 1000.0), Some(0.0));
    }

    #[test]
    fn test_deviation_undefined_for_zero_reference() {
        assert_eq!(deviation_percent(1.0, 0.0, 1000.0), None);
        assert_eq!(deviation_percent(1.0, f64::NAN, 1000.0), None);
    }

    #[test]
    fn test_serializes_elapsed_as_seconds() {
        let run = RunResult::new(2, 0.25, 10.0, Duration::from_millis(1500), None);
        let json = serde_json::to_value(run).unwrap();
        assert_eq!(json["elapsed_seconds"], 1.5);
        assert_eq!(json["step"], 0.25);
        assert!(json["deviation_percent"].is_null());
    }
}
