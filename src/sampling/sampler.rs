use crate::integrand::integrand::Integrand;
use crate::integrationerror::IntegrationError;
use crate::sampling::sample::Sample;

/// Materialized samples of an integrand at `start, start + step, ...`,
/// never beyond `stop`. Always holds at least one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<Sample>,
    start: f64,
    stop: f64,
    step: f64
}

impl SampleSequence {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x()).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y()).collect()
    }
}

const MAX_PREALLOCATED_SAMPLES: usize = 1 << 26;

pub fn check_range(start: f64, stop: f64, step: f64) -> Result<(), IntegrationError> {
    let finite = start.is_finite() && stop.is_finite() && step.is_finite();
    if !finite || step <= 0.0 || start > stop {
        return Err(IntegrationError::invalid_range(start, stop, step));
    }
    // step below the spacing of representable values around the range
    if start + step <= start || stop + step <= stop {
        return Err(IntegrationError::invalid_range(start, stop, step));
    }
    Ok(())
}

/// Samples `integrand` over `[start, stop]` at a fixed `step`.
///
/// The abscissae are computed as `start + i * step` rather than by repeated
/// addition, so long sweeps with non-dyadic steps do not drift.
pub fn sample<I>(integrand: &I,
                 start: f64,
                 stop: f64,
                 step: f64) -> Result<SampleSequence, IntegrationError> where
    I: Integrand + ?Sized {
    check_range(start, stop, step)?;

    let expected = (((stop - start) / step).floor() as usize).saturating_add(1);
    let mut samples = Vec::with_capacity(expected.min(MAX_PREALLOCATED_SAMPLES));
    let mut i: usize = 0;
    let mut previous = f64::NEG_INFINITY;
    loop {
        let x = start + (i as f64) * step;
        if x > stop {
            break;
        }
        if x <= previous {
            return Err(IntegrationError::invalid_range(start, stop, step));
        }
        samples.push(Sample::new(x, integrand.value(x)));
        previous = x;
        i += 1;
    }

    Ok(SampleSequence { samples, start, stop, step })
}
