use crate::integrand::coefficientmapping::CoefficientMapping;
use crate::integrand::integrand::Integrand;
use crate::integrationerror::IntegrationError;

// ─────────────────────────────────────────────────────────────────────────────
// PolynomialSineIntegrand
// ─────────────────────────────────────────────────────────────────────────────
//
//   f(x) = Σ_i ( c_i · x^i + sin(x) )
//
// c_i is the i-th coefficient in descending key order. The sine term sits
// inside the sum, so it is counted once per coefficient. Accuracy results
// are compared against this exact function; keep it that way.

/// Evaluates the integrand at `x` directly from a coefficient mapping.
pub fn evaluate(x: f64, coefficients: &CoefficientMapping) -> Result<f64, IntegrationError> {
    if coefficients.is_empty() {
        return Err(IntegrationError::empty_coefficients());
    }
    Ok(accumulate(x, coefficients.iter_descending().map(|(_, coefficient)| coefficient)))
}

fn accumulate<I: Iterator<Item = f64>>(x: f64, ranked: I) -> f64 {
    let sine = x.sin();
    let mut y = 0.0;
    for (i, coefficient) in ranked.enumerate() {
        y = y + coefficient * x.powi(i as i32) + sine;
    }
    y
}

/// Integrand with the rank-ordered coefficients resolved once.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialSineIntegrand {
    ranked_coefficients: Vec<f64>
}

impl PolynomialSineIntegrand {
    pub fn new(coefficients: &CoefficientMapping) -> Result<PolynomialSineIntegrand, IntegrationError> {
        if coefficients.is_empty() {
            return Err(IntegrationError::empty_coefficients());
        }
        Ok(PolynomialSineIntegrand { ranked_coefficients: coefficients.ranked_coefficients() })
    }

    pub fn ranked_coefficients(&self) -> &[f64] {
        &self.ranked_coefficients
    }

    pub fn degree(&self) -> usize {
        self.ranked_coefficients.len() - 1
    }
}

impl Integrand for PolynomialSineIntegrand {
    fn value(&self, x: f64) -> f64 {
        accumulate(x, self.ranked_coefficients.iter().copied())
    }
}
