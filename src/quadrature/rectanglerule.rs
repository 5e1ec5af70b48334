use crate::integrationerror::IntegrationError;
use crate::math::summation::CompensatedSum;
use crate::quadrature::cell::Cell;
use crate::quadrature::quadraturerule::{
    QuadratureRule,
    QuadratureRuleKind
};

/// Σ (|x_right| - |x_left|) · |height|
///
/// Coordinates and heights enter as absolute values. This matches a signed
/// width × height only while x >= 0 and f keeps one sign over the domain.
pub fn rectangle_area(cells: &[Cell]) -> f64 {
    cells
        .iter()
        .map(|c| (c.x_right().abs() - c.x_left().abs()) * c.height().abs())
        .collect::<CompensatedSum>()
        .total()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleRule;

impl QuadratureRule for RectangleRule {
    fn kind(&self) -> QuadratureRuleKind {
        QuadratureRuleKind::Rectangle
    }

    fn area(&self, cells: &[Cell]) -> Result<f64, IntegrationError> {
        Ok(rectangle_area(cells))
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::quadrature::cell::build_cells;
    use crate::sampling::sampler::sample;

    fn estimate<F: Fn(f64) -> f64>(f: F, start: f64, stop: f64, step: f64) -> f64 {
        let samples = sample(&f, start, stop, step).unwrap();
        RectangleRule.area(&build_cells(&samples)).unwrap()
    }

    #[test]
    fn test_constant_integrand_is_exact() {
        for step in [1.0, 0.5, 0.125, 0.1] {
            assert_relative_eq!(estimate(|_x| 3.0, 0.0, 10.0, step), 30.0, max_relative = 1e-12);
            assert_relative_eq!(estimate(|_x| 2.5, 2.0, 7.0, step), 12.5, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_linear_integrand_is_exact() {
        // half-width edge cells turn the rectangle sum into the composite trapezoid sum
        for step in [1.0, 0.25, 0.0625] {
            assert_relative_eq!(estimate(|x| 3.0 * x + 1.0, 0.0, 4.0, step), 28.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_quadratic_error_shrinks_with_step() {
        let exact = 1000.0 / 3.0;
        let mut previous = f64::INFINITY;
        for k in 0..8 {
            let error = (estimate(|x| x * x, 0.0, 10.0, 0.5f64.powi(k)) - exact).abs();
            assert!(error < previous);
            previous = error;
        }
    }

    #[test]
    fn test_absolute_values_fold_negative_heights() {
        let negative = estimate(|_x| -2.0, 0.0, 5.0, 1.0);
        assert_relative_eq!(negative, 10.0);
    }

    #[test]
    fn test_empty_partition_has_zero_area() {
        assert_eq!(rectangle_area(&[]), 0.0);
    }
}
