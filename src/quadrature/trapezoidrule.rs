use crate::integrationerror::IntegrationError;
use crate::math::summation::CompensatedSum;
use crate::quadrature::cell::Cell;
use crate::quadrature::quadraturerule::{
    QuadratureRule,
    QuadratureRuleKind
};

/// Σ over adjacent pairs (i, i+1) of (|h_i| + |h_{i+1}|) · (|x_right_i| - |x_left_i|) / 2
///
/// Each pair takes the width of its left cell, so the first trapezoid is
/// half a step wide. Compared with the textbook composite rule this drops
/// step · (|h_0| + |h_1|) / 4, a bias that vanishes linearly with the step.
pub fn trapezoid_area(cells: &[Cell]) -> Result<f64, IntegrationError> {
    if cells.len() < 2 {
        return Err(IntegrationError::InsufficientSamples { required: 2, found: cells.len() });
    }
    let total = cells
        .windows(2)
        .map(|pair| {
            let (lhs, rhs) = (&pair[0], &pair[1]);
            (lhs.height().abs() + rhs.height().abs()) * (lhs.x_right().abs() - lhs.x_left().abs()) / 2.0
        })
        .collect::<CompensatedSum>()
        .total();
    Ok(total)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrapezoidRule;

impl QuadratureRule for TrapezoidRule {
    fn kind(&self) -> QuadratureRuleKind {
        QuadratureRuleKind::Trapezoid
    }

    fn area(&self, cells: &[Cell]) -> Result<f64, IntegrationError> {
        trapezoid_area(cells)
    }
}
