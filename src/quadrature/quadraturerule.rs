use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

use crate::integrationerror::IntegrationError;
use crate::quadrature::cell::Cell;
use crate::quadrature::rectanglerule::RectangleRule;
use crate::quadrature::trapezoidrule::TrapezoidRule;

/// Composite rule turning a cell partition into an area estimate.
pub trait QuadratureRule {
    fn kind(&self) -> QuadratureRuleKind;

    fn area(&self, cells: &[Cell]) -> Result<f64, IntegrationError>;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadratureRuleKind {
    Rectangle,
    Trapezoid
}

impl QuadratureRuleKind {
    pub const ALL: [QuadratureRuleKind; 2] = [QuadratureRuleKind::Rectangle, QuadratureRuleKind::Trapezoid];

    pub fn name(&self) -> &'static str {
        match self {
            QuadratureRuleKind::Rectangle => "rectangle",
            QuadratureRuleKind::Trapezoid => "trapezoid"
        }
    }

    pub fn rule(&self) -> Box<dyn QuadratureRule> {
        match self {
            QuadratureRuleKind::Rectangle => Box::new(RectangleRule),
            QuadratureRuleKind::Trapezoid => Box::new(TrapezoidRule)
        }
    }
}

impl fmt::Display for QuadratureRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
