use chrono::{
    DateTime,
    Utc
};
use serde::Serialize;
use uuid::Uuid;

use crate::benchmark::runresult::RunResult;
use crate::quadrature::quadraturerule::QuadratureRuleKind;

/// Runs of one rule in iteration order, each step half the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    id: Uuid,
    rule: QuadratureRuleKind,
    started_at: DateTime<Utc>,
    requested_iterations: usize,
    runs: Vec<RunResult>
}

const MAX_PREALLOCATED_RUNS: usize = 64;

impl SweepResult {
    pub fn new(rule: QuadratureRuleKind, requested_iterations: usize) -> SweepResult {
        SweepResult {
            id: Uuid::new_v4(),
            rule,
            started_at: Utc::now(),
            requested_iterations,
            runs: Vec::with_capacity(requested_iterations.min(MAX_PREALLOCATED_RUNS))
        }
    }

    pub(crate) fn record(&mut self, run: RunResult) {
        self.runs.push(run);
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn rule(&self) -> QuadratureRuleKind {
        self.rule
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn requested_iterations(&self) -> usize {
        self.requested_iterations
    }

    pub fn runs(&self) -> &[RunResult] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.runs.len() == self.requested_iterations
    }

    pub fn steps(&self) -> Vec<f64> {
        self.runs.iter().map(|run| run.step()).collect()
    }

    pub fn estimates(&self) -> Vec<f64> {
        self.runs.iter().map(|run| run.estimate()).collect()
    }
}
