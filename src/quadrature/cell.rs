use crate::sampling::sampler::SampleSequence;

/// One quadrature cell: `[x_left, x_right]` at the height of its sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    x_left: f64,
    x_right: f64,
    height: f64
}

impl Cell {
    pub fn new(x_left: f64, x_right: f64, height: f64) -> Cell {
        Cell { x_left, x_right, height }
    }

    pub fn x_left(&self) -> f64 {
        self.x_left
    }

    pub fn x_right(&self) -> f64 {
        self.x_right
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.x_right - self.x_left
    }
}

/// Centres one cell of width `step` on every sample, then pulls the outer
/// edges in by half a step so the partition stays inside `[start, stop]`.
pub fn build_cells(samples: &SampleSequence) -> Vec<Cell> {
    let half_step = samples.step() / 2.0;
    let mut cells: Vec<Cell> = samples
        .samples()
        .iter()
        .map(|s| Cell::new(s.x() - half_step, s.x() + half_step, s.y()))
        .collect();

    if let Some(first) = cells.first_mut() {
        first.x_left += half_step;
    }
    if let Some(last) = cells.last_mut() {
        last.x_right -= half_step;
    }
    cells
}
