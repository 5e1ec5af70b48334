/// Running sum with Neumaier compensation.
///
/// Plain left-to-right accumulation over millions of cells loses more
/// precision than the discretisation error being measured at small steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64
}

impl CompensatedSum {
    pub fn new() -> CompensatedSum {
        CompensatedSum { sum: 0.0, compensation: 0.0 }
    }

    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> CompensatedSum {
        let mut acc = CompensatedSum::new();
        for value in iter {
            acc.add(value);
        }
        acc
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_cancelled_terms() {
        let total = [1.0, 1e100, 1.0, -1e100].into_iter().collect::<CompensatedSum>().total();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_many_small_terms() {
        let total = std::iter::repeat(0.1).take(1_000_000).collect::<CompensatedSum>().total();
        assert!((total - 100_000.0).abs() < 1e-9);
    }
}
