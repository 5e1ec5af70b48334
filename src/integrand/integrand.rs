pub trait Integrand {
    fn value(&self, x: f64) -> f64;
}

impl<F> Integrand for F where
    F: Fn(f64) -> f64 {
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}
