pub mod configuration;

pub mod integrationerror;

pub mod benchmark {
    pub mod runresult;
    pub mod sweepresult;
    pub mod stepsweep;
    pub mod benchmarkharness;
}

pub mod integrand {
    pub mod integrand;
    pub mod coefficientmapping;
    pub mod polynomialsineintegrand;
}

pub mod math {
    pub mod round;
    pub mod summation;
}

pub mod quadrature {
    pub mod cell;
    pub mod quadraturerule;
    pub mod rectanglerule;
    pub mod trapezoidrule;
}

pub mod reference {
    pub mod referenceintegrator;
}

pub mod sampling {
    pub mod sample;
    pub mod sampler;
}
