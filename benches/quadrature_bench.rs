use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use riemannbench::configuration::default_coefficients;
use riemannbench::integrand::polynomialsineintegrand::PolynomialSineIntegrand;
use riemannbench::quadrature::cell::build_cells;
use riemannbench::quadrature::quadraturerule::{QuadratureRule, QuadratureRuleKind};
use riemannbench::reference::referenceintegrator::reference_integrate;
use riemannbench::sampling::sampler::sample;

fn bench_rules(c: &mut Criterion) {
    let integrand = PolynomialSineIntegrand::new(&default_coefficients()).unwrap();
    let mut group = c.benchmark_group("composite_rules");

    for halvings in [0, 2, 4] {
        let step = 0.5f64.powi(halvings);
        for kind in QuadratureRuleKind::ALL {
            let rule = kind.rule();
            group.bench_with_input(
                BenchmarkId::new(kind.name(), step),
                &step,
                |b, &step| b.iter(|| {
                    let samples = sample(&integrand, 0.0, 1000.0, black_box(step)).unwrap();
                    black_box(rule.area(&build_cells(&samples)).unwrap())
                }),
            );
        }
    }

    group.finish();
}

fn bench_reference(c: &mut Criterion) {
    let integrand = PolynomialSineIntegrand::new(&default_coefficients()).unwrap();
    c.bench_function("reference_gauss_kronrod", |b| {
        b.iter(|| black_box(reference_integrate(&integrand, 0.0, black_box(1000.0)).unwrap()))
    });
}

criterion_group!(benches, bench_rules, bench_reference);
criterion_main!(benches);
