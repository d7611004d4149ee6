use criterion::{criterion_group, criterion_main, Criterion};
use gk_family::Family;
use gk_rule::{compute_generators, compute_weightfactors, genz_keister_construction};

fn bench_generators(c: &mut Criterion) {
    c.bench_function("hermite_generators_1_2_6_10", |b| {
        b.iter(|| compute_generators(&Family::HermitePro, &[1, 2, 6, 10], 128).expect("generators"));
    });
}

fn bench_assembly(c: &mut Criterion) {
    let list = compute_generators(&Family::HermitePro, &[1, 2, 6, 10], 128).expect("generators");
    let table = compute_weightfactors(&Family::HermitePro, list.generators(), 128).expect("table");
    c.bench_function("hermite_rule_d3_k6", |b| {
        b.iter(|| genz_keister_construction(6, 3, list.generators(), &table, 128).expect("rule"));
    });
}

criterion_group!(benches, bench_generators, bench_assembly);
criterion_main!(benches);
