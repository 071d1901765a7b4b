use criterion::{criterion_group, criterion_main, Criterion};
use jss_anneal::{AnnealConfig, AnnealingSampler, JobShopModelBuilder, ModelOptions};
use jss_core::Jobs;

fn bench_anneal(c: &mut Criterion) {
    let jobs = Jobs::new([
        ("1", vec![(0u32, 2u32), (1, 1), (0, 1), (3, 2)]),
        ("2", vec![(1, 1), (0, 1), (2, 2), (2, 2)]),
        ("3", vec![(2, 1), (2, 1), (1, 1), (1, 3)]),
    ])
    .unwrap();
    let bqm = JobShopModelBuilder
        .build(&jobs, 8, &ModelOptions::default())
        .unwrap();
    let sampler = AnnealingSampler::new(AnnealConfig {
        num_sweeps: 64,
        ..AnnealConfig::default()
    });

    c.bench_function("anneal_4x3_h8_16_reads", |b| {
        b.iter(|| {
            let _ = sampler.sample(&bqm, 16, 42).unwrap();
        })
    });
}

criterion_group!(benches, bench_anneal);
criterion_main!(benches);
