use criterion::{criterion_group, criterion_main, Criterion};
use jss_core::Jobs;
use jss_sample::{aggregate, Assignment, SampleRecord, SampleSet};

fn sample_jobs() -> Jobs {
    Jobs::new([
        ("1", vec![(0u32, 2u32), (1, 1), (0, 1)]),
        ("2", vec![(1, 1), (0, 1), (2, 2)]),
        ("3", vec![(2, 1), (2, 1), (1, 1)]),
    ])
    .unwrap()
}

fn sample_set(jobs: &Jobs, horizon: u32, records: usize) -> SampleSet {
    let mut out = Vec::with_capacity(records);
    for idx in 0..records {
        let mut assignment = Assignment::new();
        for (job, ops) in jobs.iter() {
            for task in 0..ops.len() {
                for start in 0..horizon {
                    let on = (start as usize + task + idx) % horizon as usize == 0;
                    assignment.insert(format!("{job}_{task},{start}"), u8::from(on));
                }
            }
        }
        out.push(SampleRecord {
            assignment,
            energy: idx as f64,
            num_occurrences: 1 + idx as u64 % 7,
        });
    }
    SampleSet::new(out)
}

fn bench_aggregate(c: &mut Criterion) {
    let jobs = sample_jobs();
    let set = sample_set(&jobs, 8, 256);
    c.bench_function("aggregate_256_records", |b| {
        b.iter(|| {
            let _ = aggregate(&set, &jobs).unwrap();
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
