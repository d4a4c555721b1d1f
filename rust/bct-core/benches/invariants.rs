use bct_core::{binary_convolution, is_bct_perfect, mersenne, CarrySchedule};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_convolution");

    for k in [16u64, 64, 256] {
        let m = mersenne(k).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &m, |b, m| {
            b.iter(|| binary_convolution(m, m).unwrap());
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for k in [16u64, 64, 256] {
        let m = mersenne(k).unwrap();
        let conv = binary_convolution(&m, &m).unwrap();
        for schedule in [CarrySchedule::Sequential, CarrySchedule::Parallel] {
            group.bench_with_input(
                BenchmarkId::new(schedule.to_string(), k),
                &conv,
                |b, conv| {
                    b.iter(|| conv.normalize(schedule).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_bct_perfect(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_bct_perfect");
    group.sample_size(20);

    for n in [965u64, 33_550_336, 8_589_869_056] {
        let n = BigUint::from(n);
        group.bench_with_input(BenchmarkId::from_parameter(&n), &n, |b, n| {
            b.iter(|| is_bct_perfect(n).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convolution, bench_normalize, bench_bct_perfect);
criterion_main!(benches);
