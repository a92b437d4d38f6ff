use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use passmeter::analyze;

fn bench_analyze(c: &mut Criterion) {
    c.bench_function("analyze common password", |b| {
        b.iter(|| analyze(black_box("p@ssw0rd"), &[]))
    });
    c.bench_function("analyze keyboard walk", |b| {
        b.iter(|| analyze(black_box("qwertyuiop123"), &[]))
    });
    c.bench_function("analyze passphrase", |b| {
        b.iter(|| analyze(black_box("correct horse battery staple"), &[]))
    });
    c.bench_function("analyze with user inputs", |b| {
        b.iter(|| {
            analyze(
                black_box("McFly1985-11-05"),
                &["marty".into(), "mcfly".into(), 1985.into()],
            )
        })
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
