use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use shadow_float::{sf64, Store, Tag, tf64};

// Establish a baseline by comparing with the native operations

fn baseline_fpu(c: &mut Criterion) {
  let mut g = c.benchmark_group("baseline_fpu");
  g.bench_function("add", |b| b.iter(|| black_box(3.14_f64) + black_box(69.420_f64)));
  g.bench_function("mul", |b| b.iter(|| black_box(3.14_f64) * black_box(69.420_f64)));
  g.bench_function("div", |b| b.iter(|| black_box(3.14_f64) / black_box(69.420_f64)));
  g.bench_function("fma", |b| {
    b.iter(|| black_box(3.14_f64).mul_add(black_box(69.420_f64), black_box(-1.5_f64)))
  });
  g.finish();
}

// One operation on shadow numbers (with the instability checks, if `diagnostics` is on)

fn shadow_ops(c: &mut Criterion) {
  let x = sf64::new(3.14, 1e-17);
  let y = sf64::new(69.420, -2e-15);
  let z = sf64::new(-1.5, 0.);
  let mut g = c.benchmark_group("shadow_f64");
  g.bench_function("add", |b| b.iter(|| black_box(x) + black_box(y)));
  g.bench_function("mul", |b| b.iter(|| black_box(x) * black_box(y)));
  g.bench_function("div", |b| b.iter(|| black_box(x) / black_box(y)));
  g.bench_function("fma", |b| b.iter(|| black_box(x).mul_add(black_box(y), black_box(z))));
  g.bench_function("sqrt", |b| b.iter(|| black_box(y).sqrt()));
  g.bench_function("exp", |b| b.iter(|| black_box(x).exp()));
  g.finish();
}

// A sum of n terms: native, shadow, and tagged with the terms spread over 8 sites

fn sum(c: &mut Criterion) {
  let mut g = c.benchmark_group("sum");
  for n in [100_u32, 10_000] {
    let terms: Vec<f64> = (1 ..= n).map(|i| 1. / f64::from(i * i)).collect();
    g.throughput(Throughput::Elements(u64::from(n)));

    g.bench_with_input(BenchmarkId::new("native", n), &terms, |b, terms| {
      b.iter(|| black_box(terms).iter().sum::<f64>());
    });

    g.bench_with_input(BenchmarkId::new("shadow", n), &terms, |b, terms| {
      b.iter(|| black_box(terms).iter().map(|&x| sf64::from(x)).sum::<sf64>());
    });

    g.bench_with_input(BenchmarkId::new("tagged", n), &terms, |b, terms| {
      let store = Store::new();
      b.iter(|| {
        let mut acc = tf64::exact(&store, 0.);
        for (tag, &x) in (0 .. 8).cycle().zip(black_box(terms)) {
          let _site = store.enter(Tag(tag));
          acc += x;
        }
        acc
      });
    });
  }
  g.finish();
}

criterion_group!(baseline,
  baseline_fpu,
);

criterion_group!(shadow,
  shadow_ops,
  sum,
);

criterion_main!(baseline, shadow);
