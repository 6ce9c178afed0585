use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rtessellate::algorithms::{earclip, TriangulationSettings};
use rtessellate::data::Point;
use std::f64::consts::PI;

fn random_star(rng: &mut impl Rng, n: usize) -> Vec<Point<i64, 2>> {
  (0..n)
    .map(|i| {
      let angle = 2.0 * PI * (i as f64 + rng.gen_range(0.0..0.4)) / n as f64;
      let radius = rng.gen_range(50_000.0..100_000.0);
      Point::new([
        (radius * angle.cos()).round() as i64,
        (radius * angle.sin()).round() as i64,
      ])
    })
    .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = rand::rngs::SmallRng::seed_from_u64(0);
  let settings = TriangulationSettings::default();
  let mut group = c.benchmark_group("earclip");
  for n in [20, 100, 1000] {
    let pts = random_star(&mut rng, n);
    group.bench_with_input(BenchmarkId::new("star", n), &pts, |b, pts| {
      b.iter(|| earclip(pts, &[], &settings))
    });
    let mut holed = pts.clone();
    holed.extend([[-10, -10], [-10, 10], [10, 10], [10, -10]].map(Point::new));
    group.bench_with_input(BenchmarkId::new("star_with_hole", n), &holed, |b, pts| {
      b.iter(|| earclip(pts, &[n], &settings))
    });
  }
  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
