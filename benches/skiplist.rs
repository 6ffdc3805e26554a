//! Benchmarks for this crate's [`SkipList`].

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use lanes::{Config, SkipList};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Benchmarking sizes.
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Seed shared by the input data and the level generator.
const SEED: u64 = 0x1234_abcd;

fn filled(rng: &mut StdRng, size: usize) -> SkipList<u64, u64> {
    let mut sl = SkipList::with_config(Config::new().with_seed(SEED))
        .expect("the default configuration is valid");
    for _ in 0..size {
        sl.insert(rng.random(), rng.random())
            .expect("integer keys are totally ordered");
    }
    sl
}

/// Benchmarking insertion.
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(SEED);
            let mut sl = filled(&mut rng, size);

            b.iter(|| {
                black_box(sl.insert(rng.random(), rng.random()).ok());
            });
        });
    }
}

/// Benchmarking lookups of present keys.
pub fn get(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Get");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(SEED);
            let sl = filled(&mut rng, size);
            let keys: Vec<u64> = sl.iter().map(|(&k, _)| k).step_by(size.div_ceil(10)).collect();

            b.iter(|| {
                for key in &keys {
                    black_box(sl.get(key).ok());
                }
            });
        });
    }
}

/// Benchmarking deletion followed by re-insertion of the same key.
pub fn delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Delete");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(SEED);
            let mut sl = filled(&mut rng, size);
            let keys: Vec<u64> = sl.iter().map(|(&k, _)| k).collect();

            b.iter(|| {
                let key = keys[rng.random_range(0..keys.len())];
                black_box(sl.delete(&key).ok());
                black_box(sl.insert(key, key).ok());
            });
        });
    }
}

/// Benchmarking iteration.
pub fn iter(c: &mut Criterion) {
    c.bench_function("SkipList Iter", |b| {
        let mut rng = StdRng::seed_from_u64(SEED);
        let sl = filled(&mut rng, 100_000);

        b.iter(|| {
            for el in &sl {
                black_box(el);
            }
        });
    });
}
