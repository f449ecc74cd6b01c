use bench::apply_medium_runtime_config;
use bench::apply_small_runtime_config;
use bench::default_rng;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::Rng;
use std::hint::black_box;
use toggle_sort::Direction;
use toggle_sort::sort_by_direction;

const SIZES: [usize; 4] = [64, 256, 1_024, 4_096];

#[derive(Clone, Copy, Debug)]
enum Shape {
    RandomUniform,
    AlreadySorted,
}

impl Shape {
    fn label(self) -> &'static str {
        match self {
            Self::RandomUniform => "random_uniform",
            Self::AlreadySorted => "already_sorted",
        }
    }

    fn build(self, size: usize) -> Vec<i32> {
        match self {
            Self::RandomUniform => {
                let mut rng = default_rng();
                (0..size).map(|_| rng.random_range(1..=1_000)).collect()
            }
            Self::AlreadySorted => (0..size as i32).collect(),
        }
    }
}

fn bench_toggle_sort(c: &mut Criterion) {
    for shape in [Shape::RandomUniform, Shape::AlreadySorted] {
        let mut group = c.benchmark_group(format!("toggle_sort/{}", shape.label()));
        match shape {
            Shape::RandomUniform => apply_small_runtime_config(&mut group),
            // sorted input is the quadratic path, give it more room
            Shape::AlreadySorted => apply_medium_runtime_config(&mut group),
        }

        for &size in &SIZES {
            let base = shape.build(size);
            group.bench_function(BenchmarkId::new("ascending", size), |bencher| {
                bencher.iter_batched(
                    || base.clone(),
                    |mut values| {
                        sort_by_direction(&mut values, Direction::Ascending, |event| {
                            black_box(event);
                        });
                        black_box(values)
                    },
                    criterion::BatchSize::SmallInput,
                );
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_toggle_sort);
criterion_main!(benches);
