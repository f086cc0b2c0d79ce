use criterion::{black_box, criterion_group, criterion_main, Criterion};
use landmass::color_map::ColorMapper;
use landmass::config::Config;
use landmass::terrain::{generate_terrain, signed_distance, LandmassGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn config(size: usize) -> Config {
    Config {
        map_width: size,
        map_height: size,
        ..Config::default()
    }
}

fn bench_landmass(c: &mut Criterion) {
    let mut group = c.benchmark_group("Landmass Mask");

    for &size in &[128, 256, 512] {
        let generator = LandmassGenerator::new(&config(size));
        group.bench_function(format!("mask_{}", size), |b| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                black_box(generator.generate(&mut rng));
            });
        });
    }

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Distance Field");

    for &size in &[128, 256, 512] {
        let generator = LandmassGenerator::new(&config(size));
        let mask = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
        group.bench_function(format!("signed_distance_{}", size), |b| {
            b.iter(|| {
                black_box(signed_distance(&mask));
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full Pipeline");
    group.sample_size(10);

    for &size in &[256, 512] {
        let config = config(size);
        group.bench_function(format!("terrain_{}", size), |b| {
            b.iter(|| {
                black_box(generate_terrain(&config, 42));
            });
        });

        let heights = generate_terrain(&config, 42).heightmap;
        let mapper = ColorMapper::from_config(&config).expect("default ramps are valid");
        group.bench_function(format!("colorize_{}", size), |b| {
            b.iter(|| {
                black_box(mapper.colorize_grid(&heights));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_landmass, bench_distance, bench_pipeline);
criterion_main!(benches);
