use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spotdiff_core::{BOARD_SIZE_CHOICES, BoardConfig, BoardGenerator, RandomBoardGenerator};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in BOARD_SIZE_CHOICES {
        let config = BoardConfig::new(size, 5).expect("menu sizes fit five differences");
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomBoardGenerator::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
