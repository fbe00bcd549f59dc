use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shanten_engine::{ShantenCalculator, TileCounts, Wall};

fn random_hands(count: usize) -> Vec<TileCounts> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut hands = Vec::with_capacity(count);
    while hands.len() < count {
        let mut wall = Wall::new();
        wall.shuffle_with(&mut rng);
        while let Some(tiles) = wall.deal(14) {
            hands.push(tiles);
        }
    }
    hands.truncate(count);
    hands
}

fn bench_standard_complete(c: &mut Criterion) {
    let hand: TileCounts = "123m456m789p123s11z".parse().unwrap();
    let calculator = ShantenCalculator::new();

    c.bench_function("standard_shanten_complete", |b| {
        b.iter(|| {
            black_box(calculator.standard_shanten(black_box(&hand)).unwrap());
        });
    });
}

fn bench_best_random(c: &mut Criterion) {
    let hands = random_hands(1000);
    let calculator = ShantenCalculator::new();

    c.bench_function("best_shanten_random_1000", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(calculator.best_shanten(black_box(hand)).unwrap());
            }
        });
    });
}

fn bench_seven_pairs(c: &mut Criterion) {
    let hand: TileCounts = "1133m2255p4477s22z".parse().unwrap();
    let calculator = ShantenCalculator::new();

    c.bench_function("seven_pairs_shanten", |b| {
        b.iter(|| {
            black_box(calculator.seven_pairs_shanten(black_box(&hand)).unwrap());
        });
    });
}

criterion_group!(benches, bench_standard_complete, bench_best_random, bench_seven_pairs);
criterion_main!(benches);
