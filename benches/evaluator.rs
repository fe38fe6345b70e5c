use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use splitpot::cards::parse_cards;
use splitpot::evaluator::{evaluate_pool, HandStrengthEvaluator, RankOrder, StandardEvaluator};
use splitpot::rules::RuleDescriptor;

fn bench_evaluate_pool(c: &mut Criterion) {
    let order = RankOrder::standard();
    let high_card = parse_cards("Ah Kd 7s 5c 2d 9h Jc").unwrap();
    let royal = parse_cards("As Ks Qs Js 10s 9d 2c").unwrap();

    let mut g = c.benchmark_group("evaluate_pool");
    g.bench_with_input(BenchmarkId::new("seven", "high_card"), &high_card, |b, input| {
        b.iter(|| evaluate_pool(black_box(input), &order))
    });
    g.bench_with_input(BenchmarkId::new("seven", "royal_flush"), &royal, |b, input| {
        b.iter(|| evaluate_pool(black_box(input), &order))
    });
    g.finish();
}

fn bench_omaha_hi_lo(c: &mut Criterion) {
    let rules = RuleDescriptor::omaha_hi_lo(25, 50);
    let hole = parse_cards("Ah 2h Kd Qc").unwrap();
    let board = parse_cards("3h 4h 8c Jd 10s").unwrap();
    c.bench_function("omaha_hi_lo_evaluate", |b| {
        b.iter(|| StandardEvaluator.evaluate(black_box(&hole), black_box(&board), &rules))
    });
}

fn bench_skip_straight_order(c: &mut Criterion) {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let pool = parse_cards("2c 4d 6h 8s 10c Kh 3d").unwrap();
    c.bench_function("skip_straight_scan", |b| {
        b.iter(|| evaluate_pool(black_box(&pool), &rules.rank_order))
    });
}

criterion_group!(
    benches,
    bench_evaluate_pool,
    bench_omaha_hi_lo,
    bench_skip_straight_order
);
criterion_main!(benches);
