//! Benchmark suite for birdbrain-algo
//!
//! Run with: cargo bench

use birdbrain_algo::{
    select_next_exercise, update_posterior, BktParams, Difficulty, Exercise, HistoryMap,
    MasteryVector, RecentHistory,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn catalog(skills: usize, per_skill: usize) -> Vec<Exercise> {
    let tiers = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    (0..skills)
        .flat_map(|s| {
            (0..per_skill).map(move |i| Exercise {
                id: format!("skill{s}_{i}"),
                skill: format!("skill{s}"),
                prompt: "prompt".to_string(),
                choices: vec!["a".to_string(), "b".to_string()],
                answer_index: 0,
                difficulty: tiers[i % tiers.len()],
            })
        })
        .collect()
}

fn bench_update_posterior(c: &mut Criterion) {
    let params = BktParams::default();
    c.bench_function("update_posterior", |b| {
        b.iter(|| update_posterior(black_box(0.42), black_box(true), black_box(2300), &params))
    });
}

fn bench_select_next_exercise(c: &mut Criterion) {
    let exercises = catalog(50, 30);
    let mastery: MasteryVector = (0..50)
        .map(|s| (format!("skill{s}"), (s as f64 + 1.0) / 51.0))
        .collect();
    let history: HistoryMap = (0..50)
        .map(|s| (format!("skill{s}"), RecentHistory::from(vec![true, false, false])))
        .collect();

    c.bench_function("select_next_exercise/1500", |b| {
        b.iter(|| select_next_exercise(black_box(&exercises), &mastery, &history))
    });
}

criterion_group!(benches, bench_update_posterior, bench_select_next_exercise);
criterion_main!(benches);
