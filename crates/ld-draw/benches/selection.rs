//! Winner selection and full-cycle benchmarks

use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ld_draw::{
    AnimationStyle, DrawConfig, DrawEngine, DrawSession, ParticipantSet, RandomSelector,
    SeededSource,
};
use ld_stage::{NullSink, RowIndex};

fn participants(n: usize) -> ParticipantSet {
    ParticipantSet::from_names((0..n).map(|i| format!("Participant {i}"))).unwrap()
}

fn bench_select_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_many");

    for size in [100, 1_000, 10_000] {
        let set = participants(size);
        // Every tenth participant already won
        let excluded: BTreeSet<RowIndex> = (0..size).step_by(10).map(RowIndex).collect();
        let mut rng = SeededSource::seeded(42);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                RandomSelector::select_many(
                    black_box(&set),
                    black_box(10),
                    black_box(&excluded),
                    false,
                    &mut rng,
                )
            })
        });
    }

    group.finish();
}

fn bench_virtual_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_cycle");

    for style in [
        AnimationStyle::Scrolling,
        AnimationStyle::Rolodex,
        AnimationStyle::LetterByLetter,
    ] {
        let set = participants(1_000);
        let config = DrawConfig::new(15.0, 3, style);

        group.bench_with_input(
            BenchmarkId::from_parameter(style.display_name()),
            &style,
            |b, _| {
                b.iter(|| {
                    let mut engine = DrawEngine::new(NullSink);
                    let mut session = DrawSession::new();
                    engine.run_virtual(
                        set.clone(),
                        config.clone(),
                        SeededSource::seeded(7),
                        &mut session,
                        0.0,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_select_many, bench_virtual_cycle);
criterion_main!(benches);
