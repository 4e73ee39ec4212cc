use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vwm_core::{Condition, ProbeIndex, TrialKey, TrialSpec};
use vwm_experiment::{ExperimentConfig, GridPlacer, StimulusArray, TrialSession, resolve};

fn spec_for(condition: Condition, trial_id: u32) -> TrialSpec {
    TrialSpec {
        key: TrialKey {
            trial_id,
            block_id: 1,
            practice: false,
        },
        condition,
        forced_first_kind: None,
    }
}

pub fn bench_resolve(c: &mut Criterion) {
    let conditions = Condition::enumerate();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("resolve_all_conditions", |b| {
        b.iter(|| {
            for condition in &conditions {
                black_box(resolve(black_box(condition), &mut rng).ok());
            }
        })
    });
}

pub fn bench_full_trial(c: &mut Criterion) {
    let conditions = Condition::enumerate();
    let mut g = c.benchmark_group("logical_trial");
    g.sample_size(60);

    g.bench_function("display_and_both_probes", |b| {
        b.iter_batched(
            || {
                TrialSession::new(
                    ExperimentConfig::default(),
                    GridPlacer::new(ChaCha8Rng::seed_from_u64(2)),
                    ChaCha8Rng::seed_from_u64(3),
                )
            },
            |mut s| {
                for (i, condition) in conditions.iter().enumerate() {
                    if s.start_trial(spec_for(*condition, i as u32)).is_err() {
                        continue;
                    }
                    for screen in 0..s.display_screen_count() {
                        s.display_stimuli(screen);
                        s.finish_display_screen(screen);
                    }
                    for probe in ProbeIndex::BOTH {
                        let Ok(objects) = s.start_probe(probe) else {
                            continue;
                        };
                        let mut live = StimulusArray::from(objects);
                        for step in 0..16 {
                            let a = f64::from(step) * 0.4;
                            s.pointer_moved(&mut live, 640.0 + 200.0 * a.cos(), 360.0 + 200.0 * a.sin());
                        }
                        s.finish_probe(&live);
                    }
                }
                black_box(s.results().len())
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(benches, bench_resolve, bench_full_trial);
criterion_main!(benches);
