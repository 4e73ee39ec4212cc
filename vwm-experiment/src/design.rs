//! Block and timeline construction.

use crate::config::ExperimentConfig;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::info;
use vwm_core::{Composition, Condition, TrialKey, TrialSpec};

/// Trials of one block: every condition `repetitions` times, shuffled.
///
/// Mixed displays alternate which kind the first probe targets across
/// repetitions, starting with the kind shown first.
pub fn build_block<R: Rng>(
    block_id: u32,
    practice: bool,
    conditions: &[Condition],
    repetitions: usize,
    first_trial_id: u32,
    rng: &mut R,
) -> Vec<TrialSpec> {
    let mut trials: Vec<(Condition, Option<_>)> = Vec::with_capacity(conditions.len() * repetitions);
    for rep in 0..repetitions {
        for c in conditions {
            let forced = (c.composition == Composition::Mixed).then(|| {
                if rep % 2 == 0 {
                    c.stimulus_type_shown_first
                } else {
                    c.stimulus_type_shown_first.opposite()
                }
            });
            trials.push((*c, forced));
        }
    }
    trials.shuffle(rng);

    trials
        .into_iter()
        .zip(first_trial_id..)
        .map(|((condition, forced_first_kind), trial_id)| TrialSpec {
            key: TrialKey {
                trial_id,
                block_id,
                practice,
            },
            condition,
            forced_first_kind,
        })
        .collect()
}

/// Practice block (block 0) followed by the experimental blocks.
/// Trial ids run on across blocks.
pub fn build_timeline<R: Rng>(config: &ExperimentConfig, rng: &mut R) -> Vec<TrialSpec> {
    let conditions = Condition::enumerate();
    let mut timeline = Vec::new();

    let practice: Vec<Condition> = conditions
        .choose_multiple(rng, config.practice_trials)
        .copied()
        .collect();
    timeline.extend(build_block(0, true, &practice, 1, 0, rng));

    for block_id in 1..=config.experiment_blocks {
        let next_id = timeline.len() as u32;
        timeline.extend(build_block(
            block_id,
            false,
            &conditions,
            config.repetitions,
            next_id,
            rng,
        ));
    }

    info!(
        trials = timeline.len(),
        practice = config.practice_trials.min(conditions.len()),
        blocks = config.experiment_blocks,
        "built timeline"
    );
    timeline
}
