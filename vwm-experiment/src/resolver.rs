//! Maps a condition onto the placement plan of its sample screens.

use rand::Rng;
use tracing::debug;
use vwm_core::{
    Composition, Condition, DesignError, Grouping, Layout, PlacementSpec, Side, StimulusKind,
};

/// One placement list per sample screen, in presentation order.
pub type ScreenPlan = Vec<Vec<PlacementSpec>>;

/// Resolves the sample screens of a condition.
///
/// Only the mixed interleaved layout draws from `rng`: the kind that takes
/// the majority on the left is a fair coin flip.
pub fn resolve<R: Rng>(
    condition: &Condition,
    rng: &mut R,
) -> Result<ScreenPlan, DesignError> {
    use Side::{Left, Right};

    let first = condition.stimulus_type_shown_first;
    let plan = match (
        condition.num_circles,
        condition.grouping,
        condition.composition,
        condition.layout,
    ) {
        (3, ..) => vec![vec![PlacementSpec::new(
            3,
            Left,
            condition.composition.uniform_kind(),
        )]],
        (6, Grouping::Combined, Composition::Mixed, Layout::Clustered) => vec![vec![
            PlacementSpec::new(3, Left, first),
            PlacementSpec::new(3, Right, first.opposite()),
        ]],
        (6, Grouping::Combined, Composition::Mixed, Layout::Interleaved) => {
            let (a, b) = interleaved_pair(rng);
            vec![vec![
                PlacementSpec::new(2, Left, a),
                PlacementSpec::new(1, Left, b),
                PlacementSpec::new(1, Right, a),
                PlacementSpec::new(2, Right, b),
            ]]
        }
        (6, Grouping::Combined, composition, _) => {
            let kind = composition.uniform_kind();
            vec![vec![
                PlacementSpec::new(3, Left, kind),
                PlacementSpec::new(3, Right, kind),
            ]]
        }
        (6, Grouping::Split, ..) => vec![
            vec![PlacementSpec::new(3, Left, first)],
            vec![PlacementSpec::new(3, Right, first.opposite())],
        ],
        _ => return Err(DesignError::InvalidCondition(*condition)),
    };

    debug!(%condition, screens = plan.len(), ?plan, "resolved placement plan");
    Ok(plan)
}

fn interleaved_pair<R: Rng>(rng: &mut R) -> (StimulusKind, StimulusKind) {
    if rng.random_bool(0.5) {
        (StimulusKind::ColoredCircle, StimulusKind::OrientedCircle)
    } else {
        (StimulusKind::OrientedCircle, StimulusKind::ColoredCircle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn condition(
        num_circles: u8,
        grouping: Grouping,
        composition: Composition,
        layout: Layout,
        first: StimulusKind,
    ) -> Condition {
        Condition {
            num_circles,
            grouping,
            composition,
            layout,
            stimulus_type_shown_first: first,
        }
    }

    fn count_on(plan: &ScreenPlan, side: Side) -> u32 {
        plan.iter()
            .flatten()
            .filter(|s| s.side == side)
            .map(|s| u32::from(s.count))
            .sum()
    }

    #[test]
    fn every_legal_condition_places_num_circles_items() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for c in Condition::enumerate() {
            let plan = resolve(&c, &mut rng).unwrap();
            let total = count_on(&plan, Side::Left) + count_on(&plan, Side::Right);
            assert_eq!(total, u32::from(c.num_circles), "{c}");
            assert!(plan.iter().all(|screen| !screen.is_empty()));

            match (c.num_circles, c.grouping) {
                (3, _) => {
                    assert_eq!(plan.len(), 1);
                    assert_eq!(count_on(&plan, Side::Right), 0);
                }
                (6, Grouping::Combined) => {
                    assert_eq!(plan.len(), 1);
                    assert_eq!(count_on(&plan, Side::Left), 3);
                    assert_eq!(count_on(&plan, Side::Right), 3);
                }
                (6, Grouping::Split) => {
                    assert_eq!(plan.len(), 2);
                    assert!(plan[0].iter().all(|s| s.side == Side::Left));
                    assert!(plan[1].iter().all(|s| s.side == Side::Right));
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn set_size_three_uses_one_left_group() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let c = condition(
            3,
            Grouping::Split,
            Composition::HomogeneousOrientation,
            Layout::Interleaved,
            StimulusKind::ColoredCircle,
        );
        let plan = resolve(&c, &mut rng).unwrap();
        assert_eq!(
            plan,
            vec![vec![PlacementSpec::new(3, Side::Left, StimulusKind::OrientedCircle)]]
        );

        let c = Condition {
            composition: Composition::Mixed,
            ..c
        };
        let plan = resolve(&c, &mut rng).unwrap();
        assert_eq!(plan[0][0].stimulus_type, StimulusKind::ColoredCircle);
    }

    #[test]
    fn clustered_mixed_puts_first_kind_left() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let c = condition(
            6,
            Grouping::Combined,
            Composition::Mixed,
            Layout::Clustered,
            StimulusKind::OrientedCircle,
        );
        let plan = resolve(&c, &mut rng).unwrap();
        assert_eq!(
            plan,
            vec![vec![
                PlacementSpec::new(3, Side::Left, StimulusKind::OrientedCircle),
                PlacementSpec::new(3, Side::Right, StimulusKind::ColoredCircle),
            ]]
        );
    }

    #[test]
    fn split_shows_first_kind_then_opposite() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let c = condition(
            6,
            Grouping::Split,
            Composition::Mixed,
            Layout::Clustered,
            StimulusKind::ColoredCircle,
        );
        let plan = resolve(&c, &mut rng).unwrap();
        assert_eq!(
            plan,
            vec![
                vec![PlacementSpec::new(3, Side::Left, StimulusKind::ColoredCircle)],
                vec![PlacementSpec::new(3, Side::Right, StimulusKind::OrientedCircle)],
            ]
        );
    }

    #[test]
    fn interleaved_pair_order_varies_and_is_reproducible() {
        let c = condition(
            6,
            Grouping::Combined,
            Composition::Mixed,
            Layout::Interleaved,
            StimulusKind::ColoredCircle,
        );
        let draw = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..32)
                .map(|_| resolve(&c, &mut rng).unwrap()[0][0].stimulus_type)
                .collect::<Vec<_>>()
        };

        let run = draw(42);
        assert_eq!(run, draw(42));
        assert!(run.contains(&StimulusKind::ColoredCircle));
        assert!(run.contains(&StimulusKind::OrientedCircle));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let plan = resolve(&c, &mut rng).unwrap();
        let counts: Vec<u8> = plan[0].iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 2]);
        assert_eq!(plan[0][0].stimulus_type, plan[0][2].stimulus_type);
        assert_eq!(plan[0][1].stimulus_type, plan[0][3].stimulus_type);
        assert_ne!(plan[0][0].stimulus_type, plan[0][1].stimulus_type);
    }

    #[test]
    fn unknown_set_size_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for n in [0, 1, 4, 5, 7, 12] {
            let c = condition(
                n,
                Grouping::Combined,
                Composition::Mixed,
                Layout::Clustered,
                StimulusKind::ColoredCircle,
            );
            assert_eq!(resolve(&c, &mut rng), Err(DesignError::InvalidCondition(c)));
        }
    }
}
