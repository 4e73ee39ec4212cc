//! Sample screens of one logical trial.

use crate::config::ExperimentConfig;
use crate::grid::{Grid, PlacementGenerator};
use crate::isi::screen_isi;
use crate::resolver::resolve;
use crate::store::TrialStore;
use rand::Rng;
use std::cell::OnceCell;
use std::time::Duration;
use tracing::{debug, info};
use vwm_core::{DesignError, PlacementSpec, Side, Stimulus, StimulusKind, TrialSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayScreen {
    /// 1-based screen number within the trial
    pub part: u8,
    pub specs: Vec<PlacementSpec>,
    pub duration: Duration,
}

impl DisplayScreen {
    /// Kind of the screen's leading placement entry.
    pub fn kind(&self) -> Option<StimulusKind> {
        self.specs.first().map(|s| s.stimulus_type)
    }

    pub fn item_count(&self) -> usize {
        self.specs.iter().map(|s| usize::from(s.count)).sum()
    }
}

/// Sample screens of one logical trial plus their shared placement run.
///
/// The placements of every screen are generated together, on one grid, the
/// first time any screen asks for its stimuli. The cache is written exactly
/// once; later screens only read it.
#[derive(Debug)]
pub struct DisplaySequence {
    spec: TrialSpec,
    screens: Vec<DisplayScreen>,
    grid: Grid,
    placed: OnceCell<Vec<Vec<Stimulus>>>,
}

impl DisplaySequence {
    pub fn new<R: Rng>(
        spec: TrialSpec,
        config: &ExperimentConfig,
        rng: &mut R,
    ) -> Result<Self, DesignError> {
        let plan = resolve(&spec.condition, rng)?;
        let duration = config.display_duration(spec.condition.num_circles);
        let screens = plan
            .into_iter()
            .zip(1u8..)
            .map(|(specs, part)| DisplayScreen {
                part,
                specs,
                duration,
            })
            .collect::<Vec<_>>();

        let grid = Grid::new(
            config.grid_columns,
            config.grid_rows,
            config.screen_width,
            config.screen_height,
        );
        // all screens of a trial share one grid
        for side in [Side::Left, Side::Right] {
            let requested: usize = screens
                .iter()
                .flat_map(|s| &s.specs)
                .filter(|p| p.side == side)
                .map(|p| usize::from(p.count))
                .sum();
            let capacity = grid.capacity(side);
            if requested > capacity {
                return Err(DesignError::GridTooSmall {
                    key: spec.key,
                    side,
                    requested,
                    capacity,
                });
            }
        }

        info!(key = %spec.key, condition = %spec.condition, screens = screens.len(), "built sample screens");
        Ok(Self {
            spec,
            screens,
            grid,
            placed: OnceCell::new(),
        })
    }

    pub fn spec(&self) -> &TrialSpec {
        &self.spec
    }

    pub fn screens(&self) -> &[DisplayScreen] {
        &self.screens
    }

    pub fn is_placed(&self) -> bool {
        self.placed.get().is_some()
    }

    /// Stimuli of screen `index` (0-based), placing the whole trial on first use.
    pub fn stimuli<G: PlacementGenerator + ?Sized>(
        &self,
        index: usize,
        generator: &mut G,
    ) -> &[Stimulus] {
        let placed = self.placed.get_or_init(|| {
            let mut grid = self.grid.clone();
            let cell = grid.cell_size();
            let mut screens: Vec<Vec<Stimulus>> = self
                .screens
                .iter()
                .map(|screen| generator.generate(&mut grid, &screen.specs, cell))
                .collect();
            generator.tag_probes(&mut screens, self.spec.forced_first_kind);
            let counts: Vec<usize> = screens.iter().map(Vec::len).collect();
            debug!(key = %self.spec.key, ?counts, "placed sample stimuli");
            screens
        });
        placed.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gap after screen `index`; needs the screen's stimuli to have been placed.
    pub fn post_screen_gap(&self, index: usize) -> Duration {
        let Some(screen) = self.screens.get(index) else {
            return Duration::ZERO;
        };
        let placed = self
            .placed
            .get()
            .and_then(|p| p.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let gap = screen_isi(&self.spec.condition, &screen.specs, placed);
        debug!(key = %self.spec.key, part = screen.part, gap_ms = gap.as_millis() as u64, "post screen gap");
        gap
    }

    /// Persists the realized stimuli of screen `index` under the trial's key.
    pub fn record(&self, index: usize, store: &mut TrialStore) {
        let (Some(screen), Some(placed)) = (
            self.screens.get(index),
            self.placed.get().and_then(|p| p.get(index)),
        ) else {
            return;
        };
        store.record_display(&self.spec, screen.part, placed.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPlacer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use vwm_core::{Composition, Condition, Grouping, Layout, TestStatus, TrialKey};

    fn split_spec() -> TrialSpec {
        TrialSpec {
            key: TrialKey {
                trial_id: 3,
                block_id: 1,
                practice: false,
            },
            condition: Condition {
                num_circles: 6,
                grouping: Grouping::Split,
                composition: Composition::Mixed,
                layout: Layout::Clustered,
                stimulus_type_shown_first: StimulusKind::ColoredCircle,
            },
            forced_first_kind: None,
        }
    }

    #[test]
    fn supplier_places_once_and_reuses_the_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let seq = DisplaySequence::new(split_spec(), &ExperimentConfig::default(), &mut rng).unwrap();
        let mut placer = GridPlacer::new(ChaCha8Rng::seed_from_u64(12));

        assert!(!seq.is_placed());
        let first = seq.stimuli(0, &mut placer).to_vec();
        let again = seq.stimuli(0, &mut placer).to_vec();
        assert_eq!(first, again);
        assert!(std::ptr::eq(
            seq.stimuli(1, &mut placer),
            seq.stimuli(1, &mut placer)
        ));
        assert!(seq.is_placed());
    }

    #[test]
    fn split_screens_share_one_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seq = DisplaySequence::new(split_spec(), &ExperimentConfig::default(), &mut rng).unwrap();
        let mut placer = GridPlacer::new(ChaCha8Rng::seed_from_u64(2));

        let centres = |i: usize, placer: &mut GridPlacer<ChaCha8Rng>| {
            seq.stimuli(i, placer)
                .iter()
                .filter_map(|s| s.as_circle().map(|c| c.center()))
                .collect::<Vec<_>>()
        };
        let left = centres(0, &mut placer);
        let right = centres(1, &mut placer);
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 3);
        assert!(left.iter().all(|c| !right.contains(c)));

        let tagged = (0..2)
            .flat_map(|i| seq.stimuli(i, &mut placer).to_vec())
            .filter(|s| s.as_circle().is_some() && s.test_status() != TestStatus::Untested)
            .count();
        assert_eq!(tagged, 2);
    }

    #[test]
    fn screens_carry_duration_and_parts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seq = DisplaySequence::new(split_spec(), &ExperimentConfig::default(), &mut rng).unwrap();
        let screens = seq.screens();
        assert_eq!(screens.len(), 2);
        assert_eq!(screens[0].part, 1);
        assert_eq!(screens[1].part, 2);
        assert_eq!(screens[0].duration, Duration::from_millis(600));
        assert_eq!(screens[0].kind(), Some(StimulusKind::ColoredCircle));
        assert_eq!(screens[1].specs[0].side, Side::Right);
        assert_eq!(screens[1].item_count(), 3);
    }

    #[test]
    fn record_writes_placed_screens_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seq = DisplaySequence::new(split_spec(), &ExperimentConfig::default(), &mut rng).unwrap();
        let mut store = TrialStore::new();
        seq.record(0, &mut store);
        assert!(store.is_empty());

        let mut placer = GridPlacer::new(ChaCha8Rng::seed_from_u64(2));
        seq.stimuli(0, &mut placer);
        seq.record(0, &mut store);
        seq.record(1, &mut store);
        assert_eq!(store.len(), 2);
        assert_eq!(store.screens()[1].part, 2);
    }

    fn grid_config(columns: u16, rows: u16) -> ExperimentConfig {
        ExperimentConfig {
            grid_columns: columns,
            grid_rows: rows,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn grid_too_small_for_a_side_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = DisplaySequence::new(split_spec(), &grid_config(2, 2), &mut rng).unwrap_err();
        assert_eq!(
            err,
            DesignError::GridTooSmall {
                key: split_spec().key,
                side: Side::Left,
                requested: 3,
                capacity: 2,
            }
        );
    }

    #[test]
    fn tightest_grid_places_every_requested_item() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let seq = DisplaySequence::new(split_spec(), &grid_config(2, 3), &mut rng).unwrap();
        let mut placer = GridPlacer::new(ChaCha8Rng::seed_from_u64(5));
        for (i, screen) in seq.screens().iter().enumerate() {
            let circles = seq
                .stimuli(i, &mut placer)
                .iter()
                .filter(|s| s.as_circle().is_some())
                .count();
            assert_eq!(circles, screen.item_count());
        }
    }

    #[test]
    fn invalid_condition_aborts_construction() {
        let mut spec = split_spec();
        spec.condition.num_circles = 4;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = DisplaySequence::new(spec, &ExperimentConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, DesignError::InvalidCondition(spec.condition));
    }
}
