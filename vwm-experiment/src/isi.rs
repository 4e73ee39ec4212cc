//! Inter-stimulus interval inserted after each sample screen.

use std::time::Duration;
use vwm_core::{Condition, Grouping, Layout, PlacementSpec, Stimulus, StimulusKind, TestStatus};

pub const SINGLE_SET_FIRST_KIND_ISI: Duration = Duration::from_millis(2300);
pub const COMBINED_FIRST_KIND_ISI: Duration = Duration::from_millis(2000);
pub const BASE_ISI: Duration = Duration::from_millis(1000);

/// Gap after a sample screen whose items are of `screen_kind`.
///
/// `first_tested_kind` is the kind of the realized `tested_first` item on
/// this screen and only matters for combined interleaved displays.
pub fn inter_stimulus_interval(
    condition: &Condition,
    screen_kind: StimulusKind,
    first_tested_kind: Option<StimulusKind>,
) -> Duration {
    let shown_first = condition.stimulus_type_shown_first;

    if condition.num_circles == 3 {
        return if screen_kind == shown_first {
            SINGLE_SET_FIRST_KIND_ISI
        } else {
            BASE_ISI
        };
    }
    if condition.num_circles == 6 && condition.grouping == Grouping::Split {
        return BASE_ISI;
    }

    match (condition.grouping, condition.layout) {
        (Grouping::Combined, Layout::Clustered) if screen_kind == shown_first => {
            COMBINED_FIRST_KIND_ISI
        }
        (Grouping::Combined, Layout::Clustered) => BASE_ISI,
        (Grouping::Combined, Layout::Interleaved) if first_tested_kind == Some(shown_first) => {
            COMBINED_FIRST_KIND_ISI
        }
        (Grouping::Combined, Layout::Interleaved) => BASE_ISI,
        _ => Duration::ZERO,
    }
}

/// ISI for a placed screen: its kind is that of its first placement entry.
pub fn screen_isi(condition: &Condition, specs: &[PlacementSpec], placed: &[Stimulus]) -> Duration {
    let Some(screen_kind) = specs.first().map(|s| s.stimulus_type) else {
        return Duration::ZERO;
    };
    let first_tested_kind = placed
        .iter()
        .find(|s| s.test_status() == TestStatus::TestedFirst)
        .map(Stimulus::kind);
    inter_stimulus_interval(condition, screen_kind, first_tested_kind)
}
