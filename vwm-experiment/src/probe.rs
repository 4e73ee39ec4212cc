//! Recall probes: one screen per tested item.

use crate::config::ExperimentConfig;
use crate::store::TrialStore;
use rand::Rng;
use std::time::Duration;
use tracing::{error, info};
use vwm_core::{
    CircleStimulus, DesignError, ProbeIndex, ResponseKind, ScreenObject, Stimulus, TrialSpec,
    WheelStimulus,
};

/// Outer wheel radius relative to the anchor circle
pub const WHEEL_OUTER_RATIO: f64 = 2.7;
/// Inner wheel radius relative to the anchor circle
pub const WHEEL_INNER_RATIO: f64 = 1.836;

pub fn color_wheel_for<R: Rng>(anchor: &CircleStimulus, rng: &mut R) -> WheelStimulus {
    let offset = rng.random_range(0..360u16);
    WheelStimulus::color(
        anchor.start_x,
        anchor.start_y,
        anchor.radius * WHEEL_OUTER_RATIO,
        anchor.radius * WHEEL_INNER_RATIO,
        offset,
    )
}

pub fn orientation_wheel_for(anchor: &CircleStimulus) -> WheelStimulus {
    WheelStimulus::orientation(
        anchor.start_x,
        anchor.start_y,
        anchor.radius * WHEEL_OUTER_RATIO,
        anchor.radius * WHEEL_INNER_RATIO,
    )
}

/// What a recall probe puts on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeScreen {
    pub response_kind: ResponseKind,
    pub anchor: CircleStimulus,
    pub wheel: WheelStimulus,
    /// Masked copies of the probed item followed by the wheel
    pub objects: Vec<ScreenObject>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallProbe {
    spec: TrialSpec,
    index: ProbeIndex,
    post_trial_gap: Duration,
}

impl RecallProbe {
    /// The two probes of a logical trial, in presentation order.
    pub fn pair(spec: TrialSpec, config: &ExperimentConfig) -> [RecallProbe; 2] {
        ProbeIndex::BOTH.map(|index| RecallProbe {
            spec,
            index,
            post_trial_gap: Duration::from_millis(match index {
                ProbeIndex::First => config.first_probe_gap_ms,
                ProbeIndex::Second => config.second_probe_gap_ms,
            }),
        })
    }

    pub fn index(&self) -> ProbeIndex {
        self.index
    }

    pub fn spec(&self) -> &TrialSpec {
        &self.spec
    }

    pub fn post_trial_gap(&self) -> Duration {
        self.post_trial_gap
    }

    /// Sample-phase items this probe asks about.
    pub fn probed_items(&self, store: &TrialStore) -> Vec<Stimulus> {
        let target = self.index.target();
        store
            .display_stimuli(&self.spec.key)
            .into_iter()
            .filter(|s| s.test_status() == target)
            .collect()
    }

    /// Builds the probe screen from the stored sample stimuli.
    ///
    /// Orientation probes centre the wheel on the item's hollow carrier
    /// circle; colour probes on the coloured circle itself.
    pub fn build<R: Rng>(&self, store: &TrialStore, rng: &mut R) -> Result<ProbeScreen, DesignError> {
        let items = self.probed_items(store);
        let is_orientation = items.iter().any(|s| s.as_line().is_some());

        let mut circles = items.iter().filter_map(Stimulus::as_circle);
        let anchor = if is_orientation {
            items
                .iter()
                .filter_map(Stimulus::as_circle)
                .find(|c| c.is_transparent())
                .or_else(|| circles.next())
        } else {
            circles.next()
        };
        let Some(anchor) = anchor.cloned() else {
            error!(key = %self.spec.key, probe = %self.index, items = items.len(), "no anchor circle for probe");
            return Err(DesignError::MissingAnchor {
                key: self.spec.key,
                probe: self.index,
            });
        };

        let (response_kind, wheel) = if is_orientation {
            (ResponseKind::Orientation, orientation_wheel_for(&anchor))
        } else {
            (ResponseKind::Color, color_wheel_for(&anchor, rng))
        };

        let mut objects: Vec<ScreenObject> =
            items.iter().map(|s| ScreenObject::from(s.masked())).collect();
        objects.push(ScreenObject::Wheel(wheel.clone()));

        info!(
            key = %self.spec.key,
            probe = %self.index,
            kind = ?response_kind,
            offset = wheel.offset,
            "built recall probe"
        );
        Ok(ProbeScreen {
            response_kind,
            anchor,
            wheel,
            objects,
        })
    }
}
