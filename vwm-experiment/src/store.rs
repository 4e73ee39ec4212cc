//! In-memory store of realized sample screens.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vwm_core::{Stimulus, TrialKey, TrialSegment, TrialSpec};

/// One persisted sample screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredScreen {
    #[serde(flatten)]
    pub spec: TrialSpec,
    #[serde(rename = "trialSegment")]
    pub segment: TrialSegment,
    /// 1 or 2
    pub part: u8,
    #[serde(rename = "stimuliData")]
    pub stimuli: Vec<Stimulus>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrialStore {
    screens: Vec<StoredScreen>,
}

impl TrialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists the placements of sample screen `part`; recording the same
    /// screen again replaces the earlier entry.
    pub fn record_display(&mut self, spec: &TrialSpec, part: u8, stimuli: Vec<Stimulus>) {
        let entry = StoredScreen {
            spec: *spec,
            segment: TrialSegment::DisplayStimuli,
            part,
            stimuli,
        };
        match self
            .screens
            .iter_mut()
            .find(|s| s.spec.key == spec.key && s.segment == entry.segment && s.part == part)
        {
            Some(existing) => *existing = entry,
            None => self.screens.push(entry),
        }
        debug!(key = %spec.key, part, "stored sample screen");
    }

    /// All sample-screen stimuli of a logical trial, screens in recording order.
    pub fn display_stimuli(&self, key: &TrialKey) -> Vec<Stimulus> {
        self.screens
            .iter()
            .filter(|s| s.spec.key == *key && s.segment.is_display())
            .flat_map(|s| s.stimuli.iter().cloned())
            .collect()
    }

    pub fn screens(&self) -> &[StoredScreen] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.screens)
    }
}
