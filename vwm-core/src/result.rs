use crate::condition::{Composition, Grouping, Layout, Side, StimulusKind};
use crate::stimulus::ExportedStimulus;
use crate::trial::{ProbeIndex, TrialSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Orientation,
    Color,
}

/// Recorded result per recall probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    #[serde(rename = "trialID")]
    pub trial_id: u32,
    #[serde(rename = "blockID")]
    pub block_id: u32,
    pub practice: bool,
    #[serde(rename = "numCircles")]
    pub num_circles: u8,
    pub grouping: Grouping,
    pub composition: Composition,
    pub layout: Layout,
    #[serde(rename = "probeIndex")]
    pub probe_index: ProbeIndex,
    #[serde(rename = "stimulusTypeShownFirst")]
    pub stimulus_type_shown_first: StimulusKind,
    #[serde(rename = "forcedFirstKind")]
    pub forced_first_kind: Option<StimulusKind>,

    pub response_kind: ResponseKind,
    pub target_orientation_deg: Option<f64>,
    pub selected_orientation_deg: Option<f64>,
    pub target_color_deg: Option<f64>,
    pub selected_color_deg: Option<f64>,
    pub signed_error_deg: Option<f64>,
    pub wheel_offset_deg: Option<u16>,
    pub side: Option<Side>,
    #[serde(rename = "stimulusResponse")]
    pub stimulus_response: Vec<ExportedStimulus>,
}

impl ProbeResult {
    /// Result with the bookkeeping columns echoed from the trial and every
    /// response column empty.
    pub fn blank(spec: &TrialSpec, probe: ProbeIndex, response_kind: ResponseKind) -> Self {
        Self {
            trial_id: spec.key.trial_id,
            block_id: spec.key.block_id,
            practice: spec.key.practice,
            num_circles: spec.condition.num_circles,
            grouping: spec.condition.grouping,
            composition: spec.condition.composition,
            layout: spec.condition.layout,
            probe_index: probe,
            stimulus_type_shown_first: spec.condition.stimulus_type_shown_first,
            forced_first_kind: spec.forced_first_kind,
            response_kind,
            target_orientation_deg: None,
            selected_orientation_deg: None,
            target_color_deg: None,
            selected_color_deg: None,
            signed_error_deg: None,
            wheel_offset_deg: None,
            side: None,
            stimulus_response: Vec::new(),
        }
    }
}
