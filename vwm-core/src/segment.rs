use serde::{Deserialize, Serialize};

/// Stage of a logical trial a stored record belongs to
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrialSegment {
    #[default]
    DisplayStimuli,
    FeatureRecall,
}

impl TrialSegment {
    pub fn next(&self) -> Option<Self> {
        match self {
            TrialSegment::DisplayStimuli => Some(TrialSegment::FeatureRecall),
            TrialSegment::FeatureRecall => None,
        }
    }

    pub fn is_display(&self) -> bool {
        matches!(self, TrialSegment::DisplayStimuli)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrialSegment::DisplayStimuli => "displayStimuli",
            TrialSegment::FeatureRecall => "featureRecall",
        }
    }
}
