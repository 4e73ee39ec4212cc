use crate::condition::{Condition, Side, StimulusKind};
use crate::stimulus::TestStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one logical trial: a sample display and its two recall probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialKey {
    #[serde(rename = "trialID")]
    pub trial_id: u32,
    #[serde(rename = "blockID")]
    pub block_id: u32,
    pub practice: bool,
}

impl fmt::Display for TrialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} trial {}", self.block_id, self.trial_id)?;
        if self.practice {
            f.write_str(" (practice)")?;
        }
        Ok(())
    }
}

/// Everything needed to build the screens of one logical trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialSpec {
    #[serde(flatten)]
    pub key: TrialKey,
    #[serde(flatten)]
    pub condition: Condition,
    pub forced_first_kind: Option<StimulusKind>,
}

/// One entry of a screen's placement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSpec {
    pub count: u8,
    pub side: Side,
    pub stimulus_type: StimulusKind,
}

impl PlacementSpec {
    pub fn new(count: u8, side: Side, stimulus_type: StimulusKind) -> Self {
        Self {
            count,
            side,
            stimulus_type,
        }
    }
}

/// Which of the two recall probes of a logical trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProbeIndex {
    First,
    Second,
}

impl ProbeIndex {
    pub const BOTH: [ProbeIndex; 2] = [ProbeIndex::First, ProbeIndex::Second];

    pub fn target(self) -> TestStatus {
        match self {
            ProbeIndex::First => TestStatus::TestedFirst,
            ProbeIndex::Second => TestStatus::TestedSecond,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            ProbeIndex::First => 1,
            ProbeIndex::Second => 2,
        }
    }
}

impl From<ProbeIndex> for u8 {
    fn from(p: ProbeIndex) -> u8 {
        p.number()
    }
}

impl TryFrom<u8> for ProbeIndex {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(ProbeIndex::First),
            2 => Ok(ProbeIndex::Second),
            other => Err(format!("probe index must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for ProbeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
