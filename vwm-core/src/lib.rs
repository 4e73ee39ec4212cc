pub mod circular;
pub mod condition;
pub mod error;
pub mod result;
pub mod segment;
pub mod stimulus;
pub mod trial;

pub use condition::{Composition, Condition, Grouping, Layout, Side, StimulusKind};
pub use error::DesignError;
pub use result::{ProbeResult, ResponseKind};
pub use segment::TrialSegment;
pub use stimulus::{
    CircleStimulus, ExportedStimulus, LineStimulus, ScreenObject, Stimulus, TestStatus,
    WheelKind, WheelStimulus,
};
pub use trial::{PlacementSpec, ProbeIndex, TrialKey, TrialSpec};
