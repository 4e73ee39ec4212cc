use crate::condition::{Condition, Side};
use crate::trial::{ProbeIndex, TrialKey};
use thiserror::Error;

/// Structural failures while building the screens of a trial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    /// No placement rule covers the condition tuple.
    #[error("no placement rule for condition {0}")]
    InvalidCondition(Condition),

    /// The probed item has no circle to centre the response wheel on.
    #[error("{key}: probe {probe} has no anchor circle for the response wheel")]
    MissingAnchor { key: TrialKey, probe: ProbeIndex },

    /// The grid has fewer cells on one side than the trial places there.
    #[error("{key}: {requested} items requested on the {side:?} side, grid holds {capacity}")]
    GridTooSmall {
        key: TrialKey,
        side: Side,
        requested: usize,
        capacity: usize,
    },
}
