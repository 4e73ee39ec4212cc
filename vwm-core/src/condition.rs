use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of item placed on the display grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    ColoredCircle,
    OrientedCircle,
}

impl StimulusKind {
    pub const ALL: [StimulusKind; 2] = [StimulusKind::ColoredCircle, StimulusKind::OrientedCircle];

    pub fn opposite(self) -> Self {
        match self {
            StimulusKind::ColoredCircle => StimulusKind::OrientedCircle,
            StimulusKind::OrientedCircle => StimulusKind::ColoredCircle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StimulusKind::ColoredCircle => "colored_circle",
            StimulusKind::OrientedCircle => "oriented_circle",
        }
    }
}

impl fmt::Display for StimulusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    Combined,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    HomogeneousColor,
    HomogeneousOrientation,
    Mixed,
}

impl Composition {
    /// Item kind used when every item on the display shares one kind
    pub fn uniform_kind(self) -> StimulusKind {
        match self {
            Composition::HomogeneousOrientation => StimulusKind::OrientedCircle,
            _ => StimulusKind::ColoredCircle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Clustered,
    Interleaved,
}

/// Experimental condition of one logical trial.
///
/// `num_circles` stays a raw count so that malformed designs can be
/// represented and rejected when the placement plan is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub num_circles: u8,
    pub grouping: Grouping,
    pub composition: Composition,
    pub layout: Layout,
    pub stimulus_type_shown_first: StimulusKind,
}

impl Condition {
    pub const SET_SIZES: [u8; 2] = [3, 6];

    /// Every legal condition tuple, in a stable order.
    pub fn enumerate() -> Vec<Condition> {
        let mut out = Vec::with_capacity(48);
        for num_circles in Self::SET_SIZES {
            for grouping in [Grouping::Combined, Grouping::Split] {
                for composition in [
                    Composition::HomogeneousColor,
                    Composition::HomogeneousOrientation,
                    Composition::Mixed,
                ] {
                    for layout in [Layout::Clustered, Layout::Interleaved] {
                        for stimulus_type_shown_first in StimulusKind::ALL {
                            out.push(Condition {
                                num_circles,
                                grouping,
                                composition,
                                layout,
                                stimulus_type_shown_first,
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} {:?}/{:?}/{:?} first={}",
            self.num_circles,
            self.grouping,
            self.composition,
            self.layout,
            self.stimulus_type_shown_first
        )
    }
}
