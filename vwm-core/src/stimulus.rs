use crate::circular::direction_deg;
use crate::condition::{Side, StimulusKind};
use serde::{Deserialize, Serialize};

/// Fill of an oriented item's carrier circle, and of masked probe circles
pub const TRANSPARENT: &str = "transparent";
/// Outline of masked probe circles and of orientation bars
pub const NEUTRAL_OUTLINE: &str = "#000000";

/// Which recall probe, if any, targets an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    #[default]
    Untested,
    TestedFirst,
    TestedSecond,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStimulus {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub side: Side,
    pub test_status: TestStatus,
    pub line_color: String,
    pub line_width: f64,
}

impl LineStimulus {
    /// Orientation of the bar from its first to its second endpoint, `[0, 360)`.
    pub fn angle_deg(&self) -> f64 {
        direction_deg(self.x2 - self.x1, self.y2 - self.y1)
    }

    /// Copy with the second endpoint folded onto the first, hiding the orientation.
    pub fn collapsed(&self) -> Self {
        Self {
            x2: self.x1,
            y2: self.y1,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStimulus {
    #[serde(rename = "startX")]
    pub start_x: f64,
    #[serde(rename = "startY")]
    pub start_y: f64,
    pub radius: f64,
    pub side: Side,
    pub test_status: TestStatus,
    pub line_color: String,
    pub fill_color: String,
    pub line_width: f64,
}

impl CircleStimulus {
    pub fn is_transparent(&self) -> bool {
        self.fill_color == TRANSPARENT
    }

    pub fn center(&self) -> (f64, f64) {
        (self.start_x, self.start_y)
    }

    /// Copy with colour information removed.
    pub fn masked(&self) -> Self {
        Self {
            fill_color: TRANSPARENT.to_string(),
            line_color: NEUTRAL_OUTLINE.to_string(),
            ..self.clone()
        }
    }
}

/// A placed memory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "obj_type", rename_all = "lowercase")]
pub enum Stimulus {
    Line(LineStimulus),
    Circle(CircleStimulus),
}

impl Stimulus {
    pub fn test_status(&self) -> TestStatus {
        match self {
            Stimulus::Line(l) => l.test_status,
            Stimulus::Circle(c) => c.test_status,
        }
    }

    pub fn set_test_status(&mut self, status: TestStatus) {
        match self {
            Stimulus::Line(l) => l.test_status = status,
            Stimulus::Circle(c) => c.test_status = status,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Stimulus::Line(l) => l.side,
            Stimulus::Circle(c) => c.side,
        }
    }

    /// Item kind as seen on screen: bars and hollow circles carry orientation.
    pub fn kind(&self) -> StimulusKind {
        match self {
            Stimulus::Line(_) => StimulusKind::OrientedCircle,
            Stimulus::Circle(c) if c.is_transparent() => StimulusKind::OrientedCircle,
            Stimulus::Circle(_) => StimulusKind::ColoredCircle,
        }
    }

    pub fn as_line(&self) -> Option<&LineStimulus> {
        match self {
            Stimulus::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleStimulus> {
        match self {
            Stimulus::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Display copy that hides the remembered feature.
    pub fn masked(&self) -> Self {
        match self {
            Stimulus::Line(l) => Stimulus::Line(l.collapsed()),
            Stimulus::Circle(c) => Stimulus::Circle(c.masked()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelKind {
    Color,
    Orientation,
}

/// Response wheel drawn around the anchor circle during recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelStimulus {
    pub kind: WheelKind,
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Rotation of the hue ring; always 0 for orientation wheels
    pub offset: u16,
}

impl WheelStimulus {
    pub fn color(cx: f64, cy: f64, outer_radius: f64, inner_radius: f64, offset: u16) -> Self {
        Self {
            kind: WheelKind::Color,
            center_x: cx,
            center_y: cy,
            outer_radius,
            inner_radius,
            offset: offset % 360,
        }
    }

    pub fn orientation(cx: f64, cy: f64, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            kind: WheelKind::Orientation,
            center_x: cx,
            center_y: cy,
            outer_radius,
            inner_radius,
            offset: 0,
        }
    }
}

/// Anything the rendering engine can hold on a probe screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "obj_type", rename_all = "lowercase")]
pub enum ScreenObject {
    Line(LineStimulus),
    Circle(CircleStimulus),
    #[serde(rename = "manual")]
    Wheel(WheelStimulus),
}

impl ScreenObject {
    /// The memory item behind this object, `None` for wheels.
    pub fn to_stimulus(&self) -> Option<Stimulus> {
        match self {
            ScreenObject::Line(l) => Some(Stimulus::Line(l.clone())),
            ScreenObject::Circle(c) => Some(Stimulus::Circle(c.clone())),
            ScreenObject::Wheel(_) => None,
        }
    }
}

impl From<Stimulus> for ScreenObject {
    fn from(s: Stimulus) -> Self {
        match s {
            Stimulus::Line(l) => ScreenObject::Line(l),
            Stimulus::Circle(c) => ScreenObject::Circle(c),
        }
    }
}

impl From<WheelStimulus> for ScreenObject {
    fn from(w: WheelStimulus) -> Self {
        ScreenObject::Wheel(w)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Predefined,
}

/// Storage shape of a stimulus in exported response snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedStimulus {
    pub category: Category,
    #[serde(flatten)]
    pub stimulus: Stimulus,
}

impl From<Stimulus> for ExportedStimulus {
    fn from(stimulus: Stimulus) -> Self {
        Self {
            category: Category::Predefined,
            stimulus,
        }
    }
}
