//! Pointer-driven response tracking on a live probe screen.

use tracing::trace;
use vwm_core::circular::{direction_deg, hsl_response_color, normalize_deg};
use vwm_core::{CircleStimulus, LineStimulus, ProbeIndex, ScreenObject, Stimulus, WheelStimulus};

/// Read/update access to the objects the rendering engine is drawing.
pub trait LiveStimuli {
    fn circle(&self) -> Option<&CircleStimulus>;
    fn line(&self) -> Option<&LineStimulus>;
    fn wheel(&self) -> Option<&WheelStimulus>;

    /// Moves the live bar's second endpoint. Returns false without a bar.
    fn set_line_end(&mut self, x2: f64, y2: f64) -> bool;

    /// Sets fill and outline of the live circle. Returns false without a circle.
    fn set_circle_color(&mut self, css: &str) -> bool;

    /// Current memory items on screen, wheels excluded.
    fn snapshot(&self) -> Vec<Stimulus>;
}

/// Plain object list, the shape an engine keeps for one probe screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StimulusArray(Vec<ScreenObject>);

impl StimulusArray {
    pub fn new(objects: Vec<ScreenObject>) -> Self {
        Self(objects)
    }

    pub fn objects(&self) -> &[ScreenObject] {
        &self.0
    }
}

impl From<Vec<ScreenObject>> for StimulusArray {
    fn from(objects: Vec<ScreenObject>) -> Self {
        Self(objects)
    }
}

impl LiveStimuli for StimulusArray {
    fn circle(&self) -> Option<&CircleStimulus> {
        self.0.iter().find_map(|o| match o {
            ScreenObject::Circle(c) => Some(c),
            _ => None,
        })
    }

    fn line(&self) -> Option<&LineStimulus> {
        self.0.iter().find_map(|o| match o {
            ScreenObject::Line(l) => Some(l),
            _ => None,
        })
    }

    fn wheel(&self) -> Option<&WheelStimulus> {
        self.0.iter().find_map(|o| match o {
            ScreenObject::Wheel(w) => Some(w),
            _ => None,
        })
    }

    fn set_line_end(&mut self, x2: f64, y2: f64) -> bool {
        let line = self.0.iter_mut().find_map(|o| match o {
            ScreenObject::Line(l) => Some(l),
            _ => None,
        });
        match line {
            Some(l) => {
                l.x2 = x2;
                l.y2 = y2;
                true
            }
            None => false,
        }
    }

    fn set_circle_color(&mut self, css: &str) -> bool {
        let circle = self.0.iter_mut().find_map(|o| match o {
            ScreenObject::Circle(c) => Some(c),
            _ => None,
        });
        match circle {
            Some(c) => {
                c.fill_color = css.to_string();
                c.line_color = css.to_string();
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<Stimulus> {
        self.0.iter().filter_map(ScreenObject::to_stimulus).collect()
    }
}

/// Value shown after a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedResponse {
    Orientation { angle_deg: f64 },
    Color { hue_deg: f64 },
}

/// Per-probe pointer handler. Every move recomputes the response from the
/// pointer position alone, so the last move wins.
#[derive(Debug, Clone)]
pub struct ResponseTracker {
    probe: ProbeIndex,
    moves: u32,
    last: Option<TrackedResponse>,
}

impl ResponseTracker {
    pub fn new(probe: ProbeIndex) -> Self {
        Self {
            probe,
            moves: 0,
            last: None,
        }
    }

    pub fn probe(&self) -> ProbeIndex {
        self.probe
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn last_response(&self) -> Option<TrackedResponse> {
        self.last
    }

    /// Updates the live bar or circle for a pointer at `(x, y)`.
    ///
    /// The anchor circle supplies centre and radius. With a bar on screen the
    /// bar is swung to point at the pointer at fixed length; otherwise the
    /// circle takes the wheel hue under the pointer. Missing handles make
    /// this a no-op.
    pub fn on_pointer_move<L: LiveStimuli + ?Sized>(
        &mut self,
        live: &mut L,
        x: f64,
        y: f64,
    ) -> Option<TrackedResponse> {
        let (cx, cy, radius) = {
            let c = live.circle()?;
            (c.start_x, c.start_y, c.radius)
        };
        let pointer = direction_deg(x - cx, y - cy);

        let response = if let Some((x1, y1)) = live.line().map(|l| (l.x1, l.y1)) {
            let rad = (y - cy).atan2(x - cx);
            live.set_line_end(x1 + radius * rad.cos(), y1 + radius * rad.sin());
            TrackedResponse::Orientation { angle_deg: pointer }
        } else {
            let offset = f64::from(live.wheel()?.offset);
            let hue = normalize_deg(pointer + offset);
            live.set_circle_color(&hsl_response_color(hue));
            TrackedResponse::Color { hue_deg: hue }
        };

        self.moves += 1;
        self.last = Some(response);
        trace!(probe = %self.probe, x, y, ?response, "pointer move");
        Some(response)
    }
}
