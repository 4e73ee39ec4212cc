//! Grid placement of sample items.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};
use vwm_core::circular::hsl_response_color;
use vwm_core::stimulus::{NEUTRAL_OUTLINE, TRANSPARENT};
use vwm_core::{
    CircleStimulus, LineStimulus, PlacementSpec, Side, Stimulus, StimulusKind, TestStatus,
};

/// Item radius as a fraction of the shorter cell edge
const RADIUS_FRACTION: f64 = 0.3;
const CIRCLE_LINE_WIDTH: f64 = 2.0;
const BAR_LINE_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

/// Screen partitioned into equal cells; the left half of the columns is the left side.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u16,
    rows: u16,
    cell: CellSize,
    occupied: Vec<bool>,
}

impl Grid {
    pub fn new(columns: u16, rows: u16, screen_width: f64, screen_height: f64) -> Self {
        let columns = columns.max(2);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            cell: CellSize {
                width: screen_width / f64::from(columns),
                height: screen_height / f64::from(rows),
            },
            occupied: vec![false; usize::from(columns) * usize::from(rows)],
        }
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell
    }

    pub fn side_of(&self, cell: usize) -> Side {
        let column = cell % usize::from(self.columns);
        if column < usize::from(self.columns / 2) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn free_cells(&self, side: Side) -> Vec<usize> {
        (0..self.occupied.len())
            .filter(|&i| !self.occupied[i] && self.side_of(i) == side)
            .collect()
    }

    /// Total cells on `side`, occupied or not.
    pub fn capacity(&self, side: Side) -> usize {
        let left = usize::from(self.columns / 2);
        let columns = match side {
            Side::Left => left,
            Side::Right => usize::from(self.columns) - left,
        };
        columns * usize::from(self.rows)
    }

    pub fn occupy(&mut self, cell: usize) {
        if let Some(slot) = self.occupied.get_mut(cell) {
            *slot = true;
        }
    }

    pub fn cell_center(&self, cell: usize) -> (f64, f64) {
        let column = (cell % usize::from(self.columns)) as f64;
        let row = (cell / usize::from(self.columns)) as f64;
        (
            (column + 0.5) * self.cell.width,
            (row + 0.5) * self.cell.height,
        )
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }
}

/// Places sample items and marks which of them the recall probes target.
pub trait PlacementGenerator {
    /// Places one screen's items on free cells of `grid`.
    fn generate(&mut self, grid: &mut Grid, specs: &[PlacementSpec], cell: CellSize)
    -> Vec<Stimulus>;

    /// Tags one logical item `tested_first` and another `tested_second`
    /// across all screens of a trial.
    fn tag_probes(&mut self, screens: &mut [Vec<Stimulus>], forced_first: Option<StimulusKind>);
}

/// Random free-cell placement: colored items get a random hue, oriented
/// items a hollow circle plus a radius bar at a random angle.
#[derive(Debug, Clone)]
pub struct GridPlacer<R: Rng> {
    rng: R,
}

impl<R: Rng> GridPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn place_item(
        &mut self,
        kind: StimulusKind,
        side: Side,
        center: (f64, f64),
        radius: f64,
        out: &mut Vec<Stimulus>,
    ) {
        let (cx, cy) = center;
        match kind {
            StimulusKind::ColoredCircle => {
                let hue = f64::from(self.rng.random_range(0..360u16));
                let color = hsl_response_color(hue);
                out.push(Stimulus::Circle(CircleStimulus {
                    start_x: cx,
                    start_y: cy,
                    radius,
                    side,
                    test_status: TestStatus::Untested,
                    line_color: color.clone(),
                    fill_color: color,
                    line_width: CIRCLE_LINE_WIDTH,
                }));
            }
            StimulusKind::OrientedCircle => {
                let angle = f64::from(self.rng.random_range(0..360u16)).to_radians();
                out.push(Stimulus::Circle(CircleStimulus {
                    start_x: cx,
                    start_y: cy,
                    radius,
                    side,
                    test_status: TestStatus::Untested,
                    line_color: NEUTRAL_OUTLINE.to_string(),
                    fill_color: TRANSPARENT.to_string(),
                    line_width: CIRCLE_LINE_WIDTH,
                }));
                out.push(Stimulus::Line(LineStimulus {
                    x1: cx,
                    y1: cy,
                    x2: cx + radius * angle.cos(),
                    y2: cy + radius * angle.sin(),
                    side,
                    test_status: TestStatus::Untested,
                    line_color: NEUTRAL_OUTLINE.to_string(),
                    line_width: BAR_LINE_WIDTH,
                }));
            }
        }
    }
}

impl<R: Rng> PlacementGenerator for GridPlacer<R> {
    fn generate(
        &mut self,
        grid: &mut Grid,
        specs: &[PlacementSpec],
        cell: CellSize,
    ) -> Vec<Stimulus> {
        let radius = cell.width.min(cell.height) * RADIUS_FRACTION;
        let mut out = Vec::new();

        for spec in specs {
            let mut free = grid.free_cells(spec.side);
            free.shuffle(&mut self.rng);
            if free.len() < usize::from(spec.count) {
                warn!(
                    ?spec,
                    free = free.len(),
                    "grid side too small, placing fewer items than requested"
                );
            }
            for &idx in free.iter().take(usize::from(spec.count)) {
                grid.occupy(idx);
                self.place_item(spec.stimulus_type, spec.side, grid.cell_center(idx), radius, &mut out);
            }
        }

        out
    }

    fn tag_probes(&mut self, screens: &mut [Vec<Stimulus>], forced_first: Option<StimulusKind>) {
        tag_probe_items(screens, forced_first, &mut self.rng);
    }
}

/// Groups stimuli into logical items: each circle opens an item and a
/// following bar belongs to it. Returns `(screen, index)` members per item.
pub fn logical_items(screens: &[Vec<Stimulus>]) -> Vec<Vec<(usize, usize)>> {
    let mut items: Vec<Vec<(usize, usize)>> = Vec::new();
    for (s, screen) in screens.iter().enumerate() {
        let mut open = false;
        for (i, stim) in screen.iter().enumerate() {
            match stim {
                Stimulus::Line(_) if open => {
                    if let Some(last) = items.last_mut() {
                        last.push((s, i));
                    }
                }
                _ => {
                    items.push(vec![(s, i)]);
                    open = matches!(stim, Stimulus::Circle(_));
                }
            }
        }
    }
    items
}

/// Picks two distinct logical items and tags them for the two probes.
///
/// With `forced_first`, the first probe is drawn from items of that kind
/// whenever the trial has one.
pub fn tag_probe_items<R: Rng>(
    screens: &mut [Vec<Stimulus>],
    forced_first: Option<StimulusKind>,
    rng: &mut R,
) {
    let mut items = logical_items(screens);
    if items.len() < 2 {
        warn!(items = items.len(), "not enough items to tag both probes");
    }
    items.shuffle(rng);

    let kind_of = |item: &Vec<(usize, usize)>| {
        item.first().map(|&(s, i)| screens[s][i].kind())
    };
    let first_pos = forced_first
        .and_then(|kind| items.iter().position(|item| kind_of(item) == Some(kind)))
        .unwrap_or(0);
    if first_pos < items.len() {
        let first = items.remove(first_pos);
        items.insert(0, first);
    }

    for (item, status) in items
        .iter()
        .zip([TestStatus::TestedFirst, TestStatus::TestedSecond])
    {
        for &(s, i) in item {
            screens[s][i].set_test_status(status);
        }
        debug!(?status, screen = item[0].0 + 1, "tagged probe item");
    }
}
