use crate::config::ParticipantConfig;
use rand::Rng;
use vwm_core::Stimulus;
use vwm_core::circular::hue_from_hsl;
use vwm_experiment::LiveStimuli;

/// Stand-in observer: remembers the probed feature up to a bounded error
/// and moves the pointer around the wheel before settling on an answer.
pub struct SimulatedParticipant<R: Rng> {
    rng: R,
    config: ParticipantConfig,
}

impl<R: Rng> SimulatedParticipant<R> {
    pub fn new(config: ParticipantConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Pointer path for one probe, final position last.
    pub fn respond<L: LiveStimuli + ?Sized>(
        &mut self,
        live: &L,
        originals: &[Stimulus],
    ) -> Vec<(f64, f64)> {
        let Some(anchor) = live.circle() else {
            return Vec::new();
        };
        let (cx, cy) = anchor.center();
        let reach = live
            .wheel()
            .map_or(anchor.radius * 2.0, |w| (w.outer_radius + w.inner_radius) / 2.0);

        let remembered = match originals.iter().find_map(Stimulus::as_line) {
            Some(line) => Some(line.angle_deg()),
            None => originals
                .iter()
                .find_map(Stimulus::as_circle)
                .and_then(|c| hue_from_hsl(Some(&c.fill_color)))
                .zip(live.wheel())
                .map(|(hue, wheel)| hue - f64::from(wheel.offset)),
        };

        let mut path: Vec<(f64, f64)> = (0..self.config.sweep_moves)
            .map(|_| point_on(cx, cy, reach, self.rng.random_range(0.0..360.0)))
            .collect();

        let max_error = self.config.max_error_deg.abs();
        let answer = match remembered {
            Some(deg) if max_error > 0.0 => deg + self.rng.random_range(-max_error..=max_error),
            Some(deg) => deg,
            None => self.rng.random_range(0.0..360.0),
        };
        path.push(point_on(cx, cy, reach, answer));
        path
    }
}

fn point_on(cx: f64, cy: f64, reach: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + reach * rad.cos(), cy + reach * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use vwm_core::stimulus::{NEUTRAL_OUTLINE, TRANSPARENT};
    use vwm_core::circular::signed_diff_360;
    use vwm_core::{CircleStimulus, ProbeIndex, ScreenObject, Side, TestStatus, WheelStimulus};
    use vwm_experiment::{ResponseTracker, StimulusArray};

    fn circle(fill: &str) -> CircleStimulus {
        CircleStimulus {
            start_x: 300.0,
            start_y: 300.0,
            radius: 30.0,
            side: Side::Left,
            test_status: TestStatus::TestedFirst,
            line_color: NEUTRAL_OUTLINE.to_string(),
            fill_color: fill.to_string(),
            line_width: 2.0,
        }
    }

    #[test]
    fn colour_answers_stay_within_the_error_bound() {
        let original = [Stimulus::Circle(circle("hsl(200, 80%, 50%)"))];
        let mut who = SimulatedParticipant::new(
            ParticipantConfig {
                max_error_deg: 10.0,
                sweep_moves: 3,
            },
            ChaCha8Rng::seed_from_u64(8),
        );

        for offset in [0u16, 90, 359] {
            let mut live = StimulusArray::new(vec![
                ScreenObject::Circle(circle(TRANSPARENT)),
                ScreenObject::Wheel(WheelStimulus::color(300.0, 300.0, 81.0, 55.08, offset)),
            ]);
            let path = who.respond(&live, &original);
            assert_eq!(path.len(), 4);

            let mut tracker = ResponseTracker::new(ProbeIndex::First);
            for (x, y) in path {
                tracker.on_pointer_move(&mut live, x, y);
            }
            let hue = hue_from_hsl(Some(&live.circle().unwrap().fill_color)).unwrap();
            assert!(signed_diff_360(hue, 200.0).abs() <= 10.0 + 1e-9);
        }
    }

    #[test]
    fn no_anchor_means_no_movement() {
        let mut who =
            SimulatedParticipant::new(ParticipantConfig::default(), ChaCha8Rng::seed_from_u64(1));
        let live = StimulusArray::default();
        assert!(who.respond(&live, &[]).is_empty());
    }
}
