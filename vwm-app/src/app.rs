use crate::config::AppConfig;
use crate::participant::SimulatedParticipant;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use vwm_core::{ProbeIndex, Stimulus, TrialSpec};
use vwm_experiment::{GridPlacer, StimulusArray, TrialSession, build_timeline};

/// Headless run of a full session: the app plays the rendering engine,
/// walking each trial's lifecycle on a simulated clock.
pub struct App {
    session: TrialSession<GridPlacer<ChaCha8Rng>, ChaCha8Rng>,
    participant: SimulatedParticipant<ChaCha8Rng>,
    timeline: Vec<TrialSpec>,
    results_path: Option<PathBuf>,
    display_path: Option<PathBuf>,
    elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub trials: usize,
    pub failed_trials: usize,
    pub results: usize,
    pub mean_abs_error_deg: Option<f64>,
    pub simulated_time: Duration,
}

impl App {
    pub fn new(
        config: AppConfig,
        seed: u64,
        results_path: Option<PathBuf>,
        display_path: Option<PathBuf>,
    ) -> Self {
        // independent streams so that changing one component does not
        // reshuffle the others
        let mut design_rng = ChaCha8Rng::seed_from_u64(seed);
        let timeline = build_timeline(&config.experiment, &mut design_rng);
        let session = TrialSession::new(
            config.experiment,
            GridPlacer::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1))),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(2)),
        );
        let participant = SimulatedParticipant::new(
            config.participant,
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(3)),
        );

        Self {
            session,
            participant,
            timeline,
            results_path,
            display_path,
            elapsed: Duration::ZERO,
        }
    }

    pub fn run(mut self) -> Result<RunSummary> {
        info!(trials = self.timeline.len(), "running session");

        let timeline = std::mem::take(&mut self.timeline);
        let mut failed = 0;
        for spec in &timeline {
            if let Err(e) = self.run_trial(*spec) {
                error!(key = %spec.key, "trial aborted: {e}");
                failed += 1;
            }
        }

        self.write_outputs()?;

        let errors: Vec<f64> = self
            .session
            .results()
            .iter()
            .filter_map(|r| r.signed_error_deg)
            .map(f64::abs)
            .collect();
        let summary = RunSummary {
            trials: timeline.len(),
            failed_trials: failed,
            results: self.session.results().len(),
            mean_abs_error_deg: (!errors.is_empty())
                .then(|| errors.iter().sum::<f64>() / errors.len() as f64),
            simulated_time: self.elapsed,
        };
        info!(?summary, "session complete");
        Ok(summary)
    }

    fn run_trial(&mut self, spec: TrialSpec) -> Result<()> {
        self.session.start_trial(spec)?;

        for screen in 0..self.session.display_screen_count() {
            self.session.display_stimuli(screen);
            self.elapsed += self.session.display_duration(screen);
            self.elapsed += self.session.finish_display_screen(screen);
        }

        let response_window = self.session.config.probe_response_window();
        for probe in ProbeIndex::BOTH {
            let mut live = StimulusArray::from(self.session.start_probe(probe)?);
            let originals: Vec<Stimulus> = self
                .session
                .store
                .display_stimuli(&spec.key)
                .into_iter()
                .filter(|s| s.test_status() == probe.target())
                .collect();

            for (x, y) in self.participant.respond(&live, &originals) {
                self.session.pointer_moved(&mut live, x, y);
            }
            self.elapsed += response_window;
            self.elapsed += self.session.finish_probe(&live);
        }
        Ok(())
    }

    fn write_outputs(&self) -> Result<()> {
        let results = self.session.results_json()?;
        match &self.results_path {
            Some(path) => {
                fs::write(path, results)
                    .with_context(|| format!("writing results to {}", path.display()))?;
                info!(path = %path.display(), "results written");
            }
            None => println!("{results}"),
        }

        if let Some(path) = &self.display_path {
            fs::write(path, self.session.store.to_json()?)
                .with_context(|| format!("writing display data to {}", path.display()))?;
            info!(path = %path.display(), "display data written");
        }
        Ok(())
    }
}
