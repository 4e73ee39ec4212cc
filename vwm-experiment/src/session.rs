use super::config::ExperimentConfig;
use super::display::DisplaySequence;
use super::grid::PlacementGenerator;
use super::probe::RecallProbe;
use super::score::score_probe;
use super::store::TrialStore;
use super::tracker::{LiveStimuli, ResponseTracker, TrackedResponse};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};
use vwm_core::{DesignError, ProbeIndex, ProbeResult, ScreenObject, Stimulus, TrialSpec};

/// Lifecycle calls the rendering engine makes, in order, for one logical trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialStage {
    Display { screen: usize },
    Probe { probe: ProbeIndex },
    Complete,
}

struct ActiveTrial {
    display: DisplaySequence,
    probes: [RecallProbe; 2],
    tracker: Option<ResponseTracker>,
    stage: TrialStage,
}

/// Drives logical trials from sample display to scored recall.
///
/// The engine owns frame timing and the live probe objects; the session
/// owns placement, the trial store and the collected results.
pub struct TrialSession<G, R>
where
    G: PlacementGenerator,
    R: Rng,
{
    pub config: ExperimentConfig,
    pub generator: G,
    pub rng: R,
    pub store: TrialStore,
    pub results: Vec<ProbeResult>,
    current: Option<ActiveTrial>,
    trials_started: usize,
}

impl<G, R> TrialSession<G, R>
where
    G: PlacementGenerator,
    R: Rng,
{
    pub fn new(config: ExperimentConfig, generator: G, rng: R) -> Self {
        Self {
            config,
            generator,
            rng,
            store: TrialStore::new(),
            results: Vec::new(),
            current: None,
            trials_started: 0,
        }
    }

    /// Resolves the condition and prepares the sample screens.
    pub fn start_trial(&mut self, spec: TrialSpec) -> Result<&DisplaySequence, DesignError> {
        if let Some(previous) = self.current.take() {
            if previous.stage != TrialStage::Complete {
                warn!(key = %previous.display.spec().key, "starting a new trial before the last one completed");
            }
        }

        let display = DisplaySequence::new(spec, &self.config, &mut self.rng)?;
        let probes = RecallProbe::pair(spec, &self.config);
        self.trials_started += 1;
        info!(key = %spec.key, n = self.trials_started, "trial started");

        let active = self.current.insert(ActiveTrial {
            display,
            probes,
            tracker: None,
            stage: TrialStage::Display { screen: 0 },
        });
        Ok(&active.display)
    }

    pub fn display_screen_count(&self) -> usize {
        self.current
            .as_ref()
            .map_or(0, |t| t.display.screens().len())
    }

    /// Stimuli for sample screen `screen`; the first call places the whole trial.
    pub fn display_stimuli(&mut self, screen: usize) -> &[Stimulus] {
        let Self {
            current, generator, ..
        } = self;
        match current {
            Some(active) => {
                active.stage = TrialStage::Display { screen };
                active.display.stimuli(screen, generator)
            }
            None => &[],
        }
    }

    pub fn display_duration(&self, screen: usize) -> Duration {
        self.current
            .as_ref()
            .and_then(|t| t.display.screens().get(screen))
            .map_or(Duration::ZERO, |s| s.duration)
    }

    /// Persists sample screen `screen` and returns the gap before the next screen.
    pub fn finish_display_screen(&mut self, screen: usize) -> Duration {
        let Some(active) = self.current.as_ref() else {
            return Duration::ZERO;
        };
        active.display.record(screen, &mut self.store);
        active.display.post_screen_gap(screen)
    }

    /// Builds probe `probe` and returns the objects the engine should draw.
    pub fn start_probe(&mut self, probe: ProbeIndex) -> Result<Vec<ScreenObject>, DesignError> {
        let Some(active) = self.current.as_mut() else {
            return Ok(Vec::new());
        };
        let recall = &active.probes[usize::from(probe.number() - 1)];
        let screen = recall.build(&self.store, &mut self.rng)?;
        active.tracker = Some(ResponseTracker::new(probe));
        active.stage = TrialStage::Probe { probe };
        Ok(screen.objects)
    }

    /// Forwards a pointer move to the active probe's tracker.
    pub fn pointer_moved<L: LiveStimuli + ?Sized>(
        &mut self,
        live: &mut L,
        x: f64,
        y: f64,
    ) -> Option<TrackedResponse> {
        self.current
            .as_mut()
            .and_then(|t| t.tracker.as_mut())
            .and_then(|tracker| tracker.on_pointer_move(live, x, y))
    }

    /// Scores the active probe and returns the gap after it.
    pub fn finish_probe<L: LiveStimuli + ?Sized>(&mut self, live: &L) -> Duration {
        let Some(active) = self.current.as_mut() else {
            return Duration::ZERO;
        };
        let Some(tracker) = active.tracker.take() else {
            warn!("probe finished without being started");
            return Duration::ZERO;
        };
        let probe = tracker.probe();
        let spec = *active.display.spec();

        match score_probe(&spec, probe, live, &self.store, self.config.screen_width) {
            Some(result) => {
                info!(
                    key = %spec.key,
                    %probe,
                    moves = tracker.moves(),
                    error = ?result.signed_error_deg,
                    "probe complete"
                );
                self.results.push(result);
            }
            None => warn!(key = %spec.key, %probe, "probe produced no score"),
        }

        active.stage = match probe {
            ProbeIndex::First => TrialStage::Probe {
                probe: ProbeIndex::Second,
            },
            ProbeIndex::Second => TrialStage::Complete,
        };
        active.probes[usize::from(probe.number() - 1)].post_trial_gap()
    }

    pub fn current_spec(&self) -> Option<&TrialSpec> {
        self.current.as_ref().map(|t| t.display.spec())
    }

    pub fn current_stage(&self) -> Option<TrialStage> {
        self.current.as_ref().map(|t| t.stage)
    }

    pub fn trials_started(&self) -> usize {
        self.trials_started
    }

    /// Experiment results
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn results_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.results)
    }
}
