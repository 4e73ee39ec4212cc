pub mod config;
pub mod design;
pub mod display;
pub mod grid;
pub mod isi;
pub mod probe;
pub mod resolver;
pub mod score;
pub mod session;
pub mod store;
pub mod tracker;

pub use config::ExperimentConfig;
pub use design::{build_block, build_timeline};
pub use display::{DisplayScreen, DisplaySequence};
pub use grid::{CellSize, Grid, GridPlacer, PlacementGenerator};
pub use isi::{inter_stimulus_interval, screen_isi};
pub use probe::{ProbeScreen, RecallProbe};
pub use resolver::{ScreenPlan, resolve};
pub use score::score_probe;
pub use session::{TrialSession, TrialStage};
pub use store::{StoredScreen, TrialStore};
pub use tracker::{LiveStimuli, ResponseTracker, StimulusArray, TrackedResponse};
