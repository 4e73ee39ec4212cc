use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub grid_columns: u16,
    pub grid_rows: u16,
    /// Display time per item on a sample screen
    pub item_duration_ms: u64,
    /// Response window the engine grants each recall probe
    pub probe_response_ms: u64,
    pub first_probe_gap_ms: u64,
    pub second_probe_gap_ms: u64,
    pub practice_trials: usize,
    pub experiment_blocks: u32,
    /// Repetitions of every condition within one experimental block
    pub repetitions: usize,
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            grid_columns: 8,
            grid_rows: 6,
            item_duration_ms: 100,
            probe_response_ms: 4000,
            first_probe_gap_ms: 100,
            second_probe_gap_ms: 1000,
            practice_trials: 6,
            experiment_blocks: 2,
            repetitions: 1,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Sample display duration: a fixed slice of time per item.
    pub fn display_duration(&self, num_circles: u8) -> Duration {
        Duration::from_millis(self.item_duration_ms.saturating_mul(u64::from(num_circles)))
    }

    pub fn probe_response_window(&self) -> Duration {
        Duration::from_millis(self.probe_response_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_duration_scales_with_set_size() {
        let cfg = ExperimentConfig::default();
        assert_eq!(cfg.display_duration(3), Duration::from_millis(300));
        assert_eq!(cfg.display_duration(6), Duration::from_millis(600));
    }

    #[test]
    fn display_duration_saturates_on_huge_item_time() {
        let cfg = ExperimentConfig {
            item_duration_ms: u64::MAX / 2,
            ..ExperimentConfig::default()
        };
        assert_eq!(cfg.display_duration(6), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: ExperimentConfig = serde_json::from_str(r#"{"grid_columns": 10}"#).unwrap();
        assert_eq!(cfg.grid_columns, 10);
        assert_eq!(cfg.grid_rows, 6);
        assert_eq!(cfg.item_duration_ms, 100);
        assert_eq!(cfg.seed, None);
    }
}
