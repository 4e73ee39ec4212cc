use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;
use vwm_experiment::ExperimentConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub experiment: ExperimentConfig,
    pub participant: ParticipantConfig,
}

/// Simulated observer answering the recall probes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantConfig {
    /// Largest recall error, in degrees, for one remembered item
    pub max_error_deg: f64,
    /// Intermediate pointer positions before the final answer
    pub sweep_moves: u32,
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            max_error_deg: 25.0,
            sweep_moves: 8,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or writes a commented default template there when it
    /// does not exist yet. Unreadable files fall back to defaults.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => warn!("Failed to parse config {path}: {err}. Using defaults."),
                },
                Err(err) => warn!("Failed to read config {path}: {err}. Using defaults."),
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
                        commented.push_str(line);
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                    }
                    commented.push('\n');
                }
                if let Err(err) = fs::write(path_obj, commented) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_path(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().to_string()
    }

    #[test]
    fn missing_file_gets_commented_template() {
        let dir = TempDir::new().expect("create temp dir");
        let path = scratch_path(&dir, "defaults.toml");

        let cfg = AppConfig::load_or_default(&path);
        assert_eq!(cfg, AppConfig::default());
        let contents = fs::read_to_string(&path).expect("template written");
        assert!(contents.contains("[experiment]"));
        assert!(contents.contains("# grid_columns = 8"));
        assert!(contents.contains("# max_error_deg = 25.0"));

        // a fully commented template parses back to the defaults
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn existing_file_overrides_some_fields() {
        let dir = TempDir::new().expect("create temp dir");
        let path = scratch_path(&dir, "custom.toml");
        fs::write(
            &path,
            "[experiment]\ngrid_columns = 10\nseed = 99\n\n[participant]\nsweep_moves = 2\n",
        )
        .unwrap();

        let cfg = AppConfig::load_or_default(&path);
        assert_eq!(cfg.experiment.grid_columns, 10);
        assert_eq!(cfg.experiment.seed, Some(99));
        assert_eq!(cfg.experiment.grid_rows, 6);
        assert_eq!(cfg.participant.sweep_moves, 2);
        assert_eq!(cfg.participant.max_error_deg, 25.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("create temp dir");
        let path = scratch_path(&dir, "broken.toml");
        fs::write(&path, "[experiment\ngrid_columns = ").unwrap();
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }
}
