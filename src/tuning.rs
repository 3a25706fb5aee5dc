//! Movement tuning with on-disk overrides
//!
//! Tuning is read from `tuning.toml` in the working directory when present;
//! anything missing or malformed falls back to the built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vaulter_game::MovementConfig;

/// On-disk tuning file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub movement: MovementConfig,
}

/// Load movement tuning from `path`, or return defaults if not found
pub fn load(path: &Path) -> MovementConfig {
    if !path.exists() {
        info!("No tuning file at {:?}, using defaults", path);
        return MovementConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<TuningFile>(&content) {
            Ok(file) => {
                info!("Loaded tuning from {:?}", path);
                file.movement
            }
            Err(e) => {
                warn!("Failed to parse tuning: {}, using defaults", e);
                MovementConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read tuning file: {}, using defaults", e);
            MovementConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_tuning_overrides_defaults() {
        let file: TuningFile = toml::from_str(
            r#"
            [movement]
            run_max_speed = 12.5
            wall_jump_power = [6.0, 18.0]
            "#,
        )
        .expect("parse");

        assert_eq!(file.movement.run_max_speed, 12.5);
        assert_eq!(file.movement.wall_jump_power.x, 6.0);
        // Untouched fields keep their defaults
        assert_eq!(file.movement.coyote_time, MovementConfig::default().coyote_time);
    }
}
