//! Configuration and runtime state persistence
//!
//! Both files carry a schema version. A file that is missing, unreadable or
//! written by another version is replaced with defaults, the same way the
//! controller resets its non-volatile memory after a firmware change.

mod schema;
mod state;

pub use schema::*;
pub use state::*;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<ControllerConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration: {:?}", path))?;
    let config: ControllerConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// Write configuration to a YAML file
pub fn save_config(path: &Path, config: &ControllerConfig) -> Result<()> {
    write_yaml(path, config)
}

/// Load configuration, falling back to (and storing) defaults
pub fn load_config_or_default(path: &Path) -> Result<ControllerConfig> {
    load_or_reset(path, "configuration", load_config, save_config)
}

/// Load runtime state from a YAML file
pub fn load_state(path: &Path) -> Result<RuntimeState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state: {:?}", path))?;
    let state: RuntimeState = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse state: {:?}", path))?;
    state.validate()?;
    Ok(state)
}

/// Write runtime state to a YAML file
pub fn save_state(path: &Path, state: &RuntimeState) -> Result<()> {
    write_yaml(path, state)
}

/// Load runtime state, falling back to (and storing) defaults
pub fn load_state_or_default(path: &Path) -> Result<RuntimeState> {
    load_or_reset(path, "state", load_state, save_state)
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

fn load_or_reset<T, L, S>(path: &Path, what: &str, load: L, save: S) -> Result<T>
where
    T: Default,
    L: Fn(&Path) -> Result<T>,
    S: Fn(&Path, &T) -> Result<()>,
{
    if path.exists() {
        match load(path) {
            Ok(value) => return Ok(value),
            Err(e) => warn!("Stored {} is not usable ({:#}), restoring defaults", what, e),
        }
    } else {
        info!("No stored {} at {:?}, writing defaults", what, path);
    }

    let defaults = T::default();
    save(path, &defaults)?;
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
version: 1

volume:
  steps: 90
  max_attenuation: 90
  max_start_volume: 45
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.volume.steps, 90);
        assert_eq!(config.volume.max_attenuation, 90);
        assert_eq!(config.volume.max_start_volume, 45);
        assert_eq!(config.inputs.len(), INPUT_COUNT);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let yaml = r#"
volume:
  min_attenuation: 40
  max_attenuation: 20
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preamp.yaml");

        let mut config = ControllerConfig::default();
        config.inputs[3].name = "Tuner".to_string();
        config.triggers[0].active = true;
        config.triggers[0].kind = TriggerKind::Latching;
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preamp.yaml");

        let config = load_config_or_default(&path).unwrap();
        assert_eq!(config, ControllerConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_version_mismatch_resets_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preamp.yaml");
        std::fs::write(&path, "version: 0\nvolume:\n  steps: 30\n").unwrap();

        let config = load_config_or_default(&path).unwrap();
        assert_eq!(config.volume.steps, 60);
        assert_eq!(load_config(&path).unwrap(), ControllerConfig::default());
    }

    #[test]
    fn test_state_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.yaml");

        let mut state = load_state_or_default(&path).unwrap();
        assert_eq!(state, RuntimeState::default());

        state.input = 2;
        state.volume = 35;
        state.input_last_volume[2] = 35;
        save_state(&path, &state).unwrap();

        assert_eq!(load_state(&path).unwrap(), state);
    }
}
