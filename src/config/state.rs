//! Runtime state kept across power cycles

use super::schema::{ControllerConfig, INPUT_COUNT};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Schema version written with the runtime state
pub const STATE_VERSION: u32 = 1;

/// Volatile controller state that is still worth remembering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Selected input (0-based)
    #[serde(default)]
    pub input: u8,

    /// Selected volume step
    #[serde(default)]
    pub volume: u8,

    /// Attenuator code last written, in half-dB units
    #[serde(default)]
    pub attenuation: u8,

    /// Whether the output is muted
    #[serde(default)]
    pub muted: bool,

    /// Last volume step used on each input
    #[serde(default = "default_last_volume")]
    pub input_last_volume: Vec<u8>,

    /// Input selected before the current one
    #[serde(default)]
    pub previous_input: u8,
}

impl RuntimeState {
    /// Validate the stored state
    pub fn validate(&self) -> Result<()> {
        if self.version != STATE_VERSION {
            bail!("State version {} does not match {}", self.version, STATE_VERSION);
        }
        if self.input_last_volume.len() != INPUT_COUNT {
            bail!("Exactly {} stored input volumes expected", INPUT_COUNT);
        }
        Ok(())
    }

    /// Pull the state into the ranges allowed by `config`
    ///
    /// Needed after the configuration changed underneath a stored state.
    pub fn reconcile(&mut self, config: &ControllerConfig) {
        let steps = config.volume.steps;

        self.input_last_volume.resize(INPUT_COUNT, 0);
        for last in &mut self.input_last_volume {
            *last = (*last).min(steps);
        }
        self.volume = self.volume.min(steps);

        if !is_selectable(config, self.input) {
            self.input = first_active_input(config).unwrap_or(0);
        }
        if usize::from(self.previous_input) >= INPUT_COUNT {
            self.previous_input = self.input;
        }
    }
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            input: 0,
            volume: 0,
            attenuation: 0,
            muted: false,
            input_last_volume: default_last_volume(),
            previous_input: 0,
        }
    }
}

fn default_version() -> u32 { STATE_VERSION }
fn default_last_volume() -> Vec<u8> { vec![0; INPUT_COUNT] }

/// Whether `input` exists and is active
pub fn is_selectable(config: &ControllerConfig, input: u8) -> bool {
    config
        .inputs
        .get(usize::from(input))
        .is_some_and(|cfg| cfg.active)
}

/// Lowest numbered active input
pub fn first_active_input(config: &ControllerConfig) -> Option<u8> {
    (0..INPUT_COUNT as u8).find(|&input| is_selectable(config, input))
}
