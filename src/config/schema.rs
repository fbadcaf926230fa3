//! Configuration schema definitions

use crate::mapping::AttenuationProfile;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Schema version written with every configuration
///
/// A stored configuration with any other version is replaced by defaults.
pub const CONFIG_VERSION: u32 = 1;

/// Number of selectable inputs (input relays 0-5)
pub const INPUT_COUNT: usize = 6;

/// Number of amplifier triggers (trigger relays 6-7)
pub const TRIGGER_COUNT: usize = 2;

/// Largest selectable number of volume steps
pub const MAX_VOLUME_STEPS: u8 = 179;

/// Largest configurable attenuation in dB
pub const MAX_ATTENUATION_DB: u8 = 90;

/// Longest input name shown on the display
pub const INPUT_NAME_LEN: usize = 10;

/// Main configuration for the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Volume control settings
    #[serde(default)]
    pub volume: VolumeConfig,

    /// Input settings, one per input relay
    #[serde(default = "default_inputs")]
    pub inputs: Vec<InputConfig>,

    /// Amplifier trigger settings
    #[serde(default = "default_triggers")]
    pub triggers: Vec<TriggerConfig>,

    /// Power management
    #[serde(default)]
    pub power: PowerConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ControllerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "Configuration version {} does not match {}",
                self.version,
                CONFIG_VERSION
            );
        }

        // Volume settings
        let volume = &self.volume;
        if volume.steps == 0 || volume.steps > MAX_VOLUME_STEPS {
            bail!("Volume steps must be between 1 and {}", MAX_VOLUME_STEPS);
        }
        if volume.max_attenuation > MAX_ATTENUATION_DB {
            bail!("Maximum attenuation must be at most {} dB", MAX_ATTENUATION_DB);
        }
        if volume.min_attenuation >= volume.max_attenuation {
            bail!(
                "Minimum attenuation ({} dB) must be below maximum attenuation ({} dB)",
                volume.min_attenuation,
                volume.max_attenuation
            );
        }
        if volume.max_start_volume > volume.steps {
            bail!("Maximum start volume must not exceed {} steps", volume.steps);
        }
        if volume.mute_level > volume.steps {
            bail!("Mute level must not exceed {} steps", volume.steps);
        }

        // Inputs
        if self.inputs.len() != INPUT_COUNT {
            bail!("Exactly {} inputs must be configured", INPUT_COUNT);
        }
        for (index, input) in self.inputs.iter().enumerate() {
            if input.name.chars().count() > INPUT_NAME_LEN {
                bail!(
                    "Input {} name '{}' is longer than {} characters",
                    index + 1,
                    input.name,
                    INPUT_NAME_LEN
                );
            }
            if input.min_volume > input.max_volume || input.max_volume > volume.steps {
                bail!(
                    "Input {} volume limits must satisfy min <= max <= {}",
                    index + 1,
                    volume.steps
                );
            }
        }
        if !self.inputs.iter().any(|input| input.active) {
            bail!("At least one input must be active");
        }

        // Triggers
        if self.triggers.len() != TRIGGER_COUNT {
            bail!("Exactly {} triggers must be configured", TRIGGER_COUNT);
        }

        // Display
        if self.display.on_level > 3 {
            bail!("Display on level must be between 0 and 3");
        }
        if self.display.dim_level > 32 {
            bail!("Display dim level must be between 0 and 32");
        }

        Ok(())
    }

    /// The attenuation profile described by the volume settings
    pub fn profile(&self) -> AttenuationProfile {
        AttenuationProfile::new(
            self.volume.steps,
            self.volume.min_attenuation,
            self.volume.max_attenuation,
        )
    }

    /// Change the number of volume steps, pulling every step limit into range
    pub fn set_volume_steps(&mut self, steps: u8) {
        self.volume.steps = steps;
        self.volume.max_start_volume = self.volume.max_start_volume.min(steps);
        self.volume.mute_level = self.volume.mute_level.min(steps);
        for input in &mut self.inputs {
            input.max_volume = input.max_volume.min(steps);
            input.min_volume = input.min_volume.min(steps);
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            volume: VolumeConfig::default(),
            inputs: default_inputs(),
            triggers: default_triggers(),
            power: PowerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

fn default_version() -> u32 { CONFIG_VERSION }

fn default_inputs() -> Vec<InputConfig> {
    (1..=INPUT_COUNT)
        .map(|n| InputConfig {
            name: format!("Input {}", n),
            active: true,
            min_volume: 0,
            max_volume: default_steps(),
        })
        .collect()
}

fn default_triggers() -> Vec<TriggerConfig> {
    vec![TriggerConfig::default(); TRIGGER_COUNT]
}

/// Volume control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Number of volume steps (default: 60)
    #[serde(default = "default_steps")]
    pub steps: u8,

    /// Attenuation at the loudest step in dB (default: 0)
    #[serde(default)]
    pub min_attenuation: u8,

    /// Attenuation at step zero in dB (default: 60)
    #[serde(default = "default_max_attenuation")]
    pub max_attenuation: u8,

    /// Volume limit applied at power on when levels are recalled (default: steps)
    #[serde(default = "default_steps")]
    pub max_start_volume: u8,

    /// Step used while muted; 0 engages the attenuator's own mute (default: 0)
    #[serde(default)]
    pub mute_level: u8,

    /// Remember the volume of each input separately (default: true)
    #[serde(default = "default_true")]
    pub recall_set_level: bool,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            min_attenuation: 0,
            max_attenuation: default_max_attenuation(),
            max_start_volume: default_steps(),
            mute_level: 0,
            recall_set_level: true,
        }
    }
}

fn default_steps() -> u8 { 60 }
fn default_max_attenuation() -> u8 { 60 }
fn default_true() -> bool { true }

/// Settings for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Name shown on the display
    pub name: String,

    /// Whether the input can be selected (default: true)
    #[serde(default = "default_true")]
    pub active: bool,

    /// Lowest volume step allowed on this input (default: 0)
    #[serde(default)]
    pub min_volume: u8,

    /// Highest volume step allowed on this input (default: 60)
    #[serde(default = "default_steps")]
    pub max_volume: u8,
}

/// How a trigger relay drives the amplifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Short pulse on power on and power off
    #[default]
    Momentary,
    /// Held for as long as the controller is on
    Latching,
}

/// Amplifier trigger settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Whether this trigger is used (default: false)
    #[serde(default)]
    pub active: bool,

    /// Trigger behavior (default: momentary)
    #[serde(default)]
    pub kind: TriggerKind,

    /// Seconds from power on until the trigger fires (default: 10)
    #[serde(default = "default_on_delay")]
    pub on_delay_secs: u8,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            active: false,
            kind: TriggerKind::Momentary,
            on_delay_secs: default_on_delay(),
        }
    }
}

fn default_on_delay() -> u8 { 10 }

/// Power management settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerConfig {
    /// Hours without user input before going to standby; 0 = never (default: 0)
    #[serde(default)]
    pub inactivity_off_hours: u8,
}

/// What the volume readout shows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDisplay {
    /// No volume readout
    Off,
    /// Selected step number
    #[default]
    Steps,
    /// Attenuation in -dB
    Decibels,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Contrast when on, 0 = 25% .. 3 = 100% (default: 3)
    #[serde(default = "default_on_level")]
    pub on_level: u8,

    /// Contrast while the screen saver is active, 0 = off (default: 0)
    #[serde(default)]
    pub dim_level: u8,

    /// Dim the display after a period without input (default: true)
    #[serde(default = "default_true")]
    pub screen_saver: bool,

    /// Seconds without input before dimming (default: 30)
    #[serde(default = "default_display_timeout")]
    pub timeout_secs: u8,

    /// Volume readout (default: steps)
    #[serde(default)]
    pub volume: VolumeDisplay,

    /// Show the selected input name (default: true)
    #[serde(default = "default_true")]
    pub show_input: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            on_level: default_on_level(),
            dim_level: 0,
            screen_saver: true,
            timeout_secs: default_display_timeout(),
            volume: VolumeDisplay::Steps,
            show_input: true,
        }
    }
}

fn default_on_level() -> u8 { 3 }
fn default_display_timeout() -> u8 { 30 }
