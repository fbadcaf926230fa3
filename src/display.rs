//! Volume readout
//!
//! Decides what the volume field of the display shows. Fonts, positions and
//! glyphs are the display driver's business.

use crate::config::{ControllerConfig, RuntimeState, VolumeDisplay};
use crate::mapping::MUTE_CODE;
use std::fmt;

/// Content of the volume field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeReadout {
    Hidden,
    Muted,
    /// Selected step
    Step(u8),
    /// Attenuation in tenths of a dB
    Decibels(u16),
}

impl VolumeReadout {
    /// Readout for the given configuration and state
    pub fn from_state(config: &ControllerConfig, state: &RuntimeState) -> Self {
        match config.display.volume {
            VolumeDisplay::Off => VolumeReadout::Hidden,
            _ if state.muted || state.attenuation == MUTE_CODE => VolumeReadout::Muted,
            VolumeDisplay::Steps => VolumeReadout::Step(state.volume),
            // Half-dB code to tenths of a dB
            VolumeDisplay::Decibels => VolumeReadout::Decibels(u16::from(state.attenuation) * 5),
        }
    }
}

impl fmt::Display for VolumeReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeReadout::Hidden => Ok(()),
            VolumeReadout::Muted => write!(f, "MUTE"),
            VolumeReadout::Step(step) => write!(f, "Vol {}", step),
            VolumeReadout::Decibels(0) => write!(f, "0.0 dB"),
            VolumeReadout::Decibels(tenths) => write!(f, "-{}.{} dB", tenths / 10, tenths % 10),
        }
    }
}
