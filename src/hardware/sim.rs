//! Simulated hardware
//!
//! Records every write and reports it through `tracing`. Used by the
//! `simulate` command and by tests.

use super::{Attenuator, HardwareError, RelayBus};
use crate::mapping::MUTE_CODE;
use tracing::info;

/// Attenuator that remembers what was written to it
#[derive(Debug, Default)]
pub struct SimAttenuator {
    code: Option<u8>,
    muted: bool,
    writes: usize,
}

impl SimAttenuator {
    /// Create a new simulated attenuator
    pub fn new() -> Self {
        Self::default()
    }

    /// Last code written, if any
    pub fn code(&self) -> Option<u8> {
        self.code
    }

    /// Whether the attenuator is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Number of writes received
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Attenuator for SimAttenuator {
    fn set_attenuation(&mut self, code: u8) -> Result<(), HardwareError> {
        if code >= MUTE_CODE {
            return Err(HardwareError::InvalidCode(code));
        }

        self.code = Some(code);
        self.muted = false;
        self.writes += 1;

        info!(code, db = -(f32::from(code) / 2.0), "attenuator set");
        Ok(())
    }

    fn mute(&mut self) -> Result<(), HardwareError> {
        self.muted = true;
        self.writes += 1;

        info!("attenuator muted");
        Ok(())
    }
}

/// Relay bus that keeps the pin levels in memory
#[derive(Debug, Default)]
pub struct SimRelayBus {
    pins: u8,
    writes: Vec<(u8, bool)>,
}

impl SimRelayBus {
    /// Create a new simulated relay bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of `pin`
    pub fn pin(&self, pin: u8) -> bool {
        pin < 8 && self.pins & (1 << pin) != 0
    }

    /// Every write in order
    pub fn writes(&self) -> &[(u8, bool)] {
        &self.writes
    }
}

impl RelayBus for SimRelayBus {
    fn set_pin(&mut self, pin: u8, on: bool) -> Result<(), HardwareError> {
        if pin >= 8 {
            return Err(HardwareError::InvalidPin(pin));
        }

        if on {
            self.pins |= 1 << pin;
        } else {
            self.pins &= !(1 << pin);
        }
        self.writes.push((pin, on));

        info!(pin, on, "relay");
        Ok(())
    }
}
