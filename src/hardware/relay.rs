//! Input and trigger relay control
//!
//! Pins 0-5 select the inputs, pins 6 and 7 drive the amplifier triggers.

use super::{HardwareError, RelayBus};
use crate::config::TRIGGER_COUNT;
use tracing::debug;

/// Number of input relays (pins 0-5)
pub const INPUT_RELAY_COUNT: u8 = 6;

/// Pin of the first trigger relay
pub const TRIGGER_RELAY_BASE: u8 = 6;

const PIN_COUNT: u8 = 8;

/// Drives the input selection and trigger relays on a relay bus
pub struct RelayController<B: RelayBus> {
    bus: B,
    selected_input: Option<u8>,
    triggers: [bool; TRIGGER_COUNT],
}

impl<B: RelayBus> RelayController<B> {
    /// Create a new relay controller
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            selected_input: None,
            triggers: [false; TRIGGER_COUNT],
        }
    }

    /// Release every relay
    pub fn begin(&mut self) -> Result<(), HardwareError> {
        for pin in 0..PIN_COUNT {
            self.bus.set_pin(pin, false)?;
        }
        self.selected_input = None;
        self.triggers = [false; TRIGGER_COUNT];
        Ok(())
    }

    /// Connect `input`, releasing the previously selected input first
    pub fn set_input(&mut self, input: u8) -> Result<(), HardwareError> {
        if input >= INPUT_RELAY_COUNT {
            return Err(HardwareError::InvalidInput(input));
        }

        if let Some(previous) = self.selected_input {
            self.bus.set_pin(previous, false)?;
        }
        self.bus.set_pin(input, true)?;
        self.selected_input = Some(input);

        debug!(input, "input relay selected");
        Ok(())
    }

    /// Currently connected input
    pub fn selected_input(&self) -> Option<u8> {
        self.selected_input
    }

    /// Switch trigger relay `trigger`
    pub fn set_trigger(&mut self, trigger: u8, on: bool) -> Result<(), HardwareError> {
        let index = usize::from(trigger);
        if index >= TRIGGER_COUNT {
            return Err(HardwareError::InvalidTrigger(trigger));
        }

        self.bus.set_pin(TRIGGER_RELAY_BASE + trigger, on)?;
        self.triggers[index] = on;

        debug!(trigger, on, "trigger relay switched");
        Ok(())
    }

    /// Whether trigger relay `trigger` is on
    pub fn trigger(&self, trigger: u8) -> bool {
        self.triggers.get(usize::from(trigger)).copied().unwrap_or(false)
    }

    /// Disconnect (or reconnect) the selected input
    pub fn mute(&mut self, on: bool) -> Result<(), HardwareError> {
        if let Some(input) = self.selected_input {
            self.bus.set_pin(input, !on)?;
        }
        Ok(())
    }

    /// Get the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }
}
