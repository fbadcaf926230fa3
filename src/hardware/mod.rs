//! Hardware seams
//!
//! The controller only talks to the attenuator chip and the relay expander
//! through these traits. Register layouts and bus timing belong to the
//! drivers implementing them.

mod relay;
mod sim;

pub use relay::{RelayController, INPUT_RELAY_COUNT, TRIGGER_RELAY_BASE};
pub use sim::{SimAttenuator, SimRelayBus};

use thiserror::Error;

/// Errors reported by hardware drivers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HardwareError {
    #[error("relay pin {0} does not exist")]
    InvalidPin(u8),

    #[error("input {0} does not exist")]
    InvalidInput(u8),

    #[error("trigger {0} does not exist")]
    InvalidTrigger(u8),

    #[error("attenuator code {0} is out of range")]
    InvalidCode(u8),
}

/// A stepped attenuator driven in half-dB codes
pub trait Attenuator {
    /// Set the attenuation, 0 = 0 dB, each step 0.5 dB more
    fn set_attenuation(&mut self, code: u8) -> Result<(), HardwareError>;

    /// Engage the attenuator's own mute
    fn mute(&mut self) -> Result<(), HardwareError>;
}

/// An output expander with one relay per pin
pub trait RelayBus {
    /// Switch the relay on `pin`
    fn set_pin(&mut self, pin: u8, on: bool) -> Result<(), HardwareError>;
}
