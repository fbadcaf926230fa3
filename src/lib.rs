//! preamp-ctl - Volume, input and trigger control for a stepped-attenuator preamp
//!
//! Maps linear volume steps onto half-dB attenuator codes, switches input and
//! amplifier trigger relays, and keeps configuration and state across power
//! cycles.

pub mod config;
pub mod controller;
pub mod display;
pub mod hardware;
pub mod mapping;

pub use config::ControllerConfig;
pub use controller::{Controller, Key};
pub use mapping::{attenuation_code, AttenuationProfile, MUTE_CODE};
