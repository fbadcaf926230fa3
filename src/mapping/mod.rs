//! Mapping system for turning volume steps into attenuator codes
//!
//! The attenuator works in half-dB units; the user works in linear steps.

mod attenuation;
mod mapper;

pub use attenuation::{
    attenuation_code, AttenuationMapper, AttenuationProfile, DerivedProfile, MAX_COARSE_STEP_DB,
    MUTE_CODE,
};
pub use mapper::{StepCode, StepMapper};
