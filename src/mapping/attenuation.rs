//! Volume step to attenuation code mapping
//!
//! Converts a linear volume step (0..=steps) into the half-dB code accepted by
//! a stepped attenuator. The configured dB range is covered with a mix of
//! coarse steps (whole dB) and fine steps (half the coarse size), so that any
//! step count can span the range exactly with an integer step table.

use super::StepMapper;
use serde::Serialize;

/// Code reserved for "no valid attenuation, engage mute"
pub const MUTE_CODE: u8 = 223;

/// Largest coarse step allowed, in dB
///
/// A single volume step must never jump more than this.
pub const MAX_COARSE_STEP_DB: u32 = 4;

/// Attenuation range and step count a mapping is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttenuationProfile {
    /// Number of volume positions above zero
    pub steps: u8,
    /// Attenuation at the top step, in dB
    pub min_db: u8,
    /// Attenuation at step zero, in dB
    pub max_db: u8,
}

/// Coarse/fine split derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedProfile {
    steps: u8,
    coarse_step_size: u32,
    /// dB covered by the fine steps
    fine_span_db: u64,
}

impl DerivedProfile {
    /// Size of a coarse step in whole dB
    pub fn coarse_step_size(&self) -> u32 {
        self.coarse_step_size
    }

    /// Number of steps using the half-size increment
    ///
    /// Fractional when the range cannot be split evenly; the step straddling
    /// the boundary is then part fine, part coarse.
    pub fn fine_step_count(&self) -> f64 {
        2.0 * self.fine_span_db as f64 / self.coarse_step_size as f64
    }

    /// Whether the split can be driven by the hardware
    pub fn is_feasible(&self) -> bool {
        self.coarse_step_size <= MAX_COARSE_STEP_DB
            && u64::from(self.steps) * u64::from(self.coarse_step_size) >= 2 * self.fine_span_db
    }

    /// Half-dB units travelled from the bottom of the range to `step`
    fn travelled_half_db(&self, step: u8) -> u64 {
        let coarse = u64::from(self.coarse_step_size);
        let fine_half_db = 2 * self.fine_span_db;
        let plain = u64::from(step) * coarse;

        if plain <= fine_half_db {
            // Still inside the fine region: coarse/2 dB per step
            plain
        } else {
            // Whole fine region, then full coarse steps
            2 * plain - fine_half_db
        }
    }
}

impl AttenuationProfile {
    /// Create a new profile
    pub fn new(steps: u8, min_db: u8, max_db: u8) -> Self {
        Self { steps, min_db, max_db }
    }

    /// Width of the attenuation range in dB
    pub fn range_db(&self) -> u8 {
        self.max_db.saturating_sub(self.min_db)
    }

    /// Derive the coarse/fine split
    ///
    /// Returns `None` for degenerate profiles (no steps, empty or inverted range).
    pub fn derive(&self) -> Option<DerivedProfile> {
        if self.steps == 0 || self.max_db <= self.min_db {
            return None;
        }

        let range = f64::from(self.range_db());
        let steps = f64::from(self.steps);
        // Saturating cast: absurd ranges end up far above MAX_COARSE_STEP_DB
        let coarse_step_size = ((range / steps).exp2() - 0.5).round() as u32;

        let fine_span_db = (u64::from(coarse_step_size) * u64::from(self.steps))
            .saturating_sub(u64::from(self.range_db()));

        Some(DerivedProfile {
            steps: self.steps,
            coarse_step_size,
            fine_span_db,
        })
    }

    /// Attenuation code for `step`, or [`MUTE_CODE`] when it cannot be mapped
    pub fn code_for(&self, step: u8) -> u8 {
        let Some(derived) = self.derive() else {
            return MUTE_CODE;
        };
        if !derived.is_feasible() || step > self.steps {
            return MUTE_CODE;
        }

        let max_half_db = 2 * u64::from(self.max_db);
        max_half_db
            .checked_sub(derived.travelled_half_db(step))
            .and_then(|code| u8::try_from(code).ok())
            .filter(|&code| code < MUTE_CODE)
            .unwrap_or(MUTE_CODE)
    }
}

/// Attenuation code for `selected_step` of a `steps`-position control spanning
/// `min_db..max_db`.
///
/// Never fails: anything that cannot be mapped yields [`MUTE_CODE`].
pub fn attenuation_code(steps: u8, selected_step: u8, min_db: u8, max_db: u8) -> u8 {
    AttenuationProfile::new(steps, min_db, max_db).code_for(selected_step)
}

/// Step mapper bound to an attenuation profile
#[derive(Debug, Clone)]
pub struct AttenuationMapper {
    name: String,
    profile: AttenuationProfile,
}

impl AttenuationMapper {
    /// Create a new attenuation mapper
    pub fn new(name: impl Into<String>, profile: AttenuationProfile) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }

    /// The profile this mapper was built from
    pub fn profile(&self) -> &AttenuationProfile {
        &self.profile
    }
}

impl StepMapper for AttenuationMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn steps(&self) -> u8 {
        self.profile.steps
    }

    fn map(&self, step: u8) -> u8 {
        self.profile.code_for(step)
    }
}
