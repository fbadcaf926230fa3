//! Step mapper trait

use serde::Serialize;

/// One row of a step table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepCode {
    pub step: u8,
    pub code: u8,
}

/// Trait for mapping volume steps to attenuator codes
pub trait StepMapper: Send + Sync {
    /// Get the name of this mapper
    fn name(&self) -> &str;

    /// Highest step this mapper accepts
    fn steps(&self) -> u8;

    /// Map a volume step to an attenuator code
    fn map(&self, step: u8) -> u8;

    /// Code for every step from 0 to `steps()`
    fn table(&self) -> Vec<StepCode> {
        (0..=self.steps())
            .map(|step| StepCode {
                step,
                code: self.map(step),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{AttenuationMapper, AttenuationProfile, MUTE_CODE};

    #[test]
    fn test_table_covers_every_step() {
        let mapper = AttenuationMapper::new("test", AttenuationProfile::new(60, 0, 60));
        let table = mapper.table();

        assert_eq!(table.len(), 61);
        assert_eq!(table[0], StepCode { step: 0, code: 120 });
        assert_eq!(table[60], StepCode { step: 60, code: 0 });
    }

    #[test]
    fn test_table_for_infeasible_profile() {
        let mapper = AttenuationMapper::new("test", AttenuationProfile::new(10, 0, 60));
        assert!(mapper.table().iter().all(|row| row.code == MUTE_CODE));
    }
}
