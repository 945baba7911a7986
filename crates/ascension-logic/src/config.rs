//! Tracker configuration — conversion rate, shared-pool policy, resin limits.
//!
//! Every field has a default so a partial (or empty) JSON object is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{self, resin};

/// How much of a shared drop pool is reported as available for talents
/// once ascension has taken its share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalentAvailabilityPolicy {
    /// `min(remainder, talent_required)`.
    Capped,
    /// The full remainder.
    #[default]
    Uncapped,
}

/// Resin limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResinConfig {
    pub max: u32,
    pub recharge_minutes: u64,
    pub condensed_max: u32,
}

impl Default for ResinConfig {
    fn default() -> Self {
        Self {
            max: resin::MAX,
            recharge_minutes: resin::RECHARGE_MINUTES,
            condensed_max: resin::CONDENSED_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub conversion_rate: u64,
    pub talent_availability_policy: TalentAvailabilityPolicy,
    pub resin: ResinConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            conversion_rate: constants::CONVERSION_RATE,
            talent_availability_policy: TalentAvailabilityPolicy::default(),
            resin: ResinConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Conversion rate with zero clamped to 1.
    pub fn rate(&self) -> u64 {
        self.conversion_rate.max(1)
    }

    /// Recharge interval with zero clamped to 1 minute.
    pub fn recharge_minutes(&self) -> u64 {
        self.resin.recharge_minutes.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.rate(), 3);
        assert_eq!(
            config.talent_availability_policy,
            TalentAvailabilityPolicy::Uncapped
        );
        assert_eq!(config.resin.max, 200);
    }

    #[test]
    fn test_partial_json() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{ "talent_availability_policy": "capped" }"#).unwrap();
        assert_eq!(
            config.talent_availability_policy,
            TalentAvailabilityPolicy::Capped
        );
        assert_eq!(config.conversion_rate, 3);
        assert_eq!(config.resin.recharge_minutes, 8);
    }

    #[test]
    fn test_zero_rate_clamped() {
        let config = TrackerConfig {
            conversion_rate: 0,
            ..Default::default()
        };
        assert_eq!(config.rate(), 1);
    }
}
