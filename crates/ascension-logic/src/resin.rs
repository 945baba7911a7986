//! Regenerating resin — timer arithmetic, spending, and refills.
//!
//! All functions take the current wall-clock time in milliseconds so the
//! state stays a plain value; the caller owns the clock.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ResinConfig;
use crate::constants::{resin, MS_PER_MINUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResinError {
    Insufficient { needed: u32, available: u32 },
    NoFragileResin,
    CondensedFull,
}

impl fmt::Display for ResinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResinError::Insufficient { needed, available } => {
                write!(f, "Not enough resin: need {}, have {}", needed, available)
            }
            ResinError::NoFragileResin => write!(f, "No fragile resin left"),
            ResinError::CondensedFull => write!(f, "Condensed resin stack is full"),
        }
    }
}

impl std::error::Error for ResinError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResinState {
    pub current: u32,
    pub condensed: u32,
    pub fragile: u32,
    /// Start of the current recharge interval.
    pub last_update_ms: u64,
    pub weekly_boss_count: u32,
}

impl ResinState {
    /// Full resin, nothing in reserve.
    pub fn new(now_ms: u64, config: &ResinConfig) -> Self {
        Self {
            current: config.max,
            condensed: 0,
            fragile: 0,
            last_update_ms: now_ms,
            weekly_boss_count: 0,
        }
    }

    fn interval_ms(config: &ResinConfig) -> u64 {
        config.recharge_minutes.max(1).saturating_mul(MS_PER_MINUTE)
    }

    pub fn is_full(&self, config: &ResinConfig) -> bool {
        self.current >= config.max
    }

    /// Regenerate one unit per elapsed recharge interval. Returns the units
    /// gained.
    ///
    /// Partial intervals carry over; once the cap is hit the timer restarts
    /// at `now_ms`.
    pub fn tick(&mut self, now_ms: u64, config: &ResinConfig) -> u32 {
        let interval = Self::interval_ms(config);
        let elapsed = now_ms.saturating_sub(self.last_update_ms);
        let intervals = elapsed / interval;
        if intervals == 0 {
            return 0;
        }

        let room = config.max.saturating_sub(self.current);
        let gained = intervals.min(room as u64) as u32;
        self.current += gained;
        if self.current >= config.max {
            self.last_update_ms = now_ms;
        } else {
            self.last_update_ms = self
                .last_update_ms
                .saturating_add(intervals.saturating_mul(interval));
        }
        gained
    }

    /// Seconds until the cap is reached, 0 when already full.
    pub fn seconds_to_full(&self, now_ms: u64, config: &ResinConfig) -> u64 {
        let missing = config.max.saturating_sub(self.current) as u64;
        let total_ms = missing.saturating_mul(Self::interval_ms(config));
        let elapsed = now_ms.saturating_sub(self.last_update_ms);
        total_ms.saturating_sub(elapsed) / 1000
    }

    /// Add (or remove) resin, clamped to `[0, max]`, restarting the timer.
    pub fn adjust(&mut self, delta: i64, now_ms: u64, config: &ResinConfig) {
        let next = (self.current as i64 + delta).clamp(0, config.max as i64);
        self.current = next as u32;
        self.last_update_ms = now_ms;
    }

    /// Manual edit of the balance.
    pub fn set(&mut self, value: i64, now_ms: u64, config: &ResinConfig) {
        self.current = value.clamp(0, config.max as i64) as u32;
        self.last_update_ms = now_ms;
    }

    pub fn spend(&mut self, cost: u32, now_ms: u64, config: &ResinConfig) -> Result<(), ResinError> {
        if self.current < cost {
            return Err(ResinError::Insufficient {
                needed: cost,
                available: self.current,
            });
        }
        self.adjust(-(cost as i64), now_ms, config);
        Ok(())
    }

    pub fn run_dungeon(&mut self, now_ms: u64, config: &ResinConfig) -> Result<(), ResinError> {
        self.spend(resin::DUNGEON_COST, now_ms, config)
    }

    /// Spend resin on one condensed resin. Refused while the stack is full.
    pub fn craft_condensed(&mut self, now_ms: u64, config: &ResinConfig) -> Result<(), ResinError> {
        if self.condensed >= config.condensed_max {
            return Err(ResinError::CondensedFull);
        }
        self.spend(resin::CONDENSED_CRAFT_COST, now_ms, config)?;
        self.adjust_condensed(1, config);
        Ok(())
    }

    pub fn weekly_boss_cost(&self) -> u32 {
        if self.weekly_boss_count < resin::WEEKLY_BOSS_DISCOUNTED {
            resin::WEEKLY_BOSS_COST
        } else {
            resin::WEEKLY_BOSS_FULL_COST
        }
    }

    /// Returns the cost paid.
    pub fn defeat_weekly_boss(&mut self, now_ms: u64, config: &ResinConfig) -> Result<u32, ResinError> {
        let cost = self.weekly_boss_cost();
        self.spend(cost, now_ms, config)?;
        self.weekly_boss_count += 1;
        Ok(cost)
    }

    pub fn reset_weekly_bosses(&mut self) {
        self.weekly_boss_count = 0;
    }

    pub fn use_fragile(&mut self, now_ms: u64, config: &ResinConfig) -> Result<(), ResinError> {
        if self.fragile == 0 {
            return Err(ResinError::NoFragileResin);
        }
        self.fragile -= 1;
        self.adjust(resin::FRAGILE_RESTORE as i64, now_ms, config);
        Ok(())
    }

    pub fn set_fragile(&mut self, value: i64) {
        self.fragile = value.clamp(0, u32::MAX as i64) as u32;
    }

    pub fn adjust_condensed(&mut self, delta: i32, config: &ResinConfig) {
        let next = (self.condensed as i64 + delta as i64).clamp(0, config.condensed_max as i64);
        self.condensed = next as u32;
    }
}

/// `"1h 4m 0s"`, `"12m 30s"`, or `"0m 0s"`.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = MS_PER_MINUTE;

    fn cfg() -> ResinConfig {
        ResinConfig::default()
    }

    fn state(current: u32) -> ResinState {
        ResinState {
            current,
            ..ResinState::new(0, &cfg())
        }
    }

    #[test]
    fn test_tick_regenerates_one_per_interval() {
        let mut s = state(100);
        assert_eq!(s.tick(7 * MIN, &cfg()), 0);
        assert_eq!(s.tick(17 * MIN, &cfg()), 2);
        assert_eq!(s.current, 102);
        // 1 minute of the third interval carries over.
        assert_eq!(s.last_update_ms, 16 * MIN);
        assert_eq!(s.tick(24 * MIN, &cfg()), 1);
    }

    #[test]
    fn test_tick_caps_at_max() {
        let mut s = state(199);
        assert_eq!(s.tick(80 * MIN, &cfg()), 1);
        assert_eq!(s.current, 200);
        assert_eq!(s.last_update_ms, 80 * MIN);
        assert_eq!(s.tick(200 * MIN, &cfg()), 0);
    }

    #[test]
    fn test_seconds_to_full() {
        let s = state(198);
        assert_eq!(s.seconds_to_full(0, &cfg()), 16 * 60);
        assert_eq!(s.seconds_to_full(MIN, &cfg()), 15 * 60);
        assert_eq!(state(200).seconds_to_full(0, &cfg()), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(750), "12m 30s");
        assert_eq!(format_duration(3840), "1h 4m 0s");
    }

    #[test]
    fn test_spend_and_insufficient() {
        let mut s = state(25);
        assert!(s.run_dungeon(MIN, &cfg()).is_ok());
        assert_eq!(s.current, 5);
        assert_eq!(s.last_update_ms, MIN);
        assert_eq!(
            s.run_dungeon(MIN, &cfg()),
            Err(ResinError::Insufficient {
                needed: 20,
                available: 5
            })
        );
        assert_eq!(s.current, 5);
    }

    #[test]
    fn test_weekly_boss_cost_escalates() {
        let mut s = state(200);
        for _ in 0..3 {
            assert_eq!(s.defeat_weekly_boss(0, &cfg()), Ok(30));
        }
        assert_eq!(s.weekly_boss_cost(), 60);
        assert_eq!(s.defeat_weekly_boss(0, &cfg()), Ok(60));
        assert_eq!(s.current, 200 - 90 - 60);
        s.reset_weekly_bosses();
        assert_eq!(s.weekly_boss_cost(), 30);
    }

    #[test]
    fn test_fragile_restores_and_clamps() {
        let mut s = state(180);
        assert_eq!(s.use_fragile(0, &cfg()), Err(ResinError::NoFragileResin));
        s.set_fragile(2);
        s.use_fragile(0, &cfg()).unwrap();
        assert_eq!(s.current, 200);
        assert_eq!(s.fragile, 1);
    }

    #[test]
    fn test_condensed_clamped() {
        let mut s = state(200);
        s.adjust_condensed(-1, &cfg());
        assert_eq!(s.condensed, 0);
        s.adjust_condensed(10, &cfg());
        assert_eq!(s.condensed, 5);
    }

    #[test]
    fn test_craft_condensed() {
        let mut s = state(200);
        s.craft_condensed(0, &cfg()).unwrap();
        assert_eq!(s.condensed, 1);
        assert_eq!(s.current, 160);

        s.adjust_condensed(10, &cfg());
        assert_eq!(s.craft_condensed(0, &cfg()), Err(ResinError::CondensedFull));
        assert_eq!(s.current, 160);
        assert_eq!(s.condensed, 5);
    }

    #[test]
    fn test_huge_recharge_interval_does_not_overflow() {
        let config = ResinConfig {
            recharge_minutes: 400_000_000_000_000,
            ..cfg()
        };
        let mut s = ResinState {
            current: 10,
            ..ResinState::new(0, &config)
        };
        assert_eq!(s.tick(1_000_000, &config), 0);
        assert_eq!(s.tick(u64::MAX - 1, &config), 0);
        assert_eq!(s.seconds_to_full(0, &config), u64::MAX / 1000);
        assert!(!s.is_full(&config));
    }

    #[test]
    fn test_set_clamps() {
        let mut s = state(10);
        s.set(-4, 0, &cfg());
        assert_eq!(s.current, 0);
        s.set(999, 0, &cfg());
        assert_eq!(s.current, 200);
    }
}
