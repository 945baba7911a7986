//! Timed expedition — one fixed-length run at a time.
//!
//! The player picks one of the fixed durations, optionally shortens it by a
//! quarter, and starts the run. Like resin, every function takes the current
//! time in milliseconds and the state is a plain value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{expedition, MS_PER_HOUR};

/// Selectable durations in milliseconds, shortest first.
pub fn durations_ms() -> [u64; 4] {
    expedition::DURATION_HOURS.map(|h| h * MS_PER_HOUR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpeditionError {
    NoDurationSelected,
    AlreadyRunning,
    UnknownDuration(u64),
}

impl fmt::Display for ExpeditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpeditionError::NoDurationSelected => write!(f, "No expedition duration selected"),
            ExpeditionError::AlreadyRunning => write!(f, "An expedition is already running"),
            ExpeditionError::UnknownDuration(ms) => {
                write!(f, "Not a selectable expedition duration: {} ms", ms)
            }
        }
    }
}

impl std::error::Error for ExpeditionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpeditionPhase {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpeditionState {
    /// Duration picked by the player, 0 when none.
    pub selected_ms: u64,
    /// Shorten the run by 25%.
    pub reduced: bool,
    /// Duration of the current run, fixed at start.
    pub effective_ms: u64,
    pub start_ms: u64,
    pub end_ms: u64,
    pub running: bool,
    pub finished: bool,
}

impl ExpeditionState {
    pub fn phase(&self) -> ExpeditionPhase {
        if self.finished {
            ExpeditionPhase::Finished
        } else if self.running {
            ExpeditionPhase::Running
        } else {
            ExpeditionPhase::Idle
        }
    }

    /// Pick one of [`durations_ms`]. Locked while a run is in progress.
    pub fn select(&mut self, duration_ms: u64) -> Result<(), ExpeditionError> {
        if self.running {
            return Err(ExpeditionError::AlreadyRunning);
        }
        if !durations_ms().contains(&duration_ms) {
            return Err(ExpeditionError::UnknownDuration(duration_ms));
        }
        self.selected_ms = duration_ms;
        Ok(())
    }

    pub fn set_reduced(&mut self, reduced: bool) -> Result<(), ExpeditionError> {
        if self.running {
            return Err(ExpeditionError::AlreadyRunning);
        }
        self.reduced = reduced;
        Ok(())
    }

    /// Selected duration with the reduction applied.
    pub fn planned_ms(&self) -> u64 {
        if self.reduced {
            self.selected_ms / expedition::REDUCED_DENOMINATOR * expedition::REDUCED_NUMERATOR
        } else {
            self.selected_ms
        }
    }

    /// Start a run. Starting again after a finished run is allowed.
    pub fn start(&mut self, now_ms: u64) -> Result<(), ExpeditionError> {
        if self.selected_ms == 0 {
            return Err(ExpeditionError::NoDurationSelected);
        }
        if self.running {
            return Err(ExpeditionError::AlreadyRunning);
        }
        self.effective_ms = self.planned_ms();
        self.start_ms = now_ms;
        self.end_ms = now_ms.saturating_add(self.effective_ms);
        self.running = true;
        self.finished = false;
        Ok(())
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.running {
            self.end_ms.saturating_sub(now_ms)
        } else {
            0
        }
    }

    /// Flip to finished once no time remains. Returns true on the tick that
    /// finishes the run.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || self.finished || self.remaining_ms(now_ms) > 0 {
            return false;
        }
        self.running = false;
        self.finished = true;
        true
    }

    /// Back to idle with nothing selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Elapsed share of the run in `[0, 100]`.
    pub fn progress_percent(&self, now_ms: u64) -> f64 {
        if self.finished {
            return 100.0;
        }
        if !self.running || self.effective_ms == 0 {
            return 0.0;
        }
        let remaining = self.remaining_ms(now_ms) as f64;
        let percent = (1.0 - remaining / self.effective_ms as f64) * 100.0;
        percent.clamp(0.0, 100.0)
    }
}

/// `"HH:MM:SS"`, hours not wrapped at 24.
pub fn format_time_left(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
