//! Pure material tracking logic for Ascension.
//!
//! This crate contains all tracker logic that is independent of storage,
//! UI, or clocks. Functions take plain data (a progress snapshot, the static
//! game-data table, a timestamp) and return results, making them
//! unit-testable and usable from the engine, the headless simtest, and any
//! future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bucket`] | Requirement bucket evaluation, display rows, section state |
//! | [`config`] | Conversion rate, talent availability policy, resin limits |
//! | [`constants`] | Progress keys, conversion rate, resin costs, banner ids |
//! | [`conversion`] | Upward crafting of 3–4 tier item chains |
//! | [`distribution`] | Shared mob-drop pool split between ascension and talents |
//! | [`expedition`] | Timed expedition with an optional 25% reduction |
//! | [`gamedata`] | Static requirement table and bucket construction |
//! | [`labels`] | Display names for material keys |
//! | [`pulls`] | Pull counters per banner and the 5★ history |
//! | [`requirements`] | Bucket, entry shapes, progress snapshot type |
//! | [`resin`] | Regenerating resin timer and spending |

pub mod bucket;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod distribution;
pub mod expedition;
pub mod gamedata;
pub mod labels;
pub mod pulls;
pub mod requirements;
pub mod resin;
