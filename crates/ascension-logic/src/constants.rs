//! Tracker constants — conversion rate, progress keys, resin, expedition
//! and pull costs.
//!
//! These are plain constants with no storage dependency.
//! Both the tracker engine and the headless simtest use these.

/// Units of tier *i* surplus needed to craft one unit of tier *i + 1*.
pub const CONVERSION_RATE: u64 = 3;

/// A chain always has this many tiers at least...
pub const MIN_CHAIN_TIERS: usize = 3;
/// ...and at most this many.
pub const MAX_CHAIN_TIERS: usize = 4;

/// Suffix appended to a mob-drop key when the player counts the
/// talent-tagged stack separately from the ascension stack.
pub const TALENT_SUFFIX: &str = "_talents";

/// Entry and progress keys used inside requirement buckets.
pub mod keys {
    pub const ELEMENTAL_GEMS: &str = "elemental_gems";
    pub const BOSS_MATERIAL: &str = "boss_material";
    pub const LOCAL_SPECIALTY: &str = "local_specialty";
    pub const MOB_DROPS: &str = "mob_drops";
    pub const MORA_ASCENSION: &str = "mora_ascension";

    pub const TALENT_BOOKS: &str = "talent_books";
    pub const MOB_DROPS_TALENTS: &str = "mob_drops_talents";
    pub const WEEKLY_BOSS: &str = "weekly_boss";
    pub const CROWN_OF_INSIGHT: &str = "crown_of_insight";
    pub const MORA_TALENTS: &str = "mora_talents";

    pub const EXPERIENCE_BOOKS: &str = "books";
    pub const MORA_EXPERIENCE: &str = "mora_experience";

    pub const DUNGEON_MATERIALS: &str = "dungeon_materials";
    pub const ELITE_DROPS: &str = "elite_drops";
    pub const COMMON_DROPS: &str = "common_drops";
}

/// Regenerating resource (resin) limits and costs.
pub mod resin {
    pub const MAX: u32 = 200;
    pub const RECHARGE_MINUTES: u64 = 8;
    pub const CONDENSED_MAX: u32 = 5;

    pub const FRAGILE_RESTORE: u32 = 60;
    pub const DUNGEON_COST: u32 = 20;
    pub const CONDENSED_CRAFT_COST: u32 = 40;

    /// Discounted weekly boss kills per week.
    pub const WEEKLY_BOSS_DISCOUNTED: u32 = 3;
    pub const WEEKLY_BOSS_COST: u32 = 30;
    pub const WEEKLY_BOSS_FULL_COST: u32 = 60;
}

/// Expedition durations and the shortened-run factor.
pub mod expedition {
    pub const DURATION_HOURS: [u64; 4] = [4, 8, 16, 20];

    /// A reduced expedition lasts `REDUCED_NUMERATOR / REDUCED_DENOMINATOR`
    /// of the selected duration.
    pub const REDUCED_NUMERATOR: u64 = 3;
    pub const REDUCED_DENOMINATOR: u64 = 4;
}

/// Banner identifiers for the pull counter.
pub mod banners {
    pub const EVENT: &str = "event";
    pub const STANDARD: &str = "standard";
}

pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
