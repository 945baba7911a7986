//! Shared drop pool allocation between ascension and talents.
//!
//! Mob drops are needed by both consumers but the player holds a single
//! stack. Ascension takes its share first; whatever is left is reported as
//! available for talents. Nothing here mutates the counts: talent usage is
//! tracked through a separate `<key>_talents` counter the player enters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::TalentAvailabilityPolicy;
use crate::constants::{keys, TALENT_SUFFIX};
use crate::requirements::{count, Bucket, MaterialCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distribution {
    /// Never exceeds the ascension requirement.
    pub ascension_used: u64,
    /// `total - ascension_used`.
    pub remainder: u64,
    /// Remainder as reported under the configured policy.
    pub talent_available: u64,
}

impl Distribution {
    pub fn tooltip(&self) -> String {
        format!(
            "• {} → for ascension\n• {} → available for talents",
            self.ascension_used, self.talent_available
        )
    }
}

/// Split `total_on_hand` between the two consumers.
pub fn distribute(
    total_on_hand: u64,
    ascension_required: u64,
    talent_required: u64,
    policy: TalentAvailabilityPolicy,
) -> Distribution {
    let ascension_used = total_on_hand.min(ascension_required);
    let remainder = total_on_hand - ascension_used;
    let talent_available = match policy {
        TalentAvailabilityPolicy::Capped => remainder.min(talent_required),
        TalentAvailabilityPolicy::Uncapped => remainder,
    };

    Distribution {
        ascension_used,
        remainder,
        talent_available,
    }
}

/// Allocation of one mob-drop tier, as shown next to the ascension counter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedPoolShare {
    pub total: u64,
    pub ascension: u64,
    /// The separately entered talent-tagged counter.
    pub talents: u64,
    pub available: u64,
    pub tooltip: String,
}

/// Progress key of the talent-tagged counterpart of `key`.
pub fn talent_key(key: &str) -> String {
    format!("{key}{TALENT_SUFFIX}")
}

/// Allocate every tier of the ascension bucket's mob-drop chain.
///
/// Talent requirements come from the talent bucket's talent-tagged mob-drop
/// chain; an item without a talent bucket (weapons) has none.
pub fn distribute_shared_pool(
    ascension: &Bucket,
    talents: Option<&Bucket>,
    progress: &MaterialCounts,
    policy: TalentAvailabilityPolicy,
) -> BTreeMap<String, SharedPoolShare> {
    let mut shares = BTreeMap::new();
    let Some(drops) = ascension.chain(keys::MOB_DROPS) else {
        return shares;
    };
    let talent_drops = talents.and_then(|b| b.chain(keys::MOB_DROPS_TALENTS));

    for tier in &drops.tiers {
        let tagged = talent_key(&tier.key);
        let talent_required = talent_drops
            .and_then(|c| c.tiers.iter().find(|t| t.key == tagged))
            .map(|t| t.required)
            .unwrap_or(0);
        let total = count(progress, &tier.key);
        let split = distribute(total, tier.required, talent_required, policy);

        shares.insert(
            tier.key.clone(),
            SharedPoolShare {
                total,
                ascension: split.ascension_used,
                talents: count(progress, &tagged),
                available: split.talent_available,
                tooltip: split.tooltip(),
            },
        );
    }

    shares
}
