//! Upward crafting of tiered materials.
//!
//! A chain is an ordered list of 3 or 4 tiers (sliver → fragment → chunk →
//! gemstone). Only surplus, i.e. on-hand beyond the tier's own requirement,
//! is crafted upward, at a fixed rate, and the result cascades into the next
//! tier's effective on-hand. Nothing ever converts downward.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::labels::format_material_name;
use crate::requirements::{count, MaterialCounts};

/// Result of converting one tier's surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversion {
    /// Units of the next tier produced.
    pub converted: u64,
    /// Pre-conversion surplus, reported as-is.
    pub remaining: u64,
}

/// Convert the surplus of a single tier.
///
/// `remaining` is the full surplus rather than the leftover after crafting,
/// which is what the material tooltips display. A zero rate is treated as 1.
pub fn convert(on_hand: u64, required: u64, rate: u64) -> Conversion {
    let surplus = on_hand.saturating_sub(required);
    Conversion {
        converted: surplus / rate.max(1),
        remaining: surplus,
    }
}

/// One tier of an item chain as declared by game data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTier {
    /// Progress key the player's count is stored under.
    pub key: String,
    pub required: u64,
}

impl ChainTier {
    pub fn new(key: impl Into<String>, required: u64) -> Self {
        Self {
            key: key.into(),
            required,
        }
    }
}

/// Ordered tiers, lowest rarity first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemChain {
    pub tiers: Vec<ChainTier>,
}

impl ItemChain {
    pub fn new(tiers: Vec<ChainTier>) -> Self {
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Numeric state of one tier after cascading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierStep {
    /// Player-entered count.
    pub actual: u64,
    /// Units crafted into this tier from the tier below.
    pub crafted_in: u64,
    /// `actual + crafted_in`.
    pub effective: u64,
    pub required: u64,
    /// Units crafted out of this tier into the next (0 for the final tier).
    pub converted: u64,
    /// Surplus before crafting (0 for the final tier).
    pub remaining: u64,
}

impl TierStep {
    pub fn is_satisfied(&self) -> bool {
        self.effective >= self.required
    }
}

/// Cascade conversions up a chain of `(on_hand, required)` pairs.
///
/// The final tier never converts further; its `converted` and `remaining`
/// stay 0.
pub fn cascade(tiers: &[(u64, u64)], rate: u64) -> Vec<TierStep> {
    let mut steps = Vec::with_capacity(tiers.len());
    let mut carry = 0u64;

    for (i, &(actual, required)) in tiers.iter().enumerate() {
        let effective = actual.saturating_add(carry);
        let is_last = i + 1 == tiers.len();
        let conversion = if is_last {
            Conversion::default()
        } else {
            convert(effective, required, rate)
        };

        steps.push(TierStep {
            actual,
            crafted_in: carry,
            effective,
            required,
            converted: conversion.converted,
            remaining: conversion.remaining,
        });
        carry = conversion.converted;
    }

    steps
}

/// Per-material view data consumed by the progress display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CraftedMaterial {
    pub actual: u64,
    pub crafted: u64,
    pub required: u64,
    pub remaining: u64,
    pub tooltip: String,
}

impl CraftedMaterial {
    /// On-hand plus anything crafted into this tier.
    pub fn effective(&self) -> u64 {
        self.actual.saturating_add(self.crafted)
    }
}

/// Crafted view of every chain tier, keyed by progress key.
pub type CraftedMaterials = BTreeMap<String, CraftedMaterial>;

/// Advisory text shown next to a tier.
pub fn tier_tooltip(step: &TierStep, tier_key: &str, next_key: Option<&str>) -> String {
    let Some(next_key) = next_key else {
        return String::new();
    };
    if step.converted > 0 {
        format!(
            "Surplus: {} {} → {} {}",
            step.remaining,
            format_material_name(tier_key),
            step.converted,
            format_material_name(next_key)
        )
    } else if step.effective < step.required {
        "Not enough to craft the next tier".to_string()
    } else {
        String::new()
    }
}

/// Apply the cascade to a chain using counts from a progress snapshot and
/// write one [`CraftedMaterial`] per tier into `out`.
pub fn craft_chain(
    chain: &ItemChain,
    progress: &MaterialCounts,
    rate: u64,
    out: &mut CraftedMaterials,
) {
    let pairs: Vec<(u64, u64)> = chain
        .tiers
        .iter()
        .map(|t| (count(progress, &t.key), t.required))
        .collect();
    let steps = cascade(&pairs, rate);

    for (i, (tier, step)) in chain.tiers.iter().zip(&steps).enumerate() {
        let next_key = chain.tiers.get(i + 1).map(|t| t.key.as_str());
        out.insert(
            tier.key.clone(),
            CraftedMaterial {
                actual: step.actual,
                crafted: step.crafted_in,
                required: step.required,
                remaining: step.remaining,
                tooltip: tier_tooltip(step, &tier.key, next_key),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_scenario() {
        let c = convert(10, 1, 3);
        assert_eq!(c.converted, 3);
        assert_eq!(c.remaining, 9);
    }

    #[test]
    fn test_convert_no_surplus() {
        for required in 0..20 {
            for on_hand in 0..=required {
                let c = convert(on_hand, required, 3);
                assert_eq!(c.converted, 0);
                assert_eq!(c.remaining, 0);
            }
        }
    }

    #[test]
    fn test_convert_matches_floor_division() {
        for rate in 1..6 {
            for required in 0..12 {
                for on_hand in 0..40 {
                    let c = convert(on_hand, required, rate);
                    let surplus = on_hand.saturating_sub(required);
                    assert_eq!(c.converted, surplus / rate);
                    assert_eq!(c.remaining, surplus);
                }
            }
        }
    }

    #[test]
    fn test_convert_zero_rate_treated_as_one() {
        assert_eq!(convert(5, 1, 0).converted, 4);
    }

    #[test]
    fn test_cascade_scenario() {
        let steps = cascade(&[(10, 1), (0, 2), (0, 1)], 3);
        assert_eq!(steps[0].converted, 3);
        assert_eq!(steps[1].effective, 3);
        assert_eq!(steps[1].remaining, 1);
        assert_eq!(steps[1].converted, 0);
        assert_eq!(steps[2].effective, 0);
        assert!(!steps[2].is_satisfied());
    }

    #[test]
    fn test_cascade_final_tier_never_converts() {
        let steps = cascade(&[(0, 0), (0, 0), (100, 1)], 3);
        let last = steps.last().unwrap();
        assert_eq!(last.converted, 0);
        assert_eq!(last.remaining, 0);
        assert_eq!(last.effective, 100);
    }

    #[test]
    fn test_cascade_four_tiers() {
        // 28 slivers, 1 required → 27 surplus → 9 fragments
        // 9 fragments, 0 required → 3 chunks
        // 3 chunks, 0 required → 1 gemstone
        let steps = cascade(&[(28, 1), (0, 0), (0, 0), (0, 1)], 3);
        assert_eq!(steps[1].crafted_in, 9);
        assert_eq!(steps[2].crafted_in, 3);
        assert_eq!(steps[3].crafted_in, 1);
        assert!(steps[3].is_satisfied());
    }

    #[test]
    fn test_cascade_monotonic_in_base_tier() {
        let mut prev: Option<Vec<TierStep>> = None;
        for base in 0..120 {
            let steps = cascade(&[(base, 4), (2, 5), (1, 2), (0, 1)], 3);
            if let Some(prev) = &prev {
                for (a, b) in prev.iter().zip(&steps) {
                    assert!(b.converted >= a.converted);
                    assert!(b.effective >= a.effective);
                }
            }
            prev = Some(steps);
        }
    }

    #[test]
    fn test_cascade_conserves_base_units() {
        // Every unit crafted upward consumed exactly `rate` units of surplus.
        let steps = cascade(&[(50, 2), (7, 3), (0, 0)], 3);
        let used = steps[0].converted * 3;
        assert!(used <= steps[0].remaining);
        assert!(steps[0].remaining - used < 3);
        assert_eq!(steps[1].effective, 7 + steps[0].converted);
        assert_eq!(steps[1].crafted_in, 16);
    }

    #[test]
    fn test_tooltips() {
        let mut progress = MaterialCounts::new();
        progress.insert("sliver".into(), 10);
        let chain = ItemChain::new(vec![
            ChainTier::new("sliver", 1),
            ChainTier::new("fragment", 2),
            ChainTier::new("chunk", 1),
        ]);
        let mut out = CraftedMaterials::new();
        craft_chain(&chain, &progress, 3, &mut out);

        assert_eq!(out["sliver"].tooltip, "Surplus: 9 Sliver → 3 Fragment");
        assert_eq!(out["fragment"].crafted, 3);
        assert_eq!(out["fragment"].tooltip, "");
        assert_eq!(out["chunk"].tooltip, "");
        assert_eq!(out["chunk"].remaining, 0);

        progress.insert("sliver".into(), 0);
        craft_chain(&chain, &progress, 3, &mut out);
        assert_eq!(out["sliver"].tooltip, "Not enough to craft the next tier");
        assert_eq!(out["fragment"].tooltip, "Not enough to craft the next tier");
    }
}
