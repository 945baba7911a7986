//! Requirement buckets — the named sections a player collects materials for.
//!
//! A bucket holds a fixed list of entries. Each entry is one of four shapes
//! (unique named item, flat amount, item chain, plain group) and the
//! evaluator in [`crate::bucket`] dispatches on that shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::conversion::{ChainTier, ItemChain};

/// Per-item progress snapshot: material key → on-hand count.
pub type MaterialCounts = BTreeMap<String, u64>;

/// On-hand count for `key`, 0 when the player has never entered it.
pub fn count(progress: &MaterialCounts, key: &str) -> u64 {
    progress.get(key).copied().unwrap_or(0)
}

/// Which section of an item a bucket describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Ascension,
    Talents,
    Experience,
}

impl BucketKind {
    pub const ALL: [BucketKind; 3] = [Self::Ascension, Self::Talents, Self::Experience];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ascension => "Materials for Ascension",
            Self::Talents => "Materials for Talents",
            Self::Experience => "Experience and Mora",
        }
    }

    /// Heading of the compact view once the section is collected.
    pub fn collected_title(&self) -> &'static str {
        match self {
            Self::Ascension => "Ascension materials collected",
            Self::Talents => "Talent materials collected",
            Self::Experience => "Level-up materials collected",
        }
    }
}

/// Shape of a single requirement entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// A named unique item (boss material, local specialty); progress is
    /// stored under the entry key.
    Unique { name: String, count: u64 },
    /// Currency-like amount stored under the entry key.
    Flat(u64),
    /// Tiers that craft upward into each other.
    Chain(ItemChain),
    /// Independent counts with no crafting between them.
    Group(Vec<ChainTier>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    pub key: String,
    pub requirement: Requirement,
}

impl BucketEntry {
    pub fn unique(key: impl Into<String>, name: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            requirement: Requirement::Unique {
                name: name.into(),
                count,
            },
        }
    }

    pub fn flat(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            requirement: Requirement::Flat(value),
        }
    }

    pub fn chain(key: impl Into<String>, tiers: Vec<ChainTier>) -> Self {
        Self {
            key: key.into(),
            requirement: Requirement::Chain(ItemChain::new(tiers)),
        }
    }

    pub fn group(key: impl Into<String>, tiers: Vec<ChainTier>) -> Self {
        Self {
            key: key.into(),
            requirement: Requirement::Group(tiers),
        }
    }

    /// `(progress key, required)` pairs this entry checks.
    pub fn progress_keys(&self) -> Vec<(&str, u64)> {
        match &self.requirement {
            Requirement::Unique { count, .. } => vec![(self.key.as_str(), *count)],
            Requirement::Flat(value) => vec![(self.key.as_str(), *value)],
            Requirement::Chain(chain) => chain
                .tiers
                .iter()
                .map(|t| (t.key.as_str(), t.required))
                .collect(),
            Requirement::Group(tiers) => {
                tiers.iter().map(|t| (t.key.as_str(), t.required)).collect()
            }
        }
    }
}

/// A named section with a fixed set of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub kind: BucketKind,
    pub entries: Vec<BucketEntry>,
}

impl Bucket {
    pub fn new(kind: BucketKind, entries: Vec<BucketEntry>) -> Self {
        Self { kind, entries }
    }

    pub fn entry(&self, key: &str) -> Option<&BucketEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// The chain stored under `key`, if that entry is a chain.
    pub fn chain(&self, key: &str) -> Option<&ItemChain> {
        match self.entry(key).map(|e| &e.requirement) {
            Some(Requirement::Chain(chain)) => Some(chain),
            _ => None,
        }
    }

    pub fn chains(&self) -> impl Iterator<Item = &ItemChain> {
        self.entries.iter().filter_map(|e| match &e.requirement {
            Requirement::Chain(chain) => Some(chain),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_defaults_to_zero() {
        let mut progress = MaterialCounts::new();
        assert_eq!(count(&progress, "mora_ascension"), 0);
        progress.insert("mora_ascension".into(), 5);
        assert_eq!(count(&progress, "mora_ascension"), 5);
    }

    #[test]
    fn test_progress_keys() {
        let entry = BucketEntry::chain(
            "mob_drops",
            vec![ChainTier::new("a", 1), ChainTier::new("b", 2), ChainTier::new("c", 3)],
        );
        assert_eq!(entry.progress_keys(), vec![("a", 1), ("b", 2), ("c", 3)]);

        let entry = BucketEntry::unique("boss_material", "Storm Beads", 46);
        assert_eq!(entry.progress_keys(), vec![("boss_material", 46)]);
    }

    #[test]
    fn test_chain_lookup() {
        let bucket = Bucket::new(
            BucketKind::Ascension,
            vec![
                BucketEntry::flat("mora_ascension", 100),
                BucketEntry::chain("mob_drops", vec![ChainTier::new("a", 1)]),
            ],
        );
        assert!(bucket.chain("mob_drops").is_some());
        assert!(bucket.chain("mora_ascension").is_none());
        assert_eq!(bucket.chains().count(), 1);
    }
}
