//! Requirement bucket evaluation and section completion state.
//!
//! A bucket is satisfied iff every entry's effective total (on-hand plus
//! anything crafted into it) meets its requirement. Every entry is evaluated
//! even after the first miss so the display can mark each one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conversion::{craft_chain, CraftedMaterials};
use crate::distribution::SharedPoolShare;
use crate::labels::format_material_name;
use crate::requirements::{count, Bucket, BucketEntry, BucketKind, MaterialCounts, Requirement};

/// Cascade every chain in the bucket.
pub fn craft_bucket(bucket: &Bucket, progress: &MaterialCounts, rate: u64) -> CraftedMaterials {
    let mut crafted = CraftedMaterials::new();
    for chain in bucket.chains() {
        craft_chain(chain, progress, rate, &mut crafted);
    }
    crafted
}

/// On-hand plus units crafted into `key`.
fn effective(progress: &MaterialCounts, crafted: &CraftedMaterials, key: &str) -> u64 {
    let crafted_in = crafted.get(key).map(|c| c.crafted).unwrap_or(0);
    count(progress, key).saturating_add(crafted_in)
}

pub fn is_entry_satisfied(
    entry: &BucketEntry,
    progress: &MaterialCounts,
    crafted: &CraftedMaterials,
) -> bool {
    match &entry.requirement {
        Requirement::Unique { count: required, .. } => count(progress, &entry.key) >= *required,
        Requirement::Flat(value) => count(progress, &entry.key) >= *value,
        Requirement::Chain(chain) => chain
            .tiers
            .iter()
            .all(|t| effective(progress, crafted, &t.key) >= t.required),
        Requirement::Group(tiers) => tiers
            .iter()
            .all(|t| count(progress, &t.key) >= t.required),
    }
}

/// True iff all entries are satisfied.
pub fn is_bucket_satisfied(
    entries: &[BucketEntry],
    progress: &MaterialCounts,
    crafted: &CraftedMaterials,
) -> bool {
    entries
        .iter()
        .map(|e| is_entry_satisfied(e, progress, crafted))
        .fold(true, |all, ok| all && ok)
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub key: String,
    pub label: String,
    pub actual: u64,
    pub crafted: u64,
    pub required: u64,
    pub remaining: u64,
    pub satisfied: bool,
    pub tooltip: String,
    pub distribution: Option<SharedPoolShare>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    pub key: String,
    pub satisfied: bool,
    pub lines: Vec<MaterialLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReport {
    pub kind: BucketKind,
    pub entries: Vec<EntryReport>,
    pub satisfied: bool,
}

/// Build display rows for every entry of a bucket.
///
/// `shares` holds shared-pool allocations keyed by progress key; its tooltip
/// wins over the crafting tooltip when both exist.
pub fn evaluate_bucket(
    bucket: &Bucket,
    progress: &MaterialCounts,
    crafted: &CraftedMaterials,
    shares: &BTreeMap<String, SharedPoolShare>,
) -> BucketReport {
    let entries: Vec<EntryReport> = bucket
        .entries
        .iter()
        .map(|entry| {
            let lines = entry
                .progress_keys()
                .into_iter()
                .map(|(key, required)| {
                    let c = crafted.get(key);
                    let share = shares.get(key).cloned();
                    let actual = count(progress, key);
                    let crafted_in = c.map(|c| c.crafted).unwrap_or(0);
                    let tooltip = match (&share, c) {
                        (Some(s), _) if !s.tooltip.is_empty() => s.tooltip.clone(),
                        (_, Some(c)) => c.tooltip.clone(),
                        _ => String::new(),
                    };
                    let label = match &entry.requirement {
                        Requirement::Unique { name, .. } => name.clone(),
                        _ => format_material_name(key),
                    };
                    MaterialLine {
                        key: key.to_string(),
                        label,
                        actual,
                        crafted: crafted_in,
                        required,
                        remaining: c.map(|c| c.remaining).unwrap_or(0),
                        satisfied: actual.saturating_add(crafted_in) >= required,
                        tooltip,
                        distribution: share,
                    }
                })
                .collect();
            EntryReport {
                key: entry.key.clone(),
                satisfied: is_entry_satisfied(entry, progress, crafted),
                lines,
            }
        })
        .collect();

    let satisfied = entries.iter().all(|e| e.satisfied);
    BucketReport {
        kind: bucket.kind,
        entries,
        satisfied,
    }
}

// ============================================================================
// SECTION STATE
// ============================================================================

/// Completion flag of one (item, bucket) pair.
///
/// Independent of the counts: they stay editable in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionState {
    #[default]
    Open,
    Collected,
}

/// Confirmation attempted while some entry is still short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionNotSatisfied;

impl fmt::Display for SectionNotSatisfied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not every requirement in the section is met")
    }
}

impl std::error::Error for SectionNotSatisfied {}

impl SectionState {
    pub fn from_flag(collected: bool) -> Self {
        if collected {
            Self::Collected
        } else {
            Self::Open
        }
    }

    pub fn is_collected(&self) -> bool {
        matches!(self, Self::Collected)
    }

    /// Open → Collected, only when the bucket is satisfied.
    pub fn confirm(self, satisfied: bool) -> Result<Self, SectionNotSatisfied> {
        match self {
            Self::Collected => Ok(Self::Collected),
            Self::Open if satisfied => Ok(Self::Collected),
            Self::Open => Err(SectionNotSatisfied),
        }
    }

    /// Collected → Open.
    pub fn reopen(self) -> Self {
        Self::Open
    }
}
