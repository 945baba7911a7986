//! Static game-data table — per-item material requirements.
//!
//! The table is read-only input. Chains are ordered arrays so the tier order
//! is explicit in the data rather than implied by object key order.
//! [`GameData::buckets`] turns one item's requirements into the ordered
//! buckets the evaluator works with.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{keys, MAX_CHAIN_TIERS, MIN_CHAIN_TIERS};
use crate::conversion::ChainTier;
use crate::distribution::talent_key;
use crate::requirements::{Bucket, BucketEntry, BucketKind, Requirement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    pub key: String,
    pub required: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterAscension {
    pub mora: u64,
    pub elemental_gems: Vec<TierSpec>,
    pub boss_material: Option<NamedCount>,
    pub local_specialty: Option<NamedCount>,
    pub mob_drops: Vec<TierSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTalents {
    pub mora: u64,
    pub talent_books: Vec<TierSpec>,
    /// Keyed by the base mob-drop key; tracked under `<key>_talents`.
    pub mob_drops: Vec<TierSpec>,
    pub weekly_boss: Option<NamedCount>,
    pub crown_of_insight: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterExperience {
    pub mora: u64,
    pub books: Vec<TierSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterData {
    pub name: String,
    pub ascension: CharacterAscension,
    #[serde(default)]
    pub talents: CharacterTalents,
    #[serde(default)]
    pub experience: CharacterExperience,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponAscension {
    pub mora: u64,
    pub dungeon_materials: Vec<TierSpec>,
    pub elite_drops: Vec<TierSpec>,
    pub common_drops: Vec<TierSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponData {
    pub name: String,
    pub ascension: WeaponAscension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Character,
    Weapon,
}

#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Character(&'a CharacterData),
    Weapon(&'a WeaponData),
}

impl<'a> ItemRef<'a> {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Character(_) => ItemKind::Character,
            Self::Weapon(_) => ItemKind::Weapon,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Character(c) => &c.name,
            Self::Weapon(w) => &w.name,
        }
    }

    /// Ordered buckets for this item. Weapons only have an ascension bucket.
    pub fn buckets(&self) -> Vec<Bucket> {
        match self {
            Self::Character(c) => character_buckets(c),
            Self::Weapon(w) => vec![weapon_ascension_bucket(&w.ascension)],
        }
    }
}

/// The full table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub characters: Vec<CharacterData>,
    pub weapons: Vec<WeaponData>,
}

/// A structural problem found by [`GameData::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIssue {
    pub item: String,
    pub message: String,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.message)
    }
}

impl GameData {
    pub fn item(&self, name: &str) -> Option<ItemRef<'_>> {
        self.characters
            .iter()
            .find(|c| c.name == name)
            .map(ItemRef::Character)
            .or_else(|| {
                self.weapons
                    .iter()
                    .find(|w| w.name == name)
                    .map(ItemRef::Weapon)
            })
    }

    pub fn items(&self) -> impl Iterator<Item = ItemRef<'_>> {
        self.characters
            .iter()
            .map(ItemRef::Character)
            .chain(self.weapons.iter().map(ItemRef::Weapon))
    }

    /// Item names of one kind, in table order.
    pub fn item_names(&self, kind: ItemKind) -> Vec<&str> {
        self.items()
            .filter(|i| i.kind() == kind)
            .map(|i| i.name())
            .collect()
    }

    pub fn buckets(&self, name: &str) -> Option<Vec<Bucket>> {
        self.item(name).map(|i| i.buckets())
    }

    /// Report structural problems: bad chain lengths, empty or duplicate
    /// names, progress keys claimed by two entries of the same item.
    pub fn validate(&self) -> Vec<DataIssue> {
        let mut issues = Vec::new();
        let mut seen_names = BTreeSet::new();

        for item in self.items() {
            let name = item.name();
            let issue = |message: String| DataIssue {
                item: name.to_string(),
                message,
            };
            if name.trim().is_empty() {
                issues.push(issue("empty item name".into()));
            }
            if !seen_names.insert(name.to_string()) {
                issues.push(issue("duplicate item name".into()));
            }

            let mut seen_keys = BTreeSet::new();
            for bucket in item.buckets() {
                for entry in &bucket.entries {
                    if let Requirement::Chain(chain) = &entry.requirement {
                        if !(MIN_CHAIN_TIERS..=MAX_CHAIN_TIERS).contains(&chain.len()) {
                            issues.push(issue(format!(
                                "{} chain in {:?} has {} tiers, expected {}-{}",
                                entry.key,
                                bucket.kind,
                                chain.len(),
                                MIN_CHAIN_TIERS,
                                MAX_CHAIN_TIERS
                            )));
                        }
                    }
                    for (key, _) in entry.progress_keys() {
                        if !seen_keys.insert(key.to_string()) {
                            issues.push(issue(format!("progress key {key} used twice")));
                        }
                    }
                }
            }
        }

        issues
    }
}

fn tiers(specs: &[TierSpec]) -> Vec<ChainTier> {
    specs
        .iter()
        .map(|s| ChainTier::new(s.key.clone(), s.required))
        .collect()
}

fn push_chain(entries: &mut Vec<BucketEntry>, key: &str, specs: &[TierSpec]) {
    if !specs.is_empty() {
        entries.push(BucketEntry::chain(key, tiers(specs)));
    }
}

fn push_unique(entries: &mut Vec<BucketEntry>, key: &str, named: &Option<NamedCount>) {
    if let Some(n) = named {
        entries.push(BucketEntry::unique(key, n.name.clone(), n.count));
    }
}

fn character_buckets(c: &CharacterData) -> Vec<Bucket> {
    let mut ascension = Vec::new();
    push_chain(&mut ascension, keys::ELEMENTAL_GEMS, &c.ascension.elemental_gems);
    push_unique(&mut ascension, keys::BOSS_MATERIAL, &c.ascension.boss_material);
    push_unique(&mut ascension, keys::LOCAL_SPECIALTY, &c.ascension.local_specialty);
    push_chain(&mut ascension, keys::MOB_DROPS, &c.ascension.mob_drops);
    ascension.push(BucketEntry::flat(keys::MORA_ASCENSION, c.ascension.mora));

    let mut talents = Vec::new();
    push_chain(&mut talents, keys::TALENT_BOOKS, &c.talents.talent_books);
    if !c.talents.mob_drops.is_empty() {
        let tagged = c
            .talents
            .mob_drops
            .iter()
            .map(|s| ChainTier::new(talent_key(&s.key), s.required))
            .collect();
        talents.push(BucketEntry::chain(keys::MOB_DROPS_TALENTS, tagged));
    }
    push_unique(&mut talents, keys::WEEKLY_BOSS, &c.talents.weekly_boss);
    talents.push(BucketEntry::flat(
        keys::CROWN_OF_INSIGHT,
        c.talents.crown_of_insight,
    ));
    talents.push(BucketEntry::flat(keys::MORA_TALENTS, c.talents.mora));

    let mut experience = Vec::new();
    if !c.experience.books.is_empty() {
        experience.push(BucketEntry::group(
            keys::EXPERIENCE_BOOKS,
            tiers(&c.experience.books),
        ));
    }
    experience.push(BucketEntry::flat(keys::MORA_EXPERIENCE, c.experience.mora));

    vec![
        Bucket::new(BucketKind::Ascension, ascension),
        Bucket::new(BucketKind::Talents, talents),
        Bucket::new(BucketKind::Experience, experience),
    ]
}

fn weapon_ascension_bucket(a: &WeaponAscension) -> Bucket {
    let mut entries = Vec::new();
    push_chain(&mut entries, keys::DUNGEON_MATERIALS, &a.dungeon_materials);
    push_chain(&mut entries, keys::ELITE_DROPS, &a.elite_drops);
    push_chain(&mut entries, keys::COMMON_DROPS, &a.common_drops);
    entries.push(BucketEntry::flat(keys::MORA_ASCENSION, a.mora));
    Bucket::new(BucketKind::Ascension, entries)
}
