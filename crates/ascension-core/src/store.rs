//! Progress and section-completion stores.
//!
//! The stores are explicit values owned by the [`Tracker`](crate::engine::Tracker)
//! and handed to the pure logic as snapshots. Counts are only changed
//! through the setters here, which clamp input to non-negative values.

use std::collections::BTreeMap;

use ascension_logic::bucket::SectionState;
use ascension_logic::requirements::{BucketKind, MaterialCounts};
use serde::{Deserialize, Serialize};

/// Item name → material key → on-hand count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    items: BTreeMap<String, MaterialCounts>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: &str, key: &str) -> u64 {
        self.items
            .get(item)
            .and_then(|m| m.get(key))
            .copied()
            .unwrap_or(0)
    }

    /// Store `value`, clamping negatives to 0. Returns the stored count.
    pub fn set(&mut self, item: &str, key: &str, value: i64) -> u64 {
        let stored = value.max(0) as u64;
        self.items
            .entry(item.to_string())
            .or_default()
            .insert(key.to_string(), stored);
        stored
    }

    /// Store a count typed by the player. Only the leading integer is
    /// read (`"12.5"` and `"12abc"` store 12); text without one stores 0.
    pub fn set_from_input(&mut self, item: &str, key: &str, text: &str) -> u64 {
        self.set(item, key, parse_leading_int(text))
    }

    /// Copy of one item's counts, empty if nothing was entered yet.
    pub fn snapshot(&self, item: &str) -> MaterialCounts {
        self.items.get(item).cloned().unwrap_or_default()
    }

    pub fn clear_item(&mut self, item: &str) -> bool {
        self.items.remove(item).is_some()
    }

    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Optional sign followed by digits, after leading whitespace. Saturates
/// instead of overflowing.
fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Item name → bucket kind → collected flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionStore {
    sections: BTreeMap<String, BTreeMap<BucketKind, bool>>,
}

impl CompletionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, item: &str, kind: BucketKind) -> SectionState {
        let collected = self
            .sections
            .get(item)
            .and_then(|m| m.get(&kind))
            .copied()
            .unwrap_or(false);
        SectionState::from_flag(collected)
    }

    pub fn set_state(&mut self, item: &str, kind: BucketKind, state: SectionState) {
        self.sections
            .entry(item.to_string())
            .or_default()
            .insert(kind, state.is_collected());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_negative() {
        let mut store = ProgressStore::new();
        assert_eq!(store.set("Lyney", "sliver", -5), 0);
        assert_eq!(store.get("Lyney", "sliver"), 0);
        assert_eq!(store.set("Lyney", "sliver", 12), 12);
        assert_eq!(store.get("Lyney", "sliver"), 12);
        assert_eq!(store.get("Lyney", "chunk"), 0);
        assert_eq!(store.get("Nobody", "sliver"), 0);
    }

    #[test]
    fn test_set_from_input() {
        let mut store = ProgressStore::new();
        assert_eq!(store.set_from_input("Lyney", "mora_ascension", " 420000 "), 420000);
        assert_eq!(store.set_from_input("Lyney", "mora_ascension", "lots"), 0);
        assert_eq!(store.set_from_input("Lyney", "mora_ascension", "-3"), 0);
    }

    #[test]
    fn test_set_from_input_reads_leading_integer() {
        let mut store = ProgressStore::new();
        assert_eq!(store.set_from_input("Lyney", "sliver", "12.5"), 12);
        assert_eq!(store.set_from_input("Lyney", "sliver", "12abc"), 12);
        assert_eq!(store.set_from_input("Lyney", "sliver", "  +7 pcs"), 7);
        assert_eq!(store.set_from_input("Lyney", "sliver", "abc12"), 0);
        assert_eq!(store.set_from_input("Lyney", "sliver", ""), 0);
        assert_eq!(store.set_from_input("Lyney", "sliver", "-"), 0);
        assert_eq!(
            store.set_from_input("Lyney", "sliver", "99999999999999999999999"),
            i64::MAX as u64
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = ProgressStore::new();
        store.set("Lyney", "sliver", 3);
        let snapshot = store.snapshot("Lyney");
        store.set("Lyney", "sliver", 9);
        assert_eq!(snapshot["sliver"], 3);
        assert!(store.snapshot("Nobody").is_empty());
    }

    #[test]
    fn test_completion_defaults_open() {
        let mut store = CompletionStore::new();
        assert_eq!(store.state("Lyney", BucketKind::Talents), SectionState::Open);
        store.set_state("Lyney", BucketKind::Talents, SectionState::Collected);
        assert_eq!(
            store.state("Lyney", BucketKind::Talents),
            SectionState::Collected
        );
        assert_eq!(store.state("Lyney", BucketKind::Ascension), SectionState::Open);
    }

    #[test]
    fn test_json_shape() {
        let mut store = ProgressStore::new();
        store.set("Lyney", "sliver", 3);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"Lyney":{"sliver":3}}"#);

        let mut done = CompletionStore::new();
        done.set_state("Lyney", BucketKind::Ascension, SectionState::Collected);
        let json = serde_json::to_string(&done).unwrap();
        assert_eq!(json, r#"{"Lyney":{"ascension":true}}"#);
    }
}
