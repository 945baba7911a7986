//! Pull counter — pity counts per banner and the 5★ history log.

use serde::{Deserialize, Serialize};

use crate::constants::banners;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub name: String,
    /// Pulls since the last 5★.
    pub count: u32,
    /// Rate-up characters, event banners only.
    #[serde(default)]
    pub featured: Vec<String>,
    #[serde(default)]
    pub selected: usize,
}

impl Banner {
    pub fn selected_character(&self) -> Option<&str> {
        self.featured.get(self.selected).map(String::as_str)
    }
}

/// What a 5★ turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullOutcome {
    Featured,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRecord {
    pub timestamp_ms: u64,
    pub banner_name: String,
    pub result: String,
    /// Counter value when the 5★ dropped.
    pub pull_number: u32,
    pub character: Option<String>,
}

/// Digits only; anything else is dropped and an empty result means 0.
pub fn parse_count_input(text: &str) -> u32 {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullCounter {
    pub banners: Vec<Banner>,
    /// Append-only.
    pub history: Vec<PullRecord>,
}

impl Default for PullCounter {
    fn default() -> Self {
        Self {
            banners: vec![
                Banner {
                    id: banners::EVENT.into(),
                    name: "Event banner".into(),
                    count: 0,
                    featured: vec!["Escoffier".into(), "Navia".into()],
                    selected: 0,
                },
                Banner {
                    id: banners::STANDARD.into(),
                    name: "Standard banner".into(),
                    count: 0,
                    featured: Vec::new(),
                    selected: 0,
                },
            ],
            history: Vec::new(),
        }
    }
}

impl PullCounter {
    pub fn banner(&self, id: &str) -> Option<&Banner> {
        self.banners.iter().find(|b| b.id == id)
    }

    fn banner_mut(&mut self, id: &str) -> Option<&mut Banner> {
        self.banners.iter_mut().find(|b| b.id == id)
    }

    pub fn increment(&mut self, id: &str) -> Option<u32> {
        let banner = self.banner_mut(id)?;
        banner.count = banner.count.saturating_add(1);
        Some(banner.count)
    }

    /// Floors at 0.
    pub fn decrement(&mut self, id: &str) -> Option<u32> {
        let banner = self.banner_mut(id)?;
        banner.count = banner.count.saturating_sub(1);
        Some(banner.count)
    }

    pub fn set_from_input(&mut self, id: &str, text: &str) -> Option<u32> {
        let banner = self.banner_mut(id)?;
        banner.count = parse_count_input(text);
        Some(banner.count)
    }

    /// Out-of-range indices are ignored and return `false`.
    pub fn select_featured(&mut self, id: &str, index: usize) -> bool {
        match self.banner_mut(id) {
            Some(b) if index < b.featured.len() => {
                b.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Log a 5★ and reset the banner's counter.
    ///
    /// Banners without featured characters always record a standard 5★.
    pub fn record_five_star(
        &mut self,
        id: &str,
        outcome: PullOutcome,
        timestamp_ms: u64,
    ) -> Option<&PullRecord> {
        let banner = self.banner_mut(id)?;
        let character = banner.selected_character().map(str::to_string);
        let result = match (outcome, &character) {
            (PullOutcome::Featured, Some(name)) => format!("{name} 5★"),
            _ => "Standard 5★".to_string(),
        };
        let record = PullRecord {
            timestamp_ms,
            banner_name: banner.name.clone(),
            result,
            pull_number: banner.count,
            character,
        };
        banner.count = 0;

        self.history.push(record);
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_input() {
        assert_eq!(parse_count_input("42"), 42);
        assert_eq!(parse_count_input("4a2"), 42);
        assert_eq!(parse_count_input("-7"), 7);
        assert_eq!(parse_count_input(""), 0);
        assert_eq!(parse_count_input("abc"), 0);
        assert_eq!(parse_count_input("99999999999999"), u32::MAX);
    }

    #[test]
    fn test_counter_ops() {
        let mut counter = PullCounter::default();
        assert_eq!(counter.decrement("event"), Some(0));
        assert_eq!(counter.increment("event"), Some(1));
        assert_eq!(counter.increment("event"), Some(2));
        assert_eq!(counter.set_from_input("standard", "73"), Some(73));
        assert_eq!(counter.increment("missing"), None);
    }

    #[test]
    fn test_record_featured_resets_counter() {
        let mut counter = PullCounter::default();
        counter.set_from_input("event", "76");
        assert!(counter.select_featured("event", 1));
        let record = counter
            .record_five_star("event", PullOutcome::Featured, 1_000)
            .unwrap()
            .clone();
        assert_eq!(record.result, "Navia 5★");
        assert_eq!(record.pull_number, 76);
        assert_eq!(record.character.as_deref(), Some("Navia"));
        assert_eq!(counter.banner("event").unwrap().count, 0);
        assert_eq!(counter.history.len(), 1);
    }

    #[test]
    fn test_record_lost_fifty_fifty() {
        let mut counter = PullCounter::default();
        counter.set_from_input("event", "80");
        let record = counter
            .record_five_star("event", PullOutcome::Standard, 0)
            .unwrap();
        assert_eq!(record.result, "Standard 5★");
    }

    #[test]
    fn test_standard_banner_always_standard() {
        let mut counter = PullCounter::default();
        let record = counter
            .record_five_star("standard", PullOutcome::Featured, 0)
            .unwrap();
        assert_eq!(record.result, "Standard 5★");
        assert!(record.character.is_none());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut counter = PullCounter::default();
        assert!(!counter.select_featured("event", 5));
        assert!(!counter.select_featured("standard", 0));
    }
}
