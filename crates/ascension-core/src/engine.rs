//! Tracker engine - main entry point for reading and editing progress

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use ascension_logic::bucket::{
    craft_bucket, evaluate_bucket, is_bucket_satisfied, BucketReport, SectionState,
};
use ascension_logic::config::TrackerConfig;
use ascension_logic::distribution::{distribute_shared_pool, SharedPoolShare};
use ascension_logic::expedition::{format_time_left, ExpeditionPhase, ExpeditionState};
use ascension_logic::gamedata::{GameData, ItemKind};
use ascension_logic::pulls::{PullCounter, PullOutcome, PullRecord};
use ascension_logic::requirements::{Bucket, BucketKind};
use ascension_logic::resin::{format_duration, ResinState};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::persistence::{self, SaveData, SaveError};
use crate::store::{CompletionStore, ProgressStore};

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One section of an item as the view renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub title: String,
    pub state: SectionState,
    pub report: BucketReport,
}

impl SectionReport {
    /// Whether the "confirm collection" action should be offered.
    pub fn can_confirm(&self) -> bool {
        self.report.satisfied && !self.state.is_collected()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    pub name: String,
    pub kind: ItemKind,
    pub sections: Vec<SectionReport>,
}

impl ItemReport {
    pub fn section(&self, kind: BucketKind) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.report.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResinStatus {
    pub current: u32,
    pub max: u32,
    pub condensed: u32,
    pub fragile: u32,
    pub full: bool,
    pub seconds_to_full: u64,
    pub time_to_full: String,
    pub weekly_boss_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpeditionStatus {
    pub phase: ExpeditionPhase,
    pub selected_ms: u64,
    pub reduced: bool,
    pub remaining_ms: u64,
    pub time_left: String,
    pub progress_percent: f64,
}

/// Main tracker engine
pub struct Tracker {
    /// Static requirement table
    data: GameData,
    pub config: TrackerConfig,
    /// Player-entered material counts
    pub progress: ProgressStore,
    /// Collected/open flags per section
    pub completion: CompletionStore,
    pub resin: ResinState,
    pub pulls: PullCounter,
    pub expedition: ExpeditionState,
}

impl Tracker {
    /// Create a tracker with empty progress and full resin
    pub fn new(data: GameData, config: TrackerConfig) -> Self {
        let resin = ResinState::new(now_ms(), &config.resin);
        Self {
            data,
            config,
            progress: ProgressStore::new(),
            completion: CompletionStore::new(),
            resin,
            pulls: PullCounter::default(),
            expedition: ExpeditionState::default(),
        }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    fn buckets(&self, item: &str) -> Result<Vec<Bucket>, TrackerError> {
        self.data
            .buckets(item)
            .ok_or_else(|| TrackerError::UnknownItem(item.to_string()))
    }

    /// Shared-pool allocation for an item's mob drops.
    pub fn distribution(
        &self,
        item: &str,
    ) -> Result<BTreeMap<String, SharedPoolShare>, TrackerError> {
        let buckets = self.buckets(item)?;
        Ok(self.shares(&buckets, item))
    }

    fn shares(&self, buckets: &[Bucket], item: &str) -> BTreeMap<String, SharedPoolShare> {
        let snapshot = self.progress.snapshot(item);
        let find = |kind: BucketKind| buckets.iter().find(|b| b.kind == kind);
        match find(BucketKind::Ascension) {
            Some(ascension) => distribute_shared_pool(
                ascension,
                find(BucketKind::Talents),
                &snapshot,
                self.config.talent_availability_policy,
            ),
            None => BTreeMap::new(),
        }
    }

    fn section_report(
        &self,
        item: &str,
        bucket: &Bucket,
        shares: &BTreeMap<String, SharedPoolShare>,
    ) -> SectionReport {
        let snapshot = self.progress.snapshot(item);
        let crafted = craft_bucket(bucket, &snapshot, self.config.rate());
        let state = self.completion.state(item, bucket.kind);
        SectionReport {
            title: if state.is_collected() {
                bucket.kind.collected_title().to_string()
            } else {
                bucket.kind.title().to_string()
            },
            state,
            report: evaluate_bucket(bucket, &snapshot, &crafted, shares),
        }
    }

    /// Everything the materials view needs for one item
    pub fn item_report(&self, item: &str) -> Result<ItemReport, TrackerError> {
        let kind = self
            .data
            .item(item)
            .map(|i| i.kind())
            .ok_or_else(|| TrackerError::UnknownItem(item.to_string()))?;
        let buckets = self.buckets(item)?;
        let shares = self.shares(&buckets, item);
        let sections = buckets
            .iter()
            .map(|b| self.section_report(item, b, &shares))
            .collect();

        Ok(ItemReport {
            name: item.to_string(),
            kind,
            sections,
        })
    }

    fn bucket(&self, item: &str, kind: BucketKind) -> Result<Bucket, TrackerError> {
        self.buckets(item)?
            .into_iter()
            .find(|b| b.kind == kind)
            .ok_or_else(|| TrackerError::UnknownSection {
                item: item.to_string(),
                section: kind,
            })
    }

    pub fn is_section_satisfied(&self, item: &str, kind: BucketKind) -> Result<bool, TrackerError> {
        let bucket = self.bucket(item, kind)?;
        let snapshot = self.progress.snapshot(item);
        let crafted = craft_bucket(&bucket, &snapshot, self.config.rate());
        Ok(is_bucket_satisfied(&bucket.entries, &snapshot, &crafted))
    }

    pub fn section_state(&self, item: &str, kind: BucketKind) -> SectionState {
        self.completion.state(item, kind)
    }

    /// Set a material count for a known item
    pub fn update_progress(&mut self, item: &str, key: &str, value: i64) -> Result<u64, TrackerError> {
        if self.data.item(item).is_none() {
            return Err(TrackerError::UnknownItem(item.to_string()));
        }
        let stored = self.progress.set(item, key, value);
        log::debug!("{}: {} = {}", item, key, stored);
        Ok(stored)
    }

    /// Set a material count from raw text input
    pub fn update_progress_from_input(
        &mut self,
        item: &str,
        key: &str,
        text: &str,
    ) -> Result<u64, TrackerError> {
        if self.data.item(item).is_none() {
            return Err(TrackerError::UnknownItem(item.to_string()));
        }
        let stored = self.progress.set_from_input(item, key, text);
        log::debug!("{}: {} = {} (from {:?})", item, key, stored, text);
        Ok(stored)
    }

    /// Forget every count entered for an item. Section flags are kept.
    pub fn clear_progress(&mut self, item: &str) -> Result<bool, TrackerError> {
        if self.data.item(item).is_none() {
            return Err(TrackerError::UnknownItem(item.to_string()));
        }
        let cleared = self.progress.clear_item(item);
        if cleared {
            log::info!("{}: progress cleared", item);
        }
        Ok(cleared)
    }

    /// Freeze a satisfied section as collected
    pub fn confirm_section(&mut self, item: &str, kind: BucketKind) -> Result<SectionState, TrackerError> {
        let satisfied = self.is_section_satisfied(item, kind)?;
        let state = self
            .completion
            .state(item, kind)
            .confirm(satisfied)
            .map_err(|e| {
                log::warn!("Rejected confirmation of {:?} for {}", kind, item);
                TrackerError::not_satisfied(item, kind, e)
            })?;
        self.completion.set_state(item, kind, state);
        log::info!("{}: {:?} marked collected", item, kind);
        Ok(state)
    }

    /// Reopen a collected section for editing
    pub fn edit_section(&mut self, item: &str, kind: BucketKind) -> Result<SectionState, TrackerError> {
        self.bucket(item, kind)?;
        let state = self.completion.state(item, kind).reopen();
        self.completion.set_state(item, kind, state);
        log::info!("{}: {:?} reopened", item, kind);
        Ok(state)
    }

    // ── Resin ───────────────────────────────────────────────────────────

    /// Periodic refresh of resin and the expedition; returns the resin
    /// regenerated
    pub fn tick(&mut self, now_ms: u64) -> u32 {
        let gained = self.resin.tick(now_ms, &self.config.resin);
        if gained > 0 {
            log::debug!("Resin +{} → {}", gained, self.resin.current);
        }
        if self.expedition.tick(now_ms) {
            log::info!("Expedition finished");
        }
        gained
    }

    pub fn resin_status(&self, now_ms: u64) -> ResinStatus {
        let secs = self.resin.seconds_to_full(now_ms, &self.config.resin);
        ResinStatus {
            current: self.resin.current,
            max: self.config.resin.max,
            condensed: self.resin.condensed,
            fragile: self.resin.fragile,
            full: self.resin.is_full(&self.config.resin),
            seconds_to_full: secs,
            time_to_full: format_duration(secs),
            weekly_boss_cost: self.resin.weekly_boss_cost(),
        }
    }

    pub fn run_dungeon(&mut self, now_ms: u64) -> Result<(), TrackerError> {
        self.resin.run_dungeon(now_ms, &self.config.resin)?;
        Ok(())
    }

    pub fn craft_condensed(&mut self, now_ms: u64) -> Result<(), TrackerError> {
        self.resin.craft_condensed(now_ms, &self.config.resin)?;
        Ok(())
    }

    pub fn defeat_weekly_boss(&mut self, now_ms: u64) -> Result<u32, TrackerError> {
        let cost = self.resin.defeat_weekly_boss(now_ms, &self.config.resin)?;
        log::info!(
            "Weekly boss #{} for {} resin",
            self.resin.weekly_boss_count,
            cost
        );
        Ok(cost)
    }

    pub fn use_fragile_resin(&mut self, now_ms: u64) -> Result<(), TrackerError> {
        self.resin.use_fragile(now_ms, &self.config.resin)?;
        Ok(())
    }

    pub fn set_resin(&mut self, value: i64, now_ms: u64) {
        self.resin.set(value, now_ms, &self.config.resin);
    }

    // ── Expedition ──────────────────────────────────────────────────────

    pub fn select_expedition(&mut self, duration_ms: u64, reduced: bool) -> Result<(), TrackerError> {
        self.expedition.select(duration_ms)?;
        self.expedition.set_reduced(reduced)?;
        Ok(())
    }

    pub fn start_expedition(&mut self, now_ms: u64) -> Result<(), TrackerError> {
        self.expedition.start(now_ms)?;
        log::info!(
            "Expedition started: {} ({})",
            format_time_left(self.expedition.effective_ms),
            if self.expedition.reduced { "reduced" } else { "full" }
        );
        Ok(())
    }

    pub fn reset_expedition(&mut self) {
        self.expedition.reset();
        log::info!("Expedition reset");
    }

    pub fn expedition_status(&self, now_ms: u64) -> ExpeditionStatus {
        let remaining_ms = self.expedition.remaining_ms(now_ms);
        ExpeditionStatus {
            phase: self.expedition.phase(),
            selected_ms: self.expedition.selected_ms,
            reduced: self.expedition.reduced,
            remaining_ms,
            time_left: format_time_left(remaining_ms),
            progress_percent: self.expedition.progress_percent(now_ms),
        }
    }

    // ── Pulls ───────────────────────────────────────────────────────────

    pub fn record_five_star(
        &mut self,
        banner: &str,
        outcome: PullOutcome,
        now_ms: u64,
    ) -> Result<PullRecord, TrackerError> {
        let record = self
            .pulls
            .record_five_star(banner, outcome, now_ms)
            .cloned()
            .ok_or_else(|| TrackerError::UnknownBanner(banner.to_string()))?;
        log::info!(
            "{}: {} at pull {}",
            record.banner_name,
            record.result,
            record.pull_number
        );
        Ok(record)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    fn snapshot(&self) -> SaveData {
        SaveData::new(
            self.progress.clone(),
            self.completion.clone(),
            self.resin,
            self.pulls.clone(),
            self.expedition,
        )
    }

    fn restore(&mut self, data: SaveData) {
        self.progress = data.progress;
        self.completion = data.completion;
        self.resin = data.resin;
        self.pulls = data.pulls;
        self.expedition = data.expedition;
    }

    /// Save the tracker state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save(writer, &self.snapshot())?;
        log::info!("Saved tracker state");
        Ok(())
    }

    /// Load tracker state from a reader, replacing the current state
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = persistence::load(reader)?;
        self.restore(data);
        log::info!("Loaded tracker state");
        Ok(())
    }

    pub fn export_json<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::export_json(writer, &self.snapshot())
    }

    pub fn import_json<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = persistence::import_json(reader)?;
        self.restore(data);
        log::info!("Imported tracker state from JSON");
        Ok(())
    }
}
