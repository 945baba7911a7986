//! Integration tests for the tracker engine over the bundled game data.
//!
//! Exercises: progress edits → item report → section confirmation
//! → save/load and JSON export, with both talent availability policies.

use std::fs::File;

use ascension_core::config::{load_config, parse_game_data};
use ascension_core::prelude::*;
use ascension_logic::bucket::SectionState;
use ascension_logic::config::{TalentAvailabilityPolicy, TrackerConfig};
use ascension_logic::pulls::PullOutcome;

const MATERIALS_JSON: &str = include_str!("../../../data/materials.json");
const CONFIG_JSON: &str = include_str!("../../../data/config.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn tracker(policy: TalentAvailabilityPolicy) -> Tracker {
    let data = parse_game_data(MATERIALS_JSON).unwrap();
    let config = TrackerConfig {
        talent_availability_policy: policy,
        ..TrackerConfig::default()
    };
    Tracker::new(data, config)
}

/// Enter exactly what every section of `item` requires.
fn fill(tracker: &mut Tracker, item: &str) {
    for bucket in tracker.data().buckets(item).unwrap() {
        for entry in &bucket.entries {
            for (key, required) in entry.progress_keys() {
                tracker.update_progress(item, key, required as i64).unwrap();
            }
        }
    }
}

// ── Config ─────────────────────────────────────────────────────────────

#[test]
fn bundled_config_matches_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, CONFIG_JSON).unwrap();
    assert_eq!(load_config(&path).unwrap(), TrackerConfig::default());
}

#[test]
fn oversized_recharge_interval_loads_and_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"resin":{"recharge_minutes":400000000000000}}"#).unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.resin.recharge_minutes, 400_000_000_000_000);

    let data = parse_game_data(MATERIALS_JSON).unwrap();
    let mut tracker = Tracker::new(data, config);
    tracker.set_resin(0, 0);
    assert_eq!(tracker.tick(1_000_000), 0);
    assert_eq!(tracker.resin_status(1_000_000).current, 0);
}

// ── Sections ───────────────────────────────────────────────────────────

#[test]
fn fresh_item_has_nothing_to_confirm() {
    let tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    let report = tracker.item_report("Lyney").unwrap();
    assert_eq!(report.sections.len(), 3);
    assert!(report.sections.iter().all(|s| !s.can_confirm()));
    assert!(report
        .sections
        .iter()
        .all(|s| s.state == SectionState::Open));
}

#[test]
fn filled_item_collects_every_section() {
    let mut tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    fill(&mut tracker, "Furina");

    for kind in BucketKind::ALL {
        assert!(tracker.item_report("Furina").unwrap().section(kind).unwrap().can_confirm());
        assert_eq!(
            tracker.confirm_section("Furina", kind),
            Ok(SectionState::Collected)
        );
    }

    let report = tracker.item_report("Furina").unwrap();
    for section in &report.sections {
        assert_eq!(section.title, section.report.kind.collected_title());
        assert!(!section.can_confirm());
    }
}

#[test]
fn collected_flag_survives_count_edits() {
    let mut tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    fill(&mut tracker, "Lyney");
    tracker
        .confirm_section("Lyney", BucketKind::Talents)
        .unwrap();

    tracker
        .update_progress_from_input("Lyney", "crown_of_insight", "abc")
        .unwrap();
    assert_eq!(tracker.progress.get("Lyney", "crown_of_insight"), 0);
    assert_eq!(
        tracker.section_state("Lyney", BucketKind::Talents),
        SectionState::Collected
    );

    // Reopened and now short, so it cannot be collected again
    tracker.edit_section("Lyney", BucketKind::Talents).unwrap();
    assert!(matches!(
        tracker.confirm_section("Lyney", BucketKind::Talents),
        Err(TrackerError::SectionNotSatisfied { .. })
    ));
}

#[test]
fn weapon_has_no_talent_section() {
    let mut tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    let weapon = tracker.data().item_names(ascension_logic::gamedata::ItemKind::Weapon)[0]
        .to_string();
    assert!(matches!(
        tracker.confirm_section(&weapon, BucketKind::Talents),
        Err(TrackerError::UnknownSection { .. })
    ));

    fill(&mut tracker, &weapon);
    assert_eq!(
        tracker.confirm_section(&weapon, BucketKind::Ascension),
        Ok(SectionState::Collected)
    );
}

// ── Distribution policies ──────────────────────────────────────────────

#[test]
fn policies_report_different_availability() {
    let mut uncapped = tracker(TalentAvailabilityPolicy::Uncapped);
    let mut capped = tracker(TalentAvailabilityPolicy::Capped);
    for t in [&mut uncapped, &mut capped] {
        t.update_progress("Lyney", "meshing_gear", 100).unwrap();
    }

    // 18 for ascension, 82 left, talents need 18
    assert_eq!(uncapped.distribution("Lyney").unwrap()["meshing_gear"].available, 82);
    assert_eq!(capped.distribution("Lyney").unwrap()["meshing_gear"].available, 18);
    assert_eq!(uncapped.progress.get("Lyney", "meshing_gear"), 100);
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_file_roundtrip() {
    let mut tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    fill(&mut tracker, "Lyney");
    tracker
        .confirm_section("Lyney", BucketKind::Experience)
        .unwrap();
    tracker.pulls.set_from_input("standard", "33");
    tracker
        .record_five_star("standard", PullOutcome::Standard, 1_000)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ascension.sav");
    tracker.save(File::create(&path).unwrap()).unwrap();

    let mut restored = self::tracker(TalentAvailabilityPolicy::Uncapped);
    restored.load(File::open(&path).unwrap()).unwrap();
    assert_eq!(restored.progress, tracker.progress);
    assert_eq!(
        restored.section_state("Lyney", BucketKind::Experience),
        SectionState::Collected
    );
    assert_eq!(restored.pulls.history.len(), 1);
    assert_eq!(restored.pulls.history[0].pull_number, 33);
}

#[test]
fn json_export_roundtrip() {
    let mut tracker = tracker(TalentAvailabilityPolicy::Uncapped);
    tracker.update_progress("Furina", "energy_nectar", 12).unwrap();

    let mut buffer = Vec::new();
    tracker.export_json(&mut buffer).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.contains("\"energy_nectar\": 12"));

    let mut restored = self::tracker(TalentAvailabilityPolicy::Uncapped);
    restored.import_json(&buffer[..]).unwrap();
    assert_eq!(restored.progress.get("Furina", "energy_nectar"), 12);
}
