//! Ascension Headless Validation Harness
//!
//! Validates the game-data table and the tracker logic without a UI.
//! Runs entirely in-process — no storage beyond memory, no rendering.
//!
//! Usage:
//!   cargo run -p ascension-simtest
//!   cargo run -p ascension-simtest -- --verbose
//!   cargo run -p ascension-simtest -- --data path/to/materials.json --config data/config.json

use std::path::PathBuf;

use ascension_core::config::{load_config, load_game_data, parse_game_data};
use ascension_core::engine::Tracker;
use ascension_logic::bucket::{craft_bucket, is_bucket_satisfied, SectionState};
use ascension_logic::config::{TalentAvailabilityPolicy, TrackerConfig};
use ascension_logic::constants::resin;
use ascension_logic::conversion::{cascade, convert};
use ascension_logic::distribution::distribute;
use ascension_logic::expedition::{durations_ms, ExpeditionPhase};
use ascension_logic::gamedata::{GameData, ItemKind};
use ascension_logic::pulls::PullOutcome;
use ascension_logic::requirements::{BucketKind, MaterialCounts, Requirement};
use clap::Parser;

// ── Game data (same JSON the tracker ships with) ────────────────────────
const MATERIALS_JSON: &str = include_str!("../../../data/materials.json");

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print every check, not only failures
    #[arg(short, long)]
    verbose: bool,

    /// Game-data table to validate instead of the bundled one
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Tracker configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    println!("=== Ascension Validation Harness ===\n");

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("config error: {}", e);
                std::process::exit(2);
            }
        },
        None => TrackerConfig::default(),
    };

    let data = match &args.data {
        Some(path) => load_game_data(path),
        None => parse_game_data(MATERIALS_JSON),
    };
    let data = match data {
        Ok(d) => d,
        Err(e) => {
            eprintln!("game data error: {}", e);
            std::process::exit(2);
        }
    };

    log::info!(
        "Validating {} characters and {} weapons (rate {}, {:?} talent availability)",
        data.characters.len(),
        data.weapons.len(),
        config.rate(),
        config.talent_availability_policy
    );

    let mut results = Vec::new();

    // 1. Game data integrity
    results.extend(validate_game_data(&data, args.verbose));

    // 2. Conversion properties
    results.extend(validate_conversion(args.verbose));

    // 3. Shared pool distribution
    results.extend(validate_distribution(args.verbose));

    // 4. Bucket satisfaction for every item
    results.extend(validate_buckets(&data, &config, args.verbose));

    // 5. Tracker section lifecycle and persistence
    results.extend(validate_tracker(&data, &config, args.verbose));

    // 6. Resin, expedition and pulls
    results.extend(validate_resin_and_pulls(&data, &config, args.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        log::warn!("{} checks failed", failed);
        std::process::exit(1);
    }
}

/// Fill every progress key of an item with exactly its requirement.
fn exact_progress(tracker: &mut Tracker, item: &str) {
    let Some(buckets) = tracker.data().buckets(item) else {
        return;
    };
    for bucket in &buckets {
        for entry in &bucket.entries {
            for (key, required) in entry.progress_keys() {
                if let Err(e) = tracker.update_progress(item, key, required as i64) {
                    log::warn!("{}: could not set {}: {}", item, key, e);
                }
            }
        }
    }
}

/// Base-tier count that crafts exactly enough for every tier above it.
fn base_tier_needed(required: &[u64], rate: u64) -> u64 {
    required
        .iter()
        .rev()
        .fold(0u64, |above, &r| r + rate * above)
}

// ── 1. Game Data ────────────────────────────────────────────────────────

fn validate_game_data(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Game Data ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "data_not_empty".into(),
        passed: !data.characters.is_empty() && !data.weapons.is_empty(),
        detail: format!(
            "{} characters, {} weapons",
            data.characters.len(),
            data.weapons.len()
        ),
    });

    let issues = data.validate();
    results.push(TestResult {
        name: "data_structure_valid".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "no structural issues".into()
        } else {
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let bad_sections: Vec<_> = data
        .items()
        .filter(|i| {
            let expected = match i.kind() {
                ItemKind::Character => 3,
                ItemKind::Weapon => 1,
            };
            i.buckets().len() != expected
        })
        .map(|i| i.name().to_string())
        .collect();
    results.push(TestResult {
        name: "data_section_counts".into(),
        passed: bad_sections.is_empty(),
        detail: if bad_sections.is_empty() {
            "characters have 3 sections, weapons 1".into()
        } else {
            format!("unexpected sections: {}", bad_sections.join(", "))
        },
    });

    if verbose {
        println!("  Chains per item:");
        for item in data.items() {
            let chains: usize = item.buckets().iter().map(|b| b.chains().count()).sum();
            println!("    {:30} {} chains", item.name(), chains);
        }
    }

    results
}

// ── 2. Conversion ───────────────────────────────────────────────────────

fn validate_conversion(_verbose: bool) -> Vec<TestResult> {
    println!("--- Conversion ---");
    let mut results = Vec::new();

    let c = convert(10, 1, 3);
    results.push(TestResult {
        name: "conversion_scenario".into(),
        passed: c.converted == 3 && c.remaining == 9,
        detail: format!("convert(10, 1, 3) → {:?}", c),
    });

    let mut no_surplus_ok = true;
    let mut floor_ok = true;
    for rate in 1..5u64 {
        for required in 0..15u64 {
            for on_hand in 0..50u64 {
                let c = convert(on_hand, required, rate);
                if on_hand <= required && (c.converted != 0 || c.remaining != 0) {
                    no_surplus_ok = false;
                }
                if c.converted != on_hand.saturating_sub(required) / rate {
                    floor_ok = false;
                }
            }
        }
    }
    results.push(TestResult {
        name: "conversion_no_surplus_no_craft".into(),
        passed: no_surplus_ok,
        detail: "on_hand <= required never converts".into(),
    });
    results.push(TestResult {
        name: "conversion_floor_division".into(),
        passed: floor_ok,
        detail: "converted == floor(surplus / rate)".into(),
    });

    let steps = cascade(&[(10, 1), (0, 2), (0, 1)], 3);
    results.push(TestResult {
        name: "conversion_chain_scenario".into(),
        passed: steps[1].effective == 3 && steps[1].converted == 0 && !steps[2].is_satisfied(),
        detail: format!(
            "tier1 effective={} tier2 effective={}",
            steps[1].effective, steps[2].effective
        ),
    });

    let mut monotonic = true;
    let mut prev: Option<Vec<u64>> = None;
    for base in 0..200u64 {
        let converted: Vec<u64> = cascade(&[(base, 3), (1, 4), (2, 2), (0, 1)], 3)
            .iter()
            .map(|s| s.converted)
            .collect();
        if let Some(p) = &prev {
            if p.iter().zip(&converted).any(|(a, b)| b < a) {
                monotonic = false;
            }
        }
        prev = Some(converted);
    }
    results.push(TestResult {
        name: "conversion_chain_monotonic".into(),
        passed: monotonic,
        detail: "raising tier 0 never lowers any downstream conversion".into(),
    });

    results
}

// ── 3. Distribution ─────────────────────────────────────────────────────

fn validate_distribution(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shared Pool Distribution ---");
    let mut results = Vec::new();

    let mut conserved = true;
    for total in 0..60u64 {
        for asc in 0..30u64 {
            for talent in [0u64, 1, 10] {
                for policy in [
                    TalentAvailabilityPolicy::Capped,
                    TalentAvailabilityPolicy::Uncapped,
                ] {
                    let d = distribute(total, asc, talent, policy);
                    if d.ascension_used + d.remainder != total || d.ascension_used > asc {
                        conserved = false;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "distribution_conservation".into(),
        passed: conserved,
        detail: "ascension_used + remainder == total".into(),
    });

    let capped = distribute(5, 3, 1, TalentAvailabilityPolicy::Capped);
    let uncapped = distribute(5, 3, 1, TalentAvailabilityPolicy::Uncapped);
    results.push(TestResult {
        name: "distribution_policies".into(),
        passed: capped.talent_available == 1 && uncapped.talent_available == 2,
        detail: format!(
            "capped={} uncapped={}",
            capped.talent_available, uncapped.talent_available
        ),
    });

    results
}

// ── 4. Buckets ──────────────────────────────────────────────────────────

fn validate_buckets(data: &GameData, config: &TrackerConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Requirement Buckets ---");
    let mut results = Vec::new();

    for item in data.items() {
        let name = item.name();

        // Exact requirements satisfy every section
        let mut tracker = Tracker::new(data.clone(), *config);
        exact_progress(&mut tracker, name);
        let report = match tracker.item_report(name) {
            Ok(r) => r,
            Err(e) => {
                results.push(TestResult {
                    name: format!("bucket_report_{}", name),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let unmet: Vec<_> = report
            .sections
            .iter()
            .filter(|s| !s.report.satisfied)
            .map(|s| s.title.clone())
            .collect();
        results.push(TestResult {
            name: format!("bucket_exact_{}", name),
            passed: unmet.is_empty(),
            detail: if unmet.is_empty() {
                format!("{} sections satisfied", report.sections.len())
            } else {
                format!("unmet: {}", unmet.join(", "))
            },
        });

        // Empty progress never satisfies ascension
        let empty = MaterialCounts::new();
        let buckets = item.buckets();
        let ascension_open = buckets
            .iter()
            .filter(|b| b.kind == BucketKind::Ascension)
            .all(|b| {
                let crafted = craft_bucket(b, &empty, config.rate());
                !is_bucket_satisfied(&b.entries, &empty, &crafted)
            });
        results.push(TestResult {
            name: format!("bucket_empty_{}", name),
            passed: ascension_open,
            detail: "no progress → ascension open".into(),
        });

        // Each chain can be satisfied from its base tier alone
        let mut chain_failures = Vec::new();
        for bucket in &buckets {
            for entry in &bucket.entries {
                let Requirement::Chain(chain) = &entry.requirement else {
                    continue;
                };
                let required: Vec<u64> = chain.tiers.iter().map(|t| t.required).collect();
                let mut progress = MaterialCounts::new();
                progress.insert(
                    chain.tiers[0].key.clone(),
                    base_tier_needed(&required, config.rate()),
                );
                let crafted = craft_bucket(bucket, &progress, config.rate());
                let ok = chain.tiers.iter().all(|t| {
                    let c = crafted.get(&t.key).map(|c| c.effective()).unwrap_or(0);
                    c >= t.required
                });
                if !ok {
                    chain_failures.push(entry.key.clone());
                }
            }
        }
        results.push(TestResult {
            name: format!("bucket_base_tier_crafting_{}", name),
            passed: chain_failures.is_empty(),
            detail: if chain_failures.is_empty() {
                "every chain craftable from its base tier".into()
            } else {
                format!("not craftable: {}", chain_failures.join(", "))
            },
        });

        if verbose {
            for section in &report.sections {
                println!(
                    "  {:30} {:28} {} entries",
                    name,
                    section.title,
                    section.report.entries.len()
                );
            }
        }
    }

    results
}

// ── 5. Tracker lifecycle ────────────────────────────────────────────────

fn validate_tracker(data: &GameData, config: &TrackerConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Tracker Lifecycle ---");
    let mut results = Vec::new();

    let Some(item) = data.item_names(ItemKind::Character).first().map(|s| s.to_string()) else {
        return results;
    };
    let mut tracker = Tracker::new(data.clone(), *config);

    let rejected = tracker
        .confirm_section(&item, BucketKind::Ascension)
        .is_err();
    results.push(TestResult {
        name: "tracker_reject_unsatisfied".into(),
        passed: rejected,
        detail: "cannot collect an unsatisfied section".into(),
    });

    exact_progress(&mut tracker, &item);
    let confirmed = tracker.confirm_section(&item, BucketKind::Ascension);
    results.push(TestResult {
        name: "tracker_confirm".into(),
        passed: confirmed == Ok(SectionState::Collected),
        detail: format!("{:?}", confirmed),
    });

    let mut buffer = Vec::new();
    let saved = tracker.save(&mut buffer);
    let mut restored = Tracker::new(data.clone(), *config);
    let loaded = restored.load(&buffer[..]);
    let roundtrip = saved.is_ok()
        && loaded.is_ok()
        && restored.section_state(&item, BucketKind::Ascension) == SectionState::Collected
        && restored.progress == tracker.progress;
    results.push(TestResult {
        name: "tracker_save_load".into(),
        passed: roundtrip,
        detail: format!("{} byte save", buffer.len()),
    });

    let reopened = tracker.edit_section(&item, BucketKind::Ascension);
    results.push(TestResult {
        name: "tracker_reopen".into(),
        passed: reopened == Ok(SectionState::Open),
        detail: format!("{:?}", reopened),
    });

    results
}

// ── 6. Resin, Expedition & Pulls ────────────────────────────────────────

fn validate_resin_and_pulls(
    data: &GameData,
    config: &TrackerConfig,
    _verbose: bool,
) -> Vec<TestResult> {
    println!("--- Resin, Expedition & Pulls ---");
    let mut results = Vec::new();
    let mut tracker = Tracker::new(data.clone(), *config);
    let minute = 60_000u64;

    tracker.set_resin(0, 0);
    let interval = config.recharge_minutes().saturating_mul(minute);
    let gained = tracker.tick(interval.saturating_mul(10));
    results.push(TestResult {
        name: "resin_regenerates".into(),
        passed: gained == 10,
        detail: format!("{} resin after 10 intervals", gained),
    });

    let full_after = interval.saturating_mul(config.resin.max as u64);
    let later = full_after.saturating_mul(2);
    tracker.tick(later);
    let status = tracker.resin_status(later);
    results.push(TestResult {
        name: "resin_caps".into(),
        passed: status.current == config.resin.max && status.seconds_to_full == 0,
        detail: format!("{}/{} ({})", status.current, status.max, status.time_to_full),
    });

    let mut costs = Vec::new();
    for _ in 0..4 {
        if let Ok(cost) = tracker.defeat_weekly_boss(later) {
            costs.push(cost);
        }
    }
    results.push(TestResult {
        name: "resin_weekly_boss_costs".into(),
        passed: costs
            == vec![
                resin::WEEKLY_BOSS_COST,
                resin::WEEKLY_BOSS_COST,
                resin::WEEKLY_BOSS_COST,
                resin::WEEKLY_BOSS_FULL_COST,
            ],
        detail: format!("{:?}", costs),
    });

    let eight_hours = durations_ms()[1];
    let started = tracker
        .select_expedition(eight_hours, true)
        .and_then(|_| tracker.start_expedition(0));
    let six_hours = eight_hours / 4 * 3;
    let halfway = tracker.expedition_status(six_hours / 2);
    tracker.tick(six_hours);
    let done = tracker.expedition_status(six_hours);
    results.push(TestResult {
        name: "expedition_reduced_run".into(),
        passed: started.is_ok()
            && halfway.time_left == "03:00:00"
            && done.phase == ExpeditionPhase::Finished
            && done.progress_percent == 100.0,
        detail: format!(
            "halfway {} ({:.0}%), then {:?}",
            halfway.time_left, halfway.progress_percent, done.phase
        ),
    });

    tracker.pulls.set_from_input("event", "74");
    let record = tracker.record_five_star("event", PullOutcome::Featured, 0);
    let reset = tracker.pulls.banner("event").map(|b| b.count) == Some(0);
    results.push(TestResult {
        name: "pulls_record_resets".into(),
        passed: matches!(&record, Ok(r) if r.pull_number == 74) && reset,
        detail: record
            .map(|r| format!("{} at {}", r.result, r.pull_number))
            .unwrap_or_else(|e| e.to_string()),
    });

    results
}
