//! Unit tests for combat log query and aggregation methods
//!
//! These tests verify that the CombatLog correctly:
//! - Aggregates damage by ability
//! - Counts killing blows
//! - Filters entries by type
//! - Names combatants consistently during a real match

use clashsim::combat::log::{
    CombatLog, CombatLogEventType, MatchMetadata, StructuredEventData,
};
use clashsim::{MatchSettings, MatchSim, Team, UnitClass};
use regex::Regex;

fn create_test_log() -> CombatLog {
    CombatLog::default()
}

fn hit(log: &mut CombatLog, source: &str, target: &str, ability: &str, amount: f32, killing_blow: bool) {
    log.log_damage(
        source.to_string(),
        target.to_string(),
        ability.to_string(),
        amount,
        false,
        killing_blow,
        "Test message".to_string(),
    );
}

// =============================================================================
// Damage Aggregation Tests
// =============================================================================

#[test]
fn test_damage_by_ability_empty_log() {
    let log = create_test_log();
    let damage = log.damage_by_ability("Top Archer #1");
    assert!(damage.is_empty(), "Empty log should return empty damage map");
}

#[test]
fn test_damage_by_ability_single_source() {
    let mut log = create_test_log();

    hit(&mut log, "Top Mage #1", "Bottom Knight #2", "Fireball", 35.0, false);
    hit(&mut log, "Top Mage #1", "Bottom Knight #2", "Fireball", 35.0, false);
    hit(&mut log, "Top Mage #1", "Bottom Archer #3", "Fireball Splash", 10.5, false);

    let damage = log.damage_by_ability("Top Mage #1");

    assert_eq!(damage.len(), 2, "Should have 2 different abilities");
    assert_eq!(damage.get("Fireball"), Some(&70.0), "Fireball should total 70 damage");
    assert_eq!(damage.get("Fireball Splash"), Some(&10.5));
}

#[test]
fn test_damage_by_ability_multiple_sources() {
    let mut log = create_test_log();

    hit(&mut log, "Top Swordsman #1", "Bottom Swordsman #2", "Slash", 20.0, false);
    hit(&mut log, "Bottom Swordsman #2", "Top Swordsman #1", "Slash", 20.0, false);
    hit(&mut log, "Bottom Swordsman #2", "Top Swordsman #1", "Slash", 20.0, false);

    assert_eq!(log.total_damage_dealt("Top Swordsman #1"), 20.0);
    assert_eq!(log.total_damage_dealt("Bottom Swordsman #2"), 40.0);
}

#[test]
fn test_hits_on_target() {
    let mut log = create_test_log();

    hit(&mut log, "Top Archer #1", "Bottom Tower", "Arrow", 45.0, false);
    hit(&mut log, "Top Archer #1", "Bottom Ogre #4", "Arrow", 45.0, false);
    hit(&mut log, "Top Swordsman #2", "Bottom Tower", "Slash", 20.0, false);

    assert_eq!(log.hits_on("Bottom Tower").len(), 2);
    assert_eq!(log.hits_on("Bottom Ogre #4").len(), 1);
    assert!(log.hits_on("Top Tower").is_empty());
}

// =============================================================================
// Killing Blow Tests
// =============================================================================

#[test]
fn test_killing_blows_none() {
    let mut log = create_test_log();
    hit(&mut log, "Top Knight #1", "Bottom Mage #2", "Lance", 25.0, false);
    assert_eq!(log.killing_blows("Top Knight #1"), 0);
}

#[test]
fn test_killing_blows_counted() {
    let mut log = create_test_log();

    hit(&mut log, "Top Knight #1", "Bottom Mage #2", "Lance", 25.0, false);
    hit(&mut log, "Top Knight #1", "Bottom Mage #2", "Lance", 35.0, true);
    hit(&mut log, "Top Knight #1", "Bottom Healer #3", "Lance", 70.0, true);
    hit(&mut log, "Bottom Archer #4", "Top Knight #1", "Arrow", 45.0, false);

    assert_eq!(log.killing_blows("Top Knight #1"), 2);
    assert_eq!(log.killing_blows("Bottom Archer #4"), 0);
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_filter_by_type() {
    let mut log = create_test_log();

    hit(&mut log, "Top Archer #1", "Bottom Mage #2", "Arrow", 45.0, false);
    log.log_healing(
        "Bottom Healer #3".to_string(),
        "Bottom Mage #2".to_string(),
        "Mend".to_string(),
        15.0,
        "Test".to_string(),
    );
    log.log(CombatLogEventType::MatchEvent, "Match started".to_string());

    assert_eq!(log.filter_by_type(CombatLogEventType::Damage).len(), 1);
    assert_eq!(log.filter_by_type(CombatLogEventType::Healing).len(), 1);
    assert_eq!(log.filter_by_type(CombatLogEventType::MatchEvent).len(), 1);
    assert_eq!(log.hp_changes_only().len(), 2);
}

#[test]
fn test_recent_entries() {
    let mut log = create_test_log();
    for i in 0..5 {
        log.log(CombatLogEventType::MatchEvent, format!("Event {}", i));
    }
    let recent = log.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].message, "Event 3");
    assert_eq!(recent[1].message, "Event 4");
}

#[test]
fn test_death_entries_carry_killer() {
    let mut log = create_test_log();
    log.log_death(
        "Bottom Swordsman #2".to_string(),
        Some("Top Ogre #1".to_string()),
        "Bottom Swordsman #2 was killed by Top Ogre #1".to_string(),
    );
    let deaths = log.filter_by_type(CombatLogEventType::Death);
    assert_eq!(deaths.len(), 1);
    assert_eq!(
        deaths[0].data,
        Some(StructuredEventData::Death {
            combatant: "Bottom Swordsman #2".to_string(),
            killer: Some("Top Ogre #1".to_string()),
        })
    );
}

// =============================================================================
// Live Match Tests
// =============================================================================

#[test]
fn test_match_log_names_follow_one_format() {
    let mut sim = MatchSim::new(MatchSettings {
        base_crit_chance: 0.0,
        opening_building_selection: false,
        random_seed: Some(11),
        ..MatchSettings::default()
    });
    sim.start();
    sim.spawn_unit(Team::Top, UnitClass::Swordsman, bevy::math::Vec2::new(450.0, 270.0));
    sim.spawn_unit(Team::Bottom, UnitClass::Archer, bevy::math::Vec2::new(450.0, 290.0));
    for _ in 0..20 {
        sim.advance(0.1);
    }

    let name = Regex::new(r"^(Top|Bottom) (Swordsman|Archer|Mage|Knight|Healer|Ogre|Wraith) #\d+$|^(Top|Bottom) Tower$")
        .unwrap();
    let mut checked = 0;
    for entry in &sim.combat_log().entries {
        if let Some(StructuredEventData::Damage { source, target, .. }) = &entry.data {
            assert!(name.is_match(source), "unexpected source name '{}'", source);
            assert!(name.is_match(target), "unexpected target name '{}'", target);
            checked += 1;
        }
    }
    assert!(checked > 0, "the fight should have produced damage entries");
}

#[test]
fn test_save_to_file_writes_metadata_and_entries() {
    let mut log = create_test_log();
    hit(&mut log, "Top Archer #1", "Bottom Tower", "Arrow", 45.0, false);

    let path = std::env::temp_dir().join(format!("clashsim_log_test_{}.json", std::process::id()));
    let metadata = MatchMetadata {
        winner: Some(Team::Top),
        duration_secs: 12.5,
        random_seed: Some(1),
        teams: vec![],
    };
    let written = log
        .save_to_file(&metadata, Some(path.to_str().unwrap()))
        .expect("log should save");

    let contents = std::fs::read_to_string(&written).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["metadata"]["winner"], "Top");
    assert_eq!(json["entries"].as_array().unwrap().len(), 1);
    let _ = std::fs::remove_file(&written);
}
