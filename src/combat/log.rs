//! Combat logging
//!
//! Records every combat and match event for post-match analysis. Entries
//! carry a human-readable message and, for HP changes and deaths, structured
//! data that the query helpers aggregate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::states::match_config::Team;

/// Identifier used for combatants in the log (e.g. "Top Archer #12")
pub type CombatantId = String;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Timestamp in match time (seconds since match start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Machine-readable payload for HP changes and deaths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StructuredEventData>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatLogEventType {
    /// Damage dealt (hits and DoT ticks)
    Damage,
    /// Healing done
    Healing,
    /// Status effect applied (freeze, taunt)
    StatusEffect,
    /// Unit died
    Death,
    /// Unit spawned
    Spawn,
    /// XP collected, level gained, building upgraded
    Progression,
    /// Card or building chosen
    Selection,
    /// Match event (start, end, etc.)
    MatchEvent,
}

/// Structured payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructuredEventData {
    Damage {
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        is_crit: bool,
        is_killing_blow: bool,
    },
    Healing {
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
    },
    Death {
        combatant: CombatantId,
        killer: Option<CombatantId>,
    },
}

/// Per-team summary written alongside the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMetadata {
    pub team: Team,
    pub kills: u32,
    pub level: u32,
    pub tower_health: f32,
    pub buildings: Vec<String>,
    pub cards: Vec<String>,
}

/// Match summary written alongside the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub winner: Option<Team>,
    pub duration_secs: f32,
    pub random_seed: Option<u64>,
    pub teams: Vec<TeamMetadata>,
}

#[derive(Serialize)]
struct SavedLog<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [CombatLogEntry],
}

/// The combat log storing all events
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current match time
    pub match_time: f32,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.push(event_type, message, None);
    }

    fn push(&mut self, event_type: CombatLogEventType, message: String, data: Option<StructuredEventData>) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            data,
        });
    }

    /// Log a damage event with structured data
    pub fn log_damage(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        is_crit: bool,
        is_killing_blow: bool,
        message: String,
    ) {
        self.push(
            CombatLogEventType::Damage,
            message,
            Some(StructuredEventData::Damage {
                source,
                target,
                ability,
                amount,
                is_crit,
                is_killing_blow,
            }),
        );
    }

    /// Log a healing event with structured data
    pub fn log_healing(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        message: String,
    ) {
        self.push(
            CombatLogEventType::Healing,
            message,
            Some(StructuredEventData::Healing {
                source,
                target,
                ability,
                amount,
            }),
        );
    }

    /// Log a death with structured data
    pub fn log_death(&mut self, combatant: CombatantId, killer: Option<CombatantId>, message: String) {
        self.push(
            CombatLogEventType::Death,
            message,
            Some(StructuredEventData::Death { combatant, killer }),
        );
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only HP-changing events (damage and healing)
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event_type,
                    CombatLogEventType::Damage | CombatLogEventType::Healing
                )
            })
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage a source dealt, keyed by ability
    pub fn damage_by_ability(&self, source: &str) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(StructuredEventData::Damage {
                source: s,
                ability,
                amount,
                ..
            }) = &entry.data
            {
                if s == source {
                    *totals.entry(ability.clone()).or_insert(0.0) += amount;
                }
            }
        }
        totals
    }

    /// Total damage dealt by a source
    pub fn total_damage_dealt(&self, source: &str) -> f32 {
        self.damage_by_ability(source).values().sum()
    }

    /// Damage entries landing on a target
    pub fn hits_on(&self, target: &str) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(&e.data, Some(StructuredEventData::Damage { target: t, .. }) if t == target)
            })
            .collect()
    }

    /// Number of killing blows landed by a source
    pub fn killing_blows(&self, source: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    &e.data,
                    Some(StructuredEventData::Damage { source: s, is_killing_blow: true, .. }) if s == source
                )
            })
            .count()
    }

    /// Save the log and match summary as JSON.
    ///
    /// Without an explicit path the file goes to `match_logs/` with a
    /// timestamped name. Returns the path written.
    pub fn save_to_file(&self, metadata: &MatchMetadata, path: Option<&str>) -> Result<String, String> {
        let filename = match path {
            Some(path) => path.to_string(),
            None => {
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                format!("match_logs/match_{}.json", stamp)
            }
        };

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        let json = serde_json::to_string_pretty(&SavedLog {
            metadata,
            entries: &self.entries,
        })
        .map_err(|e| format!("Failed to serialize combat log: {}", e))?;

        std::fs::write(&filename, json).map_err(|e| format!("Failed to write {}: {}", filename, e))?;
        Ok(filename)
    }
}
