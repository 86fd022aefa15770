//! Data-Driven Unit Configuration
//!
//! Base stats for every unit class. The built-in table is the balance the
//! game ships with; `assets/config/units.ron` mirrors it so values can be
//! tuned without recompiling.
//!
//! ## Usage
//! ```ignore
//! let table = UnitStatTable::load_from_file(Path::new("assets/config/units.ron"))?;
//! let archer = table.get(UnitClass::Archer);
//! println!("Archer range: {}", archer.attack_range);
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::states::match_config::UnitClass;

/// Default location of the unit stat file
pub const UNIT_CONFIG_PATH: &str = "assets/config/units.ron";

/// Base stats of one unit class, before team modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_health: f32,
    pub damage: f32,
    /// Movement speed in units/s
    pub speed: f32,
    pub attack_range: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Built-in regeneration in HP/s
    #[serde(default)]
    pub regen: f32,
}

impl UnitStats {
    const fn new(max_health: f32, damage: f32, speed: f32, attack_range: f32, attack_cooldown: f32, regen: f32) -> Self {
        Self {
            max_health,
            damage,
            speed,
            attack_range,
            attack_cooldown,
            regen,
        }
    }

    /// Stats the game ships with
    pub fn builtin(class: UnitClass) -> Self {
        match class {
            UnitClass::Swordsman => Self::new(100.0, 20.0, 36.0, 15.0, 1.0, 0.0),
            UnitClass::Archer => Self::new(80.0, 45.0, 30.0, 65.0, 1.5, 0.0),
            UnitClass::Mage => Self::new(60.0, 35.0, 24.0, 60.0, 0.8, 0.0),
            UnitClass::Knight => Self::new(180.0, 25.0, 21.0, 18.0, 1.3, 0.0),
            UnitClass::Healer => Self::new(70.0, 2.0, 27.0, 14.0, 2.0, 0.0),
            UnitClass::Ogre => Self::new(2000.0, 40.0, 18.0, 35.0, 1.2, 5.0),
            UnitClass::Wraith => Self::new(1500.0, 50.0, 30.0, 40.0, 1.0, 2.0),
        }
    }

    fn validate(&self, class: UnitClass) -> Result<(), String> {
        let positive = [
            ("max_health", self.max_health),
            ("speed", self.speed),
            ("attack_range", self.attack_range),
            ("attack_cooldown", self.attack_cooldown),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{}.{} must be positive, got {}", class.name(), field, value));
            }
        }
        if self.damage < 0.0 || self.regen < 0.0 {
            return Err(format!("{} damage and regen cannot be negative", class.name()));
        }
        Ok(())
    }
}

/// Root structure of the units.ron file
#[derive(Debug, Serialize, Deserialize)]
pub struct UnitsConfig {
    pub units: HashMap<UnitClass, UnitStats>,
}

/// Base stats for every class
#[derive(Clone, Debug, PartialEq)]
pub struct UnitStatTable {
    stats: HashMap<UnitClass, UnitStats>,
}

impl Default for UnitStatTable {
    fn default() -> Self {
        Self {
            stats: UnitClass::all()
                .iter()
                .map(|&class| (class, UnitStats::builtin(class)))
                .collect(),
        }
    }
}

impl UnitStatTable {
    /// Base stats for a class, falling back to the built-in values
    pub fn get(&self, class: UnitClass) -> UnitStats {
        self.stats
            .get(&class)
            .copied()
            .unwrap_or_else(|| UnitStats::builtin(class))
    }

    /// Override one class
    pub fn set(&mut self, class: UnitClass, stats: UnitStats) {
        self.stats.insert(class, stats);
    }

    /// Parse a RON document; every class must be present and sane.
    pub fn from_ron_str(contents: &str) -> Result<Self, String> {
        let config: UnitsConfig =
            ron::from_str(contents).map_err(|e| format!("Failed to parse unit config: {}", e))?;

        let missing: Vec<&str> = UnitClass::all()
            .iter()
            .filter(|class| !config.units.contains_key(class))
            .map(|class| class.name())
            .collect();
        if !missing.is_empty() {
            return Err(format!("Missing unit definitions: {:?}", missing));
        }

        for (class, stats) in &config.units {
            stats.validate(*class)?;
        }

        Ok(Self { stats: config.units })
    }

    /// Load from a RON file on disk
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let table = Self::from_ron_str(&contents)?;
        info!("Loaded {} unit definitions from {}", table.stats.len(), path.display());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_ron_matches_builtin_table() {
        let shipped = UnitStatTable::from_ron_str(include_str!("../../../assets/config/units.ron"))
            .expect("shipped unit config should parse");
        assert_eq!(shipped, UnitStatTable::default());
    }

    #[test]
    fn test_missing_class_is_rejected() {
        let doc = r#"(units: { Swordsman: (max_health: 100.0, damage: 20.0, speed: 36.0, attack_range: 15.0, attack_cooldown: 1.0) })"#;
        let err = UnitStatTable::from_ron_str(doc).unwrap_err();
        assert!(err.contains("Missing"), "unexpected error: {}", err);
    }

    #[test]
    fn test_only_elites_regenerate_by_default() {
        for class in UnitClass::all() {
            let stats = UnitStats::builtin(*class);
            assert_eq!(stats.regen > 0.0, class.is_elite(), "{:?}", class);
        }
    }
}
