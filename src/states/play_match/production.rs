//! Production & Spawning
//!
//! Buildings occupy a team's slots and each raises the alive cap of one unit
//! class. Every tick the spawner tops each class up to its cap, one unit per
//! class per tick, gated by a per-class respawn timer.

use serde::{Deserialize, Serialize};

use crate::states::match_config::UnitClass;

/// A building in one of a team's slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionBuilding {
    pub class: UnitClass,
    /// Alive units of `class` this building sustains
    pub cap: u32,
}

impl ProductionBuilding {
    pub fn new(class: UnitClass) -> Self {
        Self { class, cap: 1 }
    }

    pub fn max_cap(&self) -> u32 {
        self.class.max_building_cap()
    }

    pub fn can_upgrade(&self) -> bool {
        self.cap < self.max_cap()
    }

    /// Raise the cap by one. Returns false when already at max.
    pub fn upgrade(&mut self) -> bool {
        if !self.can_upgrade() {
            return false;
        }
        self.cap += 1;
        true
    }
}

/// One entry of a building offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingChoice {
    pub class: UnitClass,
    pub name: String,
}

impl BuildingChoice {
    pub fn new(class: UnitClass) -> Self {
        Self {
            class,
            name: class.building_name().to_string(),
        }
    }
}

/// Every building a team may be offered: one per unit class.
pub fn building_catalog() -> Vec<BuildingChoice> {
    UnitClass::all().iter().copied().map(BuildingChoice::new).collect()
}

/// Summed alive caps per class, indexed by `UnitClass::index`.
pub fn capacity_by_class(buildings: &[Option<ProductionBuilding>]) -> [u32; UnitClass::COUNT] {
    let mut capacity = [0; UnitClass::COUNT];
    for building in buildings.iter().flatten() {
        capacity[building.class.index()] += building.cap;
    }
    capacity
}

/// Decide which classes spawn this tick.
///
/// A class under its cap spawns once its timer has run out, which resets the
/// timer to `respawn_delay`; otherwise the timer counts down. Classes at cap
/// leave their timers untouched. At most one unit per class per call.
pub fn plan_spawns(
    capacity: &[u32; UnitClass::COUNT],
    alive: &[u32; UnitClass::COUNT],
    timers: &mut [f32; UnitClass::COUNT],
    dt: f32,
    respawn_delay: f32,
) -> Vec<UnitClass> {
    let mut spawns = Vec::new();
    for &class in UnitClass::all() {
        let i = class.index();
        if alive[i] >= capacity[i] {
            continue;
        }
        if timers[i] <= 0.0 {
            spawns.push(class);
            timers[i] = respawn_delay;
        } else {
            timers[i] -= dt;
        }
    }
    spawns
}

/// First empty slot, if any
pub fn free_slot(buildings: &[Option<ProductionBuilding>]) -> Option<usize> {
    buildings.iter().position(Option::is_none)
}

/// Upgrade target for a level past the building phase.
///
/// Starts at `preferred` and walks forward round-robin to the first slot
/// whose building can still be upgraded.
pub fn upgrade_slot(buildings: &[Option<ProductionBuilding>], preferred: usize) -> Option<usize> {
    let len = buildings.len();
    (0..len)
        .map(|offset| (preferred + offset) % len)
        .find(|&slot| buildings[slot].is_some_and(|b| b.can_upgrade()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::play_match::constants::MAX_BUILDING_CAP;

    fn counts(values: &[(UnitClass, u32)]) -> [u32; UnitClass::COUNT] {
        let mut out = [0; UnitClass::COUNT];
        for (class, value) in values {
            out[class.index()] = *value;
        }
        out
    }

    #[test]
    fn test_capacity_sums_buildings_of_same_class() {
        let mut barracks = ProductionBuilding::new(UnitClass::Swordsman);
        barracks.upgrade();
        let buildings = vec![
            Some(barracks),
            None,
            Some(ProductionBuilding::new(UnitClass::Swordsman)),
            Some(ProductionBuilding::new(UnitClass::Mage)),
        ];
        let capacity = capacity_by_class(&buildings);
        assert_eq!(capacity[UnitClass::Swordsman.index()], 3);
        assert_eq!(capacity[UnitClass::Mage.index()], 1);
        assert_eq!(capacity[UnitClass::Archer.index()], 0);
    }

    #[test]
    fn test_spawns_at_most_one_per_class_per_tick() {
        let capacity = counts(&[(UnitClass::Swordsman, 5)]);
        let alive = counts(&[]);
        let mut timers = [0.0; UnitClass::COUNT];

        let spawns = plan_spawns(&capacity, &alive, &mut timers, 0.1, 0.0);
        assert_eq!(spawns, vec![UnitClass::Swordsman]);
    }

    #[test]
    fn test_respawn_delay_gates_spawns() {
        let capacity = counts(&[(UnitClass::Archer, 2)]);
        let alive = counts(&[]);
        let mut timers = [0.0; UnitClass::COUNT];

        assert_eq!(plan_spawns(&capacity, &alive, &mut timers, 0.5, 1.0).len(), 1);
        assert!(plan_spawns(&capacity, &alive, &mut timers, 0.5, 1.0).is_empty());
        assert!(plan_spawns(&capacity, &alive, &mut timers, 0.5, 1.0).is_empty());
        assert_eq!(plan_spawns(&capacity, &alive, &mut timers, 0.5, 1.0).len(), 1);
    }

    #[test]
    fn test_no_spawns_at_cap() {
        let capacity = counts(&[(UnitClass::Knight, 2)]);
        let alive = counts(&[(UnitClass::Knight, 2)]);
        let mut timers = [0.0; UnitClass::COUNT];
        assert!(plan_spawns(&capacity, &alive, &mut timers, 0.1, 0.0).is_empty());
    }

    #[test]
    fn test_elite_buildings_cannot_upgrade() {
        let mut den = ProductionBuilding::new(UnitClass::Ogre);
        assert!(!den.upgrade());
        assert_eq!(den.cap, 1);

        let mut range = ProductionBuilding::new(UnitClass::Archer);
        for _ in 0..10 {
            range.upgrade();
        }
        assert_eq!(range.cap, MAX_BUILDING_CAP);
    }

    #[test]
    fn test_upgrade_slot_skips_maxed_buildings() {
        let mut maxed = ProductionBuilding::new(UnitClass::Mage);
        while maxed.upgrade() {}
        let buildings = vec![
            Some(maxed),
            Some(ProductionBuilding::new(UnitClass::Ogre)),
            Some(ProductionBuilding::new(UnitClass::Healer)),
        ];
        assert_eq!(upgrade_slot(&buildings, 0), Some(2));
        assert_eq!(upgrade_slot(&buildings, 2), Some(2));

        let all_maxed = vec![Some(maxed), Some(ProductionBuilding::new(UnitClass::Wraith))];
        assert_eq!(upgrade_slot(&all_maxed, 0), None);
    }
}
