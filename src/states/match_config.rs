//! Match configuration data structures
//!
//! Teams, unit classes, and the `MatchSettings` a match is created from.

use serde::{Deserialize, Serialize};

use super::play_match::constants::*;

/// One of the two sides of the field.
///
/// `Top` defends the low-y edge, `Bottom` the high-y edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Top,
    Bottom,
}

impl Team {
    /// Both teams in update order
    pub fn all() -> [Team; 2] {
        [Team::Top, Team::Bottom]
    }

    /// The opposing team
    pub fn opponent(self) -> Team {
        match self {
            Team::Top => Team::Bottom,
            Team::Bottom => Team::Top,
        }
    }

    /// Index into per-team arrays
    pub fn index(self) -> usize {
        match self {
            Team::Top => 0,
            Team::Bottom => 1,
        }
    }

    /// Get the display name
    pub fn name(self) -> &'static str {
        match self {
            Team::Top => "Top",
            Team::Bottom => "Bottom",
        }
    }

    /// Direction of travel toward the enemy base along y.
    pub fn forward(self) -> f32 {
        match self {
            Team::Top => 1.0,
            Team::Bottom => -1.0,
        }
    }
}

/// Unit classes.
///
/// `Ogre` and `Wraith` are the two elites; they read the modifier rows of
/// the class they are built around (see [`UnitClass::modifier_class`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitClass {
    Swordsman,
    Archer,
    Mage,
    Knight,
    Healer,
    Ogre,
    Wraith,
}

impl UnitClass {
    /// Number of classes, for per-class arrays
    pub const COUNT: usize = 7;

    /// Get all classes in their fixed iteration order
    pub fn all() -> &'static [UnitClass] {
        &[
            UnitClass::Swordsman,
            UnitClass::Archer,
            UnitClass::Mage,
            UnitClass::Knight,
            UnitClass::Healer,
            UnitClass::Ogre,
            UnitClass::Wraith,
        ]
    }

    /// Index into per-class arrays
    pub fn index(self) -> usize {
        match self {
            UnitClass::Swordsman => 0,
            UnitClass::Archer => 1,
            UnitClass::Mage => 2,
            UnitClass::Knight => 3,
            UnitClass::Healer => 4,
            UnitClass::Ogre => 5,
            UnitClass::Wraith => 6,
        }
    }

    /// Get the display name
    pub fn name(self) -> &'static str {
        match self {
            UnitClass::Swordsman => "Swordsman",
            UnitClass::Archer => "Archer",
            UnitClass::Mage => "Mage",
            UnitClass::Knight => "Knight",
            UnitClass::Healer => "Healer",
            UnitClass::Ogre => "Ogre",
            UnitClass::Wraith => "Wraith",
        }
    }

    /// Parse a display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<UnitClass> {
        UnitClass::all()
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }

    /// Boss-tier units
    pub fn is_elite(self) -> bool {
        matches!(self, UnitClass::Ogre | UnitClass::Wraith)
    }

    /// Which class's modifier row this class reads.
    pub fn modifier_class(self) -> UnitClass {
        match self {
            UnitClass::Ogre => UnitClass::Knight,
            UnitClass::Wraith => UnitClass::Mage,
            other => other,
        }
    }

    /// Name of the production building for this class
    pub fn building_name(self) -> &'static str {
        match self {
            UnitClass::Swordsman => "Barracks",
            UnitClass::Archer => "Archery Range",
            UnitClass::Mage => "Mage Tower",
            UnitClass::Knight => "Stable",
            UnitClass::Healer => "Temple",
            UnitClass::Ogre => "Ogre Den",
            UnitClass::Wraith => "Crypt",
        }
    }

    /// Highest cap a building of this class can reach
    pub fn max_building_cap(self) -> u32 {
        if self.is_elite() {
            MAX_ELITE_CAP
        } else {
            MAX_BUILDING_CAP
        }
    }
}

/// Settings a match is created from.
///
/// Defaults reproduce the standard single-player setup except that neither
/// team auto-selects; hosts opt teams into auto-selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Field width in world units
    pub width: f32,
    /// Field height in world units
    pub height: f32,
    /// Starting health of each tower
    pub tower_health: f32,
    /// Seconds between spawns of the same class once under cap
    pub respawn_delay: f32,
    /// Crit chance before the crit multiplier (0.0 disables crits)
    pub base_crit_chance: f32,
    /// Freeze chance on knight hits before the freeze multiplier
    pub base_freeze_chance: f32,
    /// XP granted per orb
    pub xp_per_orb: u32,
    /// XP needed for the first level-up
    pub xp_base: f32,
    /// Growth factor of the XP requirement
    pub xp_growth: f32,
    /// Building slots per team
    pub building_slots: usize,
    /// Choices per selection
    pub offer_size: usize,
    /// Teams whose selections resolve automatically with a random pick
    pub auto_select: Vec<Team>,
    /// Raise one building selection per team on `start()`
    pub opening_building_selection: bool,
    /// Seed for the match RNG (None = entropy)
    pub random_seed: Option<u64>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            tower_health: TOWER_HEALTH,
            respawn_delay: 0.0,
            base_crit_chance: BASE_CRIT_CHANCE,
            base_freeze_chance: BASE_FREEZE_CHANCE,
            xp_per_orb: XP_ORB_VALUE,
            xp_base: XP_BASE,
            xp_growth: XP_GROWTH,
            building_slots: BUILDING_SLOTS,
            offer_size: OFFER_SIZE,
            auto_select: Vec::new(),
            opening_building_selection: true,
            random_seed: None,
        }
    }
}

impl MatchSettings {
    /// Settings where both teams pick automatically (CPU vs CPU)
    pub fn cpu_vs_cpu(seed: Option<u64>) -> Self {
        Self {
            auto_select: Team::all().to_vec(),
            random_seed: seed,
            ..Self::default()
        }
    }

    /// Whether the given team resolves its selections automatically
    pub fn is_auto(&self, team: Team) -> bool {
        self.auto_select.contains(&team)
    }

    /// y coordinate where a team's units appear
    pub fn spawn_line(&self, team: Team) -> f32 {
        match team {
            Team::Top => SPAWN_LINE_OFFSET,
            Team::Bottom => self.height - SPAWN_LINE_OFFSET,
        }
    }

    /// y coordinate of a team's tower
    pub fn tower_line(&self, team: Team) -> f32 {
        match team {
            Team::Top => TOWER_LINE_OFFSET,
            Team::Bottom => self.height - TOWER_LINE_OFFSET,
        }
    }

    /// y coordinate past which a team's orbs are collected
    pub fn collection_line(&self, team: Team) -> f32 {
        match team {
            Team::Top => ORB_COLLECTION_OFFSET,
            Team::Bottom => self.height - ORB_COLLECTION_OFFSET,
        }
    }

    /// Check the settings for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 2.0 * SPAWN_MARGIN_X || self.height <= 2.0 * SPAWN_LINE_OFFSET {
            return Err(format!(
                "field {}x{} is too small (minimum {}x{})",
                self.width,
                self.height,
                2.0 * SPAWN_MARGIN_X,
                2.0 * SPAWN_LINE_OFFSET
            ));
        }
        if self.tower_health <= 0.0 {
            return Err("tower_health must be positive".to_string());
        }
        if self.respawn_delay < 0.0 {
            return Err("respawn_delay cannot be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.base_crit_chance) {
            return Err("base_crit_chance must be within 0.0..=1.0".to_string());
        }
        if self.xp_base < 1.0 || self.xp_growth < 1.0 {
            return Err("xp_base and xp_growth must be at least 1.0".to_string());
        }
        if self.building_slots == 0 {
            return Err("building_slots must be at least 1".to_string());
        }
        if self.offer_size == 0 {
            return Err("offer_size must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_opponent_round_trips() {
        for team in Team::all() {
            assert_eq!(team.opponent().opponent(), team);
            assert_ne!(team.opponent(), team);
        }
    }

    #[test]
    fn test_class_indices_are_dense() {
        for (i, class) in UnitClass::all().iter().enumerate() {
            assert_eq!(class.index(), i, "{:?} index out of order", class);
        }
        assert_eq!(UnitClass::all().len(), UnitClass::COUNT);
    }

    #[test]
    fn test_elites_read_host_class_modifiers() {
        assert_eq!(UnitClass::Ogre.modifier_class(), UnitClass::Knight);
        assert_eq!(UnitClass::Wraith.modifier_class(), UnitClass::Mage);
        assert_eq!(UnitClass::Archer.modifier_class(), UnitClass::Archer);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(UnitClass::from_name("wraith"), Some(UnitClass::Wraith));
        assert_eq!(UnitClass::from_name("Archer"), Some(UnitClass::Archer));
        assert_eq!(UnitClass::from_name("Paladin"), None);
    }

    #[test]
    fn test_default_settings_validate() {
        assert!(MatchSettings::default().validate().is_ok());
        let bad = MatchSettings {
            tower_health: 0.0,
            ..MatchSettings::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_lines_are_mirrored() {
        let settings = MatchSettings::default();
        assert_eq!(
            settings.tower_line(Team::Top),
            settings.height - settings.tower_line(Team::Bottom)
        );
        assert!(settings.collection_line(Team::Top) > settings.tower_line(Team::Top));
    }
}
