//! XP & Levels
//!
//! Every unit death drops an XP orb for the killing team. Orbs drift toward
//! that team's edge and are banked once they cross its collection line.
//! Banking enough XP levels the team up; what a level grants is decided by
//! the match (`MatchSim::collect_xp`).

use bevy::prelude::*;

use super::constants::XP_ORB_SPEED;
use crate::states::match_config::{MatchSettings, Team};

/// A floating XP pickup owned by `team`
#[derive(Debug, Clone, PartialEq)]
pub struct XpOrb {
    pub team: Team,
    pub position: Vec2,
    pub value: u32,
    pub collected: bool,
}

impl XpOrb {
    pub fn new(team: Team, position: Vec2, value: u32) -> Self {
        Self {
            team,
            position,
            value,
            collected: false,
        }
    }

    /// Drift toward the owning team's edge. Returns the XP banked this
    /// tick (zero until the orb crosses the collection line).
    pub fn update(&mut self, dt: f32, settings: &MatchSettings) -> u32 {
        if self.collected {
            return 0;
        }
        // Orbs travel backwards relative to the team's march direction
        self.position.y -= self.team.forward() * XP_ORB_SPEED * dt;

        let line = settings.collection_line(self.team);
        let crossed = match self.team {
            Team::Top => self.position.y <= line,
            Team::Bottom => self.position.y >= line,
        };
        if crossed {
            self.collected = true;
            self.value
        } else {
            0
        }
    }
}

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_required(level: u32, base: f32, growth: f32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (base * growth.powi(exponent)).round() as u32
}

/// What a level-up grants once the card pick is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelReward {
    /// Still filling slots: offer a new building
    Building,
    /// All slots filled: upgrade this slot (or the next upgradable one)
    Upgrade { preferred_slot: usize },
}

/// Reward for reaching `level` with `slots` building slots.
pub fn level_reward(level: u32, slots: usize) -> LevelReward {
    let level = level as usize;
    if level <= slots {
        LevelReward::Building
    } else {
        LevelReward::Upgrade {
            preferred_slot: (level - slots - 1) % slots.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve_grows() {
        assert_eq!(xp_required(1, 20.0, 1.2), 20);
        assert_eq!(xp_required(2, 20.0, 1.2), 24);
        assert_eq!(xp_required(3, 20.0, 1.2), 29);
        assert!(xp_required(10, 20.0, 1.2) > xp_required(9, 20.0, 1.2));
    }

    #[test]
    fn test_orb_is_collected_once() {
        let settings = MatchSettings::default();
        let start = Vec2::new(100.0, settings.collection_line(Team::Top) + 1.0);
        let mut orb = XpOrb::new(Team::Top, start, 10);

        assert_eq!(orb.update(0.1, &settings), 10);
        assert!(orb.collected);
        assert_eq!(orb.update(0.1, &settings), 0, "orbs only pay out once");
    }

    #[test]
    fn test_orbs_drift_home() {
        let settings = MatchSettings::default();
        let mut top = XpOrb::new(Team::Top, Vec2::new(0.0, 300.0), 10);
        let mut bottom = XpOrb::new(Team::Bottom, Vec2::new(0.0, 300.0), 10);
        top.update(1.0, &settings);
        bottom.update(1.0, &settings);
        assert!(top.position.y < 300.0);
        assert!(bottom.position.y > 300.0);
    }

    #[test]
    fn test_rewards_switch_to_upgrades_after_slots_fill() {
        assert_eq!(level_reward(2, 10), LevelReward::Building);
        assert_eq!(level_reward(10, 10), LevelReward::Building);
        assert_eq!(level_reward(11, 10), LevelReward::Upgrade { preferred_slot: 0 });
        assert_eq!(level_reward(12, 10), LevelReward::Upgrade { preferred_slot: 1 });
        assert_eq!(level_reward(21, 10), LevelReward::Upgrade { preferred_slot: 0 });
    }
}
