//! Towers
//!
//! Each team defends one stationary tower near its own edge of the field.
//! Towers shoot void bolts at the nearest enemy unit in range; losing the
//! tower loses the match.

use bevy::prelude::*;

use super::combat_core::Frame;
use super::components::{cooldown_ready, TargetRef};
use super::constants::{TOWER_COOLDOWN, TOWER_DAMAGE, TOWER_RANGE};
use super::match_flow::Side;
use super::notifications::SoundCue;
use super::projectiles::{Projectile, ProjectileKind};
use crate::states::match_config::{MatchSettings, Team};

#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub team: Team,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub range: f32,
    pub attack_cooldown: f32,
    pub damage: f32,
    pub last_attack: Option<f32>,
}

impl Tower {
    /// A full-health tower centered on the team's tower line
    pub fn new(team: Team, settings: &MatchSettings) -> Self {
        Self {
            team,
            position: Vec2::new(settings.width / 2.0, settings.tower_line(team)),
            health: settings.tower_health,
            max_health: settings.tower_health,
            range: TOWER_RANGE,
            attack_cooldown: TOWER_COOLDOWN,
            damage: TOWER_DAMAGE,
            last_attack: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Remove health, clamped at zero. Returns the HP actually lost.
    pub fn lose_health(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || !(amount > 0.0) {
            return 0.0;
        }
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }
}

/// Fire at the nearest enemy unit in range when off cooldown.
pub fn step_tower(own: &mut Side, enemy: &Side, frame: &mut Frame) {
    let Some(tower) = own.tower.as_mut().filter(|t| t.is_alive()) else {
        return;
    };
    if !cooldown_ready(tower.last_attack, frame.now, tower.attack_cooldown) {
        return;
    }

    let target = enemy
        .units
        .iter()
        .filter(|u| u.is_alive())
        .map(|u| (u, u.position.distance(tower.position)))
        .filter(|(_, distance)| *distance <= tower.range)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let Some((unit, _)) = target else {
        return;
    };

    tower.last_attack = Some(frame.now);
    frame.projectiles.push(Projectile::new(
        ProjectileKind::TowerBolt,
        tower.team,
        None,
        tower.position,
        TargetRef::Unit(unit.id),
        unit.position,
        tower.damage,
    ));
    frame.sound(SoundCue::TowerShot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_health_clamps_at_zero() {
        let mut tower = Tower::new(Team::Top, &MatchSettings::default());
        let lost = tower.lose_health(tower.max_health + 500.0);
        assert_eq!(lost, MatchSettings::default().tower_health);
        assert_eq!(tower.health, 0.0);
        assert!(!tower.is_alive());
        assert_eq!(tower.lose_health(10.0), 0.0, "a destroyed tower takes nothing");
    }

    #[test]
    fn test_towers_sit_on_their_own_side() {
        let settings = MatchSettings::default();
        let top = Tower::new(Team::Top, &settings);
        let bottom = Tower::new(Team::Bottom, &settings);
        assert!(top.position.y < bottom.position.y);
        assert_eq!(top.position.x, settings.width / 2.0);
    }
}
