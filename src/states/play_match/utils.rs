//! Shared Utility Functions
//!
//! Geometry helpers and log naming used by several simulation modules.

use bevy::prelude::*;

use crate::combat::log::CombatantId;
use crate::states::match_config::{MatchSettings, Team};
use super::components::Unit;

/// Helper to generate a consistent combatant ID for the combat log.
///
/// Format: "{team} {class} #{id}" e.g., "Top Archer #12"
pub fn combatant_id(unit: &Unit) -> CombatantId {
    format!("{} {} #{}", unit.team.name(), unit.class.name(), unit.id.0)
}

/// Combat log ID of a team's tower
pub fn tower_id(team: Team) -> CombatantId {
    format!("{} Tower", team.name())
}

/// Move `from` toward `to` by at most `max_step`, never overshooting.
pub fn step_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + offset / distance * max_step
    }
}

/// Keep a position inside the field.
pub fn clamp_to_field(position: Vec2, settings: &MatchSettings) -> Vec2 {
    Vec2::new(
        position.x.clamp(0.0, settings.width),
        position.y.clamp(0.0, settings.height),
    )
}

/// Signed smallest difference between two angles, in (-PI, PI].
pub fn angle_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b) % std::f32::consts::TAU;
    if diff > std::f32::consts::PI {
        diff -= std::f32::consts::TAU;
    } else if diff <= -std::f32::consts::PI {
        diff += std::f32::consts::TAU;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_towards_never_overshoots() {
        let end = step_towards(Vec2::ZERO, Vec2::new(3.0, 4.0), 100.0);
        assert_eq!(end, Vec2::new(3.0, 4.0));
        let partial = step_towards(Vec2::ZERO, Vec2::new(3.0, 4.0), 2.5);
        assert!((partial - Vec2::new(1.5, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_angle_difference_wraps() {
        let d = angle_difference(0.1, std::f32::consts::TAU - 0.1);
        assert!((d - 0.2).abs() < 1e-5, "got {}", d);
    }

    #[test]
    fn test_clamp_to_field() {
        let settings = MatchSettings::default();
        let p = clamp_to_field(Vec2::new(-5.0, 9999.0), &settings);
        assert_eq!(p, Vec2::new(0.0, settings.height));
    }
}
