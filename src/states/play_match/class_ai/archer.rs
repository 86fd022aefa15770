//! Archer
//!
//! Fires poison arrows. With Volley every fifth attack is a fan of arrows
//! spread across a cone aimed at the primary target; each arrow homes on the
//! nearest enemy inside its own slice of the cone, or on the primary target
//! when its slice is empty.

use bevy::prelude::*;

use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{FAN_ARROWS, FAN_EVERY, FAN_SPREAD};
use crate::states::play_match::combat_core::Frame;
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::projectiles::{Projectile, ProjectileKind};
use crate::states::play_match::utils::angle_difference;

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let unit = &own.units[index];
    let Some(aim) = enemy.target_position(target) else {
        return;
    };
    let (origin, damage, caster, range) = (unit.position, unit.damage, unit.id, unit.attack_range);
    let fan = own.modifiers.archer_fan && unit.attack_count % FAN_EVERY == 0;

    if fan && FAN_ARROWS > 1 {
        let base = (aim.y - origin.y).atan2(aim.x - origin.x);
        let window = FAN_SPREAD / (FAN_ARROWS - 1) as f32 / 2.0;
        for i in 0..FAN_ARROWS {
            let angle = base + FAN_SPREAD * (i as f32 / (FAN_ARROWS - 1) as f32 - 0.5);
            let (arrow_target, arrow_aim) =
                fan_target(origin, angle, window, range * 2.0, enemy).unwrap_or((target, aim));
            frame.projectiles.push(Projectile::new(
                ProjectileKind::Arrow,
                own.team,
                Some(caster),
                origin,
                arrow_target,
                arrow_aim,
                damage,
            ));
        }
    } else {
        frame.projectiles.push(Projectile::new(
            ProjectileKind::Arrow,
            own.team,
            Some(caster),
            origin,
            target,
            aim,
            damage,
        ));
    }
    frame.sound(SoundCue::ArrowShot);
}

/// Nearest alive enemy within `max_range` whose bearing from `origin` is
/// within `window` radians of `angle`.
fn fan_target(origin: Vec2, angle: f32, window: f32, max_range: f32, enemy: &Side) -> Option<(TargetRef, Vec2)> {
    enemy
        .units
        .iter()
        .filter(|u| u.is_alive())
        .filter_map(|u| {
            let offset = u.position - origin;
            let distance = offset.length();
            let bearing = offset.y.atan2(offset.x);
            (distance <= max_range && angle_difference(bearing, angle).abs() <= window)
                .then_some((u, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(u, _)| (TargetRef::Unit(u.id), u.position))
}
