//! Mage
//!
//! Throws fireballs that burn the primary target and splash nearby enemies.
//! With Conflagration every tenth attack instead looses a fire chain that
//! hops between enemies.

use crate::states::play_match::combat_core::Frame;
use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{CONFLAGRATION_DAMAGE_FACTOR, CONFLAGRATION_EVERY};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::projectiles::{ChainEffect, ChainKind, Projectile, ProjectileKind};

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let unit = &own.units[index];
    let Some(aim) = enemy.target_position(target) else {
        return;
    };

    if own.modifiers.mage_conflagration && unit.attack_count % CONFLAGRATION_EVERY == 0 {
        frame.chains.push(ChainEffect::new(
            ChainKind::Conflagration,
            own.team,
            Some(unit.id),
            unit.position,
            target,
            unit.damage * CONFLAGRATION_DAMAGE_FACTOR,
        ));
        frame.sound(SoundCue::ChainCast);
        return;
    }

    frame.projectiles.push(Projectile::new(
        ProjectileKind::Fireball,
        own.team,
        Some(unit.id),
        unit.position,
        target,
        aim,
        unit.damage,
    ));
    frame.sound(SoundCue::Fireball);
}
