//! Wraith (elite)
//!
//! Casts homing ghosts that curse and siphon health. Every eighth attack is a
//! soul chain instead. Every few seconds it reaps everything close by,
//! cursing each victim and healing itself per unit reaped. Like the ogre's
//! slam, the reap timer runs whenever the enemy has any unit alive.

use crate::combat::log::CombatLogEventType;
use crate::states::play_match::combat_core::{heal_unit, strike_area, Frame, Hit, Striker};
use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{
    REAP_CURSE, REAP_DAMAGE, REAP_HEAL_PER_TARGET, REAP_INTERVAL, REAP_RADIUS, SOUL_CHAIN_DAMAGE_FACTOR,
    SOUL_CHAIN_EVERY,
};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::projectiles::{ChainEffect, ChainKind, Projectile, ProjectileKind};
use crate::states::play_match::status_effects::StatusKind;
use crate::states::play_match::utils::combatant_id;

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let unit = &own.units[index];
    let Some(aim) = enemy.target_position(target) else {
        return;
    };

    if unit.attack_count % SOUL_CHAIN_EVERY == 0 {
        frame.chains.push(ChainEffect::new(
            ChainKind::SoulChain,
            own.team,
            Some(unit.id),
            unit.position,
            target,
            unit.damage * SOUL_CHAIN_DAMAGE_FACTOR,
        ));
        frame.sound(SoundCue::ChainCast);
        return;
    }

    frame.projectiles.push(Projectile::new(
        ProjectileKind::Ghost,
        own.team,
        Some(unit.id),
        unit.position,
        target,
        aim,
        unit.damage,
    ));
    frame.sound(SoundCue::GhostBolt);
}

pub fn try_reap(index: usize, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let wraith = &own.units[index];
    if frame.now < wraith.abilities.next_reap_at {
        return;
    }
    if !enemy.units.iter().any(|u| u.is_alive()) {
        return;
    }
    let center = wraith.position;

    let mut striker = Striker {
        team: own.team,
        unit: Some(&mut own.units[index]),
        modifiers: &own.modifiers,
    };
    let struck = strike_area(
        frame,
        &mut striker,
        enemy,
        center,
        REAP_RADIUS,
        Hit::flat(REAP_DAMAGE, "Reap"),
        false,
    );
    for &victim in &struck {
        let unit = &mut enemy.units[victim];
        if unit.is_alive() {
            unit.status.add(StatusKind::Death, REAP_CURSE);
        }
    }

    let wraith = &mut own.units[index];
    wraith.abilities.next_reap_at = frame.now + REAP_INTERVAL;
    let name = combatant_id(wraith);
    heal_unit(frame, &name, "Reap", wraith, REAP_HEAL_PER_TARGET * struck.len() as f32);
    frame.log.log(
        CombatLogEventType::MatchEvent,
        format!("{} reaps {} souls", name, struck.len()),
    );
    frame.sound(SoundCue::Reap);
}
