//! Knight
//!
//! Heavy melee whose hits may freeze. With Taunt the knight periodically
//! forces nearby enemies to attack it and shields itself briefly.

use bevy::prelude::*;

use super::direct_hit;
use crate::states::play_match::combat_core::{freeze_chance, Frame};
use crate::states::play_match::components::{TargetRef, Taunt};
use crate::states::play_match::constants::{
    FREEZE_DURATION, TAUNT_COOLDOWN, TAUNT_DURATION, TAUNT_INVULNERABILITY, TAUNT_RADIUS,
};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::utils::combatant_id;
use crate::combat::log::CombatLogEventType;

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let outcome = direct_hit(index, target, "Lance", own, enemy, frame);
    frame.sound(SoundCue::SwordHit);
    if outcome.killed {
        return;
    }

    let TargetRef::Unit(id) = target else {
        return;
    };
    let chance = freeze_chance(frame.settings, &own.modifiers);
    let Some(victim) = enemy.unit_mut(id).filter(|u| u.is_alive()) else {
        return;
    };
    if chance > 0.0 && frame.rng.roll(chance) {
        victim.status.freeze(frame.now, FREEZE_DURATION);
        frame.log.log(
            CombatLogEventType::StatusEffect,
            format!("{} is frozen", combatant_id(victim)),
        );
        frame.sound(SoundCue::Freeze);
    }
}

pub fn try_taunt(index: usize, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let now = frame.now;
    let knight = &mut own.units[index];
    if !own.modifiers.knight_taunt || now < knight.abilities.next_taunt_at {
        return;
    }

    let center = knight.position;
    let mut taunted = 0;
    for unit in enemy.units.iter_mut().filter(|u| u.is_alive()) {
        if unit.position.distance(center) <= TAUNT_RADIUS {
            unit.taunt = Some(Taunt {
                by: knight.id,
                until: now + TAUNT_DURATION,
            });
            taunted += 1;
        }
    }
    if taunted == 0 {
        return;
    }

    knight.invulnerable_until = now + TAUNT_INVULNERABILITY;
    knight.abilities.next_taunt_at = now + TAUNT_COOLDOWN;
    let name = combatant_id(knight);
    debug!("{} taunts {} enemies", name, taunted);
    frame.log.log(
        CombatLogEventType::StatusEffect,
        format!("{} taunts {} enemies", name, taunted),
    );
    frame.sound(SoundCue::Taunt);
}
