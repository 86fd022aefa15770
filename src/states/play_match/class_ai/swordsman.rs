//! Swordsman
//!
//! Plain melee. With Whirlwind Slash every third attack becomes a sweep that
//! hits every enemy around the swordsman, tower included.

use super::direct_hit;
use crate::states::play_match::combat_core::{strike_area, Frame, Hit, Striker};
use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{SWEEP_EVERY, SWEEP_RADIUS};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let unit = &own.units[index];
    let sweep = own.modifiers.swordsman_sweep && unit.attack_count % SWEEP_EVERY == 0;

    if sweep {
        let center = unit.position;
        let damage = unit.damage;
        let mut striker = Striker {
            team: own.team,
            unit: Some(&mut own.units[index]),
            modifiers: &own.modifiers,
        };
        strike_area(frame, &mut striker, enemy, center, SWEEP_RADIUS, Hit::new(damage, "Whirlwind Slash"), true);
    } else {
        direct_hit(index, target, "Slash", own, enemy, frame);
    }
    frame.sound(SoundCue::SwordHit);
}
