//! Healer
//!
//! Mends the closest wounded ally in reach once per second. The cooldown is
//! only spent when somebody was actually healed. Its own attack is a weak
//! staff hit.

use super::direct_hit;
use crate::states::play_match::combat_core::{heal_unit, Frame};
use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{HEAL_AMOUNT, HEAL_COOLDOWN, HEAL_RANGE};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::utils::combatant_id;

pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    direct_hit(index, target, "Staff", own, enemy, frame);
}

pub fn try_heal(index: usize, own: &mut Side, frame: &mut Frame) {
    let healer = &own.units[index];
    if frame.now < healer.abilities.next_heal_at {
        return;
    }
    let (origin, healer_id) = (healer.position, healer.id);
    let source = combatant_id(healer);

    let patient = own
        .units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.id != healer_id && u.is_injured())
        .map(|(i, u)| (i, u.position.distance(origin)))
        .filter(|(_, distance)| *distance <= HEAL_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i);
    let Some(patient) = patient else {
        return;
    };

    let healed = heal_unit(frame, &source, "Mend", &mut own.units[patient], HEAL_AMOUNT);
    if healed > 0.0 {
        own.units[index].abilities.next_heal_at = frame.now + HEAL_COOLDOWN;
        frame.sound(SoundCue::Heal);
    }
}
