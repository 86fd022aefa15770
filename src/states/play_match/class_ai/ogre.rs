//! Ogre (elite)
//!
//! Every swing cleaves everything in a wide arc, tower included. Every few
//! seconds it slams the ground, hurting nearby units and knocking them away.
//! The slam timer runs whenever the enemy has any unit alive, so a slam with
//! nobody in reach is spent.

use bevy::prelude::*;

use crate::combat::log::CombatLogEventType;
use crate::states::play_match::combat_core::{strike_area, Frame, Hit, Striker};
use crate::states::play_match::components::TargetRef;
use crate::states::play_match::constants::{
    CLEAVE_EXTRA_RADIUS, SLAM_DAMAGE, SLAM_INTERVAL, SLAM_KNOCKBACK, SLAM_RADIUS,
};
use crate::states::play_match::match_flow::Side;
use crate::states::play_match::notifications::SoundCue;
use crate::states::play_match::utils::{clamp_to_field, combatant_id};

pub fn attack(index: usize, _target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let unit = &own.units[index];
    let (center, radius, damage) = (unit.position, unit.attack_range + CLEAVE_EXTRA_RADIUS, unit.damage);
    let mut striker = Striker {
        team: own.team,
        unit: Some(&mut own.units[index]),
        modifiers: &own.modifiers,
    };
    strike_area(frame, &mut striker, enemy, center, radius, Hit::new(damage, "Cleave"), true);
    frame.sound(SoundCue::SwordHit);
}

pub fn try_slam(index: usize, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let ogre = &own.units[index];
    if frame.now < ogre.abilities.next_slam_at {
        return;
    }
    if !enemy.units.iter().any(|u| u.is_alive()) {
        return;
    }
    let center = ogre.position;
    let forward = Vec2::new(0.0, ogre.team.forward());

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
        SLAM_RADIUS,
        Hit::flat(SLAM_DAMAGE, "Ground Slam"),
        false,
    );

    for &victim in &struck {
        let unit = &mut enemy.units[victim];
        if !unit.is_alive() {
            continue;
        }
        let away = (unit.position - center).try_normalize().unwrap_or(forward);
        unit.position = clamp_to_field(unit.position + away * SLAM_KNOCKBACK, frame.settings);
    }

    let ogre = &mut own.units[index];
    ogre.abilities.next_slam_at = frame.now + SLAM_INTERVAL;
    frame.log.log(
        CombatLogEventType::MatchEvent,
        format!("{} slams the ground, hitting {}", combatant_id(ogre), struck.len()),
    );
    frame.sound(SoundCue::Slam);
}
