//! Core Combat Systems
//!
//! The shared unit state machine and the damage pipeline every hit goes
//! through.
//!
//! ## Unit step
//!
//! Once per tick, for every alive unit in roster order:
//! 1. Refresh effective stats, advance animation, resolve DoTs
//! 2. Frozen units stop here
//! 3. Regenerate, then run class pre-step hooks (heals, slams, reaps, taunts)
//! 4. Pick the nearest target (a live taunt overrides)
//! 5. Seek, approach, or attack on cooldown
//!
//! ## Damage pipeline
//!
//! crit roll → class reduction → invulnerability → health decrement →
//! lifesteal → thorns → death side effects.

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::combat::log::{CombatLog, CombatLogEventType, CombatantId};
use crate::states::match_config::{MatchSettings, Team};
use super::cards::TeamModifiers;
use super::class_ai;
use super::components::{GameRng, TargetRef, Unit};
use super::constants::*;
use super::match_flow::Side;
use super::notifications::{MatchNotification, SoundCue};
use super::projectiles::{ChainEffect, Projectile};
use super::status_effects::DotTick;
use super::tower::Tower;
use super::utils::{clamp_to_field, combatant_id, step_towards, tower_id};

/// Everything a tick step needs besides the two sides.
pub struct Frame<'a> {
    pub now: f32,
    pub dt: f32,
    pub settings: &'a MatchSettings,
    pub rng: &'a mut GameRng,
    pub log: &'a mut CombatLog,
    pub outbox: &'a mut Vec<MatchNotification>,
    /// Projectiles launched this tick
    pub projectiles: &'a mut Vec<Projectile>,
    /// Chains launched this tick
    pub chains: &'a mut Vec<ChainEffect>,
}

impl Frame<'_> {
    pub fn sound(&mut self, cue: SoundCue) {
        self.outbox.push(MatchNotification::Sound(cue));
    }
}

/// The side dealing damage.
///
/// `unit` is `None` for towers and for projectiles whose caster is gone;
/// such hits still roll crits from the team's modifiers but cannot lifesteal
/// or be thorned.
pub struct Striker<'a> {
    pub team: Team,
    pub unit: Option<&'a mut Unit>,
    pub modifiers: &'a TeamModifiers,
}

impl Striker<'_> {
    /// The attacking unit died partway through its attack (thorns). It deals
    /// no further damage.
    pub fn is_spent(&self) -> bool {
        self.unit.as_ref().is_some_and(|unit| !unit.is_alive())
    }

    fn name(&self) -> CombatantId {
        match &self.unit {
            Some(unit) => combatant_id(unit),
            None => tower_id(self.team),
        }
    }
}

/// One packet of damage
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub amount: f32,
    pub ability: &'static str,
    pub can_crit: bool,
}

impl Hit {
    pub fn new(amount: f32, ability: &'static str) -> Self {
        Self {
            amount,
            ability,
            can_crit: true,
        }
    }

    /// A hit that never crits (area pulses, chains)
    pub fn flat(amount: f32, ability: &'static str) -> Self {
        Self {
            amount,
            ability,
            can_crit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitOutcome {
    pub dealt: f32,
    pub crit: bool,
    pub killed: bool,
}

fn roll_crit(frame: &mut Frame, striker: &Striker, hit: &Hit) -> bool {
    hit.can_crit && frame.rng.roll(frame.settings.base_crit_chance * striker.modifiers.crit)
}

/// Chance that a knight hit freezes its target.
pub fn freeze_chance(settings: &MatchSettings, modifiers: &TeamModifiers) -> f32 {
    settings.base_freeze_chance * modifiers.freeze_chance
        + FREEZE_CARD_CHANCE * (modifiers.freeze_chance - 1.0).max(0.0)
}

/// Run a hit through the full pipeline against a unit.
pub fn strike_unit(
    frame: &mut Frame,
    striker: &mut Striker,
    target: &mut Unit,
    target_modifiers: &TeamModifiers,
    hit: Hit,
) -> HitOutcome {
    debug_assert!(hit.amount >= 0.0, "negative damage: {}", hit.amount);
    if !target.is_alive() || !(hit.amount > 0.0) || striker.is_spent() {
        return HitOutcome::default();
    }

    let crit = roll_crit(frame, striker, &hit);
    let mut amount = if crit { hit.amount * CRIT_MULTIPLIER } else { hit.amount };
    amount = target.toughness().reduce(amount);
    if target.is_invulnerable(frame.now) {
        amount = 0.0;
    }

    let change = target.lose_health(amount);
    let source = striker.name();
    let target_name = combatant_id(target);

    if let Some(attacker) = striker.unit.as_deref_mut() {
        attacker.damage_dealt += change.amount;
        if attacker.is_alive() && change.amount > 0.0 {
            let lifesteal = striker.modifiers.lifesteal_fraction(LIFESTEAL_FRACTION);
            if lifesteal > 0.0 {
                let healed = attacker.heal(change.amount * lifesteal);
                if healed > 0.0 {
                    frame.log.log_healing(
                        source.clone(),
                        source.clone(),
                        "Lifesteal".to_string(),
                        healed,
                        format!("{} drains {:.0} health", source, healed),
                    );
                }
            }
        }
    }

    frame.log.log_damage(
        source.clone(),
        target_name.clone(),
        hit.ability.to_string(),
        change.amount,
        crit,
        change.died,
        format!(
            "{}'s {} hits {} for {:.0}{}",
            source,
            hit.ability,
            target_name,
            change.amount,
            if crit { " (crit)" } else { "" }
        ),
    );
    if change.amount > 0.0 {
        frame.outbox.push(MatchNotification::DamageNumber {
            position: target.position,
            amount: change.amount,
            crit,
        });
    }

    // Thorns: reflected damage is final and never reflects again
    let thorns = target_modifiers.thorns_fraction(THORNS_FRACTION);
    if thorns > 0.0 && change.amount > 0.0 {
        if let Some(attacker) = striker.unit.as_deref_mut() {
            let reflected = attacker.lose_health(change.amount * thorns);
            if reflected.amount > 0.0 {
                frame.log.log_damage(
                    target_name.clone(),
                    source.clone(),
                    "Thorns".to_string(),
                    reflected.amount,
                    false,
                    reflected.died,
                    format!("{} reflects {:.0} to {}", target_name, reflected.amount, source),
                );
            }
            if reflected.died {
                on_unit_death(frame, attacker, Some(target_name.clone()));
            }
        }
    }

    if change.died {
        on_unit_death(frame, target, Some(source));
    }

    HitOutcome {
        dealt: change.amount,
        crit,
        killed: change.died,
    }
}

/// Run a hit against a tower. Towers have no reduction and no thorns.
pub fn strike_tower(frame: &mut Frame, striker: &mut Striker, tower: &mut Tower, hit: Hit) -> HitOutcome {
    if !tower.is_alive() || !(hit.amount > 0.0) || striker.is_spent() {
        return HitOutcome::default();
    }
    let crit = roll_crit(frame, striker, &hit);
    let amount = if crit { hit.amount * CRIT_MULTIPLIER } else { hit.amount };
    let dealt = tower.lose_health(amount);
    let destroyed = !tower.is_alive();
    let source = striker.name();

    if let Some(attacker) = striker.unit.as_deref_mut() {
        attacker.damage_dealt += dealt;
        let lifesteal = striker.modifiers.lifesteal_fraction(LIFESTEAL_FRACTION);
        if lifesteal > 0.0 {
            attacker.heal(dealt * lifesteal);
        }
    }

    frame.log.log_damage(
        source.clone(),
        tower_id(tower.team),
        hit.ability.to_string(),
        dealt,
        crit,
        destroyed,
        format!("{}'s {} hits {} for {:.0}", source, hit.ability, tower_id(tower.team), dealt),
    );
    frame.outbox.push(MatchNotification::DamageNumber {
        position: tower.position,
        amount: dealt,
        crit,
    });

    if destroyed {
        frame.log.log(
            CombatLogEventType::Death,
            format!("{} has been destroyed by {}", tower_id(tower.team), source),
        );
        frame.sound(SoundCue::TowerDestroyed);
        info!("{} destroyed at {:.1}s", tower_id(tower.team), frame.now);
    }

    HitOutcome {
        dealt,
        crit,
        killed: destroyed,
    }
}

/// Resolve a hit against whatever `target` points at, if it is still valid.
pub fn strike_target(
    frame: &mut Frame,
    striker: &mut Striker,
    enemy: &mut Side,
    target: TargetRef,
    hit: Hit,
) -> HitOutcome {
    match target {
        TargetRef::Unit(id) => match enemy.index_of(id) {
            Some(index) => strike_unit(frame, striker, &mut enemy.units[index], &enemy.modifiers, hit),
            None => HitOutcome::default(),
        },
        TargetRef::Tower(team) if team == enemy.team => match enemy.tower.as_mut() {
            Some(tower) => strike_tower(frame, striker, tower, hit),
            None => HitOutcome::default(),
        },
        TargetRef::Tower(_) => HitOutcome::default(),
    }
}

/// Hit every alive enemy unit within `radius` of `center` in roster order,
/// then the enemy tower when `include_tower` is set. Stops as soon as the
/// striker dies. Returns the roster indices of the units struck.
pub fn strike_area(
    frame: &mut Frame,
    striker: &mut Striker,
    enemy: &mut Side,
    center: Vec2,
    radius: f32,
    hit: Hit,
    include_tower: bool,
) -> SmallVec<[usize; 8]> {
    let mut struck = SmallVec::new();
    for index in 0..enemy.units.len() {
        if striker.is_spent() {
            return struck;
        }
        let target = &mut enemy.units[index];
        if target.is_alive() && target.position.distance(center) <= radius {
            strike_unit(frame, striker, target, &enemy.modifiers, hit);
            struck.push(index);
        }
    }
    if include_tower && !striker.is_spent() {
        if let Some(tower) = enemy.tower.as_mut() {
            if tower.is_alive() && tower.position.distance(center) <= radius {
                strike_tower(frame, striker, tower, hit);
            }
        }
    }
    struck
}

/// Apply a resolved DoT tick. DoTs bypass crits, reduction and thorns.
pub fn apply_dot(frame: &mut Frame, unit: &mut Unit, tick: DotTick) {
    let name = combatant_id(unit);
    for (kind, amount) in tick.parts() {
        let change = unit.lose_health(amount);
        if change.amount <= 0.0 {
            continue;
        }
        frame.log.log_damage(
            kind.name().to_string(),
            name.clone(),
            kind.name().to_string(),
            change.amount,
            false,
            change.died,
            format!("{} takes {:.0} {} damage", name, change.amount, kind.name()),
        );
        frame.outbox.push(MatchNotification::DamageNumber {
            position: unit.position,
            amount: change.amount,
            crit: false,
        });
        if change.died {
            on_unit_death(frame, unit, Some(kind.name().to_string()));
            break;
        }
    }
}

/// Heal an ally and log it
pub fn heal_unit(frame: &mut Frame, source: &CombatantId, ability: &str, target: &mut Unit, amount: f32) -> f32 {
    let healed = target.heal(amount);
    if healed > 0.0 {
        let target_name = combatant_id(target);
        frame.log.log_healing(
            source.clone(),
            target_name.clone(),
            ability.to_string(),
            healed,
            format!("{}'s {} heals {} for {:.0}", source, ability, target_name, healed),
        );
    }
    healed
}

/// One-time side effects of a unit crossing zero health.
///
/// Kill credit and XP orbs are handled by the end-of-tick sweep.
pub fn on_unit_death(frame: &mut Frame, unit: &Unit, killer: Option<CombatantId>) {
    let name = combatant_id(unit);
    let message = match &killer {
        Some(killer) => format!("{} was killed by {}", name, killer),
        None => format!("{} died", name),
    };
    frame.log.log_death(name, killer, message);
    frame.sound(SoundCue::Death);
}

/// Nearest alive enemy unit, then the enemy tower, by distance only.
pub fn nearest_target(from: Vec2, enemy: &Side) -> Option<(TargetRef, f32)> {
    let mut best: Option<(TargetRef, f32)> = None;
    for unit in enemy.units.iter().filter(|u| u.is_alive()) {
        let distance = from.distance(unit.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((TargetRef::Unit(unit.id), distance));
        }
    }
    if let Some(tower) = enemy.tower.as_ref().filter(|t| t.is_alive()) {
        let distance = from.distance(tower.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((TargetRef::Tower(tower.team), distance));
        }
    }
    best
}

/// Pick this tick's target: a live taunt wins, otherwise the nearest enemy.
pub fn acquire_target(unit: &Unit, enemy: &Side, now: f32) -> Option<TargetRef> {
    if let Some(knight) = unit.active_taunt(now) {
        if enemy.index_of(knight).is_some() {
            return Some(TargetRef::Unit(knight));
        }
    }
    nearest_target(unit.position, enemy).map(|(target, _)| target)
}

/// Advance one unit through its state machine.
pub fn step_unit(index: usize, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let now = frame.now;
    {
        let unit = &mut own.units[index];
        if !unit.is_alive() {
            return;
        }
        unit.refresh_stats(&own.modifiers);
        unit.advance_animation(frame.dt);

        let toughness = unit.toughness();
        if let Some(tick) = unit.status.resolve(now, &toughness) {
            apply_dot(frame, unit, tick);
            if !unit.is_alive() {
                return;
            }
        }

        if unit.is_frozen(now) {
            return;
        }

        let regen = unit.regen_per_sec(&own.modifiers) * frame.dt;
        unit.heal(regen);
    }

    class_ai::pre_step(index, own, enemy, frame);
    if !own.units[index].is_alive() {
        return;
    }

    let target = acquire_target(&own.units[index], enemy, now);
    own.units[index].target = target;

    let Some(target) = target else {
        march_forward(&mut own.units[index], frame);
        return;
    };
    let Some(target_position) = enemy.target_position(target) else {
        own.units[index].target = None;
        return;
    };

    let unit = &mut own.units[index];
    if unit.position.distance(target_position) > unit.attack_range {
        unit.position = step_towards(unit.position, target_position, unit.speed * frame.dt);
        return;
    }

    if !unit.attack_ready(now) {
        return;
    }
    unit.last_attack = Some(now);
    unit.attack_count += 1;
    class_ai::attack(index, target, own, enemy, frame);
}

/// Seeking: walk toward the enemy base.
pub fn march_forward(unit: &mut Unit, frame: &Frame) {
    let step = Vec2::new(0.0, unit.team.forward() * unit.speed * frame.dt);
    unit.position = clamp_to_field(unit.position + step, frame.settings);
}
