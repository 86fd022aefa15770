//! Projectiles and Chains
//!
//! Arrows, fireballs, ghosts and tower bolts fly independently of the unit
//! that launched them. Each tick they re-aim at the target's current position
//! and resolve on proximity. If the target dies mid-flight the projectile
//! keeps flying to the last known position and fizzles there.
//!
//! Chains (Conflagration, Soul Chain) are bolts that hop between enemies:
//! each hop lands with decayed damage, then looks for the nearest enemy not
//! yet in its hit-set within its hop radius. No eligible hop ends the chain.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::combat_core::{heal_unit, strike_target, strike_unit, Frame, Hit, Striker};
use super::components::{TargetRef, UnitId};
use super::constants::*;
use super::match_flow::Side;
use super::status_effects::StatusKind;
use super::utils::{combatant_id, step_towards};
use crate::states::match_config::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Arrow,
    Fireball,
    Ghost,
    TowerBolt,
}

impl ProjectileKind {
    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Arrow => ARROW_SPEED,
            ProjectileKind::Fireball => FIREBALL_SPEED,
            ProjectileKind::Ghost => GHOST_SPEED,
            ProjectileKind::TowerBolt => TOWER_BOLT_SPEED,
        }
    }

    pub fn hit_distance(self) -> f32 {
        match self {
            ProjectileKind::Ghost => GHOST_HIT_DISTANCE,
            _ => PROJECTILE_HIT_DISTANCE,
        }
    }

    pub fn ability_name(self) -> &'static str {
        match self {
            ProjectileKind::Arrow => "Arrow",
            ProjectileKind::Fireball => "Fireball",
            ProjectileKind::Ghost => "Ghost Bolt",
            ProjectileKind::TowerBolt => "Tower Bolt",
        }
    }
}

/// A homing projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Team that fired it
    pub team: Team,
    /// Unit that fired it (`None` for towers)
    pub caster: Option<UnitId>,
    pub position: Vec2,
    pub target: TargetRef,
    /// Last known target position
    pub aim: Vec2,
    pub damage: f32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        team: Team,
        caster: Option<UnitId>,
        origin: Vec2,
        target: TargetRef,
        aim: Vec2,
        damage: f32,
    ) -> Self {
        Self {
            kind,
            team,
            caster,
            position: origin,
            target,
            aim,
            damage,
            alive: true,
        }
    }
}

/// Caster handle resolved to a striker over `own`
fn striker_for<'a>(team: Team, caster: Option<UnitId>, own: &'a mut Side) -> Striker<'a> {
    let unit = match caster.and_then(|id| own.index_of(id)) {
        Some(index) => Some(&mut own.units[index]),
        None => None,
    };
    Striker {
        team,
        unit,
        modifiers: &own.modifiers,
    }
}

/// Stack a status on a unit target if it is still alive
fn add_status(enemy: &mut Side, target: TargetRef, kind: StatusKind, amount: f32) {
    if let TargetRef::Unit(id) = target {
        if let Some(unit) = enemy.unit_mut(id).filter(|u| u.is_alive()) {
            unit.status.add(kind, amount);
        }
    }
}

/// Move a projectile one tick and resolve it if it arrived.
pub fn update_projectile(projectile: &mut Projectile, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    if !projectile.alive {
        return;
    }
    let target_valid = match enemy.target_position(projectile.target) {
        Some(position) => {
            projectile.aim = position;
            true
        }
        None => false,
    };

    projectile.position = step_towards(
        projectile.position,
        projectile.aim,
        projectile.kind.speed() * frame.dt,
    );
    if projectile.position.distance(projectile.aim) > projectile.kind.hit_distance() {
        return;
    }

    projectile.alive = false;
    if target_valid {
        resolve_impact(projectile, own, enemy, frame);
    }
}

fn resolve_impact(projectile: &Projectile, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let burn = FIREBALL_BURN * own.modifiers.burn;
    let poison = ARROW_POISON * own.modifiers.poison;
    let splash = FIREBALL_SPLASH_FRACTION * own.modifiers.splash;

    let mut striker = striker_for(projectile.team, projectile.caster, own);
    let hit = Hit::new(projectile.damage, projectile.kind.ability_name());
    let outcome = strike_target(frame, &mut striker, enemy, projectile.target, hit);

    match projectile.kind {
        ProjectileKind::Arrow => add_status(enemy, projectile.target, StatusKind::Poison, poison),
        ProjectileKind::TowerBolt => add_status(enemy, projectile.target, StatusKind::Void, TOWER_BOLT_VOID),
        ProjectileKind::Fireball => {
            add_status(enemy, projectile.target, StatusKind::Burn, burn);
            let splash_hit = Hit::flat(projectile.damage * splash, "Fireball Splash");
            for index in 0..enemy.units.len() {
                if striker.is_spent() {
                    break;
                }
                let unit = &mut enemy.units[index];
                if TargetRef::Unit(unit.id) == projectile.target
                    || !unit.is_alive()
                    || unit.position.distance(projectile.aim) > FIREBALL_SPLASH_RADIUS
                {
                    continue;
                }
                strike_unit(frame, &mut striker, unit, &enemy.modifiers, splash_hit);
            }
        }
        ProjectileKind::Ghost => {
            add_status(enemy, projectile.target, StatusKind::Death, GHOST_CURSE);
            if let Some(wraith) = striker.unit.as_deref_mut() {
                let source = combatant_id(wraith);
                heal_unit(frame, &source, "Soul Siphon", wraith, outcome.dealt * GHOST_LIFESTEAL);
            }
        }
    }
}

// ============================================================================
// Chains
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    /// Mage fire chain; stacks burn
    Conflagration,
    /// Wraith spirit chain; stacks death curse
    SoulChain,
}

impl ChainKind {
    pub fn hop_radius(self) -> f32 {
        match self {
            ChainKind::Conflagration => CONFLAGRATION_HOP_RADIUS,
            ChainKind::SoulChain => SOUL_CHAIN_HOP_RADIUS,
        }
    }

    pub fn decay(self) -> f32 {
        match self {
            ChainKind::Conflagration => CONFLAGRATION_DECAY,
            ChainKind::SoulChain => SOUL_CHAIN_DECAY,
        }
    }

    fn hop_rate(self) -> f32 {
        match self {
            ChainKind::Conflagration => CONFLAGRATION_HOP_RATE,
            ChainKind::SoulChain => SOUL_CHAIN_HOP_RATE,
        }
    }

    fn status(self) -> (StatusKind, f32) {
        match self {
            ChainKind::Conflagration => (StatusKind::Burn, CONFLAGRATION_BURN),
            ChainKind::SoulChain => (StatusKind::Death, SOUL_CHAIN_CURSE),
        }
    }

    pub fn ability_name(self) -> &'static str {
        match self {
            ChainKind::Conflagration => "Conflagration",
            ChainKind::SoulChain => "Soul Chain",
        }
    }
}

/// A hopping chain effect
#[derive(Debug, Clone, PartialEq)]
pub struct ChainEffect {
    pub kind: ChainKind,
    pub team: Team,
    pub caster: Option<UnitId>,
    /// Where the current hop started
    pub from: Vec2,
    /// Current bolt position, for rendering
    pub position: Vec2,
    /// Current hop target; `None` once the chain has ended
    pub target: Option<TargetRef>,
    pub hit: SmallVec<[TargetRef; 8]>,
    /// Damage the next landing deals
    pub damage: f32,
    /// Progress of the current hop, 0..1
    pub progress: f32,
}

impl ChainEffect {
    pub fn new(kind: ChainKind, team: Team, caster: Option<UnitId>, origin: Vec2, target: TargetRef, damage: f32) -> Self {
        Self {
            kind,
            team,
            caster,
            from: origin,
            position: origin,
            target: Some(target),
            hit: SmallVec::new(),
            damage,
            progress: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.target.is_none()
    }

    pub fn has_hit(&self, target: TargetRef) -> bool {
        self.hit.contains(&target)
    }
}

/// Nearest alive enemy unit strictly inside `radius` of `from` that is not
/// in `hit`. Ties go to the earlier roster entry.
pub fn next_hop(from: Vec2, enemy: &Side, hit: &[TargetRef], radius: f32) -> Option<TargetRef> {
    enemy
        .units
        .iter()
        .filter(|u| u.is_alive() && !hit.contains(&TargetRef::Unit(u.id)))
        .map(|u| (u.id, u.position.distance(from)))
        .filter(|(_, distance)| *distance < radius)
        .fold(None, |best: Option<(UnitId, f32)>, (id, distance)| match best {
            Some((_, d)) if d <= distance => best,
            _ => Some((id, distance)),
        })
        .map(|(id, _)| TargetRef::Unit(id))
}

/// Advance a chain one tick: fly, land, hop.
pub fn update_chain(chain: &mut ChainEffect, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    let Some(target) = chain.target else {
        return;
    };
    if chain.has_hit(target) {
        chain.target = None;
        return;
    }
    let Some(target_position) = enemy.target_position(target) else {
        // Target died mid-hop
        chain.target = None;
        return;
    };

    chain.progress = (chain.progress + chain.kind.hop_rate() * frame.dt).min(1.0);
    chain.position = chain.from.lerp(target_position, chain.progress);
    if chain.progress < 1.0 {
        return;
    }

    chain.hit.push(target);
    let mut striker = striker_for(chain.team, chain.caster, own);
    strike_target(
        frame,
        &mut striker,
        enemy,
        target,
        Hit::flat(chain.damage, chain.kind.ability_name()),
    );
    let (status, amount) = chain.kind.status();
    add_status(enemy, target, status, amount);

    chain.damage *= chain.kind.decay();
    chain.from = target_position;
    chain.position = target_position;
    chain.progress = 0.0;
    chain.target = next_hop(target_position, enemy, &chain.hit, chain.kind.hop_radius());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::match_config::{MatchSettings, UnitClass};
    use crate::states::play_match::cards::TeamModifiers;
    use crate::states::play_match::components::Unit;
    use crate::states::play_match::unit_config::UnitStatTable;

    #[test]
    fn test_chain_starts_unhit() {
        let chain = ChainEffect::new(
            ChainKind::Conflagration,
            Team::Top,
            None,
            Vec2::ZERO,
            TargetRef::Tower(Team::Bottom),
            10.0,
        );
        assert!(!chain.is_finished());
        assert!(!chain.has_hit(TargetRef::Tower(Team::Bottom)));
    }

    #[test]
    fn test_ghosts_resolve_from_further_out() {
        assert!(ProjectileKind::Ghost.hit_distance() > ProjectileKind::Arrow.hit_distance());
    }

    fn side_with(positions: &[Vec2]) -> Side {
        let settings = MatchSettings::default();
        let stats = UnitStatTable::default();
        let mut side = Side::new(Team::Bottom, &settings);
        for (n, position) in positions.iter().enumerate() {
            side.units.push(Unit::new(
                UnitId(n as u32 + 1),
                Team::Bottom,
                UnitClass::Swordsman,
                *position,
                stats.get(UnitClass::Swordsman),
                &TeamModifiers::default(),
                0.0,
            ));
        }
        side
    }

    #[test]
    fn test_next_hop_radius_is_exclusive() {
        let on_edge = side_with(&[Vec2::new(70.0, 0.0)]);
        assert_eq!(next_hop(Vec2::ZERO, &on_edge, &[], 70.0), None, "a unit exactly on the radius is out");

        let inside = side_with(&[Vec2::new(69.9, 0.0)]);
        assert_eq!(next_hop(Vec2::ZERO, &inside, &[], 70.0), Some(TargetRef::Unit(UnitId(1))));
    }

    #[test]
    fn test_next_hop_skips_hit_and_breaks_ties_by_roster_order() {
        let side = side_with(&[Vec2::new(10.0, 0.0), Vec2::new(-30.0, 0.0), Vec2::new(0.0, 30.0)]);

        let hit = [TargetRef::Unit(UnitId(1))];
        assert_eq!(
            next_hop(Vec2::ZERO, &side, &hit, 70.0),
            Some(TargetRef::Unit(UnitId(2))),
            "equal distances go to the earlier roster entry"
        );
    }
}
