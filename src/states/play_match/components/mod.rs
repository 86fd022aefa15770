//! Core Data Definitions for Play Match
//!
//! Units, their handles and lifecycle, the match clock, and the seeded RNG.
//!
//! Units live in plain per-team `Vec`s owned by the match rather than in the
//! ECS world: every interaction between two units (damage, heals, taunts)
//! happens through a [`UnitId`] handle that is looked up and liveness-checked
//! right before use. A handle that no longer resolves is treated exactly like
//! "no target".

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::cards::TeamModifiers;
use super::constants::*;
use super::status_effects::{StatusEffects, Toughness};
use super::unit_config::UnitStats;
use crate::states::match_config::{Team, UnitClass};

// ============================================================================
// Resources
// ============================================================================

/// Seeded random number generator for deterministic match simulation.
///
/// When a seed is provided (e.g., via headless config), the same seed will
/// always produce the same match outcome. Without a seed, uses system entropy.
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Roll against a probability. Never true for `chance <= 0`.
    pub fn roll(&mut self, chance: f32) -> bool {
        chance > 0.0 && self.random_f32() < chance
    }

    /// Uniform sample of up to `count` distinct items
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect()
    }

    /// Uniform pick of one item
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Monotonic match clock, in seconds.
///
/// Only ever moved forward by the deltas handed to the simulation, so tests
/// can drive it with synthetic steps of any size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: f32,
}

impl SimClock {
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Move forward; negative and non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
        self.now
    }
}

// ============================================================================
// Unit Handles
// ============================================================================

/// Stable handle to a unit. Never reused within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Something a unit can aim at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Unit(UnitId),
    /// The tower owned by this team
    Tower(Team),
}

/// Lifecycle of a unit.
///
/// `Dying` is entered exactly once, the moment health hits zero. The
/// end-of-tick sweep credits the kill, moves the unit to `Retired` and drops
/// it from the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    Dying,
    Retired,
}

/// What a health change actually did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthChange {
    /// HP actually removed (never more than the unit had)
    pub amount: f32,
    /// This change moved the unit from alive to dying
    pub died: bool,
}

/// Cooldown check against the match clock.
///
/// A unit that never attacked is always ready.
pub fn cooldown_ready(last: Option<f32>, now: f32, cooldown: f32) -> bool {
    match last {
        None => true,
        Some(last) => now - last >= cooldown,
    }
}

// ============================================================================
// Unit
// ============================================================================

/// Match times at which class abilities become available again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityTimers {
    pub next_heal_at: f32,
    pub next_slam_at: f32,
    pub next_reap_at: f32,
    pub next_taunt_at: f32,
}

impl AbilityTimers {
    fn ready_at(now: f32) -> Self {
        Self {
            next_heal_at: now,
            next_slam_at: now,
            next_reap_at: now,
            next_taunt_at: now,
        }
    }
}

/// A forced target imposed by an enemy knight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taunt {
    pub by: UnitId,
    pub until: f32,
}

/// Walk-cycle counters for the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    pub frame: u8,
    pub timer: f32,
}

/// An autonomous combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub class: UnitClass,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Stats before team modifiers
    pub base: UnitStats,
    // Effective stats, refreshed from the team's modifiers every tick
    pub damage: f32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub last_attack: Option<f32>,
    pub lifecycle: Lifecycle,
    pub target: Option<TargetRef>,
    pub status: StatusEffects,
    /// Successful attacks so far; drives every-Nth-attack abilities
    pub attack_count: u32,
    pub abilities: AbilityTimers,
    pub taunt: Option<Taunt>,
    pub invulnerable_until: f32,
    pub animation: AnimationState,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

impl Unit {
    /// Create a unit with max health scaled by the team's health multiplier.
    pub fn new(
        id: UnitId,
        team: Team,
        class: UnitClass,
        position: Vec2,
        base: UnitStats,
        modifiers: &TeamModifiers,
        now: f32,
    ) -> Self {
        let max_health = (base.max_health * modifiers.health_multiplier(class)).max(1.0);
        let mut unit = Self {
            id,
            team,
            class,
            position,
            health: max_health,
            max_health,
            base,
            damage: base.damage,
            speed: base.speed,
            attack_range: base.attack_range,
            attack_cooldown: base.attack_cooldown,
            last_attack: None,
            lifecycle: Lifecycle::Alive,
            target: None,
            status: StatusEffects::new(now),
            attack_count: 0,
            abilities: AbilityTimers::ready_at(now),
            taunt: None,
            invulnerable_until: 0.0,
            animation: AnimationState::default(),
            damage_dealt: 0.0,
            damage_taken: 0.0,
        };
        unit.refresh_stats(modifiers);
        unit
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub fn toughness(&self) -> Toughness {
        Toughness::for_class(self.class)
    }

    /// Recompute effective combat stats from the team's current modifiers.
    pub fn refresh_stats(&mut self, modifiers: &TeamModifiers) {
        self.damage = self.base.damage * modifiers.damage_multiplier(self.class);
        self.speed = self.base.speed * modifiers.speed;
        self.attack_range = self.base.attack_range * modifiers.range_multiplier(self.class);
        self.attack_cooldown = self.base.attack_cooldown / modifiers.attack_speed.max(f32::EPSILON);
    }

    /// HP regenerated per second under the given modifiers.
    pub fn regen_per_sec(&self, modifiers: &TeamModifiers) -> f32 {
        self.base.regen * modifiers.regen + REGEN_CARD_HPS * (modifiers.regen - 1.0).max(0.0)
    }

    pub fn attack_ready(&self, now: f32) -> bool {
        cooldown_ready(self.last_attack, now, self.attack_cooldown)
    }

    pub fn is_frozen(&self, now: f32) -> bool {
        self.status.is_frozen(now)
    }

    pub fn is_invulnerable(&self, now: f32) -> bool {
        now < self.invulnerable_until
    }

    /// Remove health, clamped at zero.
    ///
    /// Non-alive units take nothing. The returned change reports `died` only
    /// on the call that crossed zero.
    pub fn lose_health(&mut self, amount: f32) -> HealthChange {
        if !self.is_alive() || !(amount > 0.0) {
            return HealthChange::default();
        }
        let dealt = amount.min(self.health);
        self.health = (self.health - amount).max(0.0);
        self.damage_taken += dealt;

        let died = self.health <= 0.0;
        if died {
            self.lifecycle = Lifecycle::Dying;
        }
        debug_assert!(self.health >= 0.0 && self.health <= self.max_health);
        HealthChange { amount: dealt, died }
    }

    /// Restore health up to max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || !(amount > 0.0) {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    pub fn is_injured(&self) -> bool {
        self.is_alive() && self.health < self.max_health
    }

    pub fn advance_animation(&mut self, dt: f32) {
        self.animation.timer += dt;
        while self.animation.timer >= ANIMATION_FRAME_TIME {
            self.animation.timer -= ANIMATION_FRAME_TIME;
            self.animation.frame = (self.animation.frame + 1) % ANIMATION_FRAMES;
        }
    }

    /// The knight this unit is forced onto, if the taunt is still running.
    pub fn active_taunt(&self, now: f32) -> Option<UnitId> {
        self.taunt.filter(|t| now < t.until).map(|t| t.by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::play_match::unit_config::UnitStats;

    fn swordsman() -> Unit {
        Unit::new(
            UnitId(1),
            Team::Top,
            UnitClass::Swordsman,
            Vec2::ZERO,
            UnitStats::builtin(UnitClass::Swordsman),
            &TeamModifiers::default(),
            0.0,
        )
    }

    #[test]
    fn test_overkill_clamps_to_zero_and_dies_once() {
        let mut unit = swordsman();
        let change = unit.lose_health(250.0);
        assert_eq!(unit.health, 0.0);
        assert_eq!(change.amount, 100.0);
        assert!(change.died);
        assert_eq!(unit.lifecycle, Lifecycle::Dying);

        let again = unit.lose_health(50.0);
        assert!(!again.died, "a dying unit must not die twice");
        assert_eq!(again.amount, 0.0);
        assert_eq!(unit.health, 0.0);
    }

    #[test]
    fn test_exact_lethal_damage_kills() {
        let mut unit = swordsman();
        assert!(unit.lose_health(100.0).died);
    }

    #[test]
    fn test_heal_clamps_to_max_and_skips_dead() {
        let mut unit = swordsman();
        unit.lose_health(10.0);
        assert_eq!(unit.heal(50.0), 10.0);
        assert_eq!(unit.health, unit.max_health);

        unit.lose_health(1000.0);
        assert_eq!(unit.heal(50.0), 0.0);
        assert_eq!(unit.health, 0.0);
    }

    #[test]
    fn test_cooldown_ready_uses_elapsed_time() {
        assert!(cooldown_ready(None, 0.0, 1.0));
        assert!(!cooldown_ready(Some(0.25), 0.75, 1.0));
        assert!(cooldown_ready(Some(0.25), 1.25, 1.0));
        // One giant delta is still just "ready"
        assert!(cooldown_ready(Some(0.25), 500.0, 1.0));
    }

    #[test]
    fn test_attack_speed_shortens_cooldown() {
        let mut mods = TeamModifiers::default();
        mods.attack_speed = 2.0;
        let mut unit = swordsman();
        unit.refresh_stats(&mods);
        assert_eq!(unit.attack_cooldown, 0.5);
    }

    #[test]
    fn test_regular_units_do_not_regen_without_cards() {
        let unit = swordsman();
        assert_eq!(unit.regen_per_sec(&TeamModifiers::default()), 0.0);
        let mut mods = TeamModifiers::default();
        mods.regen = 1.2;
        assert!((unit.regen_per_sec(&mods) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_ignores_bad_deltas() {
        let mut clock = SimClock::default();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.now(), 0.5);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = GameRng::from_seed(99);
        let mut b = GameRng::from_seed(99);
        for _ in 0..10 {
            assert_eq!(a.random_f32(), b.random_f32());
        }
        assert!(!a.roll(0.0));
    }
}
