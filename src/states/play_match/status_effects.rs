//! Status Effects
//!
//! Per-unit damage-over-time accumulators (burn, poison, void, death curse)
//! and the freeze debuff.
//!
//! DoTs are resolved on a fixed interval measured against the match clock,
//! never per simulation tick, so the damage a unit takes does not depend on
//! frame rate. Each resolution deals `floor(intensity × dot_factor)` per kind
//! and then decays every intensity by its per-tick amount.

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::states::match_config::UnitClass;

/// The damage-over-time kinds a unit can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Burn,
    Poison,
    Void,
    Death,
}

impl StatusKind {
    pub fn name(self) -> &'static str {
        match self {
            StatusKind::Burn => "Burn",
            StatusKind::Poison => "Poison",
            StatusKind::Void => "Void",
            StatusKind::Death => "Death Curse",
        }
    }

    fn decay_per_tick(self) -> f32 {
        match self {
            StatusKind::Burn => BURN_DECAY_PER_TICK,
            StatusKind::Poison => POISON_DECAY_PER_TICK,
            StatusKind::Void => VOID_DECAY_PER_TICK,
            StatusKind::Death => DEATH_DECAY_PER_TICK,
        }
    }
}

/// How much punishment a class shrugs off.
///
/// Groups the per-class constants that make elites tanky: the fraction of
/// incoming hits they take, the fraction of DoT they take, and how often
/// their DoTs resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toughness {
    /// Multiplier on incoming hit damage (1.0 = no reduction)
    pub damage_taken: f32,
    /// Multiplier on DoT damage
    pub dot_factor: f32,
    /// Seconds between DoT resolutions
    pub dot_interval: f32,
}

impl Toughness {
    pub const REGULAR: Toughness = Toughness {
        damage_taken: 1.0,
        dot_factor: 1.0,
        dot_interval: DOT_TICK_INTERVAL,
    };

    pub const OGRE: Toughness = Toughness {
        damage_taken: 0.8,
        dot_factor: 0.5,
        dot_interval: 1.0,
    };

    pub const WRAITH: Toughness = Toughness {
        damage_taken: 0.85,
        dot_factor: 0.5,
        dot_interval: 1.0,
    };

    pub fn for_class(class: UnitClass) -> Toughness {
        match class {
            UnitClass::Ogre => Toughness::OGRE,
            UnitClass::Wraith => Toughness::WRAITH,
            _ => Toughness::REGULAR,
        }
    }

    /// Apply the flat reduction to an incoming hit.
    ///
    /// Reduced hits are floored; unreduced hits pass through untouched.
    pub fn reduce(&self, amount: f32) -> f32 {
        if self.damage_taken < 1.0 {
            (amount * self.damage_taken).floor()
        } else {
            amount
        }
    }
}

/// Damage produced by one DoT resolution, broken down by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DotTick {
    pub burn: f32,
    pub poison: f32,
    pub void: f32,
    pub death: f32,
}

impl DotTick {
    /// Non-zero components, for logging
    pub fn parts(&self) -> impl Iterator<Item = (StatusKind, f32)> {
        [
            (StatusKind::Burn, self.burn),
            (StatusKind::Poison, self.poison),
            (StatusKind::Void, self.void),
            (StatusKind::Death, self.death),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
    }
}

/// A unit's status-effect set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub burning: f32,
    pub poison: f32,
    pub void: f32,
    pub death: f32,
    /// Match time until which the unit is frozen
    pub frozen_until: f32,
    /// Match time of the last DoT resolution
    pub last_tick: f32,
}

impl StatusEffects {
    /// A clean set whose first DoT resolution is one interval after `now`.
    pub fn new(now: f32) -> Self {
        Self {
            last_tick: now,
            ..Self::default()
        }
    }

    pub fn intensity(&self, kind: StatusKind) -> f32 {
        match kind {
            StatusKind::Burn => self.burning,
            StatusKind::Poison => self.poison,
            StatusKind::Void => self.void,
            StatusKind::Death => self.death,
        }
    }

    fn slot(&mut self, kind: StatusKind) -> &mut f32 {
        match kind {
            StatusKind::Burn => &mut self.burning,
            StatusKind::Poison => &mut self.poison,
            StatusKind::Void => &mut self.void,
            StatusKind::Death => &mut self.death,
        }
    }

    /// Stack more of a DoT. Non-positive or non-finite amounts are ignored.
    pub fn add(&mut self, kind: StatusKind, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            *self.slot(kind) += amount;
        }
    }

    /// Freeze until `now + duration`; never shortens an existing freeze.
    pub fn freeze(&mut self, now: f32, duration: f32) {
        self.frozen_until = self.frozen_until.max(now + duration);
    }

    pub fn is_frozen(&self, now: f32) -> bool {
        now < self.frozen_until
    }

    pub fn has_dot(&self) -> bool {
        self.burning > 0.0 || self.poison > 0.0 || self.void > 0.0 || self.death > 0.0
    }

    /// Resolve DoTs if a full interval has passed since the last resolution.
    ///
    /// At most one resolution happens per call, so a huge delta cannot burst
    /// several ticks of damage at once. Returns `None` when no resolution was
    /// due or nothing was active.
    pub fn resolve(&mut self, now: f32, toughness: &Toughness) -> Option<DotTick> {
        if now - self.last_tick < toughness.dot_interval {
            return None;
        }
        self.last_tick = now;

        if !self.has_dot() {
            return None;
        }

        let factor = toughness.dot_factor;
        let tick = DotTick {
            burn: (self.burning * factor).floor(),
            poison: (self.poison * factor).floor(),
            void: (self.void * factor).floor(),
            death: (self.death * factor).floor(),
        };

        for kind in [StatusKind::Burn, StatusKind::Poison, StatusKind::Void, StatusKind::Death] {
            let slot = self.slot(kind);
            *slot = (*slot - kind.decay_per_tick()).max(0.0);
        }

        debug_assert!(self.burning >= 0.0 && self.poison >= 0.0);
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_waits_for_full_interval() {
        let mut status = StatusEffects::new(0.0);
        status.add(StatusKind::Burn, 5.0);

        assert!(status.resolve(0.5, &Toughness::REGULAR).is_none());
        let tick = status.resolve(1.0, &Toughness::REGULAR).expect("tick due");
        assert_eq!(tick.burn, 5.0);
        assert_eq!(status.burning, 4.0);

        // Same instant again: nothing more
        assert!(status.resolve(1.0, &Toughness::REGULAR).is_none());
    }

    #[test]
    fn test_many_small_steps_match_one_big_step() {
        let mut stepped = StatusEffects::new(0.0);
        stepped.add(StatusKind::Poison, 3.0);
        let mut total = 0.0;
        let mut now = 0.0;
        for _ in 0..40 {
            now += 0.03125;
            if let Some(tick) = stepped.resolve(now, &Toughness::REGULAR) {
                total += tick.parts().map(|(_, amount)| amount).sum::<f32>();
            }
        }
        // 1.25s elapsed: exactly one tick of 3
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_elites_take_half_dot_floored() {
        let mut status = StatusEffects::new(0.0);
        status.add(StatusKind::Burn, 5.0);
        status.add(StatusKind::Death, 3.0);
        let tick = status.resolve(1.0, &Toughness::OGRE).expect("tick due");
        assert_eq!(tick.burn, 2.0);
        assert_eq!(tick.death, 1.0);
    }

    #[test]
    fn test_decay_never_goes_negative() {
        let mut status = StatusEffects::new(0.0);
        status.add(StatusKind::Void, 1.0);
        status.resolve(1.0, &Toughness::REGULAR);
        assert_eq!(status.void, 0.0);
        assert!(!status.has_dot());
    }

    #[test]
    fn test_add_ignores_garbage() {
        let mut status = StatusEffects::default();
        status.add(StatusKind::Burn, -3.0);
        status.add(StatusKind::Burn, f32::NAN);
        assert_eq!(status.burning, 0.0);
    }

    #[test]
    fn test_freeze_extends_only() {
        let mut status = StatusEffects::default();
        status.freeze(0.0, 2.0);
        status.freeze(0.5, 1.0);
        assert_eq!(status.frozen_until, 2.0);
        assert!(status.is_frozen(1.9));
        assert!(!status.is_frozen(2.0));
    }

    #[test]
    fn test_reduction_floors_only_reduced_hits() {
        assert_eq!(Toughness::OGRE.reduce(33.0), 26.0);
        assert_eq!(Toughness::WRAITH.reduce(100.0), 85.0);
        assert_eq!(Toughness::REGULAR.reduce(12.5), 12.5);
    }
}
