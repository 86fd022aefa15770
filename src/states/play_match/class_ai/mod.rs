//! Class-Specific Behavior
//!
//! All classes share the state machine in `combat_core`; what differs is the
//! effect of a successful attack and an optional hook that runs every tick
//! before targeting. Both are plain functions selected by matching on the
//! unit's class tag.
//!
//! | Class     | Pre-step        | Attack                               |
//! |-----------|-----------------|--------------------------------------|
//! | Swordsman | -               | direct hit, sweep every 3rd          |
//! | Archer    | -               | arrow, fan volley every 5th          |
//! | Mage      | -               | fireball, conflagration every 10th   |
//! | Knight    | taunt           | direct hit with freeze chance        |
//! | Healer    | heal            | direct hit                           |
//! | Ogre      | slam            | cleave                               |
//! | Wraith    | reap            | ghost, soul chain every 8th          |

pub mod archer;
pub mod healer;
pub mod knight;
pub mod mage;
pub mod ogre;
pub mod swordsman;
pub mod wraith;

use super::combat_core::{strike_target, Frame, Hit, HitOutcome, Striker};
use super::components::TargetRef;
use super::match_flow::Side;
use crate::states::match_config::UnitClass;

/// Per-tick hook, run after regen and before targeting.
pub fn pre_step(index: usize, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    match own.units[index].class {
        UnitClass::Knight => knight::try_taunt(index, own, enemy, frame),
        UnitClass::Healer => healer::try_heal(index, own, frame),
        UnitClass::Ogre => ogre::try_slam(index, own, enemy, frame),
        UnitClass::Wraith => wraith::try_reap(index, own, enemy, frame),
        UnitClass::Swordsman | UnitClass::Archer | UnitClass::Mage => {}
    }
}

/// Effect of a successful attack. The cooldown and attack counter have
/// already been updated.
pub fn attack(index: usize, target: TargetRef, own: &mut Side, enemy: &mut Side, frame: &mut Frame) {
    match own.units[index].class {
        UnitClass::Swordsman => swordsman::attack(index, target, own, enemy, frame),
        UnitClass::Archer => archer::attack(index, target, own, enemy, frame),
        UnitClass::Mage => mage::attack(index, target, own, enemy, frame),
        UnitClass::Knight => knight::attack(index, target, own, enemy, frame),
        UnitClass::Healer => healer::attack(index, target, own, enemy, frame),
        UnitClass::Ogre => ogre::attack(index, target, own, enemy, frame),
        UnitClass::Wraith => wraith::attack(index, target, own, enemy, frame),
    }
}

/// Plain single-target hit with the unit's effective damage.
pub(crate) fn direct_hit(
    index: usize,
    target: TargetRef,
    ability: &'static str,
    own: &mut Side,
    enemy: &mut Side,
    frame: &mut Frame,
) -> HitOutcome {
    let damage = own.units[index].damage;
    let mut striker = Striker {
        team: own.team,
        unit: Some(&mut own.units[index]),
        modifiers: &own.modifiers,
    };
    strike_target(frame, &mut striker, enemy, target, Hit::new(damage, ability))
}
