//! Play Match - Two-Team Battle Simulation
//!
//! Two teams face off across a rectangular field, each defending a tower at
//! its own edge. Buildings produce units that march toward the enemy, fight
//! whatever is nearest, and die into XP orbs for the other side. Levels
//! grant cards (team-wide multipliers and ability unlocks) and further
//! buildings. The first tower to fall decides the match.
//!
//! ## Combat System
//! - **Target Acquisition**: nearest alive enemy unit or the enemy tower
//! - **Movement**: approach until within attack range, otherwise march forward
//! - **Attacks**: on cooldown, effect depends on class (see `class_ai`)
//! - **Status Effects**: burn, poison, void and death curse tick once a second;
//!   freeze stops a unit cold
//! - **Win Condition**: a destroyed tower ends the match for good
//!
//! ## Flow
//! 1. `MatchSim::start` places towers and asks both teams for a building
//! 2. `MatchSim::advance` runs one tick (see `match_flow` for the order)
//! 3. Level-ups pause the match until the pending selection is answered
//! 4. Hosts drain `MatchNotification`s after each call

// Submodules
pub mod cards;
pub mod class_ai;
pub mod combat_core;
pub mod components;
pub mod constants;
pub mod match_flow;
pub mod notifications;
pub mod production;
pub mod progression;
pub mod projectiles;
pub mod selection;
pub mod status_effects;
pub mod tower;
pub mod unit_config;
pub mod utils;

// Re-exports
pub use cards::{card_catalog, Card, CardEffect, ModifierScope, ScopedMultiplier, TeamModifiers};
pub use components::{Lifecycle, TargetRef, Unit, UnitId};
pub use match_flow::{MatchSim, Side};
pub use notifications::{MatchNotification, SoundCue};
pub use production::{BuildingChoice, ProductionBuilding};
pub use progression::XpOrb;
pub use projectiles::{ChainEffect, ChainKind, Projectile, ProjectileKind};
pub use selection::{ActiveSelection, SelectionKind, SelectionOffer};
pub use status_effects::{StatusEffects, StatusKind};
pub use tower::Tower;
pub use unit_config::{UnitStatTable, UnitStats};
