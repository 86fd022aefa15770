//! Combat Constants
//!
//! Centralized location for magic numbers used throughout the simulation.
//! Per-class base stats live in `unit_config.rs`; everything here is shared
//! tuning that the data file does not cover.

// ============================================================================
// Field Geometry
// ============================================================================

/// Default field width in world units (one unit = one source pixel).
pub const FIELD_WIDTH: f32 = 900.0;

/// Default field height in world units.
pub const FIELD_HEIGHT: f32 = 550.0;

/// Horizontal margin kept free on both sides when picking a spawn x.
pub const SPAWN_MARGIN_X: f32 = 100.0;

/// Distance of each team's spawn line from its own edge of the field.
pub const SPAWN_LINE_OFFSET: f32 = 110.0;

/// Distance of each team's tower from its own edge of the field.
pub const TOWER_LINE_OFFSET: f32 = 70.0;

/// Distance of each team's XP collection line from its own edge of the field.
pub const ORB_COLLECTION_OFFSET: f32 = 80.0;

// ============================================================================
// Damage Pipeline
// ============================================================================

/// Default crit chance before the team's crit multiplier is applied.
pub const BASE_CRIT_CHANCE: f32 = 0.1;

/// Crit damage multiplier.
pub const CRIT_MULTIPLIER: f32 = 2.0;

/// Fraction of damage dealt returned as healing once a team owns lifesteal.
/// Scaled by the team's lifesteal multiplier.
pub const LIFESTEAL_FRACTION: f32 = 0.1;

/// Fraction of damage taken reflected at the attacker once a team owns thorns.
/// Scaled by the team's thorns multiplier.
pub const THORNS_FRACTION: f32 = 0.1;

/// Regeneration in HP/s granted per +100% of regen multiplier.
/// A team with no regen cards regenerates nothing (elites excepted).
pub const REGEN_CARD_HPS: f32 = 10.0;

// ============================================================================
// Status Effects
// ============================================================================

/// Interval between DoT ticks for regular units, in seconds.
pub const DOT_TICK_INTERVAL: f32 = 1.0;

/// Burn lost per DoT tick.
pub const BURN_DECAY_PER_TICK: f32 = 1.0;

/// Poison lost per DoT tick.
pub const POISON_DECAY_PER_TICK: f32 = 0.5;

/// Void lost per DoT tick.
pub const VOID_DECAY_PER_TICK: f32 = 1.2;

/// Death curse lost per DoT tick.
pub const DEATH_DECAY_PER_TICK: f32 = 1.0;

/// Burn applied by a fireball hit (scaled by burn multiplier).
pub const FIREBALL_BURN: f32 = 2.0;

/// Poison applied by an arrow hit (scaled by poison multiplier).
pub const ARROW_POISON: f32 = 1.0;

/// Void applied by a tower bolt hit.
pub const TOWER_BOLT_VOID: f32 = 2.0;

/// Freeze chance before the team's freeze multiplier is applied.
/// Zero by default, so freezing needs a Frost card.
pub const BASE_FREEZE_CHANCE: f32 = 0.0;

/// Freeze chance granted per +100% of freeze multiplier.
pub const FREEZE_CARD_CHANCE: f32 = 1.0;

/// How long a freeze lasts, in seconds.
pub const FREEZE_DURATION: f32 = 1.0;

// ============================================================================
// Projectiles
// ============================================================================

/// Arrow travel speed in units/s.
pub const ARROW_SPEED: f32 = 480.0;

/// Fireball travel speed in units/s.
pub const FIREBALL_SPEED: f32 = 360.0;

/// Wraith ghost travel speed in units/s.
pub const GHOST_SPEED: f32 = 240.0;

/// Tower bolt travel speed in units/s.
pub const TOWER_BOLT_SPEED: f32 = 420.0;

/// Distance at which a projectile resolves against its target.
pub const PROJECTILE_HIT_DISTANCE: f32 = 10.0;

/// Ghosts are bigger and resolve a little earlier.
pub const GHOST_HIT_DISTANCE: f32 = 15.0;

/// Radius of fireball splash around the primary target.
pub const FIREBALL_SPLASH_RADIUS: f32 = 30.0;

/// Fraction of fireball damage dealt to splashed units (scaled by splash multiplier).
pub const FIREBALL_SPLASH_FRACTION: f32 = 0.3;

// ============================================================================
// Class Abilities
// ============================================================================

/// Swordsman sweep triggers on every Nth attack.
pub const SWEEP_EVERY: u32 = 3;

/// Radius of the swordsman sweep.
pub const SWEEP_RADIUS: f32 = 40.0;

/// Archer fan volley triggers on every Nth attack.
pub const FAN_EVERY: u32 = 5;

/// Arrows in a fan volley.
pub const FAN_ARROWS: usize = 5;

/// Total angular spread of a fan volley (radians, 60 degrees).
pub const FAN_SPREAD: f32 = std::f32::consts::FRAC_PI_3;

/// Mage conflagration triggers on every Nth attack.
pub const CONFLAGRATION_EVERY: u32 = 10;

/// Knight taunt cooldown in seconds.
pub const TAUNT_COOLDOWN: f32 = 6.0;

/// Radius in which enemies are taunted.
pub const TAUNT_RADIUS: f32 = 90.0;

/// How long taunted enemies are forced onto the knight.
pub const TAUNT_DURATION: f32 = 3.0;

/// Knight invulnerability after a taunt.
pub const TAUNT_INVULNERABILITY: f32 = 2.0;

/// Healer heal range.
pub const HEAL_RANGE: f32 = 22.0;

/// HP restored by a single heal.
pub const HEAL_AMOUNT: f32 = 15.0;

/// Seconds between heals.
pub const HEAL_COOLDOWN: f32 = 1.0;

// ============================================================================
// Elites
// ============================================================================

/// Extra reach of the ogre cleave beyond its attack range.
pub const CLEAVE_EXTRA_RADIUS: f32 = 30.0;

/// Seconds between ogre slams.
pub const SLAM_INTERVAL: f32 = 5.0;

/// Ogre slam radius.
pub const SLAM_RADIUS: f32 = 80.0;

/// Ogre slam damage.
pub const SLAM_DAMAGE: f32 = 25.0;

/// Distance slammed units are pushed away.
pub const SLAM_KNOCKBACK: f32 = 20.0;

/// Seconds between wraith reaps.
pub const REAP_INTERVAL: f32 = 4.0;

/// Wraith reap radius.
pub const REAP_RADIUS: f32 = 60.0;

/// Wraith reap damage.
pub const REAP_DAMAGE: f32 = 35.0;

/// Death curse applied by a reap.
pub const REAP_CURSE: f32 = 3.0;

/// Wraith self-heal per unit reaped.
pub const REAP_HEAL_PER_TARGET: f32 = 15.0;

/// Death curse applied by a ghost hit.
pub const GHOST_CURSE: f32 = 5.0;

/// Fraction of ghost damage the wraith heals back.
pub const GHOST_LIFESTEAL: f32 = 0.15;

/// Wraith soul chain triggers on every Nth attack.
pub const SOUL_CHAIN_EVERY: u32 = 8;

// ============================================================================
// Chains
// ============================================================================

/// Conflagration damage relative to the mage's damage.
pub const CONFLAGRATION_DAMAGE_FACTOR: f32 = 1.5;

/// Burn added by each conflagration hop.
pub const CONFLAGRATION_BURN: f32 = 5.0;

/// Conflagration hop radius.
pub const CONFLAGRATION_HOP_RADIUS: f32 = 80.0;

/// Conflagration damage kept per hop.
pub const CONFLAGRATION_DECAY: f32 = 0.8;

/// Conflagration bolt progress per second (1.0 = one hop).
pub const CONFLAGRATION_HOP_RATE: f32 = 9.0;

/// Soul chain damage relative to the wraith's damage.
pub const SOUL_CHAIN_DAMAGE_FACTOR: f32 = 1.2;

/// Death curse added by each soul chain hop.
pub const SOUL_CHAIN_CURSE: f32 = 5.0;

/// Soul chain hop radius.
pub const SOUL_CHAIN_HOP_RADIUS: f32 = 70.0;

/// Soul chain damage kept per hop.
pub const SOUL_CHAIN_DECAY: f32 = 0.85;

/// Soul chain bolt progress per second.
pub const SOUL_CHAIN_HOP_RATE: f32 = 7.2;

// ============================================================================
// Towers
// ============================================================================

/// Default tower health.
pub const TOWER_HEALTH: f32 = 1000.0;

/// Tower attack range.
pub const TOWER_RANGE: f32 = 120.0;

/// Seconds between tower bolts.
pub const TOWER_COOLDOWN: f32 = 1.0;

/// Damage per tower bolt.
pub const TOWER_DAMAGE: f32 = 15.0;

// ============================================================================
// Production & Progression
// ============================================================================

/// Building slots per team.
pub const BUILDING_SLOTS: usize = 10;

/// Maximum cap a regular building can be upgraded to.
pub const MAX_BUILDING_CAP: u32 = 5;

/// Maximum cap for elite buildings.
pub const MAX_ELITE_CAP: u32 = 1;

/// XP granted by one orb.
pub const XP_ORB_VALUE: u32 = 10;

/// Orb drift speed in units/s.
pub const XP_ORB_SPEED: f32 = 30.0;

/// XP needed for level 1 -> 2.
pub const XP_BASE: f32 = 20.0;

/// Growth of the XP requirement per level.
pub const XP_GROWTH: f32 = 1.2;

/// Number of choices offered per selection.
pub const OFFER_SIZE: usize = 3;

/// Seconds per animation frame.
pub const ANIMATION_FRAME_TIME: f32 = 0.15;

/// Frames in a unit's animation cycle.
pub const ANIMATION_FRAMES: u8 = 4;
