//! ClashSim - Two-Team Lane Autobattler
//!
//! A real-time combat simulation where two teams' buildings produce units
//! that fight across a field until one tower falls, with XP, level-ups,
//! cards and building upgrades in between.
//!
//! This library exposes the simulation for hosts (Bevy via `MatchPlugin`,
//! or any loop calling `MatchSim::advance`) and for testing.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod states;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::MatchPlugin;
pub use headless::HeadlessMatchConfig;
pub use states::match_config::{MatchSettings, Team, UnitClass};
pub use states::play_match::{MatchNotification, MatchSim};
pub use states::MatchPhase;
