//! Match state management
//!
//! Defines the phases a match moves through and hosts the simulation itself.

pub mod match_config;
pub mod play_match;

pub use match_config::{MatchSettings, Team, UnitClass};

/// The phases of a single match.
///
/// ```text
/// Idle --start()--> Running <--> Selecting
///                      \            /
///                       +-> Ended <+
/// ```
///
/// `Ended` is terminal until `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchPhase {
    /// Created but not started; nothing advances
    #[default]
    Idle,
    /// The simulation advances with every `advance(dt)`
    Running,
    /// Paused until the active card or building selection is answered
    Selecting,
    /// A tower has fallen
    Ended,
}
