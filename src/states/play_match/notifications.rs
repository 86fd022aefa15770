//! Match Notifications
//!
//! Everything the simulation tells the outside world: UI callbacks
//! (unit counts, match end, selection requests) and fire-and-forget
//! presentation cues (sounds, floating damage numbers).
//!
//! The simulation only appends to an outbox; the host drains it after each
//! call. Nothing the host does with a notification feeds back into the tick.

use bevy::prelude::*;

use super::selection::SelectionOffer;
use crate::states::match_config::Team;

/// Sounds the renderer may play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    SwordHit,
    ArrowShot,
    Fireball,
    GhostBolt,
    ChainCast,
    Slam,
    Reap,
    Taunt,
    Freeze,
    Heal,
    Death,
    TowerShot,
    TowerDestroyed,
    LevelUp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchNotification {
    /// Alive units per team, sent once at the end of every tick
    UnitCountsChanged { top: usize, bottom: usize },
    /// A tower fell
    MatchEnded { winner: Team },
    /// A team must pick from `offer` before the simulation resumes
    SelectionRequested { team: Team, offer: SelectionOffer },
    Sound(SoundCue),
    DamageNumber { position: Vec2, amount: f32, crit: bool },
}
