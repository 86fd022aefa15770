//! Match events
//!
//! Bevy-side mirrors of the simulation's notifications, plus the two input
//! events a host sends to answer a selection.

use bevy::prelude::*;

use crate::states::match_config::Team;
use crate::states::play_match::notifications::{MatchNotification, SoundCue};
use crate::states::play_match::{BuildingChoice, Card, SelectionOffer};

/// Alive unit counts, sent once per simulated tick
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitCountsChanged {
    pub top: usize,
    pub bottom: usize,
}

/// A tower fell and the match is over
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEnded {
    pub winner: Team,
}

/// A team must pick from `offer` before the match resumes
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SelectionRequested {
    pub team: Team,
    pub offer: SelectionOffer,
}

/// Sound the renderer may play
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCueEvent(pub SoundCue);

/// Floating damage number
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageNumberEvent {
    pub position: Vec2,
    pub amount: f32,
    pub crit: bool,
}

/// Answer the active card selection
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ChooseCard(pub Card);

/// Answer the active building selection
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ChooseBuilding(pub BuildingChoice);

/// Writers for every outgoing event, bundled for a single system
#[derive(bevy::ecs::system::SystemParam)]
pub struct NotificationWriters<'w> {
    pub counts: EventWriter<'w, UnitCountsChanged>,
    pub ended: EventWriter<'w, MatchEnded>,
    pub selections: EventWriter<'w, SelectionRequested>,
    pub sounds: EventWriter<'w, SoundCueEvent>,
    pub damage_numbers: EventWriter<'w, DamageNumberEvent>,
}

impl NotificationWriters<'_> {
    pub fn send(&mut self, notification: MatchNotification) {
        match notification {
            MatchNotification::UnitCountsChanged { top, bottom } => {
                self.counts.send(UnitCountsChanged { top, bottom });
            }
            MatchNotification::MatchEnded { winner } => {
                self.ended.send(MatchEnded { winner });
            }
            MatchNotification::SelectionRequested { team, offer } => {
                self.selections.send(SelectionRequested { team, offer });
            }
            MatchNotification::Sound(cue) => {
                self.sounds.send(SoundCueEvent(cue));
            }
            MatchNotification::DamageNumber { position, amount, crit } => {
                self.damage_numbers.send(DamageNumberEvent { position, amount, crit });
            }
        }
    }
}
