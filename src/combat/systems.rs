//! Match systems
//!
//! Thin ECS systems around the `MatchSim` resource: feed it player input and
//! frame time, then publish whatever it reported.

use bevy::prelude::*;

use super::events::*;
use super::SimulationSpeed;
use crate::states::play_match::MatchSim;

/// Open the match once the app is up
pub fn start_match(mut sim: ResMut<MatchSim>) {
    sim.start();
}

/// Forward selection answers to the simulation
pub fn apply_selection_choices(
    mut sim: ResMut<MatchSim>,
    mut cards: EventReader<ChooseCard>,
    mut buildings: EventReader<ChooseBuilding>,
) {
    for ChooseCard(card) in cards.read() {
        sim.choose_card(card);
    }
    for ChooseBuilding(choice) in buildings.read() {
        sim.choose_building(choice);
    }
}

/// Run one simulation tick with this frame's scaled delta
pub fn advance_match(time: Res<Time>, speed: Res<SimulationSpeed>, mut sim: ResMut<MatchSim>) {
    if speed.is_paused() {
        return;
    }
    sim.advance(time.delta_secs() * speed.multiplier);
}

/// Drain the simulation's outbox into Bevy events
pub fn forward_notifications(mut sim: ResMut<MatchSim>, mut writers: NotificationWriters) {
    for notification in sim.drain_notifications() {
        writers.send(notification);
    }
}
