//! Combat plugin
//!
//! Hosts a `MatchSim` inside a Bevy app:
//! - Selection answers arrive as `ChooseCard` / `ChooseBuilding` events
//! - The match advances once per frame by the scaled frame delta
//! - Notifications leave as typed events
//! - Combat logging lives in [`log`]

use bevy::prelude::*;

pub mod events;
pub mod log;
pub mod systems;

use crate::states::match_config::MatchSettings;
use crate::states::play_match::{MatchSim, UnitStatTable};
use events::*;
use systems::*;

/// Ordering of the per-frame match systems
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchSystemPhase {
    /// Apply player choices
    Input,
    /// Advance the simulation
    Simulation,
    /// Publish notifications
    Notify,
}

/// Plugin that owns the match
pub struct MatchPlugin {
    pub settings: MatchSettings,
    pub unit_stats: UnitStatTable,
    /// Call `start()` on app startup
    pub start_immediately: bool,
}

impl Default for MatchPlugin {
    fn default() -> Self {
        Self {
            settings: MatchSettings::default(),
            unit_stats: UnitStatTable::default(),
            start_immediately: true,
        }
    }
}

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app
            // Outgoing events
            .add_event::<UnitCountsChanged>()
            .add_event::<MatchEnded>()
            .add_event::<SelectionRequested>()
            .add_event::<SoundCueEvent>()
            .add_event::<DamageNumberEvent>()
            // Incoming events
            .add_event::<ChooseCard>()
            .add_event::<ChooseBuilding>()
            // Resources
            .insert_resource(MatchSim::with_unit_stats(
                self.settings.clone(),
                self.unit_stats.clone(),
            ))
            .init_resource::<SimulationSpeed>()
            // Systems
            .configure_sets(
                Update,
                (
                    MatchSystemPhase::Input,
                    MatchSystemPhase::Simulation,
                    MatchSystemPhase::Notify,
                )
                    .chain(),
            )
            .add_systems(Update, apply_selection_choices.in_set(MatchSystemPhase::Input))
            .add_systems(Update, advance_match.in_set(MatchSystemPhase::Simulation))
            .add_systems(Update, forward_notifications.in_set(MatchSystemPhase::Notify));

        if self.start_immediately {
            app.add_systems(Startup, start_match);
        }
    }
}

/// Controls the speed of the combat simulation
#[derive(Resource)]
pub struct SimulationSpeed {
    /// Speed multiplier (0.0 = paused, 0.5 = half speed, 1.0 = normal, 2.0 = double, 3.0 = triple)
    pub multiplier: f32,
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

impl SimulationSpeed {
    pub fn pause(&mut self) {
        self.multiplier = 0.0;
    }

    pub fn normal_speed(&mut self) {
        self.multiplier = 1.0;
    }

    pub fn double_speed(&mut self) {
        self.multiplier = 2.0;
    }

    pub fn is_paused(&self) -> bool {
        self.multiplier == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::MatchPhase;

    fn test_app(start_immediately: bool) -> App {
        let mut app = App::new();
        app.init_resource::<Time>().add_plugins(MatchPlugin {
            settings: MatchSettings {
                random_seed: Some(3),
                ..MatchSettings::default()
            },
            start_immediately,
            ..MatchPlugin::default()
        });
        app
    }

    #[test]
    fn test_plugin_starts_match_and_requests_opening_build() {
        let mut app = test_app(true);
        app.update();

        let sim = app.world().resource::<MatchSim>();
        assert_eq!(sim.phase(), MatchPhase::Selecting);

        let requests = app.world().resource::<Events<SelectionRequested>>();
        let mut reader = requests.get_cursor();
        let first = reader.read(requests).next().expect("opening selection should be published");
        assert_eq!(first.team, crate::states::Team::Top);
    }

    #[test]
    fn test_choose_building_event_resolves_selection() {
        let mut app = test_app(true);
        app.update();

        let choice = match &app.world().resource::<MatchSim>().active_selection().unwrap().offer {
            crate::states::play_match::SelectionOffer::Buildings(choices) => choices[0].clone(),
            other => panic!("expected a building offer, got {:?}", other),
        };
        app.world_mut().send_event(ChooseBuilding(choice));
        app.update();

        let sim = app.world().resource::<MatchSim>();
        assert_eq!(sim.building_count(crate::states::Team::Top), 1);
        assert_eq!(
            sim.active_selection().map(|s| s.team),
            Some(crate::states::Team::Bottom),
            "the bottom team's opening pick comes next"
        );
    }

    #[test]
    fn test_plugin_can_defer_start() {
        let mut app = test_app(false);
        app.update();
        assert_eq!(app.world().resource::<MatchSim>().phase(), MatchPhase::Idle);
    }
}
