//! Headless match execution
//!
//! Runs CPU-vs-CPU matches without any graphical output, suitable for
//! automated testing and balance runs.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::combat::{MatchPlugin, MatchSystemPhase};
use crate::states::match_config::{MatchSettings, Team};
use crate::states::play_match::{MatchSim, UnitStatTable};
use crate::states::MatchPhase;

use super::config::HeadlessMatchConfig;

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing and analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The winning team, or None when the match timed out
    pub winner: Option<Team>,
    /// Total match duration in seconds
    pub match_time: f32,
    pub top: TeamResult,
    pub bottom: TeamResult,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Per-team statistics at match end
#[derive(Debug, Clone, PartialEq)]
pub struct TeamResult {
    pub kills: u32,
    pub level: u32,
    /// Remaining tower health (0 if destroyed)
    pub tower_health: f32,
    pub buildings: usize,
    pub alive_units: usize,
    pub cards_taken: usize,
}

impl TeamResult {
    fn from_sim(sim: &MatchSim, team: Team) -> Self {
        Self {
            kills: sim.kills(team),
            level: sim.level(team),
            tower_health: sim.tower(team).map_or(0.0, |t| t.health),
            buildings: sim.building_count(team),
            alive_units: sim.alive_unit_count(team),
            cards_taken: sim.modifiers(team).applied_cards.len(),
        }
    }
}

impl MatchResult {
    pub fn from_sim(sim: &MatchSim) -> Self {
        Self {
            winner: sim.winner(),
            match_time: sim.now(),
            top: TeamResult::from_sim(sim, Team::Top),
            bottom: TeamResult::from_sim(sim, Team::Bottom),
            random_seed: sim.settings().random_seed,
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Maximum match duration before declaring a draw
    pub max_duration: f32,
    /// Custom output path for match log
    pub output_path: Option<String>,
    /// Whether the match has completed
    pub match_complete: bool,
    /// Match result (populated when match completes)
    pub result: Option<MatchResult>,
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    pub settings: MatchSettings,
    pub unit_stats: UnitStatTable,
    pub max_duration: f32,
    pub output_path: Option<String>,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MatchPlugin {
            settings: self.settings.clone(),
            unit_stats: self.unit_stats.clone(),
            start_immediately: true,
        })
        .insert_resource(HeadlessMatchState {
            max_duration: self.max_duration,
            output_path: self.output_path.clone(),
            match_complete: false,
            result: None,
        })
        .add_systems(
            Update,
            headless_check_match_end.after(MatchSystemPhase::Simulation),
        )
        .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Check if the match has ended (a tower fell, or timeout)
fn headless_check_match_end(sim: Res<MatchSim>, mut headless_state: ResMut<HeadlessMatchState>) {
    if headless_state.match_complete {
        return;
    }

    match sim.phase() {
        MatchPhase::Ended => {}
        MatchPhase::Selecting => {
            warn!("Headless match is waiting on a manual selection; auto_select should cover both teams");
            return;
        }
        MatchPhase::Running if sim.now() >= headless_state.max_duration => {
            info!("Match timed out after {:.1}s - declaring DRAW", sim.now());
        }
        MatchPhase::Idle | MatchPhase::Running => return,
    }

    let result = MatchResult::from_sim(&sim);
    save_headless_match_log(&sim, headless_state.output_path.as_deref());
    headless_state.result = Some(result);
    headless_state.match_complete = true;
}

/// Save the combat log to a file
fn save_headless_match_log(sim: &MatchSim, output_path: Option<&str>) {
    match sim.combat_log().save_to_file(&sim.metadata(), output_path) {
        Ok(filename) => {
            println!("Match complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save combat log: {}", e);
        }
    }
}

/// Exit the app when the match is complete
fn headless_exit_on_complete(headless_state: Res<HeadlessMatchState>, mut exit: EventWriter<AppExit>) {
    if headless_state.match_complete {
        exit.send(AppExit::Success);
    }
}

/// Run a match to completion without Bevy, stepping at the configured rate.
///
/// Same outcome as the headless app for the same config and seed.
pub fn simulate_match(config: &HeadlessMatchConfig) -> Result<MatchResult, String> {
    config.validate()?;
    let mut sim = MatchSim::with_unit_stats(config.to_match_settings()?, config.load_unit_stats()?);
    sim.start();
    while sim.phase() == MatchPhase::Running && sim.now() < config.max_duration_secs {
        sim.advance(config.time_step_secs);
        sim.drain_notifications();
    }
    if sim.phase() == MatchPhase::Selecting {
        return Err("match stalled on a manual selection".to_string());
    }
    Ok(MatchResult::from_sim(&sim))
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<(), String> {
    config.validate()?;
    let settings = config.to_match_settings()?;
    let unit_stats = config.load_unit_stats()?;

    println!("Starting headless match simulation...");
    println!("  Seed: {:?}", config.random_seed);
    println!("  Tower health: {:.0}", settings.tower_health);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    App::new()
        // Minimal plugins - no window, no rendering
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
        .add_plugins(LogPlugin::default())
        // Fixed simulated step per frame, independent of wall clock
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            config.time_step_secs,
        )))
        .add_plugins(HeadlessPlugin {
            settings,
            unit_stats,
            max_duration: config.max_duration_secs,
            output_path: config.output_path.clone(),
        })
        .run();

    Ok(())
}
