//! Match Flow
//!
//! `MatchSim` owns both teams and everything on the field, and advances the
//! whole match by explicit time steps. It is a plain value: the Bevy plugin
//! stores it as a resource and feeds it `Time` deltas, tests drive it
//! directly.
//!
//! ## Tick order
//!
//! 1. Clock advance, early win check
//! 2. Production (Top, then Bottom)
//! 3. Units step (Top roster, then Bottom roster)
//! 4. Towers fire
//! 5. Projectiles and chains in flight update
//! 6. XP orbs drift and bank
//! 7. Dead units are retired, crediting kills and dropping orbs
//! 8. Win check, unit count notification
//!
//! While a selection is waiting on a human choice the match is `Selecting`
//! and `advance` does nothing.

use std::mem;

use bevy::prelude::*;

use super::cards::{card_catalog, find_card, offer_cards, Card, TeamModifiers};
use super::combat_core::{step_unit, Frame};
use super::components::{GameRng, Lifecycle, SimClock, TargetRef, Unit, UnitId};
use super::constants::SPAWN_MARGIN_X;
use super::notifications::{MatchNotification, SoundCue};
use super::production::{
    building_catalog, capacity_by_class, free_slot, plan_spawns, upgrade_slot, BuildingChoice,
    ProductionBuilding,
};
use super::progression::{level_reward, xp_required, LevelReward, XpOrb};
use super::projectiles::{update_chain, update_projectile, ChainEffect, Projectile};
use super::selection::{ActiveSelection, PendingSelection, SelectionKind, SelectionOffer, SelectionQueue};
use super::tower::{step_tower, Tower};
use super::unit_config::UnitStatTable;
use super::utils::combatant_id;
use crate::combat::log::{CombatLog, CombatLogEventType, MatchMetadata, TeamMetadata};
use crate::states::match_config::{MatchSettings, Team, UnitClass};
use crate::states::MatchPhase;

// ============================================================================
// Side
// ============================================================================

/// Everything one team owns.
#[derive(Debug, Clone)]
pub struct Side {
    pub team: Team,
    /// Roster in spawn order. Dying units stay until the end-of-tick sweep.
    pub units: Vec<Unit>,
    pub buildings: Vec<Option<ProductionBuilding>>,
    pub tower: Option<Tower>,
    pub modifiers: TeamModifiers,
    pub respawn_timers: [f32; UnitClass::COUNT],
    pub kills: u32,
    pub xp: u32,
    pub level: u32,
}

impl Side {
    pub fn new(team: Team, settings: &MatchSettings) -> Self {
        Self {
            team,
            units: Vec::new(),
            buildings: vec![None; settings.building_slots],
            tower: None,
            modifiers: TeamModifiers::default(),
            respawn_timers: [0.0; UnitClass::COUNT],
            kills: 0,
            xp: 0,
            level: 1,
        }
    }

    /// Roster index of an alive unit
    pub fn index_of(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|u| u.id == id && u.is_alive())
    }

    /// Any unit still on the roster, alive or dying
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Current position of a target on this side, if it is still valid.
    pub fn target_position(&self, target: TargetRef) -> Option<Vec2> {
        match target {
            TargetRef::Unit(id) => self.index_of(id).map(|i| self.units[i].position),
            TargetRef::Tower(team) if team == self.team => self
                .tower
                .as_ref()
                .filter(|t| t.is_alive())
                .map(|t| t.position),
            TargetRef::Tower(_) => None,
        }
    }

    pub fn alive_count(&self, class: UnitClass) -> u32 {
        self.units
            .iter()
            .filter(|u| u.class == class && u.is_alive())
            .count() as u32
    }

    pub fn alive_counts(&self) -> [u32; UnitClass::COUNT] {
        let mut counts = [0; UnitClass::COUNT];
        for unit in self.units.iter().filter(|u| u.is_alive()) {
            counts[unit.class.index()] += 1;
        }
        counts
    }

    pub fn alive_total(&self) -> usize {
        self.units.iter().filter(|u| u.is_alive()).count()
    }

    pub fn has_free_slot(&self) -> bool {
        free_slot(&self.buildings).is_some()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.iter().flatten().count()
    }
}

/// Borrow `team`'s side mutably alongside its opponent's.
pub fn split_sides(sides: &mut [Side; 2], team: Team) -> (&mut Side, &mut Side) {
    let [top, bottom] = sides;
    match team {
        Team::Top => (top, bottom),
        Team::Bottom => (bottom, top),
    }
}

// ============================================================================
// Match
// ============================================================================

/// A complete match between two teams.
#[derive(Resource)]
pub struct MatchSim {
    pub(crate) settings: MatchSettings,
    pub(crate) stats: UnitStatTable,
    pub(crate) catalog: Vec<Card>,
    pub(crate) building_catalog: Vec<BuildingChoice>,
    pub(crate) clock: SimClock,
    pub(crate) rng: GameRng,
    pub(crate) sides: [Side; 2],
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) chains: Vec<ChainEffect>,
    pub(crate) orbs: Vec<XpOrb>,
    pub(crate) selection: SelectionQueue,
    pub(crate) started: bool,
    pub(crate) winner: Option<Team>,
    pub(crate) next_unit_id: u32,
    pub(crate) log: CombatLog,
    pub(crate) outbox: Vec<MatchNotification>,
}

impl Default for MatchSim {
    fn default() -> Self {
        Self::new(MatchSettings::default())
    }
}

impl MatchSim {
    pub fn new(settings: MatchSettings) -> Self {
        Self::with_unit_stats(settings, UnitStatTable::default())
    }

    pub fn with_unit_stats(settings: MatchSettings, stats: UnitStatTable) -> Self {
        let rng = GameRng::from_optional_seed(settings.random_seed);
        let sides = [Side::new(Team::Top, &settings), Side::new(Team::Bottom, &settings)];
        Self {
            settings,
            stats,
            catalog: card_catalog(),
            building_catalog: building_catalog(),
            clock: SimClock::default(),
            rng,
            sides,
            projectiles: Vec::new(),
            chains: Vec::new(),
            orbs: Vec::new(),
            selection: SelectionQueue::default(),
            started: false,
            winner: None,
            next_unit_id: 1,
            log: CombatLog::default(),
            outbox: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Place the towers and open the match. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for team in Team::all() {
            self.sides[team.index()].tower = Some(Tower::new(team, &self.settings));
        }
        self.log.log(CombatLogEventType::MatchEvent, "Match started".to_string());
        info!(
            "Match started (seed: {:?}, auto: {:?})",
            self.settings.random_seed, self.settings.auto_select
        );

        if self.settings.opening_building_selection {
            self.trigger_selection(Team::Top, SelectionKind::Building);
            self.trigger_selection(Team::Bottom, SelectionKind::Building);
        }
        self.push_unit_counts();
    }

    /// Throw the match away and rebuild it from the same settings.
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        let stats = self.stats.clone();
        *self = Self::with_unit_stats(settings, stats);
        info!("Match reset");
        self.push_unit_counts();
    }

    pub fn phase(&self) -> MatchPhase {
        if self.winner.is_some() {
            MatchPhase::Ended
        } else if !self.started {
            MatchPhase::Idle
        } else if self.selection.is_active() {
            MatchPhase::Selecting
        } else {
            MatchPhase::Running
        }
    }

    /// Advance the match by `dt` seconds. Does nothing unless running.
    pub fn advance(&mut self, dt: f32) {
        if self.phase() != MatchPhase::Running || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let now = self.clock.advance(dt);
        self.log.match_time = now;
        if self.check_winner() {
            return;
        }

        self.run_production(dt);

        let mut launched_projectiles = Vec::new();
        let mut launched_chains = Vec::new();
        {
            let mut frame = Frame {
                now,
                dt,
                settings: &self.settings,
                rng: &mut self.rng,
                log: &mut self.log,
                outbox: &mut self.outbox,
                projectiles: &mut launched_projectiles,
                chains: &mut launched_chains,
            };

            for team in Team::all() {
                let (own, enemy) = split_sides(&mut self.sides, team);
                for index in 0..own.units.len() {
                    step_unit(index, own, enemy, &mut frame);
                }
            }

            for team in Team::all() {
                let (own, enemy) = split_sides(&mut self.sides, team);
                step_tower(own, enemy, &mut frame);
            }

            let mut in_flight = mem::take(&mut self.projectiles);
            for projectile in in_flight.iter_mut() {
                let (own, enemy) = split_sides(&mut self.sides, projectile.team);
                update_projectile(projectile, own, enemy, &mut frame);
            }
            in_flight.retain(|p| p.alive);
            self.projectiles = in_flight;

            let mut chains = mem::take(&mut self.chains);
            for chain in chains.iter_mut() {
                let (own, enemy) = split_sides(&mut self.sides, chain.team);
                update_chain(chain, own, enemy, &mut frame);
            }
            chains.retain(|c| !c.is_finished());
            self.chains = chains;
        }
        self.projectiles.append(&mut launched_projectiles);
        self.chains.append(&mut launched_chains);

        self.update_orbs(dt);
        self.retire_dead();

        self.check_winner();
        self.push_unit_counts();
    }

    fn check_winner(&mut self) -> bool {
        if self.winner.is_some() {
            return true;
        }
        let destroyed = |team: Team| {
            self.sides[team.index()]
                .tower
                .as_ref()
                .is_some_and(|t| !t.is_alive())
        };
        let winner = if destroyed(Team::Top) {
            Team::Bottom
        } else if destroyed(Team::Bottom) {
            Team::Top
        } else {
            return false;
        };

        self.winner = Some(winner);
        self.selection.clear();
        self.log.log(
            CombatLogEventType::MatchEvent,
            format!("{} wins after {:.1}s", winner.name(), self.clock.now()),
        );
        info!("Match ended! {} wins at {:.1}s", winner.name(), self.clock.now());
        self.outbox.push(MatchNotification::MatchEnded { winner });
        true
    }

    fn push_unit_counts(&mut self) {
        self.outbox.push(MatchNotification::UnitCountsChanged {
            top: self.alive_unit_count(Team::Top),
            bottom: self.alive_unit_count(Team::Bottom),
        });
    }

    // ------------------------------------------------------------------------
    // Production
    // ------------------------------------------------------------------------

    fn run_production(&mut self, dt: f32) {
        for team in Team::all() {
            let side = &mut self.sides[team.index()];
            let capacity = capacity_by_class(&side.buildings);
            let alive = side.alive_counts();
            let spawns = plan_spawns(
                &capacity,
                &alive,
                &mut side.respawn_timers,
                dt,
                self.settings.respawn_delay,
            );
            for class in spawns {
                let position = self.spawn_position(team, class);
                self.spawn_unit(team, class, position);
            }
        }
    }

    fn spawn_position(&mut self, team: Team, class: UnitClass) -> Vec2 {
        let width = self.settings.width;
        if class.is_elite() {
            Vec2::new(width / 2.0, self.settings.tower_line(team))
        } else {
            let x = self.rng.random_range(SPAWN_MARGIN_X, width - SPAWN_MARGIN_X);
            Vec2::new(x, self.settings.spawn_line(team))
        }
    }

    /// Put a unit on the field with the team's current modifiers applied.
    pub fn spawn_unit(&mut self, team: Team, class: UnitClass, position: Vec2) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let side = &mut self.sides[team.index()];
        let unit = Unit::new(id, team, class, position, self.stats.get(class), &side.modifiers, self.clock.now());
        debug!("Spawned {} at ({:.0}, {:.0})", combatant_id(&unit), position.x, position.y);
        self.log.log(
            CombatLogEventType::Spawn,
            format!("{} enters the field", combatant_id(&unit)),
        );
        side.units.push(unit);
        id
    }

    // ------------------------------------------------------------------------
    // Deaths & Progression
    // ------------------------------------------------------------------------

    fn retire_dead(&mut self) {
        for team in Team::all() {
            let side = &mut self.sides[team.index()];
            let mut fallen = Vec::new();
            for unit in side.units.iter_mut().filter(|u| u.lifecycle == Lifecycle::Dying) {
                unit.lifecycle = Lifecycle::Retired;
                fallen.push(unit.position);
            }
            if fallen.is_empty() {
                continue;
            }
            side.units.retain(|u| u.lifecycle != Lifecycle::Retired);

            let killer = team.opponent();
            self.sides[killer.index()].kills += fallen.len() as u32;
            for position in fallen {
                self.orbs.push(XpOrb::new(killer, position, self.settings.xp_per_orb));
            }
        }
    }

    fn update_orbs(&mut self, dt: f32) {
        let mut banked = Vec::new();
        for orb in self.orbs.iter_mut() {
            let value = orb.update(dt, &self.settings);
            if value > 0 {
                banked.push((orb.team, value));
            }
        }
        self.orbs.retain(|o| !o.collected);
        for (team, value) in banked {
            self.collect_xp(team, value);
        }
    }

    /// Bank XP for a team. A level-up queues a card pick, then either a
    /// building pick or a building upgrade.
    pub fn collect_xp(&mut self, team: Team, value: u32) {
        let side = &mut self.sides[team.index()];
        side.xp += value;
        let required = xp_required(side.level, self.settings.xp_base, self.settings.xp_growth);
        if side.xp < required {
            return;
        }
        side.xp = 0;
        side.level += 1;
        let level = side.level;

        self.log.log(
            CombatLogEventType::Progression,
            format!("{} reaches level {}", team.name(), level),
        );
        info!("{} reached level {}", team.name(), level);
        self.outbox.push(MatchNotification::Sound(SoundCue::LevelUp));

        self.trigger_selection(team, SelectionKind::Card);
        match level_reward(level, self.settings.building_slots) {
            LevelReward::Building => self.trigger_selection(team, SelectionKind::Building),
            LevelReward::Upgrade { preferred_slot } => self.upgrade_building(team, preferred_slot),
        }
    }

    fn upgrade_building(&mut self, team: Team, preferred_slot: usize) {
        let side = &mut self.sides[team.index()];
        let Some(slot) = upgrade_slot(&side.buildings, preferred_slot) else {
            debug!("{} has nothing left to upgrade", team.name());
            return;
        };
        if let Some(building) = side.buildings[slot].as_mut() {
            building.upgrade();
            self.log.log(
                CombatLogEventType::Progression,
                format!(
                    "{} upgrades its {} (slot {}) to cap {}",
                    team.name(),
                    building.class.building_name(),
                    slot,
                    building.cap
                ),
            );
        }
    }

    // ------------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------------

    pub(crate) fn trigger_selection(&mut self, team: Team, kind: SelectionKind) {
        if kind == SelectionKind::Building && !self.sides[team.index()].has_free_slot() {
            debug!("{} has no free building slot, skipping building pick", team.name());
            return;
        }
        self.selection.push(team, kind);
        if !self.selection.is_active() {
            self.present_next();
        }
    }

    /// Present queued selections until one needs a human, or the queue is
    /// empty. Auto teams resolve on the spot.
    fn present_next(&mut self) {
        self.selection.active = None;
        while let Some(PendingSelection { team, kind }) = self.selection.next_pending() {
            let offer = self.build_offer(team, kind);
            if offer.is_empty() {
                debug!("Empty {:?} offer for {}, skipping", kind, team.name());
                continue;
            }

            if self.settings.is_auto(team) {
                self.selection.active = Some(ActiveSelection {
                    team,
                    offer: offer.clone(),
                });
                self.auto_choose(team, &offer);
                self.selection.active = None;
                continue;
            }

            self.selection.active = Some(ActiveSelection {
                team,
                offer: offer.clone(),
            });
            self.outbox.push(MatchNotification::SelectionRequested { team, offer });
            return;
        }
    }

    fn build_offer(&mut self, team: Team, kind: SelectionKind) -> SelectionOffer {
        let side = &self.sides[team.index()];
        match kind {
            SelectionKind::Card => SelectionOffer::Cards(offer_cards(
                &self.catalog,
                &side.modifiers,
                self.settings.offer_size,
                &mut self.rng,
            )),
            SelectionKind::Building if side.has_free_slot() => {
                SelectionOffer::Buildings(self.rng.sample(&self.building_catalog, self.settings.offer_size))
            }
            SelectionKind::Building => SelectionOffer::Buildings(Vec::new()),
        }
    }

    fn auto_choose(&mut self, team: Team, offer: &SelectionOffer) {
        match offer {
            SelectionOffer::Cards(cards) => {
                if let Some(card) = self.rng.pick(cards) {
                    self.apply_card(team, card);
                }
            }
            SelectionOffer::Buildings(choices) => {
                if let Some(choice) = self.rng.pick(choices) {
                    self.place_building(team, choice.class);
                }
            }
        }
    }

    /// Resolve the active card selection.
    pub fn choose_card(&mut self, card: &Card) {
        let Some(team) = self.active_team_for(SelectionKind::Card) else {
            debug!("Ignoring card choice '{}': no card selection active", card.name);
            return;
        };
        self.apply_card(team, card);
        self.present_next();
    }

    /// Resolve the active building selection.
    pub fn choose_building(&mut self, choice: &BuildingChoice) {
        let Some(team) = self.active_team_for(SelectionKind::Building) else {
            debug!("Ignoring building choice '{}': no building selection active", choice.name);
            return;
        };
        self.place_building(team, choice.class);
        self.present_next();
    }

    fn active_team_for(&self, kind: SelectionKind) -> Option<Team> {
        self.selection
            .active
            .as_ref()
            .filter(|active| active.offer.kind() == kind)
            .map(|active| active.team)
    }

    /// Fold a card into a team's modifiers.
    pub fn apply_card(&mut self, team: Team, card: &Card) {
        self.sides[team.index()].modifiers.apply_card(card);
        self.log.log(
            CombatLogEventType::Selection,
            format!("{} takes {}: {}", team.name(), card.name, card.description),
        );
        info!("{} picked card '{}'", team.name(), card.name);
    }

    /// Build in the first free slot. Returns the slot, or `None` when full.
    pub fn place_building(&mut self, team: Team, class: UnitClass) -> Option<usize> {
        let side = &mut self.sides[team.index()];
        let Some(slot) = free_slot(&side.buildings) else {
            debug!("{} has no free slot for a {}", team.name(), class.building_name());
            return None;
        };
        side.buildings[slot] = Some(ProductionBuilding::new(class));
        self.log.log(
            CombatLogEventType::Selection,
            format!("{} builds a {} in slot {}", team.name(), class.building_name(), slot),
        );
        info!("{} built {} in slot {}", team.name(), class.building_name(), slot);
        Some(slot)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn side(&self, team: Team) -> &Side {
        &self.sides[team.index()]
    }

    pub fn alive_unit_count(&self, team: Team) -> usize {
        self.side(team).alive_total()
    }

    pub fn building_count(&self, team: Team) -> usize {
        self.side(team).building_count()
    }

    pub fn buildings(&self, team: Team) -> &[Option<ProductionBuilding>] {
        &self.side(team).buildings
    }

    pub fn kills(&self, team: Team) -> u32 {
        self.side(team).kills
    }

    pub fn level(&self, team: Team) -> u32 {
        self.side(team).level
    }

    pub fn xp(&self, team: Team) -> u32 {
        self.side(team).xp
    }

    pub fn modifiers(&self, team: Team) -> &TeamModifiers {
        &self.side(team).modifiers
    }

    pub fn tower(&self, team: Team) -> Option<&Tower> {
        self.side(team).tower.as_ref()
    }

    pub fn tower_mut(&mut self, team: Team) -> Option<&mut Tower> {
        self.sides[team.index()].tower.as_mut()
    }

    pub fn units(&self, team: Team) -> &[Unit] {
        &self.side(team).units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.sides.iter().find_map(|side| side.unit(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.sides.iter_mut().find_map(|side| side.unit_mut(id))
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn chains(&self) -> &[ChainEffect] {
        &self.chains
    }

    pub fn orbs(&self) -> &[XpOrb] {
        &self.orbs
    }

    pub fn card_catalog(&self) -> &[Card] {
        &self.catalog
    }

    pub fn is_selection_pending(&self) -> bool {
        self.selection.is_active()
    }

    pub fn active_selection(&self) -> Option<&ActiveSelection> {
        self.selection.active.as_ref()
    }

    /// Selections queued behind the active one
    pub fn queued_selections(&self) -> usize {
        self.selection.pending.len()
    }

    pub fn combat_log(&self) -> &CombatLog {
        &self.log
    }

    /// Take every notification produced since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<MatchNotification> {
        mem::take(&mut self.outbox)
    }

    /// Summary written next to a saved combat log
    pub fn metadata(&self) -> MatchMetadata {
        let teams = Team::all()
            .into_iter()
            .map(|team| {
                let side = self.side(team);
                TeamMetadata {
                    team,
                    kills: side.kills,
                    level: side.level,
                    tower_health: side.tower.as_ref().map_or(0.0, |t| t.health),
                    buildings: side
                        .buildings
                        .iter()
                        .flatten()
                        .map(|b| format!("{} (cap {})", b.class.building_name(), b.cap))
                        .collect(),
                    cards: side
                        .modifiers
                        .applied_cards
                        .iter()
                        .filter_map(|&id| find_card(&self.catalog, id))
                        .map(|card| card.name.clone())
                        .collect(),
                }
            })
            .collect();
        MatchMetadata {
            winner: self.winner,
            duration_secs: self.clock.now(),
            random_seed: self.settings.random_seed,
            teams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_settings() -> MatchSettings {
        MatchSettings {
            base_crit_chance: 0.0,
            opening_building_selection: false,
            random_seed: Some(7),
            ..MatchSettings::default()
        }
    }

    fn running_match() -> MatchSim {
        let mut sim = MatchSim::new(quiet_settings());
        sim.start();
        assert_eq!(sim.phase(), MatchPhase::Running);
        sim
    }

    // ========================================================================
    // Chains
    // ========================================================================

    #[test]
    fn test_conflagration_hits_each_enemy_once() {
        let mut sim = running_match();
        sim.sides[0].modifiers.mage_conflagration = true;

        let mage = sim.spawn_unit(Team::Top, UnitClass::Mage, Vec2::new(450.0, 250.0));
        sim.unit_mut(mage).unwrap().attack_count = CONFLAGRATION_SETUP;

        let mut victims = Vec::new();
        for x in [450.0, 480.0, 510.0] {
            let id = sim.spawn_unit(Team::Bottom, UnitClass::Swordsman, Vec2::new(x, 300.0));
            let unit = sim.unit_mut(id).unwrap();
            unit.max_health = 10_000.0;
            unit.health = 10_000.0;
            unit.status.freeze(0.0, 100.0);
            victims.push(id);
        }

        for _ in 0..40 {
            sim.advance(0.05);
        }

        let names: Vec<String> = victims
            .iter()
            .map(|&id| combatant_id(sim.unit(id).unwrap()))
            .collect();
        let chain_hits: Vec<f32> = names
            .iter()
            .map(|name| {
                let hits: Vec<f32> = sim
                    .combat_log()
                    .hits_on(name)
                    .into_iter()
                    .filter_map(|entry| match &entry.data {
                        Some(crate::combat::log::StructuredEventData::Damage { ability, amount, .. })
                            if ability == "Conflagration" =>
                        {
                            Some(*amount)
                        }
                        _ => None,
                    })
                    .collect();
                assert_eq!(hits.len(), 1, "{} should be hit by the chain exactly once", name);
                hits[0]
            })
            .collect();

        assert!(chain_hits[1] < chain_hits[0], "chain damage should decay per hop");
        assert!(chain_hits[2] < chain_hits[1], "chain damage should decay per hop");
    }

    /// Attack counter value that makes the next attack the tenth
    const CONFLAGRATION_SETUP: u32 = 9;

    // ========================================================================
    // Production
    // ========================================================================

    #[test]
    fn test_spawns_stay_within_cap_after_mass_death() {
        let mut sim = running_match();
        let slot = sim.place_building(Team::Top, UnitClass::Swordsman).unwrap();
        sim.sides[0].buildings[slot].as_mut().unwrap().cap = 3;

        for _ in 0..5 {
            sim.advance(0.1);
            assert!(sim.alive_unit_count(Team::Top) <= 3);
        }
        assert_eq!(sim.alive_unit_count(Team::Top), 3);

        for unit in sim.sides[0].units.iter_mut() {
            unit.lose_health(f32::MAX);
        }
        sim.advance(0.1);
        assert_eq!(sim.kills(Team::Bottom), 3, "every death credits the opponent");
        assert_eq!(sim.orbs().len(), 3, "every death drops an orb");

        for _ in 0..10 {
            sim.advance(0.1);
            assert!(sim.alive_unit_count(Team::Top) <= 3);
        }
        assert_eq!(sim.alive_unit_count(Team::Top), 3);
    }

    #[test]
    fn test_elites_spawn_at_the_tower_line() {
        let mut sim = running_match();
        sim.place_building(Team::Bottom, UnitClass::Ogre);
        sim.advance(0.1);
        let ogre = &sim.units(Team::Bottom)[0];
        assert_eq!(ogre.class, UnitClass::Ogre);
        assert_eq!(ogre.position.x, sim.settings().width / 2.0);
        // It already took its first step toward the enemy
        assert!((ogre.position.y - sim.settings().tower_line(Team::Bottom)).abs() < 5.0);
    }

    // ========================================================================
    // Progression
    // ========================================================================

    #[test]
    fn test_level_up_queues_card_then_building() {
        let mut sim = running_match();
        sim.collect_xp(Team::Top, 20);

        assert_eq!(sim.level(Team::Top), 2);
        assert_eq!(sim.xp(Team::Top), 0);
        assert_eq!(sim.phase(), MatchPhase::Selecting);
        let active = sim.active_selection().unwrap();
        assert_eq!(active.offer.kind(), SelectionKind::Card);
        assert_eq!(sim.queued_selections(), 1);
    }

    #[test]
    fn test_levels_past_slots_upgrade_buildings() {
        let mut settings = quiet_settings();
        settings.building_slots = 1;
        settings.auto_select = vec![Team::Top];
        let mut sim = MatchSim::new(settings);
        sim.start();
        sim.place_building(Team::Top, UnitClass::Archer);

        // Level 2 > 1 slot: upgrade instead of a building pick
        sim.collect_xp(Team::Top, 20);
        assert_eq!(sim.level(Team::Top), 2);
        assert_eq!(sim.buildings(Team::Top)[0].unwrap().cap, 2);
        assert_eq!(sim.phase(), MatchPhase::Running, "auto team resolves its card pick");
    }
}
