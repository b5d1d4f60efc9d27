//! Battle orchestration: the turn/phase state machine.
//!
//! [`Battle`] owns the board, the unit roster and every transient counter of a
//! chapter in progress. All mutation flows through its intents (player
//! commands), the enemy-phase driver and the AI, each of which either
//! succeeds completely or returns an [`ActionError`] without touching state.
//!
//! Methods are split across files by concern, all on `impl Battle`:
//! combat resolution, movement, intents, turn rotation, game-end evaluation
//! and snapshots.

mod combat;
mod errors;
mod intents;
mod movement;
mod phase;
mod progress;
mod snapshot;
mod turns;

pub use errors::ActionError;
pub use movement::reachable_tiles;
pub use phase::{Intent, Phase};
pub use progress::ChapterProgress;
pub use snapshot::{BattleSnapshot, SnapshotError};
pub use turns::TurnState;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ai::AiBehavior;
use crate::combat::Combatant;
use crate::config::GameConfig;
use crate::env::{Chapter, Env, Outcome, RngOracle, SpawnSpec, TablesOracle, compute_seed};
use crate::state::{Board, Position, Roster, Team, Unit, UnitId};
use crate::stats::{Stats, SupportRelationship, support};

/// A chapter in progress.
#[derive(Debug, Clone)]
pub struct Battle {
    config: GameConfig,
    env: Env,
    chapter: Chapter,
    board: Board,
    roster: Roster,
    supports: Vec<SupportRelationship>,
    behaviors: BTreeMap<UnitId, AiBehavior>,
    progress: ChapterProgress,
    turn: TurnState,
    next_unit_id: u32,
}

/// Assembles a [`Battle`] from a chapter and the player's party.
///
/// Party members receive ids `#1..` in deployment order, ahead of the
/// chapter's enemies, so support relationships can name them up front.
#[must_use]
pub struct BattleBuilder {
    chapter: Chapter,
    config: GameConfig,
    env: Env,
    party: Vec<SpawnSpec>,
    supports: Vec<SupportRelationship>,
}

impl BattleBuilder {
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn tables(mut self, tables: Arc<dyn TablesOracle>) -> Self {
        self.env = self.env.with_tables(tables);
        self
    }

    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.env = self.env.with_rng(rng);
        self
    }

    pub fn deploy(mut self, spawn: SpawnSpec) -> Self {
        self.party.push(spawn);
        self
    }

    pub fn support(mut self, relationship: SupportRelationship) -> Self {
        self.supports.push(relationship);
        self
    }

    /// Places the party, then the chapter's enemies and boss.
    ///
    /// A party member that cannot be placed is an error. A chapter spawn that
    /// cannot be placed is skipped with a warning.
    pub fn build(self) -> Result<Battle, ActionError> {
        let mut battle = Battle {
            board: Board::from_layout(&self.chapter.map),
            config: self.config,
            env: self.env,
            chapter: self.chapter,
            roster: Roster::new(),
            supports: self.supports,
            behaviors: BTreeMap::new(),
            progress: ChapterProgress::default(),
            turn: TurnState::new(),
            next_unit_id: 1,
        };

        for spawn in &self.party {
            battle.spawn(spawn)?;
        }

        let enemies = battle.chapter.enemies.clone();
        for spawn in &enemies {
            battle.spawn_or_warn(spawn);
        }

        if let Some(boss) = battle.chapter.boss.clone() {
            battle.progress.boss = battle.spawn_or_warn(&boss);
        }

        tracing::info!(
            chapter = battle.chapter.id,
            name = %battle.chapter.name,
            objective = %battle.chapter.objective,
            units = battle.roster.len(),
            "battle ready"
        );
        Ok(battle)
    }
}

impl Battle {
    pub fn builder(chapter: Chapter) -> BattleBuilder {
        BattleBuilder {
            chapter,
            config: GameConfig::default(),
            env: Env::default(),
            party: Vec::new(),
            supports: Vec::new(),
        }
    }

    // ===== population =====

    /// Creates a unit from spawn data and places it on the board.
    ///
    /// Spawns without weapons are issued the class default weapon, if the
    /// tables have one.
    pub fn spawn(&mut self, spawn: &SpawnSpec) -> Result<UnitId, ActionError> {
        let id = UnitId(self.next_unit_id);
        let mut unit = Unit::new(id, spawn.name.as_str(), spawn.class, spawn.team, spawn.level);

        if spawn.weapons.is_empty() {
            if let Some(weapon) = self.env.tables().default_weapon(spawn.class) {
                unit.add_weapon(weapon)?;
            }
        } else {
            for weapon in &spawn.weapons {
                unit.add_weapon(weapon.clone())?;
            }
        }

        self.board.place_unit(&mut unit, spawn.position)?;
        self.next_unit_id += 1;
        if let Some(behavior) = spawn.behavior {
            self.behaviors.insert(id, behavior);
        }
        tracing::debug!(unit = %id, name = %spawn.name, class = %spawn.class, at = %spawn.position, "spawned");
        self.roster.insert(unit);
        Ok(id)
    }

    fn spawn_or_warn(&mut self, spawn: &SpawnSpec) -> Option<UnitId> {
        match self.spawn(spawn) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(name = %spawn.name, at = %spawn.position, %error, "spawn skipped");
                None
            }
        }
    }

    /// Adds a pre-built unit at `position`, keeping its id.
    pub fn insert_unit(&mut self, mut unit: Unit, position: Position) -> Result<UnitId, ActionError> {
        let id = unit.id();
        if self.roster.contains(id) {
            return Err(ActionError::DuplicateUnit(id));
        }
        if !unit.is_alive() {
            return Err(ActionError::Defeated(id));
        }
        self.board.place_unit(&mut unit, position)?;
        self.next_unit_id = self.next_unit_id.max(id.0 + 1);
        self.roster.insert(unit);
        Ok(id)
    }

    /// Reserves a fresh id for [`insert_unit`](Self::insert_unit).
    pub fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    pub fn add_support(&mut self, relationship: SupportRelationship) {
        self.supports.push(relationship);
    }

    pub fn set_behavior(&mut self, unit: UnitId, behavior: AiBehavior) {
        self.behaviors.insert(unit, behavior);
    }

    /// Takes a unit off the board and out of the roster.
    pub(crate) fn remove_from_battle(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.roster.remove(id)?;
        self.board.remove_unit(&unit);
        self.behaviors.remove(&id);
        if self.turn.selected == Some(id) {
            self.turn.selected = None;
            self.turn.move_origin = None;
        }
        Some(unit)
    }

    // ===== queries =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.roster.iter()
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.board
            .occupant_at(position)
            .and_then(|id| self.roster.get(id))
    }

    pub fn supports(&self) -> &[SupportRelationship] {
        &self.supports
    }

    /// Policy bound to a unit; Aggressive unless its spawn data said otherwise.
    pub fn behavior_of(&self, unit: UnitId) -> AiBehavior {
        self.behaviors.get(&unit).copied().unwrap_or_default()
    }

    pub fn progress(&self) -> &ChapterProgress {
        &self.progress
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    pub fn turn_count(&self) -> u32 {
        self.turn.turn_count
    }

    pub fn active_team(&self) -> Team {
        self.turn.active_team
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.turn.selected
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.turn.selected.and_then(|id| self.roster.get(id))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.turn.outcome
    }

    pub fn is_over(&self) -> bool {
        self.turn.outcome.is_some()
    }

    /// Stats a unit receives from adjacent support partners.
    pub fn support_bonus(&self, id: UnitId) -> Stats {
        let Some(unit) = self.roster.get(id) else {
            return Stats::ZERO;
        };
        support::support_bonus(&self.supports, id, unit.position(), |partner| {
            self.roster
                .get(partner)
                .filter(|p| p.is_alive())
                .map(Unit::position)
        })
    }

    /// Combat view of a unit: stats with support bonuses, standing terrain.
    pub fn combatant(&self, id: UnitId) -> Option<Combatant<'_>> {
        let unit = self.roster.get(id)?;
        let terrain = self.board.terrain(unit.position())?;
        Some(Combatant::of(unit, terrain, self.support_bonus(id)))
    }

    /// Live hostile units the given unit can strike from where it stands.
    pub fn attackable_targets(&self, id: UnitId) -> Vec<UnitId> {
        let Some(unit) = self.roster.get(id) else {
            return Vec::new();
        };
        self.roster
            .iter()
            .filter(|other| {
                other.is_alive()
                    && unit.team().is_hostile_to(other.team())
                    && unit.can_attack_at(unit.position().distance(other.position()))
            })
            .map(Unit::id)
            .collect()
    }

    /// Wounded allies within reach of the unit's healing staff.
    pub fn healable_targets(&self, id: UnitId) -> Vec<UnitId> {
        let Some(unit) = self.roster.get(id) else {
            return Vec::new();
        };
        let Some(staff) = unit.healing_staff() else {
            return Vec::new();
        };
        self.roster
            .iter()
            .filter(|other| {
                other.id() != id
                    && other.team() == unit.team()
                    && other.is_wounded()
                    && staff.in_range(unit.position().distance(other.position()))
            })
            .map(Unit::id)
            .collect()
    }

    /// Seed for the next roll by `unit`, distinguished by `context`.
    fn roll_seed(&self, unit: UnitId, context: u32) -> u64 {
        compute_seed(self.config.seed, self.turn.nonce, unit.0, context)
    }

    /// Board and roster agree on every live unit's position.
    fn debug_assert_consistent(&self) {
        debug_assert!(
            self.roster
                .iter()
                .all(|u| u.is_alive() && self.board.occupant_at(u.position()) == Some(u.id())),
            "board and roster disagree"
        );
    }
}
