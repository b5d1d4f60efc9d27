//! Plain battle snapshots for persistence.
//!
//! A snapshot holds every piece of mutable battle state but not the chapter,
//! which is immutable and supplied again on restore. Restoring needs no
//! history: the rebuilt battle continues exactly where the snapshot left
//! off, including the roll counter.

use std::collections::BTreeMap;

use super::{Battle, ChapterProgress, TurnState};
use crate::ai::AiBehavior;
use crate::config::GameConfig;
use crate::env::{Chapter, Env, Terrain};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Board, BoardError, Position, Roster, Unit, UnitId};
use crate::stats::SupportRelationship;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub chapter_id: u32,
    pub config: GameConfig,
    pub width: u32,
    pub height: u32,
    /// Row-major, `width × height` entries.
    pub terrain: Vec<Terrain>,
    pub units: Vec<Unit>,
    pub supports: Vec<SupportRelationship>,
    pub behaviors: Vec<(UnitId, AiBehavior)>,
    pub turn: TurnState,
    pub progress: ChapterProgress,
    pub next_unit_id: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot belongs to chapter {found}, not chapter {expected}")]
    ChapterMismatch { expected: u32, found: u32 },

    #[error("snapshot has {found} terrain tiles for a {width}x{height} board")]
    TerrainSize { width: u32, height: u32, found: usize },

    #[error("unit {0} appears twice in the snapshot")]
    DuplicateUnit(UnitId),

    #[error("unit {0} is defeated but still in the snapshot")]
    DefeatedUnit(UnitId),

    #[error(transparent)]
    Placement(#[from] BoardError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::ChapterMismatch { .. } => "SNAPSHOT_CHAPTER_MISMATCH",
            SnapshotError::TerrainSize { .. } => "SNAPSHOT_TERRAIN_SIZE",
            SnapshotError::DuplicateUnit(_) => "SNAPSHOT_DUPLICATE_UNIT",
            SnapshotError::DefeatedUnit(_) => "SNAPSHOT_DEFEATED_UNIT",
            SnapshotError::Placement(e) => e.error_code(),
        }
    }
}

impl Battle {
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            chapter_id: self.chapter.id,
            config: self.config.clone(),
            width: self.board.width(),
            height: self.board.height(),
            terrain: self.board.tiles().map(|tile| tile.terrain()).collect(),
            units: self.roster.iter().cloned().collect(),
            supports: self.supports.clone(),
            behaviors: self.behaviors.iter().map(|(&id, &b)| (id, b)).collect(),
            turn: self.turn.clone(),
            progress: self.progress.clone(),
            next_unit_id: self.next_unit_id,
        }
    }

    /// Rebuilds a battle from a snapshot of `chapter`.
    pub fn restore(
        snapshot: BattleSnapshot,
        chapter: Chapter,
        env: Env,
    ) -> Result<Battle, SnapshotError> {
        if snapshot.chapter_id != chapter.id {
            return Err(SnapshotError::ChapterMismatch {
                expected: chapter.id,
                found: snapshot.chapter_id,
            });
        }

        let (width, height) = (snapshot.width, snapshot.height);
        if snapshot.terrain.len() != (width * height) as usize {
            return Err(SnapshotError::TerrainSize {
                width,
                height,
                found: snapshot.terrain.len(),
            });
        }

        let mut board = Board::new(width, height);
        let positions = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)));
        for (position, &terrain) in positions.zip(&snapshot.terrain) {
            board.set_terrain(position, terrain);
        }

        let mut roster = Roster::new();
        let mut next_unit_id = snapshot.next_unit_id;
        for mut unit in snapshot.units {
            let id = unit.id();
            if roster.contains(id) {
                return Err(SnapshotError::DuplicateUnit(id));
            }
            if !unit.is_alive() {
                return Err(SnapshotError::DefeatedUnit(id));
            }
            let position = unit.position();
            board.place_unit(&mut unit, position)?;
            next_unit_id = next_unit_id.max(id.0 + 1);
            roster.insert(unit);
        }

        let behaviors: BTreeMap<_, _> = snapshot
            .behaviors
            .into_iter()
            .filter(|(id, _)| roster.contains(*id))
            .collect();

        let battle = Battle {
            config: snapshot.config,
            env,
            chapter,
            board,
            roster,
            supports: snapshot.supports,
            behaviors,
            progress: snapshot.progress,
            turn: snapshot.turn,
            next_unit_id,
        };
        battle.debug_assert_consistent();
        tracing::debug!(
            chapter = battle.chapter.id,
            turn = battle.turn.turn_count,
            units = battle.roster.len(),
            "battle restored"
        );
        Ok(battle)
    }
}
