//! Deterministic turn-based tactical combat.
//!
//! `tactics-core` owns the battlefield: the board and its units, combat
//! resolution, chapter objectives, the turn/phase state machine and the
//! scripted enemy policies. All state mutation flows through
//! [`engine::Battle`], and content crates plug in through the oracle traits
//! in [`env`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use ai::{AiBehavior, AiOutcome};
pub use combat::{BattleForecast, BattleResult, Combatant, HealResult};
pub use config::{CombatParams, DamageParams, ExperienceParams, GameConfig, HitParams};
pub use engine::{
    ActionError, Battle, BattleBuilder, BattleSnapshot, ChapterProgress, Intent, Phase,
    SnapshotError, TurnState,
};
pub use env::{
    BareTables, BattleStatus, Chapter, ChapterOracle, Env, FixedRng, MapLayout, Objective,
    Outcome, PcgRng, Reinforcement, RngOracle, SpawnSpec, TablesOracle, Terrain,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Board, BoardError, ClassProfile, Inventory, Item, LevelProgress, Position, Restored, Roster,
    Team, Tile, TriangleEdge, TurnFlags, Unit, UnitClass, UnitError, UnitId, Weapon, WeaponKind,
    WeaponRank, WeaponUse,
};
pub use stats::{Stats, SupportRank, SupportRelationship};
