//! Read-only data the battle consumes: terrain, chapters, balance tables and
//! the random source.
//!
//! The [`Env`] aggregate bundles the oracles so the engine depends on traits
//! rather than on any concrete content crate.
mod chapter;
mod map;
mod objective;
mod rng;
mod tables;

use std::sync::Arc;

pub use chapter::{Chapter, ChapterOracle, Reinforcement, SpawnSpec};
pub use map::{IMPASSABLE, MapLayout, Terrain};
pub use objective::{
    BattleStatus, Objective, Outcome, evaluate, is_objective_complete, is_objective_failed,
};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed, roll};
pub use tables::{BareTables, DEFAULT_STAFF_HEAL, TablesOracle, standard_staff_heal};

/// Oracles shared by a battle. Cheap to clone.
#[derive(Clone)]
pub struct Env {
    tables: Arc<dyn TablesOracle>,
    rng: Arc<dyn RngOracle>,
}

impl Env {
    pub fn new(tables: Arc<dyn TablesOracle>, rng: Arc<dyn RngOracle>) -> Self {
        Self { tables, rng }
    }

    pub fn tables(&self) -> &dyn TablesOracle {
        self.tables.as_ref()
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }

    pub fn with_tables(mut self, tables: Arc<dyn TablesOracle>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }
}

impl Default for Env {
    /// No default weapons and PCG randomness.
    fn default() -> Self {
        Self::new(Arc::new(BareTables), Arc::new(PcgRng))
    }
}

impl core::fmt::Debug for Env {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
