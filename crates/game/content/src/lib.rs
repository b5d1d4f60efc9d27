//! Built-in campaign content and data-file loaders.
//!
//! This crate supplies the read-only data a battle consumes:
//! - The five-chapter campaign ([`ChapterRepository`])
//! - Weapons, staves and consumables with the default loadout per class ([`WeaponCatalog`])
//! - The standing party deployed into each chapter ([`party`])
//! - Chapter data checks ([`audit`])
//! - RON/TOML loaders for chapters, tables and [`tactics_core::GameConfig`] (feature `loaders`)
//!
//! Content is handed to the engine through its oracle traits and never appears
//! in battle state.

pub mod chapters;
pub mod party;
pub mod validate;
pub mod weapons;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use chapters::ChapterRepository;
pub use party::{party_for, party_supports};
pub use validate::{ChapterIssue, audit};
pub use weapons::WeaponCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{ChapterLoader, ConfigLoader, ContentFactory, TablesLoader};
