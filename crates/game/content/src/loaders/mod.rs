//! Content loaders for reading game data from files.
//!
//! Chapters and tables are RON; the engine configuration is TOML. Loaders
//! parse into compact file formats and convert to `tactics-core` types.

pub mod chapter;
pub mod config;
pub mod factory;
pub mod tables;

pub use chapter::ChapterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
