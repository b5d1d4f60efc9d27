//! Content factory for loading a campaign from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{Chapter, GameConfig};

use crate::loaders::{ChapterLoader, ConfigLoader, LoadResult, TablesLoader};
use crate::{ChapterRepository, WeaponCatalog};

/// Loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.ron
/// └── chapters/
///     ├── 01_outpost.ron
///     └── 02_marsh_crossing.ron
/// ```
///
/// A missing `tables.ron` falls back to [`WeaponCatalog::standard`].
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load weapon tables from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<WeaponCatalog> {
        let path = self.data_dir.join("tables.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no tables file; using the standard armory");
            return Ok(WeaponCatalog::standard());
        }
        TablesLoader::load(&path)
    }

    /// Load a chapter from `chapters/{file_name}.ron`.
    pub fn load_chapter(&self, file_name: &str, catalog: &WeaponCatalog) -> LoadResult<Chapter> {
        let path = self.chapters_dir().join(format!("{}.ron", file_name));
        ChapterLoader::load(&path, catalog)
    }

    /// Load every chapter under `chapters/`.
    pub fn load_chapters(&self, catalog: &WeaponCatalog) -> LoadResult<ChapterRepository> {
        ChapterLoader::load_dir(&self.chapters_dir(), catalog)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn chapters_dir(&self) -> PathBuf {
        self.data_dir.join("chapters")
    }
}
