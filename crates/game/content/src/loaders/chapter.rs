//! Chapter data loader.
//!
//! Chapter files name positions as `(x, y)` pairs and weapons by catalog
//! name:
//!
//! ```ron
//! (
//!     id: 6,
//!     name: "Marsh Crossing",
//!     objective: Escape,
//!     map: (dimensions: (8, 6), areas: [((3, 0), (4, 3), Water)], tiles: [(6, 5, Fort)]),
//!     escape_points: [(7, 0)],
//!     required_escapes: 2,
//!     player_starts: [(0, 0), (0, 1)],
//!     enemies: [(name: "Bandit", class: Thief, at: (6, 2), weapons: ["Iron Sword"])],
//! )
//! ```

use std::path::Path;

use serde::Deserialize;
use tactics_core::{
    AiBehavior, Chapter, MapLayout, Objective, Position, Reinforcement, SpawnSpec, Terrain,
    UnitClass,
};

use crate::loaders::{LoadResult, read_file};
use crate::{ChapterRepository, WeaponCatalog, audit};

/// Chapter file structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct ChapterRon {
    id: u32,
    name: String,
    objective: Objective,
    map: MapRon,
    #[serde(default)]
    turn_limit: Option<u32>,
    #[serde(default)]
    throne: Option<(i32, i32)>,
    #[serde(default)]
    escape_points: Vec<(i32, i32)>,
    #[serde(default)]
    required_escapes: u32,
    #[serde(default)]
    player_starts: Vec<(i32, i32)>,
    #[serde(default)]
    enemies: Vec<SpawnRon>,
    #[serde(default)]
    boss: Option<SpawnRon>,
    /// (turn, spawn)
    #[serde(default)]
    reinforcements: Vec<(u32, SpawnRon)>,
}

#[derive(Debug, Clone, Deserialize)]
struct MapRon {
    dimensions: (u32, u32),
    /// Inclusive rectangles, applied before single tiles.
    #[serde(default)]
    areas: Vec<((i32, i32), (i32, i32), Terrain)>,
    #[serde(default)]
    tiles: Vec<(i32, i32, Terrain)>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpawnRon {
    name: String,
    class: UnitClass,
    #[serde(default = "first_level")]
    level: u32,
    at: (i32, i32),
    #[serde(default)]
    behavior: Option<AiBehavior>,
    #[serde(default)]
    weapons: Vec<String>,
}

fn first_level() -> u32 {
    1
}

fn position((x, y): (i32, i32)) -> Position {
    Position::new(x, y)
}

impl MapRon {
    fn into_layout(self) -> MapLayout {
        let (width, height) = self.dimensions;
        let mut layout = MapLayout::new(width, height);
        for (from, to, terrain) in self.areas {
            layout = layout.with_area(position(from), position(to), terrain);
        }
        for (x, y, terrain) in self.tiles {
            layout = layout.with_terrain(Position::new(x, y), terrain);
        }
        layout
    }
}

impl SpawnRon {
    fn into_spawn(self, catalog: &WeaponCatalog) -> LoadResult<SpawnSpec> {
        let mut spawn = SpawnSpec::enemy(self.name, self.class, self.level, position(self.at));
        spawn.behavior = self.behavior;
        for name in &self.weapons {
            let weapon = catalog
                .weapon(name)
                .ok_or_else(|| anyhow::anyhow!("{} carries an unknown weapon: {}", spawn.name, name))?;
            spawn = spawn.with_weapon(weapon);
        }
        Ok(spawn)
    }
}

/// Loader for chapters from RON files.
pub struct ChapterLoader;

impl ChapterLoader {
    /// Load one chapter, resolving weapon names against `catalog`.
    pub fn load(path: &Path, catalog: &WeaponCatalog) -> LoadResult<Chapter> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Failed to load chapter {}: {}", path.display(), e))
    }

    /// Parse one chapter. Data problems the engine tolerates are logged,
    /// not rejected.
    pub fn parse(content: &str, catalog: &WeaponCatalog) -> LoadResult<Chapter> {
        let data: ChapterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse chapter RON: {}", e))?;

        let mut chapter = Chapter::new(data.id, data.name, data.map.into_layout(), data.objective);
        chapter.turn_limit = data.turn_limit;
        chapter.throne = data.throne.map(position);
        chapter.escape_points = data.escape_points.into_iter().map(position).collect();
        chapter.required_escapes = data.required_escapes;
        chapter.player_starts = data.player_starts.into_iter().map(position).collect();
        for spawn in data.enemies {
            chapter.enemies.push(spawn.into_spawn(catalog)?);
        }
        if let Some(boss) = data.boss {
            chapter.boss = Some(boss.into_spawn(catalog)?);
        }
        for (turn, spawn) in data.reinforcements {
            chapter.reinforcements.push(Reinforcement {
                turn,
                spawn: spawn.into_spawn(catalog)?,
            });
        }

        for issue in audit(&chapter) {
            tracing::warn!(chapter = chapter.id, name = %chapter.name, %issue, "malformed chapter data");
        }
        Ok(chapter)
    }

    /// Load every `.ron` file in `dir` as a chapter.
    pub fn load_dir(dir: &Path, catalog: &WeaponCatalog) -> LoadResult<ChapterRepository> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut chapters = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                chapters.push(Self::load(&path, catalog)?);
            }
        }

        let found = chapters.len();
        let repository = ChapterRepository::from_chapters(chapters);
        if repository.chapters().len() < found {
            tracing::warn!(dir = %dir.display(), "duplicate chapter ids; keeping the first of each");
        }
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARSH: &str = r#"(
        id: 6,
        name: "Marsh Crossing",
        objective: Escape,
        map: (dimensions: (8, 6), areas: [((3, 0), (4, 3), Water)], tiles: [(6, 5, Fort)]),
        escape_points: [(7, 0)],
        required_escapes: 2,
        player_starts: [(0, 0), (0, 1)],
        enemies: [
            (name: "Bandit", class: Thief, at: (6, 2), weapons: ["Iron Sword"]),
            (name: "Sniper", class: Archer, level: 3, at: (7, 5), behavior: Some(Defensive)),
        ],
        reinforcements: [(2, (name: "Rider", class: Cavalier, at: (7, 3)))],
    )"#;

    #[test]
    fn parses_a_full_chapter() {
        let chapter = ChapterLoader::parse(MARSH, &WeaponCatalog::standard()).unwrap();

        assert_eq!(chapter.id, 6);
        assert_eq!(chapter.objective, Objective::Escape);
        assert_eq!(chapter.map.terrain.len(), 9);
        assert!(chapter.is_escape_point(Position::new(7, 0)));
        assert_eq!(chapter.required_escapes, 2);
        assert_eq!(chapter.enemies[0].weapons[0].name, "Iron Sword");
        assert_eq!(chapter.enemies[0].level, 1);
        assert_eq!(chapter.enemies[1].behavior, Some(AiBehavior::Defensive));
        assert!(chapter.enemies[1].weapons.is_empty());
        assert_eq!(chapter.reinforcements_for(2).count(), 1);
        assert!(audit(&chapter).is_empty());
    }

    #[test]
    fn unknown_weapons_are_an_error() {
        let error = ChapterLoader::parse(MARSH, &WeaponCatalog::new()).unwrap_err();
        assert!(error.to_string().contains("Iron Sword"));
    }

    #[test]
    fn malformed_but_playable_chapters_still_load() {
        let chapter = ChapterLoader::parse(
            r#"(id: 1, name: "Open Field", objective: Survive, map: (dimensions: (4, 4)))"#,
            &WeaponCatalog::new(),
        )
        .unwrap();

        assert_eq!(chapter.turn_limit, None);
        assert!(!audit(&chapter).is_empty());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let error = ChapterLoader::parse("(id: 1,", &WeaponCatalog::new()).unwrap_err();
        assert!(error.to_string().contains("chapter RON"));
    }
}
