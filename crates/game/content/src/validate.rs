//! Consistency checks for chapter data.
//!
//! The engine tolerates malformed chapters (an objective with missing data
//! simply never completes, an unplaceable spawn is skipped), so these checks
//! only report. Loaders log every finding.

use std::collections::BTreeSet;

use tactics_core::{Chapter, MapLayout, Objective, Position, SpawnSpec, Terrain};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChapterIssue {
    #[error("{name} spawns off the map at {position}")]
    SpawnOutOfBounds { name: String, position: Position },

    #[error("{name} cannot stand on water at {position}")]
    SpawnOnWater { name: String, position: Position },

    #[error("two units start on {position}")]
    SharedStart { position: Position },

    #[error("deployment slot {position} is unusable")]
    BadDeploymentSlot { position: Position },

    #[error("terrain listed off the map at {position}")]
    TerrainOutOfBounds { position: Position },

    #[error("{objective} objective has no turn limit")]
    MissingTurnLimit { objective: Objective },

    #[error("{objective} objective has no throne")]
    MissingThrone { objective: Objective },

    #[error("escape objective needs escape points and a required count")]
    NoEscapeRoute,

    #[error("boss objective has no boss")]
    MissingBoss,

    #[error("{marker} at {position} lies off the map")]
    MarkerOutOfBounds {
        marker: &'static str,
        position: Position,
    },

    #[error("reinforcement {name} arrives on turn 0")]
    ReinforcementBeforeStart { name: String },
}

/// Lists everything in `chapter` that would make it play differently from
/// how it reads.
pub fn audit(chapter: &Chapter) -> Vec<ChapterIssue> {
    let map = &chapter.map;
    let mut issues = Vec::new();

    for (position, _) in &map.terrain {
        if !map.contains(*position) {
            issues.push(ChapterIssue::TerrainOutOfBounds {
                position: *position,
            });
        }
    }

    let mut occupied = BTreeSet::new();
    for &position in &chapter.player_starts {
        if !map.contains(position) || terrain_at(map, position) == Terrain::Water {
            issues.push(ChapterIssue::BadDeploymentSlot { position });
        }
        if !occupied.insert(position) {
            issues.push(ChapterIssue::SharedStart { position });
        }
    }

    for spawn in chapter.enemies.iter().chain(&chapter.boss) {
        check_spawn(map, spawn, &mut issues);
        if !occupied.insert(spawn.position) {
            issues.push(ChapterIssue::SharedStart {
                position: spawn.position,
            });
        }
    }

    for reinforcement in &chapter.reinforcements {
        check_spawn(map, &reinforcement.spawn, &mut issues);
        if reinforcement.turn == 0 {
            issues.push(ChapterIssue::ReinforcementBeforeStart {
                name: reinforcement.spawn.name.clone(),
            });
        }
    }

    let markers = chapter
        .throne
        .iter()
        .map(|&p| ("throne", p))
        .chain(chapter.escape_points.iter().map(|&p| ("escape point", p)));
    for (marker, position) in markers {
        if !map.contains(position) {
            issues.push(ChapterIssue::MarkerOutOfBounds { marker, position });
        }
    }

    let objective = chapter.objective;
    match objective {
        Objective::Survive | Objective::Defend if chapter.turn_limit.is_none() => {
            issues.push(ChapterIssue::MissingTurnLimit { objective });
        }
        _ => {}
    }
    match objective {
        Objective::SeizeThrone | Objective::Defend if chapter.throne.is_none() => {
            issues.push(ChapterIssue::MissingThrone { objective });
        }
        Objective::Escape
            if chapter.escape_points.is_empty() || chapter.required_escapes == 0 =>
        {
            issues.push(ChapterIssue::NoEscapeRoute);
        }
        Objective::DefeatBoss if chapter.boss.is_none() => {
            issues.push(ChapterIssue::MissingBoss);
        }
        _ => {}
    }

    issues
}

fn check_spawn(map: &MapLayout, spawn: &SpawnSpec, issues: &mut Vec<ChapterIssue>) {
    let position = spawn.position;
    if !map.contains(position) {
        issues.push(ChapterIssue::SpawnOutOfBounds {
            name: spawn.name.clone(),
            position,
        });
    } else if !terrain_at(map, position).admits(spawn.class.can_fly()) {
        issues.push(ChapterIssue::SpawnOnWater {
            name: spawn.name.clone(),
            position,
        });
    }
}

/// Later entries override earlier ones, as on the board.
fn terrain_at(map: &MapLayout, position: Position) -> Terrain {
    map.terrain
        .iter()
        .rev()
        .find(|(p, _)| *p == position)
        .map(|(_, terrain)| *terrain)
        .unwrap_or_default()
}
