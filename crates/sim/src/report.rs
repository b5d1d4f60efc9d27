//! Simulation results.

use console::style;
use serde::Serialize;
use tactics_core::{
    AiOutcome, Battle, Objective, Outcome, Position, Team, UnitClass, UnitId,
};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub chapter: u32,
    pub name: String,
    pub objective: Objective,
    /// `None` when the turn cap ran out first.
    pub outcome: Option<Outcome>,
    pub turns: u32,
    pub escaped: u32,
    pub survivors: Vec<Survivor>,
    pub phases: Vec<PhaseLog>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Survivor {
    pub id: UnitId,
    pub name: String,
    pub class: UnitClass,
    pub team: Team,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub position: Position,
}

/// Everything one side did during one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseLog {
    pub turn: u32,
    pub team: Team,
    pub actions: Vec<AiOutcome>,
    /// Party units that left through an escape point.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub escaped: Vec<UnitId>,
}

impl Report {
    pub fn new(battle: &Battle, phases: Vec<PhaseLog>) -> Self {
        let chapter = battle.chapter();
        let survivors = battle
            .units()
            .map(|unit| Survivor {
                id: unit.id(),
                name: unit.name().to_owned(),
                class: unit.class(),
                team: unit.team(),
                level: unit.level(),
                hp: unit.hp(),
                max_hp: unit.max_hp(),
                position: unit.position(),
            })
            .collect();

        Self {
            chapter: chapter.id,
            name: chapter.name.clone(),
            objective: chapter.objective,
            outcome: battle.outcome(),
            turns: battle.turn_count(),
            escaped: battle.progress().escaped,
            survivors,
            phases,
        }
    }
}

pub fn print(report: &Report) {
    println!(
        "{} {} ({})",
        style(format!("Chapter {}:", report.chapter)).bold(),
        report.name,
        report.objective
    );

    let verdict = match report.outcome {
        Some(Outcome::Victory) => style("victory".to_string()).green(),
        Some(Outcome::Defeat) => style("defeat".to_string()).red(),
        None => style("undecided".to_string()).yellow(),
    };
    println!("  {} after {} turn(s)", verdict, report.turns);

    let strikes = report
        .phases
        .iter()
        .flat_map(|p| &p.actions)
        .filter_map(|a| a.attack)
        .count();
    println!("  {} phases, {} attacks", report.phases.len(), strikes);
    if report.escaped > 0 {
        println!("  {} escaped", report.escaped);
    }

    for team in [Team::Player, Team::Enemy] {
        let standing: Vec<_> = report.survivors.iter().filter(|s| s.team == team).collect();
        println!("  {} standing: {}", team, standing.len());
        for survivor in standing {
            println!(
                "    {} {:<16} {:<14} lv {:>2}  hp {:>2}/{:<2}  at {}",
                survivor.id,
                survivor.name,
                survivor.class.to_string(),
                survivor.level,
                survivor.hp,
                survivor.max_hp,
                survivor.position
            );
        }
    }
}
