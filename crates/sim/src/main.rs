//! Headless chapter simulator.
//!
//! Deploys the standing party into a chapter and lets policies play both
//! sides until the chapter is decided or the turn cap is reached.
//! Run with: `cargo run -p tactics-sim -- --chapter 2`

mod report;
mod runner;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tactics_content::{ChapterRepository, ConfigLoader, ContentFactory, WeaponCatalog};
use tactics_core::{AiBehavior, ChapterOracle, Env, GameConfig, PcgRng, TablesOracle};

use runner::Simulation;

/// Auto-play tactics chapters
#[derive(Parser)]
#[command(name = "tactics-sim")]
#[command(about = "Auto-play a chapter with both sides AI-driven", long_about = None)]
#[command(version)]
struct Cli {
    /// Chapter id to play
    #[arg(short, long, default_value_t = 1)]
    chapter: u32,

    /// Play every chapter in order
    #[arg(long, conflicts_with = "chapter")]
    all: bool,

    /// Engine configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content directory with chapters/ and tables.ron
    /// If not provided, plays the built-in campaign
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Overrides the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many turns if the chapter is still undecided
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Policy driving the player party. On escape maps units head for the
    /// exits first and use the policy only when cut off.
    #[arg(long, default_value = "aggressive", value_parser = parse_behavior)]
    party: AiBehavior,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

fn parse_behavior(value: &str) -> Result<AiBehavior, String> {
    value.parse().map_err(|_| {
        format!("unknown behavior '{value}' (aggressive, defensive, stationary, support)")
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}

impl Cli {
    fn execute(self) -> Result<()> {
        let (chapters, tables) = match &self.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let tables = factory.load_tables()?;
                let chapters = factory.load_chapters(&tables)?;
                (chapters, tables)
            }
            None => (ChapterRepository::campaign(), WeaponCatalog::standard()),
        };

        let mut config = match (&self.config, &self.data_dir) {
            (Some(path), _) => ConfigLoader::load(path)?,
            (None, Some(dir)) if dir.join("config.toml").exists() => {
                ContentFactory::new(dir).load_config()?
            }
            _ => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        tracing::info!(seed = config.seed, chapters = chapters.total_chapters(), "content loaded");

        let ids: Vec<u32> = if self.all {
            chapters.ids().collect()
        } else {
            vec![self.chapter]
        };

        let tables: Arc<dyn TablesOracle> = Arc::new(tables);
        let env = Env::new(tables, Arc::new(PcgRng));

        let mut reports = Vec::with_capacity(ids.len());
        for id in ids {
            let chapter = chapters.chapter(id).with_context(|| {
                format!(
                    "Chapter {} not found ({} available)",
                    id,
                    chapters.total_chapters()
                )
            })?;
            let battle = runner::deploy(chapter, config.clone(), env.clone())?;
            let report = Simulation::new(battle, self.party, self.max_turns).run()?;
            reports.push(report);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                report::print(report);
            }
        }
        Ok(())
    }
}
