//! Command-line driver: run one signaling-game simulation and print the
//! history and analysis as JSON.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sift_core::rng::{stream_rng, LISTENER_STREAM};
use sift_core::strategy::{TableListener, TableSpeaker};
use sift_core::{
    accuracy_curve, run_and_analyze, AccuracyPoint, ActionSpace, Agents, Analysis, History,
    RunConfig, SimulationConfig, StateSpace,
};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Simulate a speaker/listener signaling game")]
#[command(version)]
struct Cli {
    /// JSON run configuration (defaults to the four-shape game)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Override the RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Strategy pair to play with
    #[arg(long, value_enum, default_value_t = StrategyPair::Default)]
    strategy: StrategyPair,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyPair {
    /// Canonical-signal speaker, memory-driven listener
    Default,
    /// Fixed descriptive signals on both sides
    Table,
}

#[derive(Serialize)]
struct Report<'a> {
    simulation: &'a SimulationConfig,
    history: &'a History<String, String>,
    analysis: &'a Analysis<String>,
    accuracy_curve: Vec<AccuracyPoint>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sift=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(rounds) = cli.rounds {
        config.simulation.num_rounds = rounds;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }

    let (states, actions) = config.spaces().context("invalid run configuration")?;

    info!(
        rounds = config.simulation.num_rounds,
        seed = config.simulation.seed,
        strategy = ?cli.strategy,
        "running simulation"
    );

    let mut agents = match cli.strategy {
        StrategyPair::Default => Agents::defaults(&states, &actions, config.simulation.seed),
        StrategyPair::Table => table_agents(&states, &actions, config.simulation.seed),
    };

    let (history, analysis) = run_and_analyze(&config.simulation, &states, &actions, &mut agents)?;

    let report = Report {
        simulation: &config.simulation,
        history: &history,
        analysis: &analysis,
        accuracy_curve: accuracy_curve(&history),
    };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}

/// Speaker names each state in snake_case; listener maps each name to the
/// action at the same position.
fn table_agents(
    states: &StateSpace<String>,
    actions: &ActionSpace<String>,
    seed: u64,
) -> Agents<'static, String, String> {
    let names: Vec<String> = states.iter().map(|s| snake_case(s)).collect();

    let speaker: TableSpeaker<String> = states.iter().cloned().zip(names.iter().cloned()).collect();
    let table: HashMap<String, String> = names.into_iter().zip(actions.iter().cloned()).collect();
    let listener = TableListener::new(table, actions, stream_rng(seed, LISTENER_STREAM));

    Agents::new(speaker, listener)
}

fn snake_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
