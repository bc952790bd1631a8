//! Division CLI
//!
//! Read a match report and print who is promoting, who is demoting and who
//! still could.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use division::{DivisionConfig, DivisionReport, load_report};
use division_core::{Direction, match_implications};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Outcome {
    Promote,
    Demote,
}

impl From<Outcome> for Direction {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Promote => Direction::Promotion,
            Outcome::Demote => Direction::Demotion,
        }
    }
}

#[derive(Parser)]
#[command(name = "division")]
#[command(about = "Promotion and demotion outlook for a round-robin division", long_about = None)]
struct Cli {
    /// Match report, one `A x–y B` result per line
    report: PathBuf,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Games scheduled per pairing
    #[arg(long)]
    games: Option<u32>,

    /// Places that promote
    #[arg(long)]
    promotion_slots: Option<usize>,

    /// Places that demote
    #[arg(long)]
    demotion_slots: Option<usize>,

    /// Print the implication table for one pairing
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    matchup: Option<Vec<String>>,

    /// Outcome the matchup table tracks
    #[arg(long, value_enum, default_value = "demote")]
    direction: Outcome,

    /// Save the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Branch on every match instead of skipping ones that cannot matter
    #[arg(long)]
    no_prune: bool,

    /// Also enumerate every completion of the schedule
    #[arg(long)]
    exhaustive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DivisionConfig::load(path).map_err(|e| anyhow!(e))?,
        None => DivisionConfig::default(),
    };
    if let Some(games) = cli.games {
        config.games_per_pairing = games;
    }
    if let Some(slots) = cli.promotion_slots {
        config.promotion_slots = slots;
    }
    if let Some(slots) = cli.demotion_slots {
        config.demotion_slots = slots;
    }
    if cli.no_prune {
        config.search.prune = false;
    }
    config.validate().map_err(|e| anyhow!(e))?;

    let matrix = load_report(&cli.report, config.games_per_pairing)
        .with_context(|| format!("loading {}", cli.report.display()))?;
    info!(
        players = matrix.len(),
        open = matrix.unfinished_matches().len(),
        "report loaded"
    );

    let mut report =
        DivisionReport::analyze(&matrix, &config, cli.exhaustive).context("analysis failed")?;

    if let Some(pair) = &cli.matchup
        && let [a, b] = pair.as_slice()
    {
        let direction = Direction::from(cli.direction);
        let slots = match direction {
            Direction::Promotion => config.promotion_slots,
            Direction::Demotion => config.demotion_slots,
        };
        let matchup = match_implications(&matrix, a, b, direction, slots, &config.search)
            .with_context(|| format!("matchup {} vs. {}", a, b))?;
        report = report.with_matchup(matchup);
    }

    report.print_report();

    if let Some(path) = &cli.json {
        report
            .save(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("saving {}", path.display()))?;
        info!(path = %path.display(), "report saved");
    }

    Ok(())
}
