mod app;
mod config;
mod model;
mod sample;
mod series;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use matchlog::{Metric, Selection};

use crate::app::App;
use crate::config::Settings;
use crate::model::ModelStats;
use crate::series::{CorrelationReport, OverviewSummary, ScatterSeries, TimeSeries};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Override the configuration directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the match-history CSV export
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stat cards: totals, win/loss, win rate, average K/D
    Overview {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// One metric over time, with its mean
    Series {
        /// Metric label, e.g. "Kills" or "K/D Ratio"
        #[arg(long)]
        metric: Metric,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Ranked correlation bars and the all-pairs matrix
    Correlations {
        /// Primary metric the bars are ranked against
        #[arg(long)]
        metric: Metric,
        /// "all", "ranked", or a specific game type
        #[arg(long, default_value = "all")]
        gamemode: String,
    },
    /// Paired points of two metrics, tagged with the match outcome
    Scatter {
        #[arg(long)]
        x: Metric,
        #[arg(long)]
        y: Metric,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Model analytics payload (trainer export, or built-in fallback)
    Model,
    /// Write a demo CSV export to stdout
    Sample {
        #[arg(long, default_value_t = 200)]
        rows: usize,
    },
}

#[derive(Debug, Args)]
struct SelectionArgs {
    /// "all", "ranked", or a specific game type
    #[arg(long, default_value = "all")]
    gamemode: String,

    /// "all" or a specific map
    #[arg(long, default_value = "all")]
    map: String,
}

impl SelectionArgs {
    fn selection(&self) -> Selection {
        Selection::new(self.gamemode.as_str(), self.map.as_str())
    }
}

// Load the dataset and report the pipeline counters on stderr
fn load_app(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
) -> Result<App, Box<dyn std::error::Error>> {
    let settings = Settings::get(config)?;
    let app = App::load(settings, data)?;

    let summary = app.summary();
    eprintln!(
        "loaded {} matches ({} parsed, {} discarded, {} filtered out, {} ragged rows)",
        summary.loaded, summary.parsed, summary.discarded, summary.filtered_out, summary.ragged
    );

    Ok(app)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let payload = match cli.command {
        Command::Sample { rows } => {
            print!("{}", sample::sample_csv(rows, &mut rand::thread_rng()));
            return Ok(());
        }
        Command::Model => {
            let settings = Settings::get(cli.config)?;
            let stats = ModelStats::load_or_fallback(settings.model_stats_file.as_deref());
            serde_json::to_string_pretty(&stats)?
        }
        Command::Overview { selection } => {
            let app = load_app(cli.config, cli.data)?;
            let records = app.select(&selection.selection());
            serde_json::to_string_pretty(&OverviewSummary::compute(&records))?
        }
        Command::Series { metric, selection } => {
            let app = load_app(cli.config, cli.data)?;
            let records = app.select(&selection.selection());
            serde_json::to_string_pretty(&TimeSeries::compute(&records, metric))?
        }
        Command::Correlations { metric, gamemode } => {
            let app = load_app(cli.config, cli.data)?;
            // The correlations view always spans every map
            let records = app.select(&Selection::new(gamemode.as_str(), "all"));
            serde_json::to_string_pretty(&CorrelationReport::compute(&records, metric)?)?
        }
        Command::Scatter { x, y, selection } => {
            let app = load_app(cli.config, cli.data)?;
            let records = app.select(&selection.selection());
            serde_json::to_string_pretty(&ScatterSeries::compute(&records, x, y))?
        }
    };

    println!("{payload}");
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
