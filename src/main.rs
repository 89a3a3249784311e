#![forbid(unsafe_code)]
//! Bubble Index Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bubble::commands::{
    execute_analyze, execute_catalog, execute_category, execute_edit, execute_mode, execute_reset,
    execute_show, AnalyzeOptions, CatalogOptions, CategoryOptions, EditOptions, ModeOptions,
    ResetOptions, SessionSource, ShowOptions,
};
use bubble::config::CONFIG_FILE;
use bubble::{Config, Edit, EditMode};

#[derive(Parser)]
#[command(name = "bubble")]
#[command(about = "AI Bubble Index - compare market consensus with your own weighting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Store directory (overrides config)
    #[arg(long, global = true, env = "BUBBLE_STORE")]
    store: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show market and user scores
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a category's weight (0 = ignore, 100 = market, 200 = double)
    Weight {
        /// Category id
        category: String,

        /// New weight
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Override a factor's value (advanced mode)
    Factor {
        /// Category id
        category: String,

        /// Factor id
        factor: String,

        /// New value, 0-100
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Set a category's score directly (normal mode)
    Score {
        /// Category id
        category: String,

        /// New score, 0-100
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Show or set the edit mode (normal, advanced)
    Mode {
        /// New mode
        mode: Option<EditMode>,
    },

    /// Reset to market consensus
    Reset {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show one category and its factors
    Category {
        /// Category id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scenario analysis of your view vs the market
    Analyze {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the market catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bubble=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;
    let source = SessionSource::from_config(&config, cli.store);

    match cli.command {
        Commands::Show { json } => {
            execute_show(ShowOptions { source, json })?;
        }

        Commands::Weight { category, value } => {
            let edit = Edit::CategoryWeight {
                category,
                weight: value,
            };
            execute_edit(EditOptions { source, edit })?;
        }

        Commands::Factor {
            category,
            factor,
            value,
        } => {
            let edit = Edit::FactorValue {
                category,
                factor,
                value,
            };
            execute_edit(EditOptions { source, edit })?;
        }

        Commands::Score { category, value } => {
            let edit = Edit::CategoryScore {
                category,
                score: value,
            };
            execute_edit(EditOptions { source, edit })?;
        }

        Commands::Mode { mode } => {
            execute_mode(ModeOptions { source, mode })?;
        }

        Commands::Reset { yes } => {
            execute_reset(ResetOptions { source, yes })?;
        }

        Commands::Category { id, json } => {
            execute_category(CategoryOptions { source, id, json })?;
        }

        Commands::Analyze { json } => {
            execute_analyze(AnalyzeOptions {
                source,
                insight: config.insight,
                json,
            })?;
        }

        Commands::Catalog { json } => {
            execute_catalog(CatalogOptions { source, json })?;
        }
    }

    Ok(())
}
