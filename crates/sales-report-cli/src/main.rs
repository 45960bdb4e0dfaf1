mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::report::{AnalyzeArgs, BonusArgs, RevenueArgs};

/// Per-seller sales reports: revenue, profit, top products and rank bonus
#[derive(Parser)]
#[command(
    name = "salesrep",
    version,
    about = "Per-seller sales reports with decimal precision",
    long_about = "A CLI for building per-seller sales reports from sellers, products and \
                  purchase records. Computes revenue, profit, sales count, top products \
                  and a profit-rank bonus for every seller."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log analysis progress to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the per-seller sales report from a sales data document
    Analyze(AnalyzeArgs),
    /// Net revenue of a single line item after discount
    Revenue(RevenueArgs),
    /// Bonus for a seller at a given profit rank
    Bonus(BonusArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::report::run_analyze(args),
        Commands::Revenue(args) => commands::report::run_revenue(args),
        Commands::Bonus(args) => commands::report::run_bonus(args),
        Commands::Version => {
            println!("salesrep {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
