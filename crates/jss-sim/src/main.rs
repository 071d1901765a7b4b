use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    aggregate::{self, AggregateArgs},
    summarize::{self, SummarizeArgs},
    sweep::{self, SweepArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "jss-sim", about = "Job-shop sampler experiment CLI")]
struct Cli {
    /// Log at debug level instead of info.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a parameter sweep described by a YAML plan.
    Sweep(SweepArgs),
    /// Aggregate a stored sample set into a makespan histogram.
    Aggregate(AggregateArgs),
    /// Summarize a distribution of error counts.
    Summarize(SummarizeArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Sweep(args) => sweep::run(&args),
        Command::Aggregate(args) => aggregate::run(&args),
        Command::Summarize(args) => summarize::run(&args),
    }
}
