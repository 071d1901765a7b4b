use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use jss_core::Jobs;
use jss_sample::{aggregate_with, DecodeOptions, DuplicatePolicy, SampleSet};
use serde_json::json;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Job definitions as JSON or YAML.
    #[arg(long)]
    pub jobs: PathBuf,
    /// Sample set as JSON.
    #[arg(long)]
    pub sampleset: PathBuf,
    /// Treat duplicate task starts as conflicts instead of keeping the last.
    #[arg(long)]
    pub reject_duplicates: bool,
}

pub fn run(args: &AggregateArgs) -> Result<(), Box<dyn Error>> {
    let jobs = load_jobs(&args.jobs)?;
    let sampleset = SampleSet::from_json(&fs::read_to_string(&args.sampleset)?)?;
    let options = DecodeOptions {
        duplicate_policy: if args.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::LastWins
        },
    };
    let aggregate = aggregate_with(&sampleset, &jobs, &options)?;
    let payload = json!({
        "histogram": aggregate.histogram,
        "total": aggregate.histogram.total(),
        "best_makespan": aggregate.histogram.best_makespan(),
        "best": aggregate.best,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn load_jobs(path: &Path) -> Result<Jobs, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let jobs = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
        _ => serde_json::from_str(&raw)?,
    };
    Ok(jobs)
}
