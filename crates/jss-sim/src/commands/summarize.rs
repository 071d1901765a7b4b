use std::error::Error;

use clap::Args;
use jss_exp::{summarize_with, SmallSamplePolicy};

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Error counts, one per trial.
    #[arg(required = true, num_args = 1..)]
    pub counts: Vec<u64>,
    /// Emit nothing when fewer than three counts are given.
    #[arg(long)]
    pub skip_small: bool,
}

pub fn run(args: &SummarizeArgs) -> Result<(), Box<dyn Error>> {
    let policy = if args.skip_small {
        SmallSamplePolicy::Skip
    } else {
        SmallSamplePolicy::Untrimmed
    };
    let summary = summarize_with(&args.counts, policy);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
