use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use jss_exp::{sweep_with_backend, SamplerBackend, SweepPlan, SweepReport};
use tracing::info;

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[arg(long)]
    pub plan: PathBuf,
    #[arg(long)]
    pub out: PathBuf,
    /// Overrides the plan's master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Overrides the plan's trial count per value.
    #[arg(long)]
    pub trials: Option<usize>,
    /// Forces the hardware backend.
    #[arg(long)]
    pub hardware: bool,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let mut plan = SweepPlan::load(&args.plan)?;
    if let Some(seed) = args.seed {
        plan.seed = seed;
    }
    if let Some(trials) = args.trials {
        plan.trials_per_value = trials;
    }
    if args.hardware {
        plan.sampler.backend = SamplerBackend::Hardware;
    }
    info!(
        plan = %args.plan.display(),
        parameter = plan.parameter.kind(),
        trials = plan.trials_per_value,
        seed = plan.seed,
        "starting sweep"
    );
    let report = sweep_with_backend(&plan)?;
    persist_report(&args.out, &report)?;
    print!("{}", report.distribution_dump());
    Ok(())
}

fn persist_report(out: &Path, report: &SweepReport) -> Result<(), Box<dyn Error>> {
    report.write_json(&out.join("sweep_report.json"))?;
    report.write_summary_csv(&out.join("summary.csv"))?;
    info!(out = %out.display(), plan_hash = %report.plan_hash, "report written");
    Ok(())
}
