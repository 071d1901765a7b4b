use std::fmt;

use jss_core::{JssError, Jobs};
use jss_sample::{aggregate_with, DecodeOptions, ResultCategory};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{ModelBuilder, Sampler, SamplingOptions};

/// Value of the swept parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Horizon(u32),
    ChainStrength(f64),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Horizon(horizon) => write!(f, "{horizon}"),
            ParameterValue::ChainStrength(strength) => write!(f, "{strength}"),
        }
    }
}

/// Everything one trial needs besides the collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSpec {
    pub value: ParameterValue,
    pub horizon: u32,
    pub sampling: SamplingOptions,
    pub decode: DecodeOptions,
    pub seed: u64,
}

/// Result of a completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Occurrence weight of infeasible samples.
    pub error_count: u64,
    pub total_reads: u64,
    /// Category of the sampler's lowest-energy sample.
    pub best: Option<ResultCategory>,
}

/// Builds the model, samples it and counts infeasible reads.
///
/// Errors from the builder, the sampler or decoding are returned as-is; the
/// caller decides whether the trial is dropped.
pub fn run_trial<B, S>(
    jobs: &Jobs,
    spec: &TrialSpec,
    builder: &B,
    sampler: &mut S,
) -> Result<TrialOutcome, JssError>
where
    B: ModelBuilder,
    S: Sampler<Model = B::Model>,
{
    let model = builder.build(jobs, spec.horizon)?;
    let sampleset = sampler.sample(&model, &spec.sampling, spec.seed)?;
    let result = aggregate_with(&sampleset, jobs, &spec.decode)?;
    let outcome = TrialOutcome {
        error_count: result.histogram.infeasible(),
        total_reads: result.histogram.total(),
        best: result.best.map(|best| best.category),
    };
    debug!(
        value = %spec.value,
        errors = outcome.error_count,
        reads = outcome.total_reads,
        "trial complete"
    );
    Ok(outcome)
}
