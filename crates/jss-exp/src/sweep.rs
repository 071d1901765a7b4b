use std::fs;
use std::path::Path;

use jss_anneal::ModelOptions;
use jss_core::errors::{ErrorInfo, JssError};
use jss_core::{trial_seed, Jobs};
use jss_sample::DecodeOptions;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::{
    BackendSampler, BqmModelBuilder, ModelBuilder, Sampler, SamplerConfig, SamplingOptions,
};
use crate::hash::stable_hash_string;
use crate::report::{SweepPoint, SweepReport, TrialFailure};
use crate::stats::{summarize_with, StatisticsConfig};
use crate::trial::{run_trial, ParameterValue, TrialSpec};

/// Parameter axis of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SweepParameter {
    /// Vary the scheduling horizon.
    Horizon { values: Vec<u32> },
    /// Vary the sampler chain strength at a fixed horizon.
    ChainStrength { horizon: u32, values: Vec<f64> },
}

impl SweepParameter {
    pub fn kind(&self) -> &'static str {
        match self {
            SweepParameter::Horizon { .. } => "horizon",
            SweepParameter::ChainStrength { .. } => "chain-strength",
        }
    }

    /// `(value, horizon, chain strength override)` per parameter value, in order.
    fn points(&self) -> Vec<(ParameterValue, u32, Option<f64>)> {
        match self {
            SweepParameter::Horizon { values } => values
                .iter()
                .map(|&horizon| (ParameterValue::Horizon(horizon), horizon, None))
                .collect(),
            SweepParameter::ChainStrength { horizon, values } => values
                .iter()
                .map(|&strength| {
                    (ParameterValue::ChainStrength(strength), *horizon, Some(strength))
                })
                .collect(),
        }
    }
}

/// Full description of a sweep, usually loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub jobs: Jobs,
    pub parameter: SweepParameter,
    #[serde(default = "SweepPlan::default_trials_per_value")]
    pub trials_per_value: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub model: ModelOptions,
    #[serde(default)]
    pub decode: DecodeOptions,
    #[serde(default)]
    pub statistics: StatisticsConfig,
}

impl SweepPlan {
    const fn default_trials_per_value() -> usize {
        12
    }

    /// Parses a plan from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, JssError> {
        serde_yaml::from_str(text)
            .map_err(|err| JssError::Config(ErrorInfo::new("plan-parse", err.to_string())))
    }

    /// Reads and parses a YAML plan file.
    pub fn load(path: &Path) -> Result<Self, JssError> {
        let text = fs::read_to_string(path).map_err(|err| {
            JssError::Serde(
                ErrorInfo::new("plan-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }
}

/// Runs `plan` against the reference builder and the configured backend.
pub fn sweep_with_backend(plan: &SweepPlan) -> Result<SweepReport, JssError> {
    let builder = BqmModelBuilder::new(plan.model.clone());
    let mut sampler = BackendSampler::from_config(&plan.sampler);
    sweep(plan, &builder, &mut sampler)
}

/// Executes every trial of `plan` in order.
///
/// Failed trials are logged with the parameter value under test and recorded
/// in the point's failure list; they never abort the sweep. The only error
/// returned is a failure to hash the plan.
pub fn sweep<B, S>(plan: &SweepPlan, builder: &B, sampler: &mut S) -> Result<SweepReport, JssError>
where
    B: ModelBuilder,
    S: Sampler<Model = B::Model>,
{
    let plan_hash = stable_hash_string(plan)?;
    let base_sampling = plan.sampler.sampling_options();
    let axis = plan.parameter.points();
    let mut points = Vec::with_capacity(axis.len());

    for (value_index, (value, horizon, chain_strength)) in axis.into_iter().enumerate() {
        let sampling = SamplingOptions {
            chain_strength: chain_strength.or(base_sampling.chain_strength),
            ..base_sampling.clone()
        };
        let mut error_counts = Vec::with_capacity(plan.trials_per_value);
        let mut failures = Vec::new();
        for trial in 0..plan.trials_per_value {
            let spec = TrialSpec {
                value,
                horizon,
                sampling: sampling.clone(),
                decode: plan.decode,
                seed: trial_seed(plan.seed, value_index, trial),
            };
            match run_trial(&plan.jobs, &spec, builder, sampler) {
                Ok(outcome) => error_counts.push(outcome.error_count),
                Err(err) => {
                    warn!(
                        parameter = plan.parameter.kind(),
                        %value,
                        trial,
                        family = err.family(),
                        error = %err,
                        "trial abandoned"
                    );
                    failures.push(TrialFailure::new(trial, &err));
                }
            }
        }
        let summary = summarize_with(&error_counts, plan.statistics.small_sample_policy);
        info!(
            parameter = plan.parameter.kind(),
            %value,
            completed = error_counts.len(),
            failed = failures.len(),
            median = ?summary.map(|s| s.median),
            "parameter value finished"
        );
        points.push(SweepPoint {
            value,
            error_counts,
            failures,
            summary,
        });
    }

    Ok(SweepReport {
        plan_hash,
        parameter: plan.parameter.kind().to_string(),
        points,
    })
}
