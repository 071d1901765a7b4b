//! Trial execution, parameter sweeps and robust statistics for measuring how
//! often a sampler returns infeasible job-shop schedules.

mod backend;
mod hash;
mod report;
mod stats;
mod sweep;
mod trial;

pub use backend::{
    BackendSampler, BqmModelBuilder, ModelBuilder, Sampler, SamplerBackend, SamplerConfig,
    SamplingOptions,
};
pub use hash::{stable_hash_string, to_canonical_json_bytes};
pub use report::{SweepPoint, SweepReport, TrialFailure};
pub use stats::{summarize, summarize_with, RobustSummary, SmallSamplePolicy, StatisticsConfig};
pub use sweep::{sweep, sweep_with_backend, SweepParameter, SweepPlan};
pub use trial::{run_trial, ParameterValue, TrialOutcome, TrialSpec};
