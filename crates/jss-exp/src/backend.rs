use jss_anneal::{
    AnnealConfig, AnnealingSampler, BinaryQuadraticModel, JobShopModelBuilder, ModelOptions,
};
use jss_core::errors::{ErrorInfo, JssError};
use jss_core::Jobs;
use jss_sample::SampleSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Builds an optimization model for a job-shop instance and horizon.
///
/// Any error is treated by the trial runner as a failed trial.
pub trait ModelBuilder {
    type Model;

    fn build(&self, jobs: &Jobs, horizon: u32) -> Result<Self::Model, JssError>;
}

/// Draws a weighted sample set from a model.
pub trait Sampler {
    type Model;

    fn sample(
        &mut self,
        model: &Self::Model,
        options: &SamplingOptions,
        seed: u64,
    ) -> Result<SampleSet, JssError>;
}

/// Per-call sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    #[serde(default = "default_num_reads")]
    pub num_reads: usize,
    #[serde(default)]
    pub chain_strength: Option<f64>,
}

fn default_num_reads() -> usize {
    1000
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            num_reads: default_num_reads(),
            chain_strength: None,
        }
    }
}

/// Which sampler serves the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerBackend {
    /// Local simulated annealing.
    #[default]
    Software,
    /// Hosted quantum annealer.
    Hardware,
}

/// Sampler section of a sweep plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    #[serde(default)]
    pub backend: SamplerBackend,
    #[serde(default = "default_num_reads")]
    pub num_reads: usize,
    /// Used for horizon sweeps; chain-strength sweeps override it per value.
    #[serde(default)]
    pub chain_strength: Option<f64>,
    #[serde(default)]
    pub anneal: AnnealConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            backend: SamplerBackend::default(),
            num_reads: default_num_reads(),
            chain_strength: None,
            anneal: AnnealConfig::default(),
        }
    }
}

impl SamplerConfig {
    /// Sampling options with the configured read count and chain strength.
    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            num_reads: self.num_reads,
            chain_strength: self.chain_strength,
        }
    }
}

/// [`ModelBuilder`] backed by the reference job-shop formulation.
#[derive(Debug, Clone, Default)]
pub struct BqmModelBuilder {
    pub options: ModelOptions,
}

impl BqmModelBuilder {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl ModelBuilder for BqmModelBuilder {
    type Model = BinaryQuadraticModel;

    fn build(&self, jobs: &Jobs, horizon: u32) -> Result<Self::Model, JssError> {
        JobShopModelBuilder.build(jobs, horizon, &self.options)
    }
}

/// [`Sampler`] dispatching on the configured [`SamplerBackend`].
#[derive(Debug, Clone)]
pub struct BackendSampler {
    backend: SamplerBackend,
    annealer: AnnealingSampler,
}

impl BackendSampler {
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self {
            backend: config.backend,
            annealer: AnnealingSampler::new(config.anneal.clone()),
        }
    }
}

impl Sampler for BackendSampler {
    type Model = BinaryQuadraticModel;

    fn sample(
        &mut self,
        model: &Self::Model,
        options: &SamplingOptions,
        seed: u64,
    ) -> Result<SampleSet, JssError> {
        match self.backend {
            SamplerBackend::Software => {
                if let Some(strength) = options.chain_strength {
                    debug!(strength, "chain strength has no effect on the software sampler");
                }
                self.annealer.sample(model, options.num_reads, seed)
            }
            SamplerBackend::Hardware => Err(JssError::BackendUnavailable(
                ErrorInfo::new("hardware-unavailable", "no hosted solver client is configured")
                    .with_context("backend", "hardware")
                    .with_hint("use the software backend or plug in a Sampler implementation"),
            )),
        }
    }
}
