use jss_core::errors::{ErrorInfo, JssError};
use jss_core::RngHandle;
use jss_sample::SampleSet;
use tracing::debug;

use crate::bqm::BinaryQuadraticModel;
use crate::config::AnnealConfig;
use crate::determinism;

/// Single-spin-flip simulated annealing over a [`BinaryQuadraticModel`].
#[derive(Debug, Clone, Default)]
pub struct AnnealingSampler {
    config: AnnealConfig,
}

impl AnnealingSampler {
    /// Creates a sampler with the given configuration.
    pub fn new(config: AnnealConfig) -> Self {
        Self { config }
    }

    /// Runs `num_reads` independent anneals and collapses them into a sample set.
    ///
    /// Each read starts from a random state drawn from its own substream of
    /// `seed`, so the result depends only on the model, the configuration and
    /// the seed.
    pub fn sample(
        &self,
        bqm: &BinaryQuadraticModel,
        num_reads: usize,
        seed: u64,
    ) -> Result<SampleSet, JssError> {
        if num_reads == 0 {
            return Err(JssError::Config(ErrorInfo::new(
                "num-reads",
                "num_reads must be positive",
            )));
        }
        let [hot, cold] = match self.config.beta_range {
            Some(range) => validate_range(range)?,
            None => default_beta_range(bqm),
        };
        let betas = self
            .config
            .schedule
            .betas(hot, cold, self.config.num_sweeps);
        let adjacency = bqm.adjacency();
        let linear = bqm.linear_biases();

        let mut reads = Vec::with_capacity(num_reads);
        for read in 0..num_reads {
            let mut rng = RngHandle::from_seed(determinism::read_seed(seed, read));
            let state = anneal_once(linear, &adjacency, &betas, &mut rng);
            let energy = bqm.energy(&state)?;
            reads.push((state, energy));
        }
        let sampleset = SampleSet::from_reads(&bqm.labels(), reads)?;
        debug!(
            num_reads,
            distinct = sampleset.records().len(),
            hot,
            cold,
            "annealing finished"
        );
        Ok(sampleset)
    }
}

fn anneal_once(
    linear: &[f64],
    adjacency: &[Vec<(usize, f64)>],
    betas: &[f64],
    rng: &mut RngHandle,
) -> Vec<u8> {
    let n = linear.len();
    let mut state: Vec<u8> = (0..n).map(|_| rng.bit()).collect();
    // field[i] is the energy change of switching x_i from 0 to 1.
    let mut field: Vec<f64> = linear.to_vec();
    for (u, neighbours) in adjacency.iter().enumerate() {
        for &(v, bias) in neighbours {
            if state[v] == 1 {
                field[u] += bias;
            }
        }
    }
    for &beta in betas {
        for u in 0..n {
            let delta = if state[u] == 1 { -field[u] } else { field[u] };
            if !rng.accept(beta, delta) {
                continue;
            }
            let step = if state[u] == 1 { -1.0 } else { 1.0 };
            state[u] ^= 1;
            for &(v, bias) in &adjacency[u] {
                field[v] += step * bias;
            }
        }
    }
    state
}

fn validate_range([hot, cold]: [f64; 2]) -> Result<[f64; 2], JssError> {
    if hot > 0.0 && cold >= hot && cold.is_finite() {
        Ok([hot, cold])
    } else {
        Err(JssError::Config(
            ErrorInfo::new("beta-range", "beta range must satisfy 0 < hot <= cold")
                .with_context("hot", hot.to_string())
                .with_context("cold", cold.to_string()),
        ))
    }
}

/// Hot end accepts the largest single-flip uphill move with probability 1/2,
/// cold end accepts the smallest one with probability 1/100.
fn default_beta_range(bqm: &BinaryQuadraticModel) -> [f64; 2] {
    let adjacency = bqm.adjacency();
    let mut max_delta = 0.0f64;
    let mut min_delta = f64::INFINITY;
    for (u, bias) in bqm.linear_biases().iter().enumerate() {
        let reach = bias.abs() + adjacency[u].iter().map(|(_, b)| b.abs()).sum::<f64>();
        max_delta = max_delta.max(reach);
        for magnitude in std::iter::once(bias.abs()).chain(adjacency[u].iter().map(|(_, b)| b.abs())) {
            if magnitude > 0.0 {
                min_delta = min_delta.min(magnitude);
            }
        }
    }
    if max_delta <= 0.0 || !min_delta.is_finite() {
        return [0.1, 1.0];
    }
    let hot = std::f64::consts::LN_2 / max_delta;
    let cold = (100f64.ln() / min_delta).max(hot);
    [hot, cold]
}
