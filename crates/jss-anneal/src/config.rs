use serde::{Deserialize, Serialize};

/// Simulated annealing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealConfig {
    /// Full passes over all variables per read.
    #[serde(default = "default_num_sweeps")]
    pub num_sweeps: usize,
    /// `[hot, cold]` inverse temperatures. Derived from the model when absent.
    #[serde(default)]
    pub beta_range: Option<[f64; 2]>,
    /// Interpolation between the hot and cold ends of the range.
    #[serde(default)]
    pub schedule: BetaSchedule,
}

fn default_num_sweeps() -> usize {
    256
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            num_sweeps: default_num_sweeps(),
            beta_range: None,
            schedule: BetaSchedule::default(),
        }
    }
}

/// Supported beta schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetaSchedule {
    /// Constant ratio between consecutive sweeps.
    #[default]
    Geometric,
    /// Constant increment between consecutive sweeps.
    Linear,
}

impl BetaSchedule {
    /// Builds `sweeps` betas from `hot` to `cold` inclusive.
    pub fn betas(&self, hot: f64, cold: f64, sweeps: usize) -> Vec<f64> {
        match sweeps {
            0 => Vec::new(),
            1 => vec![cold],
            _ => {
                let last = (sweeps - 1) as f64;
                (0..sweeps)
                    .map(|step| {
                        let frac = step as f64 / last;
                        match self {
                            BetaSchedule::Geometric => hot * (cold / hot).powf(frac),
                            BetaSchedule::Linear => hot + (cold - hot) * frac,
                        }
                    })
                    .collect()
            }
        }
    }
}
