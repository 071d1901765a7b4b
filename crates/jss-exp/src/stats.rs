use serde::{Deserialize, Serialize};

/// Behaviour when a distribution is too short to trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmallSamplePolicy {
    /// Summarize 1 or 2 observations without trimming.
    #[default]
    Untrimmed,
    /// Emit no summary below 3 observations.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsConfig {
    #[serde(default)]
    pub small_sample_policy: SmallSamplePolicy,
}

/// Trimmed median with asymmetric error margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobustSummary {
    pub median: f64,
    /// `median - min`, never negative.
    pub low_margin: f64,
    /// `max - median`, never negative.
    pub high_margin: f64,
    /// Observations before trimming.
    pub observations: usize,
    /// Whether the extremes were discarded.
    pub trimmed: bool,
}

/// Summarizes `distribution` under the default [`SmallSamplePolicy`].
pub fn summarize(distribution: &[u64]) -> Option<RobustSummary> {
    summarize_with(distribution, SmallSamplePolicy::default())
}

/// Sorts the distribution, drops the single smallest and single largest
/// observation, and reports the median of the rest with its distance to the
/// remaining extremes.
///
/// Below 3 observations `policy` decides; an empty distribution never has a
/// summary.
pub fn summarize_with(distribution: &[u64], policy: SmallSamplePolicy) -> Option<RobustSummary> {
    let mut sorted = distribution.to_vec();
    sorted.sort_unstable();
    let (kept, trimmed) = match (sorted.len(), policy) {
        (0, _) => return None,
        (1 | 2, SmallSamplePolicy::Skip) => return None,
        (1 | 2, SmallSamplePolicy::Untrimmed) => (&sorted[..], false),
        (n, _) => (&sorted[1..n - 1], true),
    };
    let median = median_of_sorted(kept);
    let low = kept.first().copied().unwrap_or_default() as f64;
    let high = kept.last().copied().unwrap_or_default() as f64;
    Some(RobustSummary {
        median,
        low_margin: (median - low).abs(),
        high_margin: (high - median).abs(),
        observations: sorted.len(),
        trimmed,
    })
}

fn median_of_sorted(sorted: &[u64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}
