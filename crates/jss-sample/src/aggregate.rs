//! Occurrence-weighted aggregation of a sample set.

use std::collections::BTreeMap;

use jss_core::{JssError, Jobs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, ResultCategory};
use crate::decode::{decode_with, DecodeOptions, Schedule};
use crate::sampleset::SampleSet;

/// Total occurrence weight per result category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(BTreeMap<ResultCategory, u64>);

impl Histogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `category`.
    pub fn add(&mut self, category: ResultCategory, weight: u64) {
        *self.0.entry(category).or_insert(0) += weight;
    }

    /// Weight recorded under `category` (0 if absent).
    pub fn get(&self, category: ResultCategory) -> u64 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Weight of infeasible samples.
    pub fn infeasible(&self) -> u64 {
        self.get(ResultCategory::Infeasible)
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Smallest makespan observed, if any sample was feasible.
    pub fn best_makespan(&self) -> Option<u32> {
        self.0.keys().find_map(ResultCategory::makespan)
    }

    /// Iterates categories in order: makespans ascending, then infeasible.
    pub fn iter(&self) -> impl Iterator<Item = (ResultCategory, u64)> + '_ {
        self.0.iter().map(|(category, weight)| (*category, *weight))
    }
}

/// Decoded best assignment kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSample {
    pub schedule: Schedule,
    pub category: ResultCategory,
}

/// Result of aggregating a sample set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub histogram: Histogram,
    /// Reporting only; never counted in the histogram.
    pub best: Option<BestSample>,
}

/// Aggregates `sampleset` against `jobs` with the default decode options.
pub fn aggregate(sampleset: &SampleSet, jobs: &Jobs) -> Result<Aggregate, JssError> {
    aggregate_with(sampleset, jobs, &DecodeOptions::default())
}

/// Decodes and classifies every record, adding its occurrence count to the
/// histogram. The histogram total always equals the sample set total.
pub fn aggregate_with(
    sampleset: &SampleSet,
    jobs: &Jobs,
    options: &DecodeOptions,
) -> Result<Aggregate, JssError> {
    let mut histogram = Histogram::new();
    let mut overwrites = 0usize;
    for record in sampleset.records() {
        let schedule = decode_with(&record.assignment, jobs, options)?;
        overwrites += schedule.overwrites();
        histogram.add(classify(&schedule, jobs), record.num_occurrences);
    }
    if overwrites > 0 {
        debug!(overwrites, "duplicate task starts resolved last-wins");
    }

    let best = match sampleset.best() {
        Some(assignment) => {
            let schedule = decode_with(assignment, jobs, options)?;
            let category = classify(&schedule, jobs);
            debug!(%category, "best sample decoded");
            Some(BestSample { schedule, category })
        }
        None => None,
    };

    Ok(Aggregate { histogram, best })
}
