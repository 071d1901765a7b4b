//! Job-shop instance description.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, JssError};
use crate::label::AUX_PREFIX;

/// One processing step of a job: the machine it runs on and how long it takes.
///
/// Serialized as a `[machine, duration]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Operation {
    /// Machine identifier.
    pub machine: u32,
    /// Processing time, strictly positive for a valid instance.
    pub duration: u32,
}

impl Operation {
    /// Creates a new operation.
    pub const fn new(machine: u32, duration: u32) -> Self {
        Self { machine, duration }
    }
}

impl From<(u32, u32)> for Operation {
    fn from((machine, duration): (u32, u32)) -> Self {
        Self { machine, duration }
    }
}

impl From<Operation> for (u32, u32) {
    fn from(op: Operation) -> Self {
        (op.machine, op.duration)
    }
}

/// Validated set of jobs keyed by identifier.
///
/// Each job is an ordered operation list; the order is the processing order
/// the schedule must respect. Construction rejects empty instances, empty
/// jobs, zero durations and identifiers that would collide with auxiliary
/// variable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<Operation>>",
    into = "BTreeMap<String, Vec<Operation>>"
)]
pub struct Jobs {
    jobs: BTreeMap<String, Vec<Operation>>,
}

impl Jobs {
    /// Builds and validates a job set from `(identifier, operations)` pairs.
    pub fn new<I, K, O>(jobs: I) -> Result<Self, JssError>
    where
        I: IntoIterator<Item = (K, Vec<O>)>,
        K: Into<String>,
        O: Into<Operation>,
    {
        let map = jobs
            .into_iter()
            .map(|(id, ops)| (id.into(), ops.into_iter().map(Into::into).collect()))
            .collect::<BTreeMap<String, Vec<Operation>>>();
        Self::try_from(map)
    }

    /// Returns the operations of `job`, if it exists.
    pub fn get(&self, job: &str) -> Option<&[Operation]> {
        self.jobs.get(job).map(Vec::as_slice)
    }

    /// Iterates jobs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Operation])> + '_ {
        self.jobs
            .iter()
            .map(|(id, ops)| (id.as_str(), ops.as_slice()))
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always `false` for a validated instance.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Total number of operations across all jobs.
    pub fn operation_count(&self) -> usize {
        self.jobs.values().map(Vec::len).sum()
    }

    /// Sum of the operation durations of `job`, widened so it cannot overflow.
    pub fn job_duration(&self, job: &str) -> Option<u64> {
        self.get(job)
            .map(|ops| ops.iter().map(|op| u64::from(op.duration)).sum())
    }
}

impl TryFrom<BTreeMap<String, Vec<Operation>>> for Jobs {
    type Error = JssError;

    fn try_from(jobs: BTreeMap<String, Vec<Operation>>) -> Result<Self, Self::Error> {
        if jobs.is_empty() {
            return Err(JssError::Config(ErrorInfo::new(
                "jobs-invalid",
                "instance contains no jobs",
            )));
        }
        for (id, ops) in &jobs {
            if id.is_empty() || id.starts_with(AUX_PREFIX) {
                return Err(JssError::Config(
                    ErrorInfo::new("jobs-invalid", "job identifier is reserved or empty")
                        .with_context("job", id.clone())
                        .with_hint(format!("identifiers may not start with `{AUX_PREFIX}`")),
                ));
            }
            if ops.is_empty() {
                return Err(JssError::Config(
                    ErrorInfo::new("jobs-invalid", "job has no operations")
                        .with_context("job", id.clone()),
                ));
            }
            if let Some(task) = ops.iter().position(|op| op.duration == 0) {
                return Err(JssError::Config(
                    ErrorInfo::new("jobs-invalid", "operation duration must be positive")
                        .with_context("job", id.clone())
                        .with_context("task", task.to_string()),
                ));
            }
        }
        Ok(Self { jobs })
    }
}

impl From<Jobs> for BTreeMap<String, Vec<Operation>> {
    fn from(jobs: Jobs) -> Self {
        jobs.jobs
    }
}
