//! Variable label codec.
//!
//! Sampler backends name their binary variables with plain strings. Task-start
//! variables follow the `"{job}_{task},{start}"` convention; everything the
//! model adds on top (penalty gadgets, ancillas) carries the [`AUX_PREFIX`].
//! Labels are parsed once into a [`TaskStart`] and never re-parsed downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, JssError};

/// Reserved prefix of auxiliary variables that carry no scheduling data.
pub const AUX_PREFIX: &str = "aux";

/// Returns `true` when `label` names an auxiliary variable.
pub fn is_auxiliary(label: &str) -> bool {
    label.starts_with(AUX_PREFIX)
}

/// Typed form of a task-start variable: task `task` of `job` begins at `start`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskStart {
    /// Job identifier.
    pub job: String,
    /// Zero-based position of the operation within the job.
    pub task: usize,
    /// Start time.
    pub start: u32,
}

impl TaskStart {
    /// Creates a new task-start triple.
    pub fn new(job: impl Into<String>, task: usize, start: u32) -> Self {
        Self {
            job: job.into(),
            task,
            start,
        }
    }

    /// Renders the variable label understood by sampler backends.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Parses a task-start label.
    ///
    /// The job identifier is everything before the last `_`, so identifiers
    /// may themselves contain underscores.
    pub fn parse(label: &str) -> Result<Self, JssError> {
        let malformed = |reason: &str| {
            JssError::Decode(
                ErrorInfo::new("label-parse", reason)
                    .with_context("label", label.to_string())
                    .with_hint("expected `{job}_{task},{start}`"),
            )
        };
        let (job, compound) = label
            .rsplit_once('_')
            .ok_or_else(|| malformed("missing job separator"))?;
        if job.is_empty() {
            return Err(malformed("empty job identifier"));
        }
        let (task, start) = compound
            .split_once(',')
            .ok_or_else(|| malformed("missing task/start separator"))?;
        let task = task
            .parse::<usize>()
            .map_err(|_| malformed("task index is not an integer"))?;
        let start = start
            .parse::<u32>()
            .map_err(|_| malformed("start time is not an integer"))?;
        Ok(Self {
            job: job.to_string(),
            task,
            start,
        })
    }
}

impl fmt::Display for TaskStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{},{}", self.job, self.task, self.start)
    }
}

impl FromStr for TaskStart {
    type Err = JssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
