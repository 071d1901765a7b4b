//! Raw assignment to per-job schedule.

use std::collections::BTreeMap;

use jss_core::errors::{ErrorInfo, JssError};
use jss_core::{is_auxiliary, Jobs, TaskStart};
use serde::{Deserialize, Serialize};

use crate::sampleset::Assignment;

/// What to do when two selected variables claim the same `(job, task)` slot.
///
/// A well-formed model penalises such states, but noisy samplers still
/// return them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The variable seen later in assignment order overwrites the earlier one.
    #[default]
    LastWins,
    /// The slot is marked conflicting and the schedule is infeasible.
    Reject,
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Start time per operation for every job; `None` marks an unresolved slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    starts: BTreeMap<String, Vec<Option<u32>>>,
    overwrites: usize,
    conflicts: Vec<(String, usize)>,
}

impl Schedule {
    /// Unresolved schedule sized by `jobs`.
    pub fn unresolved(jobs: &Jobs) -> Self {
        Self {
            starts: jobs
                .iter()
                .map(|(id, ops)| (id.to_string(), vec![None; ops.len()]))
                .collect(),
            overwrites: 0,
            conflicts: Vec::new(),
        }
    }

    /// Start times of `job`.
    pub fn starts(&self, job: &str) -> Option<&[Option<u32>]> {
        self.starts.get(job).map(Vec::as_slice)
    }

    /// Iterates jobs and their start times in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<u32>])> + '_ {
        self.starts
            .iter()
            .map(|(id, starts)| (id.as_str(), starts.as_slice()))
    }

    /// Number of slots overwritten under [`DuplicatePolicy::LastWins`].
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// Slots claimed more than once under [`DuplicatePolicy::Reject`].
    pub fn conflicts(&self) -> &[(String, usize)] {
        &self.conflicts
    }

    /// `true` when every slot holds exactly one start time.
    pub fn is_feasible(&self) -> bool {
        self.conflicts.is_empty()
            && self
                .starts
                .values()
                .all(|starts| starts.iter().all(Option::is_some))
    }

    /// Fully resolved start times, or `None` if any slot is unresolved or conflicting.
    pub fn resolved(&self) -> Option<BTreeMap<String, Vec<u32>>> {
        if !self.conflicts.is_empty() {
            return None;
        }
        self.starts
            .iter()
            .map(|(id, starts)| {
                starts
                    .iter()
                    .copied()
                    .collect::<Option<Vec<u32>>>()
                    .map(|starts| (id.clone(), starts))
            })
            .collect()
    }

    fn place(&mut self, slot: TaskStart, policy: DuplicatePolicy) -> Result<(), JssError> {
        let starts = self.starts.get_mut(&slot.job).ok_or_else(|| {
            JssError::Decode(
                ErrorInfo::new("unknown-job", "variable names a job outside the instance")
                    .with_context("label", slot.label()),
            )
        })?;
        let len = starts.len();
        let entry = starts.get_mut(slot.task).ok_or_else(|| {
            JssError::Decode(
                ErrorInfo::new("task-out-of-range", "task index exceeds the job length")
                    .with_context("label", slot.label())
                    .with_context("operations", len.to_string()),
            )
        })?;
        match (entry.is_some(), policy) {
            (false, _) => *entry = Some(slot.start),
            (true, DuplicatePolicy::LastWins) => {
                *entry = Some(slot.start);
                self.overwrites += 1;
            }
            (true, DuplicatePolicy::Reject) => {
                let key = (slot.job, slot.task);
                if !self.conflicts.contains(&key) {
                    self.conflicts.push(key);
                }
            }
        }
        Ok(())
    }
}

/// Decodes `assignment` against `jobs` with the default options.
pub fn decode(assignment: &Assignment, jobs: &Jobs) -> Result<Schedule, JssError> {
    decode_with(assignment, jobs, &DecodeOptions::default())
}

/// Decodes `assignment` against `jobs`.
///
/// Only variables set to 1 and not carrying the auxiliary prefix are
/// considered. Labels that do not parse, or that address a slot outside the
/// instance, are decode errors.
pub fn decode_with(
    assignment: &Assignment,
    jobs: &Jobs,
    options: &DecodeOptions,
) -> Result<Schedule, JssError> {
    let mut schedule = Schedule::unresolved(jobs);
    for label in assignment.selected().filter(|label| !is_auxiliary(label)) {
        let slot = TaskStart::parse(label)?;
        schedule.place(slot, options.duplicate_policy)?;
    }
    Ok(schedule)
}
