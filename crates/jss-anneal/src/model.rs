use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use jss_core::errors::{ErrorInfo, JssError};
use jss_core::{Jobs, TaskStart};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bqm::BinaryQuadraticModel;

/// Penalty and objective weights for the job-shop formulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Energy gap between any constraint-violating state and the feasible ones.
    #[serde(default = "default_min_classical_gap")]
    pub min_classical_gap: f64,
    /// Upper bound of the bias rewarding early completion of each job.
    #[serde(default = "default_objective_weight")]
    pub objective_weight: f64,
}

fn default_min_classical_gap() -> f64 {
    2.0
}

fn default_objective_weight() -> f64 {
    0.1
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            min_classical_gap: default_min_classical_gap(),
            objective_weight: default_objective_weight(),
        }
    }
}

/// Builds a binary quadratic model with one variable per `(job, task, start)`.
///
/// Starts are restricted to each task's window: no earlier than the sum of
/// the preceding durations, no later than what still lets the remaining
/// tasks of the job finish inside the horizon. Penalised states:
///
/// * a task without exactly one start,
/// * a task starting before its predecessor in the job has finished,
/// * two tasks of different jobs overlapping on the same machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobShopModelBuilder;

struct TaskVars {
    job: String,
    task: usize,
    machine: u32,
    duration: u32,
    window: RangeInclusive<u32>,
    vars: Vec<(u32, usize)>,
}

impl JobShopModelBuilder {
    /// Builds the model for `jobs` within `horizon` time steps.
    pub fn build(
        &self,
        jobs: &Jobs,
        horizon: u32,
        options: &ModelOptions,
    ) -> Result<BinaryQuadraticModel, JssError> {
        let gap = options.min_classical_gap;
        if !(gap.is_finite() && gap > 0.0) {
            return Err(JssError::MalformedModel(
                ErrorInfo::new("penalty-invalid", "min_classical_gap must be positive")
                    .with_context("min_classical_gap", gap.to_string()),
            ));
        }
        let mut bqm = BinaryQuadraticModel::new();
        let mut tasks = Vec::with_capacity(jobs.operation_count());
        for (job, ops) in jobs.iter() {
            let total = jobs.job_duration(job).unwrap_or_default();
            if total > u64::from(horizon) {
                return Err(JssError::MalformedModel(
                    ErrorInfo::new("horizon-too-short", "job cannot finish within the horizon")
                        .with_context("job", job.to_string())
                        .with_context("duration", total.to_string())
                        .with_context("horizon", horizon.to_string())
                        .with_hint("increase the horizon to at least the longest job"),
                ));
            }
            // Both stay within the horizon once the total fits.
            let mut earliest = 0u32;
            let mut remaining = total as u32;
            for (task, op) in ops.iter().enumerate() {
                let window = earliest..=horizon - remaining;
                let vars = window
                    .clone()
                    .map(|start| (start, bqm.add_variable(TaskStart::new(job, task, start).label())))
                    .collect();
                tasks.push(TaskVars {
                    job: job.to_string(),
                    task,
                    machine: op.machine,
                    duration: op.duration,
                    window,
                    vars,
                });
                earliest += op.duration;
                remaining -= op.duration;
            }
        }

        for task in &tasks {
            add_one_start(&mut bqm, task, gap)?;
        }
        for pair in tasks.windows(2) {
            if let [first, second] = pair {
                if first.job == second.job {
                    add_precedence(&mut bqm, first, second, gap)?;
                }
            }
        }
        let mut by_machine: BTreeMap<u32, Vec<&TaskVars>> = BTreeMap::new();
        for task in &tasks {
            by_machine.entry(task.machine).or_default().push(task);
        }
        for shared in by_machine.values() {
            for (idx, a) in shared.iter().enumerate() {
                for b in &shared[idx + 1..] {
                    if a.job != b.job {
                        add_machine_exclusion(&mut bqm, a, b, gap)?;
                    }
                }
            }
        }
        add_objective(&mut bqm, jobs, &tasks, horizon, options.objective_weight)?;

        debug!(
            horizon,
            variables = bqm.num_variables(),
            interactions = bqm.num_interactions(),
            "job-shop model built"
        );
        Ok(bqm)
    }
}

/// `gap * (sum x - 1)^2`, expanded over binaries.
fn add_one_start(bqm: &mut BinaryQuadraticModel, task: &TaskVars, gap: f64) -> Result<(), JssError> {
    bqm.add_offset(gap);
    for (idx, &(_, u)) in task.vars.iter().enumerate() {
        bqm.add_linear(u, -gap)?;
        for &(_, v) in &task.vars[idx + 1..] {
            bqm.add_quadratic(u, v, 2.0 * gap)?;
        }
    }
    Ok(())
}

fn add_precedence(
    bqm: &mut BinaryQuadraticModel,
    first: &TaskVars,
    second: &TaskVars,
    gap: f64,
) -> Result<(), JssError> {
    for &(ta, u) in &first.vars {
        for &(tb, v) in &second.vars {
            if ta + first.duration > tb {
                bqm.add_quadratic(u, v, gap)?;
            }
        }
    }
    Ok(())
}

fn add_machine_exclusion(
    bqm: &mut BinaryQuadraticModel,
    a: &TaskVars,
    b: &TaskVars,
    gap: f64,
) -> Result<(), JssError> {
    if a.window.end() + a.duration <= *b.window.start()
        || b.window.end() + b.duration <= *a.window.start()
    {
        return Ok(());
    }
    for &(ta, u) in &a.vars {
        for &(tb, v) in &b.vars {
            if ta < tb + b.duration && tb < ta + a.duration {
                bqm.add_quadratic(u, v, gap)?;
            }
        }
    }
    Ok(())
}

fn add_objective(
    bqm: &mut BinaryQuadraticModel,
    jobs: &Jobs,
    tasks: &[TaskVars],
    horizon: u32,
    weight: f64,
) -> Result<(), JssError> {
    if weight == 0.0 || horizon == 0 {
        return Ok(());
    }
    for task in tasks {
        let is_last = jobs
            .get(&task.job)
            .map(|ops| ops.len() == task.task + 1)
            .unwrap_or(false);
        if !is_last {
            continue;
        }
        for &(start, u) in &task.vars {
            let completion = f64::from(start + task.duration);
            bqm.add_linear(u, weight * completion / f64::from(horizon))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Jobs {
        Jobs::new([
            ("1", vec![(0u32, 2u32), (1, 1), (0, 1)]),
            ("2", vec![(1, 1), (0, 1), (2, 2)]),
            ("3", vec![(2, 1), (2, 1), (1, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn windows_follow_job_durations() {
        let bqm = JobShopModelBuilder
            .build(&jobs(), 5, &ModelOptions::default())
            .unwrap();
        assert!(bqm.index_of("1_0,0").is_some());
        assert!(bqm.index_of("1_0,1").is_some());
        assert!(bqm.index_of("1_0,2").is_none());
        assert!(bqm.index_of("1_2,3").is_some());
        assert!(bqm.index_of("1_2,2").is_none());
    }

    #[test]
    fn short_horizon_is_malformed() {
        let err = JobShopModelBuilder
            .build(&jobs(), 3, &ModelOptions::default())
            .unwrap_err();
        assert_eq!(err.family(), "malformed-model");
        assert_eq!(err.info().code, "horizon-too-short");
    }

    #[test]
    fn huge_durations_are_malformed_not_overflowing() {
        let jobs = Jobs::new([("1", vec![(0u32, u32::MAX), (1, 1)])]).unwrap();
        let err = JobShopModelBuilder
            .build(&jobs, u32::MAX, &ModelOptions::default())
            .unwrap_err();
        assert_eq!(err.info().code, "horizon-too-short");
        assert_eq!(
            err.info().context.get("duration").map(String::as_str),
            Some("4294967296")
        );
    }

    #[test]
    fn valid_schedule_beats_any_violation() {
        let jobs = Jobs::new([("1", vec![(0u32, 1u32), (0, 1)])]).unwrap();
        let options = ModelOptions::default();
        let bqm = JobShopModelBuilder.build(&jobs, 3, &options).unwrap();
        let state_of = |on: &[&str]| -> Vec<u8> {
            bqm.labels()
                .iter()
                .map(|label| u8::from(on.contains(&label.as_str())))
                .collect()
        };
        let valid = bqm.energy(&state_of(&["1_0,0", "1_1,1"])).unwrap();
        let overlap = bqm.energy(&state_of(&["1_0,1", "1_1,1"])).unwrap();
        let missing = bqm.energy(&state_of(&["1_0,0"])).unwrap();
        assert!(valid < options.objective_weight + 1e-9);
        assert!(overlap - valid >= options.min_classical_gap - options.objective_weight);
        assert!(missing - valid >= options.min_classical_gap - options.objective_weight);
    }
}
