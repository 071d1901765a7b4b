//! Feasibility classification of decoded schedules.

use std::fmt;

use jss_core::Jobs;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decode::Schedule;

/// Outcome of a single sample.
///
/// Serialized as the makespan number, or as the literal `"error"` for an
/// infeasible sample. Both forms are accepted as JSON map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultCategory {
    /// Feasible schedule with this makespan.
    Makespan(u32),
    /// At least one operation has no (or no unique) start time.
    Infeasible,
}

impl ResultCategory {
    /// Literal used for infeasible samples in reports.
    pub const INFEASIBLE_LABEL: &'static str = "error";

    /// Makespan of a feasible outcome.
    pub fn makespan(&self) -> Option<u32> {
        match self {
            ResultCategory::Makespan(value) => Some(*value),
            ResultCategory::Infeasible => None,
        }
    }
}

impl fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCategory::Makespan(value) => write!(f, "{value}"),
            ResultCategory::Infeasible => f.write_str(Self::INFEASIBLE_LABEL),
        }
    }
}

impl Serialize for ResultCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultCategory::Makespan(value) => serializer.serialize_u32(*value),
            ResultCategory::Infeasible => serializer.serialize_str(Self::INFEASIBLE_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for ResultCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryVisitor)
    }
}

struct CategoryVisitor;

impl<'de> Visitor<'de> for CategoryVisitor {
    type Value = ResultCategory;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative makespan or \"error\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(ResultCategory::Makespan)
            .map_err(|_| E::custom(format!("makespan {value} out of range")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(format!("negative makespan {value}")))
            .and_then(|value| self.visit_u64(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value == ResultCategory::INFEASIBLE_LABEL {
            return Ok(ResultCategory::Infeasible);
        }
        value
            .parse::<u32>()
            .map(ResultCategory::Makespan)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

/// Classifies a decoded schedule.
///
/// Any unresolved or conflicting slot makes the whole sample infeasible;
/// partial feasibility is not scored. Otherwise the makespan is the latest
/// completion of a job's final operation.
pub fn classify(schedule: &Schedule, jobs: &Jobs) -> ResultCategory {
    if !schedule.conflicts().is_empty() {
        return ResultCategory::Infeasible;
    }
    let mut makespan = 0u32;
    for (job, ops) in jobs.iter() {
        let Some(starts) = schedule.starts(job) else {
            return ResultCategory::Infeasible;
        };
        if starts.len() != ops.len() || starts.iter().any(Option::is_none) {
            return ResultCategory::Infeasible;
        }
        if let (Some(Some(last_start)), Some(last_op)) = (starts.last(), ops.last()) {
            makespan = makespan.max(last_start.saturating_add(last_op.duration));
        }
    }
    ResultCategory::Makespan(makespan)
}
