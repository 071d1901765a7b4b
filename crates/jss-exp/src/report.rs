use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use jss_core::errors::{ErrorInfo, JssError};
use serde::{Deserialize, Serialize};

use crate::hash::to_canonical_json_bytes;
use crate::stats::RobustSummary;
use crate::trial::ParameterValue;

/// Trial dropped from a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub trial: usize,
    pub family: String,
    pub code: String,
    pub message: String,
}

impl TrialFailure {
    pub fn new(trial: usize, err: &JssError) -> Self {
        Self {
            trial,
            family: err.family().to_string(),
            code: err.info().code.clone(),
            message: err.info().message.clone(),
        }
    }
}

/// Distribution and summary for one parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: ParameterValue,
    /// Infeasible-read count of every completed trial, in trial order.
    pub error_counts: Vec<u64>,
    pub failures: Vec<TrialFailure>,
    pub summary: Option<RobustSummary>,
}

/// Aggregate sweep report persisted for plotting and reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub plan_hash: String,
    pub parameter: String,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    /// `(value, median, low margin, high margin)` for every summarized point.
    pub fn error_bars(&self) -> Vec<(ParameterValue, f64, f64, f64)> {
        self.points
            .iter()
            .filter_map(|point| {
                point.summary.map(|summary| {
                    (
                        point.value,
                        summary.median,
                        summary.low_margin,
                        summary.high_margin,
                    )
                })
            })
            .collect()
    }

    /// One `value: [counts]` line per point.
    pub fn distribution_dump(&self) -> String {
        let mut out = String::new();
        for point in &self.points {
            let counts: Vec<String> = point.error_counts.iter().map(u64::to_string).collect();
            let _ = writeln!(out, "{}: [{}]", point.value, counts.join(", "));
        }
        out
    }

    /// Writes the report as canonical JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), JssError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| {
            JssError::Serde(
                ErrorInfo::new("report-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Writes `value,median,low_margin,high_margin,trials,failed,trimmed` rows.
    ///
    /// Points without a summary keep their row with empty statistics.
    pub fn write_summary_csv(&self, path: &Path) -> Result<(), JssError> {
        let mut writer = WriterBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|err| wrap_csv("summary-open", path, err))?;
        writer
            .write_record([
                "value",
                "median",
                "low_margin",
                "high_margin",
                "trials",
                "failed",
                "trimmed",
            ])
            .map_err(|err| wrap_csv("summary-header", path, err))?;
        for point in &self.points {
            let stats = match point.summary {
                Some(summary) => [
                    summary.median.to_string(),
                    summary.low_margin.to_string(),
                    summary.high_margin.to_string(),
                    summary.trimmed.to_string(),
                ],
                None => Default::default(),
            };
            let [median, low, high, trimmed] = stats;
            writer
                .write_record([
                    point.value.to_string(),
                    median,
                    low,
                    high,
                    point.error_counts.len().to_string(),
                    point.failures.len().to_string(),
                    trimmed,
                ])
                .map_err(|err| wrap_csv("summary-row", path, err))?;
        }
        writer
            .flush()
            .map_err(|err| wrap_csv("summary-flush", path, err.into()))?;
        Ok(())
    }
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> JssError {
    JssError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
