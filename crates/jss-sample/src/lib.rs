//! Interpretation of sampler output for job-shop models.
//!
//! A [`SampleSet`] is decoded record by record into per-job [`Schedule`]s,
//! each schedule is classified as a makespan or as infeasible, and the
//! occurrence counts are folded into a [`Histogram`].

pub mod aggregate;
pub mod classify;
pub mod decode;
pub mod sampleset;

pub use aggregate::{aggregate, aggregate_with, Aggregate, BestSample, Histogram};
pub use classify::{classify, ResultCategory};
pub use decode::{decode, decode_with, DecodeOptions, DuplicatePolicy, Schedule};
pub use sampleset::{Assignment, SampleRecord, SampleSet};
