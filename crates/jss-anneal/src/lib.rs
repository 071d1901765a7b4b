#![deny(missing_docs)]

//! Reference software backend for the job-shop sampler harness.
//!
//! [`JobShopModelBuilder`] turns a job-shop instance into a
//! [`BinaryQuadraticModel`] whose variables follow the task-start label
//! convention, and [`AnnealingSampler`] draws weighted sample sets from it
//! with simulated annealing.

/// Binary quadratic model container.
pub mod bqm;
/// Annealing schedule configuration.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Simulated annealing kernel.
pub mod kernel;
/// Job-shop model construction.
pub mod model;

pub use bqm::BinaryQuadraticModel;
pub use config::{AnnealConfig, BetaSchedule};
pub use kernel::AnnealingSampler;
pub use model::{JobShopModelBuilder, ModelOptions};
