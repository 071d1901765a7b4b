#![deny(missing_docs)]
#![doc = "Core data types for the job-shop sampler harness: instances, variable labels, errors and deterministic seeding."]

pub mod errors;
pub mod jobs;
pub mod label;
pub mod rng;

pub use errors::{ErrorInfo, JssError};
pub use jobs::{Jobs, Operation};
pub use label::{is_auxiliary, TaskStart, AUX_PREFIX};
pub use rng::{derive_substream_seed, trial_seed, RngHandle};
