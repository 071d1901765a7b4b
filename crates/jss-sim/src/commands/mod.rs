pub mod aggregate;
pub mod summarize;
pub mod sweep;
