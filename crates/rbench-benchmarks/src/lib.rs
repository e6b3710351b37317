//! resolve-bench benchmarking support
//!
//! This crate hosts the timing harness consumed by the rbench binary
//! (warm-up phase, per-task time budget, mean durations) and the shared
//! criterion configuration for the cargo benches.

pub mod common;
pub mod runner;

pub use common::criterion_config;
pub use runner::{Bench, TaskFuture, TaskResult};
