//! Warm-up and time-budget task runner.
//!
//! Each registered task is a closure producing one future per invocation.
//! Tasks are measured independently of each other: warm-up invocations
//! are never recorded, and measurement stops scheduling new invocations
//! once the time budget has elapsed rather than interrupting one that is
//! in flight.

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::debug;

/// Boxed future produced by one task invocation
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<()>>>>;

/// A registered benchmark task
struct Task {
    name: String,
    body: Box<dyn Fn() -> TaskFuture>,
}

/// Timing statistics for one task
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Task name as registered
    pub name: String,
    /// Number of measured invocations
    pub iterations: u64,
    /// Sum of measured invocation durations
    pub total: Duration,
    /// Mean invocation duration
    pub mean: Duration,
}

/// Benchmark runner with a warm-up phase and a per-task time budget
pub struct Bench {
    warm_up_time: Duration,
    measurement_time: Duration,
    tasks: Vec<Task>,
}

impl Bench {
    /// Create a runner with the given warm-up and measurement budgets
    pub fn new(warm_up_time: Duration, measurement_time: Duration) -> Self {
        Self {
            warm_up_time,
            measurement_time,
            tasks: Vec::new(),
        }
    }

    /// Register a named task
    pub fn add<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn() -> TaskFuture + 'static,
    {
        self.tasks.push(Task {
            name: name.to_string(),
            body: Box::new(body),
        });
        self
    }

    /// Run every task unmeasured until the warm-up budget elapses
    pub async fn warm_up(&self) -> Result<()> {
        for task in &self.tasks {
            let started = Instant::now();
            loop {
                (task.body)().await?;
                if started.elapsed() >= self.warm_up_time {
                    break;
                }
            }
            debug!(task = %task.name, "warm-up complete");
        }
        Ok(())
    }

    /// Measure every task and return its timing statistics.
    /// A task-body error aborts the whole run.
    pub async fn run(&self) -> Result<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            results.push(run_task(task, self.measurement_time).await?);
        }
        Ok(results)
    }
}

/// Invoke one task repeatedly until the budget elapses.
/// Always performs at least one invocation, so the mean is defined.
async fn run_task(task: &Task, budget: Duration) -> Result<TaskResult> {
    let mut iterations = 0u64;
    let mut total = Duration::ZERO;
    let started = Instant::now();

    loop {
        let invocation_started = Instant::now();
        (task.body)().await?;
        total += invocation_started.elapsed();
        iterations += 1;

        if started.elapsed() >= budget {
            break;
        }
    }

    let mean = Duration::from_secs_f64(total.as_secs_f64() / iterations as f64);
    debug!(task = %task.name, iterations, ?mean, "task measured");

    Ok(TaskResult {
        name: task.name.clone(),
        iterations,
        total,
        mean,
    })
}
