//! Fixed-interval job runner.
//!
//! Runs a [`PeriodicJob`] right away (optionally) and then once per interval
//! until a shutdown future resolves. A failed run is logged and counted; it
//! never stops the loop.

use std::future::Future;

use async_trait::async_trait;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RunnerConfig;
use crate::core::AppResult;

/// Work executed on every tick.
#[async_trait]
pub trait PeriodicJob: Send + Sync {
    /// Execute one run.
    async fn run(&self) -> AppResult<()>;
}

/// Adapter turning an async closure into a [`PeriodicJob`].
#[derive(Debug, Clone)]
pub struct FnJob<F>(
    /// Closure invoked on every run.
    pub F,
);

#[async_trait]
impl<F, Fut> PeriodicJob for FnJob<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = AppResult<()>> + Send,
{
    async fn run(&self) -> AppResult<()> {
        (self.0)().await
    }
}

/// Job that only logs that it ran.
#[derive(Debug, Clone)]
pub struct HeartbeatJob {
    name: String,
}

impl HeartbeatJob {
    /// Heartbeat identified by `name` in logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl PeriodicJob for HeartbeatJob {
    async fn run(&self) -> AppResult<()> {
        tracing::info!(job = %self.name, "performing scheduled task");
        Ok(())
    }
}

/// Outcome counters for a finished runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Runs started.
    pub runs: u64,
    /// Runs that returned an error.
    pub failures: u64,
}

/// Drives a job on a fixed interval.
#[derive(Debug)]
pub struct PeriodicRunner<J> {
    config: RunnerConfig,
    job: J,
}

impl<J: PeriodicJob> PeriodicRunner<J> {
    /// Runner for `job` using `config`.
    pub const fn new(config: RunnerConfig, job: J) -> Self {
        Self { config, job }
    }

    /// Runner configuration.
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run until `shutdown` resolves. A run already in progress when shutdown
    /// fires is allowed to finish.
    ///
    /// With `run_immediately` the first run happens before `shutdown` is
    /// polled, so it takes place even if shutdown has already resolved.
    pub async fn run_until<F>(&self, shutdown: F) -> RunReport
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        // interval_at panics on a zero period.
        let period = self
            .config
            .interval()
            .clamp(time::Duration::from_millis(1), Self::max_period());
        let start = Instant::now();
        let mut report = RunReport::default();
        if self.config.run_immediately {
            self.run_once(&mut report).await;
        }

        // Deadlines are measured from `start` so a slow first run does not
        // push the schedule back.
        match start.checked_add(period) {
            Some(first) => {
                let mut ticker = time::interval_at(first, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        biased;
                        () = &mut shutdown => break,
                        _ = ticker.tick() => self.run_once(&mut report).await,
                    }
                }
            }
            None => {
                tracing::warn!(
                    interval_secs = self.config.interval_secs,
                    "interval beyond the clock range, no further runs scheduled"
                );
                shutdown.await;
            }
        }

        tracing::debug!(runs = report.runs, failures = report.failures, "periodic runner stopped");
        report
    }

    const fn max_period() -> time::Duration {
        time::Duration::from_secs(crate::config::MAX_INTERVAL_SECS)
    }

    /// Run until the process receives Ctrl+C.
    pub async fn run_until_ctrl_c(&self) -> RunReport {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            "periodic runner started, press Ctrl+C to stop"
        );
        let report = self
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            })
            .await;
        tracing::info!("shutting down gracefully");
        report
    }

    async fn run_once(&self, report: &mut RunReport) {
        report.runs += 1;
        if let Err(e) = self.job.run().await {
            report.failures += 1;
            tracing::error!(run = report.runs, "error during task execution: {:#}", e);
        }
    }
}
