//! Ramping load generator.
//!
//! A [`LoadRunner`] follows a [`LoadProfile`]: on every adjustment tick it
//! spawns or stops virtual users so the live count matches the profile's
//! target, and each virtual user calls its [`Probe`] in a loop.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::profile::LoadProfile;
use crate::config::{LoadConfig, MAX_ADJUST_EVERY_MS};
use crate::core::{Endpoint, TrackerError};

/// Per-request timeout used by [`HttpProbe`].
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Target answered with 200.
    Success,
    /// Target answered with another status.
    UnexpectedStatus(u16),
    /// Request never got a response.
    Failed(String),
}

impl ProbeOutcome {
    /// True for [`ProbeOutcome::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One request issued by a virtual user.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Issue the request and classify the result.
    async fn probe(&self) -> ProbeOutcome;
}

/// Probe issuing `GET http://{endpoint}/{resource}/{id}` with a random id.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    base_url: String,
    id_min: u64,
    id_max: u64,
}

impl HttpProbe {
    /// Probe against `endpoint`, requesting ids in `id_min..=id_max`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] if the id range is empty and
    /// [`TrackerError::Backend`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: &Endpoint,
        resource: &str,
        id_min: u64,
        id_max: u64,
    ) -> Result<Self, TrackerError> {
        if id_min > id_max {
            return Err(TrackerError::Config(format!(
                "empty id range {id_min}..={id_max}"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::Backend(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: format!("http://{}/{}", endpoint, resource.trim_matches('/')),
            id_min,
            id_max,
        })
    }

    /// Probe built from load configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured endpoint is invalid,
    /// otherwise as [`HttpProbe::new`].
    pub fn from_config(cfg: &LoadConfig) -> Result<Self, TrackerError> {
        let endpoint: Endpoint = cfg.endpoint.parse()?;
        Self::new(&endpoint, &cfg.resource, cfg.id_min, cfg.id_max)
    }

    /// URL for the next request.
    pub fn next_url(&self) -> String {
        let id = rand::rng().random_range(self.id_min..=self.id_max);
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self) -> ProbeOutcome {
        let url = self.next_url();
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => ProbeOutcome::Success,
            Ok(resp) => ProbeOutcome::UnexpectedStatus(resp.status().as_u16()),
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }
}

/// Counters for a load run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Probes completed.
    pub requests: u64,
    /// Probes that returned [`ProbeOutcome::Success`].
    pub successes: u64,
    /// Probes that did not.
    pub failures: u64,
    /// Most virtual users alive at once.
    pub peak_vus: usize,
}

#[derive(Debug, Default)]
struct LoadCounters {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    peak_vus: AtomicUsize,
}

impl LoadCounters {
    fn record(&self, outcome: &ProbeOutcome) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if outcome.is_success() {
            self.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> LoadReport {
        LoadReport {
            requests: self.requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            peak_vus: self.peak_vus.load(Ordering::Relaxed),
        }
    }
}

/// Drives virtual users through a ramping profile.
#[derive(Debug)]
pub struct LoadRunner<P> {
    profile: LoadProfile,
    probe: Arc<P>,
    adjust_every: Duration,
    counters: Arc<LoadCounters>,
    vus: Mutex<Vec<JoinHandle<()>>>,
}

impl LoadRunner<HttpProbe> {
    /// HTTP load runner built from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] if the configuration is invalid.
    pub fn from_config(cfg: &LoadConfig) -> Result<Self, TrackerError> {
        cfg.validate().map_err(TrackerError::Config)?;
        let probe = HttpProbe::from_config(cfg)?;
        Ok(Self::new(cfg.profile(), probe, cfg.adjust_every()))
    }
}

impl<P: Probe> LoadRunner<P> {
    /// Runner for `profile`, reconciling virtual users every `adjust_every`,
    /// clamped to between one millisecond and [`MAX_ADJUST_EVERY_MS`].
    pub fn new(profile: LoadProfile, probe: P, adjust_every: Duration) -> Self {
        Self {
            profile,
            probe: Arc::new(probe),
            adjust_every: adjust_every.clamp(
                Duration::from_millis(1),
                Duration::from_millis(MAX_ADJUST_EVERY_MS),
            ),
            counters: Arc::new(LoadCounters::default()),
            vus: Mutex::new(Vec::new()),
        }
    }

    /// Profile being followed.
    pub const fn profile(&self) -> &LoadProfile {
        &self.profile
    }

    /// Virtual users currently alive.
    pub fn live_vus(&self) -> usize {
        self.vus.lock().len()
    }

    /// Counters so far; safe to call while [`LoadRunner::run`] is in progress.
    pub fn snapshot(&self) -> LoadReport {
        self.counters.snapshot()
    }

    /// Run the whole profile, then stop every virtual user and report.
    pub async fn run(&self) -> LoadReport {
        let total = self.profile.total_duration();
        tracing::info!(
            total_secs = total.as_secs(),
            peak = self.profile.peak(),
            "load run started"
        );

        let start = Instant::now();
        let mut ticker = time::interval(self.adjust_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let elapsed = start.elapsed();
            if elapsed >= total {
                break;
            }
            let target = usize::try_from(self.profile.target_at(elapsed)).unwrap_or(usize::MAX);
            self.scale_to(target);
        }

        self.stop_all().await;
        let report = self.snapshot();
        tracing::info!(
            requests = report.requests,
            successes = report.successes,
            failures = report.failures,
            peak_vus = report.peak_vus,
            "load run finished"
        );
        report
    }

    fn scale_to(&self, target: usize) {
        let mut vus = self.vus.lock();
        let before = vus.len();
        while vus.len() < target {
            vus.push(self.spawn_vu());
        }
        while vus.len() > target {
            if let Some(handle) = vus.pop() {
                handle.abort();
            }
        }
        if vus.len() != before {
            tracing::debug!(from = before, to = vus.len(), "virtual users adjusted");
        }
        self.counters.peak_vus.fetch_max(vus.len(), Ordering::Relaxed);
    }

    fn spawn_vu(&self) -> JoinHandle<()> {
        let probe = Arc::clone(&self.probe);
        let counters = Arc::clone(&self.counters);
        tokio::spawn(async move {
            loop {
                let outcome = probe.probe().await;
                if let ProbeOutcome::Failed(reason) = &outcome {
                    tracing::trace!(%reason, "probe failed");
                }
                counters.record(&outcome);
                tokio::task::yield_now().await;
            }
        })
    }

    async fn stop_all(&self) {
        let handles: Vec<_> = self.vus.lock().drain(..).collect();
        for handle in &handles {
            handle.abort();
        }
        for handle in handles {
            // Cancelled tasks report a JoinError; nothing to do with it.
            let _ = handle.await;
        }
    }
}
