//! Tracker configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Endpoint, TrackerError, DEFAULT_AUDIT_CAPACITY};
use crate::runtime::profile::{LoadProfile, Stage};

/// Endpoint given in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Host name or address.
    pub host: String,
    /// Port number.
    pub port: u16,
}

impl EndpointConfig {
    /// Build a validated record from this entry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] if the host is not usable.
    pub fn to_endpoint(&self) -> Result<Endpoint, TrackerError> {
        Endpoint::new(&self.host, self.port)
    }
}

/// Longest accepted runner interval (one week).
pub const MAX_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Longest accepted load profile, summed over all stages (one day).
pub const MAX_PROFILE_SECS: u64 = 24 * 60 * 60;

/// Longest accepted load adjustment tick (one minute).
pub const MAX_ADJUST_EVERY_MS: u64 = 60_000;

/// Periodic runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Seconds between runs.
    pub interval_secs: u64,
    /// Run once at startup before waiting for the first interval.
    pub run_immediately: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 90,
            run_immediately: true,
        }
    }
}

impl RunnerConfig {
    /// Interval as a [`Duration`].
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate runner configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("interval_secs must be greater than 0".into());
        }
        if self.interval_secs > MAX_INTERVAL_SECS {
            return Err(format!(
                "interval_secs must not exceed {MAX_INTERVAL_SECS}, got {}",
                self.interval_secs
            ));
        }
        Ok(())
    }
}

/// One ramping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage length in seconds.
    pub duration_secs: u64,
    /// Virtual users reached at the end of the stage.
    pub target: u32,
}

/// Load generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Target in `host:port` form.
    pub endpoint: String,
    /// Path segment probed, as in `/{resource}/{id}`.
    pub resource: String,
    /// Smallest resource id requested.
    pub id_min: u64,
    /// Largest resource id requested.
    pub id_max: u64,
    /// How often the runner reconciles live virtual users with the profile.
    pub adjust_every_ms: u64,
    /// Virtual users at time zero.
    pub start_vus: u32,
    /// Ramping stages, run in order.
    pub stages: Vec<StageConfig>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        let profile = LoadProfile::average_load();
        Self {
            endpoint: "localhost:8080".into(),
            resource: "movie".into(),
            id_min: 1,
            id_max: 2_000_000,
            adjust_every_ms: 1_000,
            start_vus: profile.start_vus,
            stages: profile
                .stages
                .iter()
                .map(|s| StageConfig {
                    duration_secs: s.duration.as_secs(),
                    target: s.target,
                })
                .collect(),
        }
    }
}

impl LoadConfig {
    /// Validate load configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".into());
        }
        self.endpoint
            .parse::<Endpoint>()
            .map_err(|e| format!("endpoint: {e}"))?;
        if self.resource.trim().is_empty() {
            return Err("resource must not be empty".into());
        }
        if self.id_min > self.id_max {
            return Err(format!(
                "id_min ({}) must not exceed id_max ({})",
                self.id_min, self.id_max
            ));
        }
        if self.adjust_every_ms == 0 {
            return Err("adjust_every_ms must be greater than 0".into());
        }
        if self.adjust_every_ms > MAX_ADJUST_EVERY_MS {
            return Err(format!(
                "adjust_every_ms must not exceed {MAX_ADJUST_EVERY_MS}, got {}",
                self.adjust_every_ms
            ));
        }
        let total_secs = self
            .stages
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.duration_secs))
            .filter(|total| *total <= MAX_PROFILE_SECS)
            .ok_or_else(|| format!("stages must not last longer than {MAX_PROFILE_SECS}s in total"))?;
        tracing::debug!(total_secs, stages = self.stages.len(), "load profile validated");
        Ok(())
    }

    /// Ramping profile described by `start_vus` and `stages`.
    pub fn profile(&self) -> LoadProfile {
        LoadProfile {
            start_vus: self.start_vus,
            stages: self
                .stages
                .iter()
                .map(|s| Stage::new(Duration::from_secs(s.duration_secs), s.target))
                .collect(),
        }
    }

    /// Adjustment tick as a [`Duration`].
    pub const fn adjust_every(&self) -> Duration {
        Duration::from_millis(self.adjust_every_ms)
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Audit events retained per session.
    pub audit_capacity: usize,
    /// Producer configured at startup.
    pub producer: Option<EndpointConfig>,
    /// Periodic runner settings.
    pub runner: RunnerConfig,
    /// Load generator settings.
    pub load: LoadConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            producer: None,
            runner: RunnerConfig::default(),
            load: LoadConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), String> {
        if self.audit_capacity == 0 {
            return Err("audit_capacity must be greater than 0".into());
        }
        if let Some(producer) = &self.producer {
            producer
                .to_endpoint()
                .map_err(|e| format!("producer invalid: {e}"))?;
        }
        self.runner
            .validate()
            .map_err(|e| format!("runner invalid: {e}"))?;
        self.load
            .validate()
            .map_err(|e| format!("load invalid: {e}"))?;
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, after loading a
    /// `.env` file if one is present. Unset variables keep their defaults.
    ///
    /// Recognised variables: `TRACKER_AUDIT_CAPACITY`, `TRACKER_PRODUCER`
    /// (`host:port`), `TRACKER_RUNNER_INTERVAL_SECS`, `TRACKER_LOAD_ENDPOINT`.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TrackerConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("TRACKER_AUDIT_CAPACITY") {
            cfg.audit_capacity = raw
                .trim()
                .parse()
                .map_err(|e| format!("TRACKER_AUDIT_CAPACITY: {e}"))?;
        }
        if let Some(raw) = lookup("TRACKER_PRODUCER") {
            let node: Endpoint = raw
                .parse()
                .map_err(|e| format!("TRACKER_PRODUCER: {e}"))?;
            cfg.producer = Some(EndpointConfig {
                host: node.host().to_owned(),
                port: node.port(),
            });
        }
        if let Some(raw) = lookup("TRACKER_RUNNER_INTERVAL_SECS") {
            cfg.runner.interval_secs = raw
                .trim()
                .parse()
                .map_err(|e| format!("TRACKER_RUNNER_INTERVAL_SECS: {e}"))?;
        }
        if let Some(raw) = lookup("TRACKER_LOAD_ENDPOINT") {
            cfg.load.endpoint = raw.trim().to_owned();
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
