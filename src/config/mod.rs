//! Configuration models for the session, the periodic runner, and the load generator.

pub mod tracker;

pub use tracker::{
    EndpointConfig, LoadConfig, RunnerConfig, StageConfig, TrackerConfig, MAX_ADJUST_EVERY_MS,
    MAX_INTERVAL_SECS, MAX_PROFILE_SECS,
};
