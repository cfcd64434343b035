//! # Endpoint Tracker
//!
//! Session-scoped tracking of consumer and producer endpoints for an
//! administrative console, plus two operational utilities.
//!
//! The heart of the crate is the [`EndpointRegistry`](core::EndpointRegistry):
//! an ordered, append-only list of validated [`Endpoint`](core::Endpoint)
//! records. A [`ConsoleSession`](core::ConsoleSession) owns one registry for
//! consumers, a single producer slot, and an audit log. The session is built
//! explicitly and lent to the input surface (`&mut`) and the display surface
//! (`&`); nothing lives in global state.
//!
//! ## Key Features
//!
//! - **Validated records**: host and port are checked when a record is built,
//!   so the registry itself never fails
//! - **Append-only registry**: insertion order preserved, duplicates kept,
//!   revision counter for change detection
//! - **Audit log**: bounded in-memory record of every tracking action
//! - **Periodic runner**: run a job now and then on a fixed interval until
//!   Ctrl+C
//! - **Load generator**: ramp virtual users through staged targets against an
//!   HTTP endpoint
//!
//! ## Tracking consumers
//!
//! ```rust
//! use endpoint_tracker::core::ConsoleSession;
//!
//! let mut session = ConsoleSession::new(64);
//! session.track_consumer("consumer1.com", "7070").unwrap();
//! session.track_consumer("consumer2.com", "8080").unwrap();
//!
//! let hosts: Vec<_> = session.consumers().iter().map(|e| e.host()).collect();
//! assert_eq!(hosts, ["consumer1.com", "consumer2.com"]);
//!
//! assert!(session.track_consumer("", "7070").is_err());
//! ```
//!
//! ## Periodic jobs
//!
//! ```rust,ignore
//! use endpoint_tracker::config::RunnerConfig;
//! use endpoint_tracker::runtime::{HeartbeatJob, PeriodicRunner};
//!
//! let runner = PeriodicRunner::new(RunnerConfig::default(), HeartbeatJob::new("dump"));
//! let report = runner.run_until_ctrl_c().await;
//! ```
//!
//! ## Load generation
//!
//! ```rust,ignore
//! use endpoint_tracker::config::LoadConfig;
//! use endpoint_tracker::runtime::LoadRunner;
//!
//! let runner = LoadRunner::from_config(&LoadConfig::default())?;
//! let report = runner.run().await;
//! println!("{} requests, {} failed", report.requests, report.failures);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Endpoint records, the registry, the producer slot, and sessions.
pub mod core;
/// Configuration models for sessions, the runner, and the load generator.
pub mod config;
/// Builders to construct sessions from configuration.
pub mod builders;
/// API models, the periodic runner, and the load generator.
pub mod runtime;
/// Shared utilities.
pub mod util;
