//! Builders to construct sessions and runners from configuration.

pub mod session_builder;

pub use session_builder::{build_session, SessionBuilder};
