//! Runtime surfaces: API models, the periodic runner, and the load generator.

pub mod api;
pub mod profile;

#[cfg(feature = "tokio-runtime")]
pub mod load;
#[cfg(feature = "tokio-runtime")]
pub mod ticker;

pub use api::{
    health, list_consumers, producer_view, submit_producer_config, submit_track_consumer,
    ConsumerListing, EndpointView, Health, ProducerConfigRequest, ProducerView,
    TrackConsumerRequest,
};
pub use profile::{LoadProfile, Stage};

#[cfg(feature = "tokio-runtime")]
pub use load::{HttpProbe, LoadReport, LoadRunner, Probe, ProbeOutcome};
#[cfg(feature = "tokio-runtime")]
pub use ticker::{FnJob, HeartbeatJob, PeriodicJob, PeriodicRunner, RunReport};
