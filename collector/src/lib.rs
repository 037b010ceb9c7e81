//! Periodic collection of Spring Boot actuator statistics.
//!
//! A [`Collector`] runs one [`Poller`] per configured endpoint. Every period each poller fetches
//! `/metrics` and `/health`, reshapes the flat metrics document into [`MetricsStats`] and hands an
//! [`Event`] to the shared [`Publisher`].

#[macro_use]
extern crate tracing;

pub mod client;
pub mod collector;
pub mod error;
pub mod event;
pub mod poller;
pub mod publisher;
pub mod settings;
pub mod stats;

pub use client::EndpointClient;
pub use collector::{
    Collector,
    PollerHandle,
};
pub use error::{
    ConfigurationError,
    DecodeError,
    FetchError,
    PublishError,
    StatsError,
};
pub use event::Event;
pub use poller::{
    Poller,
    PollerState,
};
pub use publisher::{
    ChannelPublisher,
    JsonLinesPublisher,
    Publisher,
};
pub use settings::{
    Settings,
    DEFAULT_PERIOD,
    DEFAULT_URL,
};
pub use stats::{
    HealthStats,
    MetricsStats,
    RawMetrics,
    StatKind,
    Stats,
};
