use crate::stats::StatKind;
use reqwest::StatusCode;

/// Rejected collector configuration. Raised before any poller is started.
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid statistics configuration: metrics and health collection are both disabled")]
    NoStatsEnabled,
    #[error("Invalid actuator URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Actuator URL {0:?} cannot be used as a base URL")]
    NotABaseUrl(String),
    #[error("Invalid period {period:?}: {source}")]
    InvalidPeriod {
        period: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("Period must be greater than zero")]
    ZeroPeriod,
    #[error("Period {0:?} is too long to schedule")]
    PeriodTooLong(std::time::Duration),
}

/// A single GET against an actuator endpoint failed.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} failed: HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("Reading the response body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } | FetchError::Body { source, .. } => source.status(),
        }
    }
}

/// The body was fetched but is not the expected JSON document.
#[derive(thiserror::Error, Debug)]
#[error("Failed to decode {kind} stats from {url}: {source}")]
pub struct DecodeError {
    pub kind: StatKind,
    pub url: String,
    #[source]
    pub source: serde_json::Error,
}

/// Why one stat kind could not be collected on a tick.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write event: {0}")]
    Io(#[from] std::io::Error),
    #[error("Event receiver has been closed")]
    Closed,
}
