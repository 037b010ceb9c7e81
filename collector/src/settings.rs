use crate::{
    error::ConfigurationError,
    stats::EnabledStats,
};
use actuator_beat_config::CollectorConfig;
use std::time::{
    Duration,
    Instant,
};
use url::Url;

/// Period used when none is configured.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(10);

/// Endpoint polled when no URL is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1";

/// Validated collector configuration with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub period: Duration,
    pub endpoints: Vec<Url>,
    pub stats: EnabledStats,
}

impl Settings {
    pub fn resolve(config: &CollectorConfig) -> Result<Self, ConfigurationError> {
        let stats = EnabledStats {
            metrics: config.stats.metrics.unwrap_or(true),
            health: config.stats.health.unwrap_or(true),
        };
        if !stats.any() {
            return Err(ConfigurationError::NoStatsEnabled);
        }

        let period = match config.period.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PERIOD,
            Some(period) => humantime::parse_duration(period).map_err(|source| {
                ConfigurationError::InvalidPeriod {
                    period: period.to_string(),
                    source,
                }
            })?,
        };
        if period.is_zero() {
            return Err(ConfigurationError::ZeroPeriod);
        }
        // The first deadline is `now + period`, it has to be representable.
        if Instant::now().checked_add(period).is_none() {
            return Err(ConfigurationError::PeriodTooLong(period));
        }

        let endpoints = if config.urls.is_empty() {
            vec![parse_endpoint(DEFAULT_URL)?]
        } else {
            config
                .urls
                .iter()
                .map(|url| parse_endpoint(url))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            period,
            endpoints,
            stats,
        })
    }
}

fn parse_endpoint(url: &str) -> Result<Url, ConfigurationError> {
    let parsed = Url::parse(url.trim()).map_err(|source| ConfigurationError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if parsed.cannot_be_a_base() {
        return Err(ConfigurationError::NotABaseUrl(url.to_string()));
    }
    Ok(parsed)
}
