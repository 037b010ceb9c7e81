use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

/// Raw collector settings as loaded from the config sources.
///
/// Nothing is validated here. Defaults for unset values and validation happen when the collector
/// is started.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Polling period as a humantime string, e.g. `10s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Base URLs of the monitored applications.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Which endpoints to collect. `None` means "not configured".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Events are appended to this file. Stdout is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}

impl CollectorConfig {
    pub fn new(urls: impl IntoIterator<Item = impl ToString>) -> Self {
        Self {
            urls: urls.into_iter().map(|url| url.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_period(mut self, period: impl ToString) -> Self {
        self.period = Some(period.to_string());
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.stats.metrics = Some(enabled);
        self
    }

    pub fn with_health(mut self, enabled: bool) -> Self {
        self.stats.health = Some(enabled);
        self
    }
}
