pub mod health;
pub mod metrics;
pub mod raw;

pub use health::HealthStats;
pub use metrics::{
    transform,
    MetricsStats,
};
pub use raw::RawMetrics;
use serde::{
    Deserialize,
    Serialize,
};
use strum::{
    Display,
    EnumString,
};

/// The two independently toggleable endpoints of an application.
#[derive(Debug, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatKind {
    Metrics,
    Health,
}

impl StatKind {
    /// Path appended to the endpoint base URL.
    pub fn path(&self) -> &'static str {
        match self {
            StatKind::Metrics => "/metrics",
            StatKind::Health => "/health",
        }
    }
}

/// Which stat kinds are collected on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledStats {
    pub metrics: bool,
    pub health: bool,
}

impl Default for EnabledStats {
    fn default() -> Self {
        Self {
            metrics: true,
            health: true,
        }
    }
}

impl EnabledStats {
    pub fn is_enabled(&self, kind: StatKind) -> bool {
        match kind {
            StatKind::Metrics => self.metrics,
            StatKind::Health => self.health,
        }
    }

    /// Enabled kinds, metrics first.
    pub fn iter(self) -> impl Iterator<Item = StatKind> {
        [StatKind::Metrics, StatKind::Health]
            .into_iter()
            .filter(move |kind| self.is_enabled(*kind))
    }

    pub fn any(&self) -> bool {
        self.metrics || self.health
    }
}

/// A decoded document of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stats {
    Metrics(MetricsStats),
    Health(HealthStats),
}

impl Stats {
    pub fn kind(&self) -> StatKind {
        match self {
            Stats::Metrics(_) => StatKind::Metrics,
            Stats::Health(_) => StatKind::Health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_stats_iterate_metrics_before_health() {
        let all: Vec<_> = EnabledStats::default().iter().collect();
        assert_eq!(all, vec![StatKind::Metrics, StatKind::Health]);

        let health_only = EnabledStats {
            metrics: false,
            health: true,
        };
        assert_eq!(health_only.iter().collect::<Vec<_>>(), vec![StatKind::Health]);

        let none = EnabledStats {
            metrics: false,
            health: false,
        };
        assert!(!none.any());
        assert_eq!(none.iter().count(), 0);
    }

    #[test]
    fn kinds_render_as_lowercase_tags() {
        assert_eq!(StatKind::Metrics.to_string(), "metrics");
        assert_eq!(StatKind::Health.to_string(), "health");
        assert_eq!("health".parse::<StatKind>().unwrap(), StatKind::Health);
        assert_eq!(StatKind::Health.path(), "/health");
    }
}
