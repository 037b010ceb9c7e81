use crate::stats::{
    StatKind,
    Stats,
};
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// One collected document, stamped and numbered by the poller that fetched it.
///
/// Serialized as `{"@timestamp": .., "type": "metrics", "counter": 1, "metrics": {..}}`, the
/// document sits under a key named after its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: StatKind,
    /// Per-endpoint sequence number, starting at 1.
    pub counter: u64,
    #[serde(flatten)]
    pub stats: Stats,
}

impl Event {
    pub fn new(counter: u64, stats: Stats) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: stats.kind(),
            counter,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{
        HealthStats,
        MetricsStats,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn health_event_wire_shape() {
        let health = HealthStats {
            status: "UP".to_string(),
            ..Default::default()
        };
        let event = Event::new(3, Stats::Health(health));
        assert_eq!(event.kind, StatKind::Health);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], json!("health"));
        assert_eq!(value["counter"], json!(3));
        assert_eq!(value["health"]["status"], json!("UP"));
        assert!(value.get("metrics").is_none());
        assert!(value["@timestamp"].is_string());
    }

    #[test]
    fn metrics_event_reads_back() {
        let event = Event::new(1, Stats::Metrics(MetricsStats::default()));
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
