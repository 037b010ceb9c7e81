use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Number,
    Value,
};

/// The flat document served by an actuator `/metrics` endpoint, e.g.
/// `{"mem": 1024, "heap.used": 512, "gc.ps_scavenge.count": 3}`.
///
/// Lookups never fail. A key that is missing or does not hold a number reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMetrics(Map<String, Value>);

impl RawMetrics {
    pub fn number(&self, key: &str) -> Option<&Number> {
        match self.0.get(key) {
            Some(Value::Number(number)) => Some(number),
            _ => None,
        }
    }

    /// Fractional values are truncated, negative values read as zero.
    pub fn unsigned(&self, key: &str) -> u64 {
        self.number(key)
            .and_then(|number| {
                number
                    .as_u64()
                    .or_else(|| number.as_f64().filter(|value| *value >= 0.0).map(|value| value as u64))
            })
            .unwrap_or_default()
    }

    pub fn signed(&self, key: &str) -> i64 {
        self.number(key)
            .and_then(|number| number.as_i64().or_else(|| number.as_f64().map(|value| value as i64)))
            .unwrap_or_default()
    }

    pub fn float(&self, key: &str) -> f64 {
        self.number(key).and_then(Number::as_f64).unwrap_or_default()
    }
}

impl FromIterator<(String, Value)> for RawMetrics {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMetrics {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_and_non_numeric_values_read_as_zero() {
        let raw = raw(json!({ "mem": "lots", "threads": null, "classes": [1, 2] }));
        assert_eq!(raw.unsigned("mem"), 0);
        assert_eq!(raw.unsigned("threads"), 0);
        assert_eq!(raw.unsigned("classes"), 0);
        assert_eq!(raw.unsigned("not.there"), 0);
        assert_eq!(raw.float("not.there"), 0.0);
        assert_eq!(raw.signed("not.there"), 0);
    }

    #[test]
    fn numbers_are_coerced_to_the_requested_representation() {
        let raw = raw(json!({
            "mem": 1536.9,
            "httpsessions.max": -1,
            "systemload.average": 2,
            "heap.used": -5,
        }));
        assert_eq!(raw.unsigned("mem"), 1536);
        assert_eq!(raw.signed("httpsessions.max"), -1);
        assert_eq!(raw.float("systemload.average"), 2.0);
        assert_eq!(raw.unsigned("heap.used"), 0);
        assert_eq!(raw.signed("mem"), 1536);
    }
}
