use serde::{
    Deserialize,
    Serialize,
};

/// The actuator `/health` document. It is already nested on the wire and passed through as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStats {
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "diskSpace")]
    pub disk_space: DiskSpace,
    #[serde(default)]
    pub db: Database,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskSpace {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub free: u64,
    #[serde(default)]
    pub threshold: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub database: String,
    /// Result of the validation query, `1` for a reachable database.
    #[serde(default)]
    pub hello: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_spring_boot_health_document() {
        let health: HealthStats = serde_json::from_value(json!({
            "status": "UP",
            "diskSpace": { "status": "UP", "total": 499963170816u64, "free": 91300069376u64, "threshold": 10485760 },
            "db": { "status": "UP", "database": "H2", "hello": 1 },
        }))
        .unwrap();

        assert_eq!(
            health,
            HealthStats {
                status: "UP".to_string(),
                disk_space: DiskSpace {
                    status: "UP".to_string(),
                    total: 499963170816,
                    free: 91300069376,
                    threshold: 10485760,
                },
                db: Database {
                    status: "UP".to_string(),
                    database: "H2".to_string(),
                    hello: 1,
                },
            }
        );
    }

    #[test]
    fn partial_document_keeps_defaults_and_round_trips_wire_names() {
        let health: HealthStats = serde_json::from_value(json!({ "status": "DOWN" })).unwrap();
        assert_eq!(health.status, "DOWN");
        assert_eq!(health.db, Database::default());

        let value = serde_json::to_value(&health).unwrap();
        assert!(value.get("diskSpace").is_some());
        assert!(value.get("disk_space").is_none());
    }
}
