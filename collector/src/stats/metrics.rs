//! Nested representation of the actuator `/metrics` document.
//!
//! The endpoint serves a flat object with dot-namespaced keys. [`transform`] regroups those keys
//! by subsystem with a fixed field-by-field table. It is pure and total: missing keys become zero
//! and keys outside the table are ignored.

use super::raw::RawMetrics;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsStats {
    pub mem: Memory,
    pub processors: u64,
    pub load_average: f64,
    pub uptime: Uptime,
    pub heap: MemoryPool,
    pub non_heap: MemoryPool,
    pub threads: Threads,
    pub classes: Classes,
    pub gc: GarbageCollection,
    pub http: HttpSessions,
    pub data_source: DataSource,
    pub gauge_response: ResponseGauges,
    pub status: StatusCounters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub total: u64,
    pub free: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uptime {
    pub total: u64,
    pub instance: u64,
}

/// Heap or non-heap memory pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPool {
    pub total: u64,
    pub committed: u64,
    pub init: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threads {
    pub total: u64,
    pub started: u64,
    pub peak: u64,
    pub daemon: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classes {
    pub total: u64,
    pub loaded: u64,
    pub unloaded: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageCollection {
    pub scavenge: GcCounters,
    pub marksweep: GcCounters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcCounters {
    pub count: u64,
    pub time: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSessions {
    /// `-1` when the servlet container does not limit sessions.
    pub max_sessions: i64,
    pub active_sessions: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub primary_active: u64,
    pub primary_usage: f64,
}

/// Last response time per actuator endpoint, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseGauges {
    pub actuator: f64,
    pub autoconfig: f64,
    pub beans: f64,
    pub configprops: f64,
    pub dump: f64,
    pub env: f64,
    pub health: f64,
    pub info: f64,
    pub root: f64,
    pub trace: f64,
    pub unmapped: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounters {
    #[serde(rename = "200")]
    pub ok: EndpointCounters,
}

/// Number of responses per actuator endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCounters {
    pub actuator: u64,
    pub autoconfig: u64,
    pub beans: u64,
    pub configprops: u64,
    pub dump: u64,
    pub env: u64,
    pub health: u64,
    pub info: u64,
    pub root: u64,
    pub trace: u64,
    pub unmapped: u64,
}

pub fn transform(raw: &RawMetrics) -> MetricsStats {
    MetricsStats {
        mem: Memory {
            total: raw.unsigned("mem"),
            free: raw.unsigned("mem.free"),
        },
        processors: raw.unsigned("processors"),
        load_average: raw.float("systemload.average"),
        uptime: Uptime {
            total: raw.unsigned("uptime"),
            instance: raw.unsigned("instance.uptime"),
        },
        heap: MemoryPool::from_raw(raw, "heap"),
        non_heap: MemoryPool::from_raw(raw, "nonheap"),
        threads: Threads {
            total: raw.unsigned("threads"),
            started: raw.unsigned("threads.totalStarted"),
            peak: raw.unsigned("threads.peak"),
            daemon: raw.unsigned("threads.daemon"),
        },
        classes: Classes {
            total: raw.unsigned("classes"),
            loaded: raw.unsigned("classes.loaded"),
            unloaded: raw.unsigned("classes.unloaded"),
        },
        gc: GarbageCollection {
            scavenge: GcCounters::from_raw(raw, "gc.ps_scavenge"),
            marksweep: GcCounters::from_raw(raw, "gc.ps_marksweep"),
        },
        http: HttpSessions {
            max_sessions: raw.signed("httpsessions.max"),
            active_sessions: raw.unsigned("httpsessions.active"),
        },
        data_source: DataSource {
            primary_active: raw.unsigned("datasource.primary.active"),
            primary_usage: raw.float("datasource.primary.usage"),
        },
        gauge_response: ResponseGauges::from_raw(raw),
        status: StatusCounters {
            ok: EndpointCounters::from_raw(raw, "counter.status.200"),
        },
    }
}

impl MemoryPool {
    fn from_raw(raw: &RawMetrics, prefix: &str) -> Self {
        Self {
            total: raw.unsigned(prefix),
            committed: raw.unsigned(&format!("{prefix}.committed")),
            init: raw.unsigned(&format!("{prefix}.init")),
            used: raw.unsigned(&format!("{prefix}.used")),
        }
    }
}

impl GcCounters {
    fn from_raw(raw: &RawMetrics, prefix: &str) -> Self {
        Self {
            count: raw.unsigned(&format!("{prefix}.count")),
            time: raw.unsigned(&format!("{prefix}.time")),
        }
    }
}

impl ResponseGauges {
    fn from_raw(raw: &RawMetrics) -> Self {
        let gauge = |endpoint: &str| raw.float(&format!("gauge.response.{endpoint}"));
        Self {
            actuator: gauge("actuator"),
            autoconfig: gauge("autoconfig"),
            beans: gauge("beans"),
            configprops: gauge("configprops"),
            dump: gauge("dump"),
            env: gauge("env"),
            health: gauge("health"),
            info: gauge("info"),
            root: gauge("root"),
            trace: gauge("trace"),
            unmapped: gauge("unmapped"),
        }
    }
}

impl EndpointCounters {
    fn from_raw(raw: &RawMetrics, prefix: &str) -> Self {
        let counter = |endpoint: &str| raw.unsigned(&format!("{prefix}.{endpoint}"));
        Self {
            actuator: counter("actuator"),
            autoconfig: counter("autoconfig"),
            beans: counter("beans"),
            configprops: counter("configprops"),
            dump: counter("dump"),
            env: counter("env"),
            health: counter("health"),
            info: counter("info"),
            root: counter("root"),
            trace: counter("trace"),
            unmapped: counter("unmapped"),
        }
    }
}
