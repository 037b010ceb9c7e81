use crate::{
    error::{
        DecodeError,
        FetchError,
        StatsError,
    },
    stats::{
        transform,
        HealthStats,
        MetricsStats,
        RawMetrics,
        StatKind,
        Stats,
    },
};
use reqwest::{
    Client as HttpClient,
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

/// Fetches actuator documents from one or more applications.
///
/// Cheap to clone, clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct EndpointClient {
    http_client: HttpClient,
}

impl EndpointClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// `base` with one trailing slash removed, followed by `suffix`.
    pub fn stats_url(base: &Url, suffix: &str) -> String {
        let base = base.as_str();
        format!("{}{}", base.strip_suffix('/').unwrap_or(base), suffix)
    }

    /// GET `base + suffix` and return the body of a `200 OK` response.
    ///
    /// Any other status is an error, whatever the body contains.
    #[instrument(level = "trace", skip(self), fields(base = %base))]
    pub async fn fetch(&self, base: &Url, suffix: &str) -> Result<Vec<u8>, FetchError> {
        let url = Self::stats_url(base, suffix);
        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { url, status });
        }

        match response.bytes().await {
            Ok(body) => Ok(body.to_vec()),
            Err(source) => Err(FetchError::Body { url, source }),
        }
    }

    pub async fn fetch_metrics(&self, base: &Url) -> Result<MetricsStats, StatsError> {
        let raw: RawMetrics = self.fetch_json(base, StatKind::Metrics).await?;
        Ok(transform(&raw))
    }

    pub async fn fetch_health(&self, base: &Url) -> Result<HealthStats, StatsError> {
        self.fetch_json(base, StatKind::Health).await
    }

    pub async fn fetch_stats(&self, base: &Url, kind: StatKind) -> Result<Stats, StatsError> {
        match kind {
            StatKind::Metrics => self.fetch_metrics(base).await.map(Stats::Metrics),
            StatKind::Health => self.fetch_health(base).await.map(Stats::Health),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, base: &Url, kind: StatKind) -> Result<T, StatsError> {
        let body = self.fetch(base, kind.path()).await?;
        serde_json::from_slice(&body).map_err(|source| {
            DecodeError {
                kind,
                url: Self::stats_url(base, kind.path()),
                source,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_url_strips_a_single_trailing_slash() {
        let url = |s: &str| Url::parse(s).unwrap();

        assert_eq!(
            EndpointClient::stats_url(&url("http://127.0.0.1"), "/metrics"),
            "http://127.0.0.1/metrics"
        );
        assert_eq!(
            EndpointClient::stats_url(&url("http://app:8080/"), "/health"),
            "http://app:8080/health"
        );
        assert_eq!(
            EndpointClient::stats_url(&url("http://app:8080/manage/"), "/metrics"),
            "http://app:8080/manage/metrics"
        );
        assert_eq!(
            EndpointClient::stats_url(&url("http://app:8080/manage"), "/metrics"),
            "http://app:8080/manage/metrics"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Nothing listens on the discard port on loopback.
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let err = EndpointClient::new().fetch(&base, "/metrics").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "unexpected error: {err}");
        assert_eq!(err.status(), None);
    }
}
