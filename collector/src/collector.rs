use crate::{
    client::EndpointClient,
    error::ConfigurationError,
    poller::{
        Poller,
        PollerState,
    },
    publisher::Publisher,
    settings::Settings,
};
use actuator_beat_config::CollectorConfig;
use futures::future::join_all;
use std::sync::Arc;
use tokio::{
    sync::watch,
    task::JoinHandle,
};
use tokio_util::sync::{
    CancellationToken,
    DropGuard,
};
use url::Url;

/// Observation handle for one running poller.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    pub endpoint: Url,
    pub state: watch::Receiver<PollerState>,
}

impl PollerHandle {
    pub fn state(&self) -> PollerState {
        *self.state.borrow()
    }
}

/// Owns the pollers of all configured endpoints and their shared shutdown signal.
///
/// Dropping the collector cancels every poller without waiting for them, use [`Collector::stop`]
/// to wait until they are gone.
#[derive(Debug)]
pub struct Collector {
    shutdown: CancellationToken,
    _shutdown_guard: DropGuard,
    tasks: Vec<JoinHandle<()>>,
    pollers: Vec<PollerHandle>,
}

impl Collector {
    /// Validates `config` and starts one poller per endpoint.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &CollectorConfig, publisher: Arc<dyn Publisher>) -> Result<Self, ConfigurationError> {
        let settings = Settings::resolve(config)?;
        Ok(Self::spawn(settings, EndpointClient::new(), publisher))
    }

    /// Starts one poller per endpoint of already validated `settings`.
    pub fn spawn(settings: Settings, client: EndpointClient, publisher: Arc<dyn Publisher>) -> Self {
        info!(
            period = ?settings.period,
            endpoints = settings.endpoints.len(),
            metrics = settings.stats.metrics,
            health = settings.stats.health,
            "Starting collector"
        );

        let shutdown = CancellationToken::new();
        let mut tasks = Vec::with_capacity(settings.endpoints.len());
        let mut pollers = Vec::with_capacity(settings.endpoints.len());

        for endpoint in &settings.endpoints {
            debug!(%endpoint, "Starting poller");
            let (poller, state) = Poller::new(
                endpoint.clone(),
                settings.period,
                settings.stats,
                client.clone(),
                Arc::clone(&publisher),
            );
            tasks.push(tokio::spawn(poller.run(shutdown.child_token())));
            pollers.push(PollerHandle {
                endpoint: endpoint.clone(),
                state,
            });
        }

        Self {
            _shutdown_guard: shutdown.clone().drop_guard(),
            shutdown,
            tasks,
            pollers,
        }
    }

    pub fn pollers(&self) -> &[PollerHandle] {
        &self.pollers
    }

    /// True once [`Collector::stop`] has completed.
    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled() && self.tasks.is_empty()
    }

    /// Signals every poller to stop and waits until all of them have exited.
    ///
    /// Calling it again is a no-op.
    #[instrument(level = "debug", skip_all)]
    pub async fn stop(&mut self) {
        if !self.shutdown.is_cancelled() {
            info!("Stopping collector");
            self.shutdown.cancel();
        }

        let tasks = std::mem::take(&mut self.tasks);
        if tasks.is_empty() {
            return;
        }

        for (result, poller) in join_all(tasks).await.into_iter().zip(&self.pollers) {
            if let Err(err) = result {
                error!(endpoint = %poller.endpoint, "Poller task failed: {err}");
            }
        }
        debug!("All pollers stopped");
    }
}
