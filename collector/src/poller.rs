use crate::{
    client::EndpointClient,
    event::Event,
    publisher::Publisher,
    stats::EnabledStats,
};
use std::{
    sync::Arc,
    time::Duration,
};
use strum::Display;
use tokio::{
    sync::watch,
    time::{
        interval_at,
        Instant,
        Interval,
        MissedTickBehavior,
    },
};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Lifecycle of a [`Poller`], observable through the receiver returned by [`Poller::new`].
#[derive(Debug, Default, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum PollerState {
    /// Created, not running yet.
    #[default]
    Idle,
    /// Waiting for the next tick.
    Ticking,
    Fetching,
    Publishing,
    Stopped,
}

/// Polls one endpoint on a fixed period and publishes what it fetched.
pub struct Poller {
    endpoint: Url,
    period: Duration,
    stats: EnabledStats,
    client: EndpointClient,
    publisher: Arc<dyn Publisher>,
    ticker: Interval,
    counter: u64,
    state: watch::Sender<PollerState>,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("endpoint", &self.endpoint.as_str())
            .field("period", &self.period)
            .field("stats", &self.stats)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// Creates the poller and starts its timer. The first tick fires one full period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        endpoint: Url,
        period: Duration,
        stats: EnabledStats,
        client: EndpointClient,
        publisher: Arc<dyn Publisher>,
    ) -> (Self, watch::Receiver<PollerState>) {
        let mut ticker = interval_at(Instant::now() + period, period);
        // Ticks missed while a slow fetch was running are dropped, not replayed.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (state, state_receiver) = watch::channel(PollerState::Idle);

        (
            Self {
                endpoint,
                period,
                stats,
                client,
                publisher,
                ticker,
                counter: 1,
                state,
            },
            state_receiver,
        )
    }

    /// Runs until `shutdown` is cancelled.
    ///
    /// Cancellation is also observed while a tick is in flight: the tick is abandoned and whatever
    /// it fetched is discarded.
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    pub async fn run(mut self, shutdown: CancellationToken) {
        self.set_state(PollerState::Ticking);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.tick() => {}
            }
        }

        self.set_state(PollerState::Stopped);
        debug!(events = self.counter - 1, "Poller stopped");
    }

    async fn tick(&mut self) {
        let started = Instant::now();

        for kind in self.stats.iter() {
            self.set_state(PollerState::Fetching);
            debug!(%kind, "Fetching stats");

            let stats = match self.client.fetch_stats(&self.endpoint, kind).await {
                Ok(stats) => stats,
                Err(err) => {
                    warn!(%kind, "Error reading {kind} stats: {err}");
                    continue;
                }
            };
            trace!(?stats, "Stats detail");

            self.set_state(PollerState::Publishing);
            match self.publisher.publish(Event::new(self.counter, stats)) {
                Ok(()) => {
                    info!(%kind, counter = self.counter, "Actuator {kind} stats sent");
                    self.counter += 1;
                }
                Err(err) => warn!(%kind, counter = self.counter, "Failed to publish {kind} stats: {err}"),
            }
        }

        self.set_state(PollerState::Ticking);

        let elapsed = started.elapsed();
        if elapsed > self.period {
            warn!(
                ?elapsed,
                period = ?self.period,
                "Ignoring tick(s) due to processing taking longer than one period"
            );
        }
    }

    fn set_state(&self, state: PollerState) {
        self.state.send_replace(state);
    }
}
