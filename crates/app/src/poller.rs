//! Status poller — the recurring metrics fetch loop.
//!
//! A fixed interval fires for the lifetime of the process; each tick spawns
//! one independent fetch cycle, matching the original dashboard's
//! fire-and-forget scheduling. There is no overlap guard: a slow response
//! may be applied after a faster, newer one — last writer wins on the
//! shared view.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use bbdash_domain::error::DashError;
use bbdash_domain::fault::ConnectionStatus;

use crate::ports::device_api::DeviceApi;
use crate::ports::view::DashboardView;
use crate::readout::MetricsReadout;

/// Polling cadence of the original dashboard.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Recurring status poll writing into the shared view.
pub struct StatusPoller<A, V> {
    api: Arc<A>,
    view: Arc<Mutex<V>>,
    interval: Duration,
}

impl<A, V> StatusPoller<A, V>
where
    A: DeviceApi + 'static,
    V: DashboardView + 'static,
{
    /// Spawn the poll loop and return its task handle.
    ///
    /// The loop runs until the process exits; dropping the handle does not
    /// stop it.
    pub fn start(api: Arc<A>, view: Arc<Mutex<V>>, interval: Duration) -> JoinHandle<()> {
        let poller = Self {
            api,
            view,
            interval,
        };
        tokio::spawn(poller.run())
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            let api = Arc::clone(&self.api);
            let view = Arc::clone(&self.view);
            tokio::spawn(async move {
                Self::cycle(&api, &view).await;
            });
        }
    }

    /// One fetch cycle: render on success, downgrade the badge on failure.
    ///
    /// A failed cycle touches nothing but the connection indicator —
    /// previously rendered readings stay on screen until the next
    /// successful poll.
    async fn cycle(api: &A, view: &Mutex<V>) {
        match api.fetch_status().await {
            Ok(status) => {
                let readout = MetricsReadout::from(&status);
                let mut view = view.lock();
                view.update_metrics(&readout);
                view.set_connection(ConnectionStatus::Connected);
            }
            Err(err) => {
                let err = DashError::Poll(Box::new(err));
                tracing::debug!(%err, "status poll failed");
                view.lock().set_connection(ConnectionStatus::Disconnected);
            }
        }
    }
}
