use std::{future::Future, sync::Arc, time::Duration};

use byield_indexer::IndexerClient;
use byield_primitives::{MintTransaction, NetworkConfigs};
use tokio::sync::{mpsc, watch};

use crate::{
    task::{mint_tracker_task, TrackerCommand},
    TrackTarget, TrackerError, TrackerState, TrackerView,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Shorter poll intervals are raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct MintTrackerHandle {
    command_tx: mpsc::Sender<TrackerCommand>,
    view_rx: watch::Receiver<TrackerView>,
}

impl MintTrackerHandle {
    /// Starts tracking `target`. A different target than the current one discards all data and
    /// any in-flight fetch; the same target triggers a refresh.
    pub async fn start(&self, target: TrackTarget) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Start(target)).await
    }

    /// Stops polling and clears the view.
    pub async fn stop(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Stop).await
    }

    /// Adds a transaction the user just signed, shown until the indexer reports the same txid.
    pub async fn add_pending(&self, tx: MintTransaction) -> Result<(), TrackerError> {
        self.send(TrackerCommand::AddPending(tx)).await
    }

    /// Fetches now unless a fetch is already running.
    pub async fn refresh(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Refresh).await
    }

    pub fn view(&self) -> TrackerView {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerView> {
        self.view_rx.clone()
    }

    async fn send(&self, command: TrackerCommand) -> Result<(), TrackerError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| TrackerError::TaskStopped)
    }
}

#[derive(Debug)]
pub struct MintTrackerBuilder<C: ?Sized> {
    client: Arc<C>,
    configs: NetworkConfigs,
    poll_interval: Duration,
}

impl<C: IndexerClient + ?Sized + 'static> MintTrackerBuilder<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            configs: NetworkConfigs::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_network_configs(mut self, configs: NetworkConfigs) -> Self {
        self.configs = configs;
        self
    }

    /// Sets the poll interval, clamped to at least [`MIN_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Returns the handle and the task future, which the caller spawns.
    pub fn build(self) -> (MintTrackerHandle, impl Future<Output = ()>) {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (view_tx, view_rx) = watch::channel(TrackerView::default());
        let handle = MintTrackerHandle {
            command_tx,
            view_rx,
        };
        let task = mint_tracker_task(
            command_rx,
            view_tx,
            TrackerState::new(self.configs),
            self.client,
            self.poll_interval,
        );

        (handle, task)
    }
}
