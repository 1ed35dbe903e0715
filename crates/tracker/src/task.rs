use std::{future::pending, sync::Arc, time::Duration};

use byield_indexer::{IndexerClient, IndexerError, IndexerMintTransaction};
use byield_primitives::MintTransaction;
use futures::future::BoxFuture;
use tokio::{
    select,
    sync::{mpsc, watch},
    time::{self, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{TrackTarget, TrackerPhase, TrackerState, TrackerView};

pub(crate) enum TrackerCommand {
    Start(TrackTarget),
    Stop,
    AddPending(MintTransaction),
    Refresh,
}

type FetchResult = Result<Vec<IndexerMintTransaction>, IndexerError>;

struct Poller<C: ?Sized> {
    client: Arc<C>,
    poll_interval: Duration,
    ticker: Option<Interval>,
    in_flight: Option<BoxFuture<'static, FetchResult>>,
}

impl<C: IndexerClient + ?Sized + 'static> Poller<C> {
    /// Starts a fetch unless one is already running.
    fn trigger(&mut self, state: &mut TrackerState) {
        if self.in_flight.is_some() {
            debug!("fetch already in flight; dropping trigger");
            return;
        }
        let (Some(target), Some(url)) = (state.target(), state.indexer_url()) else {
            return;
        };

        let client = self.client.clone();
        let url = url.to_owned();
        let recipient = target.sui_address.to_string();
        self.in_flight = Some(Box::pin(async move {
            client.mint_transactions(&url, &recipient).await
        }));
        state.begin_fetch();
    }

    /// Drops any in-flight fetch and the timer.
    fn halt(&mut self) {
        self.in_flight = None;
        self.ticker = None;
    }

    fn restart(&mut self, state: &TrackerState) {
        self.halt();
        if state.indexer_url().is_some() {
            let mut ticker = time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.ticker = Some(ticker);
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

async fn next_outcome(in_flight: &mut Option<BoxFuture<'static, FetchResult>>) -> FetchResult {
    match in_flight {
        Some(fut) => fut.await,
        None => pending().await,
    }
}

pub(crate) async fn mint_tracker_task<C: IndexerClient + ?Sized + 'static>(
    mut command_rx: mpsc::Receiver<TrackerCommand>,
    view_tx: watch::Sender<TrackerView>,
    mut state: TrackerState,
    client: Arc<C>,
    poll_interval: Duration,
) {
    let mut poller = Poller {
        client,
        poll_interval,
        ticker: None,
        in_flight: None,
    };

    loop {
        select! {
            maybe_command = command_rx.recv() => {
                let Some(command) = maybe_command else {
                    info!("tracker handle dropped; shutting down");
                    break;
                };
                handle_command(command, &mut state, &mut poller);
            }
            _ = next_tick(&mut poller.ticker) => {
                poller.trigger(&mut state);
            }
            result = next_outcome(&mut poller.in_flight) => {
                poller.in_flight = None;
                if let Err(err) = &result {
                    warn!(%err, "failed to fetch mint transactions");
                }
                state.apply_fetch(result);
            }
        }

        view_tx.send_replace(state.view());
    }
}

fn handle_command<C: IndexerClient + ?Sized + 'static>(
    command: TrackerCommand,
    state: &mut TrackerState,
    poller: &mut Poller<C>,
) {
    match command {
        TrackerCommand::Start(target) => {
            if state.target() == Some(&target) {
                poller.trigger(state);
                return;
            }
            info!(network = %target.network, address = %target.sui_address, "tracking mints");
            state.set_target(target);
            if let TrackerPhase::Unconfigured(err) = state.phase() {
                warn!(%err, "not polling");
            }
            // the first tick fires immediately and starts the initial fetch
            poller.restart(state);
        }
        TrackerCommand::Stop => {
            debug!("stopped tracking");
            poller.halt();
            state.clear();
        }
        TrackerCommand::AddPending(tx) => {
            if !state.add_pending(tx) {
                debug!("ignoring already known transaction");
            }
        }
        TrackerCommand::Refresh => poller.trigger(state),
    }
}
