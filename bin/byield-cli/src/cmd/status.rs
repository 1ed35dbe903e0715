use std::{collections::HashMap, sync::Arc};

use anyhow::{bail, Context as _};
use argh::FromArgs;
use bitcoin::Txid;
use byield_btcio::{BitcoinApi, MempoolClient};
use byield_indexer::HttpIndexerClient;
use byield_primitives::{BitcoinConfig, Denomination, MintTransaction, SuiAddress};
use byield_tracker::{MintTrackerBuilder, TrackTarget, TrackerPhase, TrackerView};
use tokio::{select, signal, sync::watch};
use tracing::{debug, warn};

use super::{now_ms, Context};

/// Show the nBTC mints of a sui address.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "status")]
pub(crate) struct StatusArgs {
    #[argh(option)]
    /// sui address receiving the mints
    pub sui_address: SuiAddress,

    #[argh(option)]
    /// just-signed mint not yet seen by the indexer, as TXID or TXID:SATS (repeatable)
    pub pending: Vec<String>,

    #[argh(switch, short = 'w')]
    /// keep polling and print every update until interrupted
    pub watch: bool,
}

fn parse_pending(value: &str) -> anyhow::Result<(String, u64)> {
    let (txid, sats) = match value.split_once(':') {
        Some((txid, sats)) => (
            txid,
            sats.parse()
                .with_context(|| format!("invalid amount in pending entry '{value}'"))?,
        ),
        None => (value, 0),
    };
    let txid = txid.trim();
    if txid.len() != 64 || !txid.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid txid in pending entry '{value}'");
    }
    Ok((txid.to_ascii_lowercase(), sats))
}

/// Mempool confirmations of the mints the indexer has not reported yet, by txid. Failed
/// lookups are left out.
async fn mempool_confirmations<A: BitcoinApi + ?Sized>(
    api: &A,
    view: &TrackerView,
) -> HashMap<String, u32> {
    let mut confirmations = HashMap::new();
    let optimistic: Vec<_> = view
        .transactions
        .iter()
        .filter(|tx| tx.is_optimistic())
        .collect();
    if optimistic.is_empty() {
        return confirmations;
    }

    let tip = match api.tip_height().await {
        Ok(tip) => tip,
        Err(err) => {
            warn!(%err, "failed to fetch chain tip");
            return confirmations;
        }
    };
    for tx in optimistic {
        let Ok(txid) = tx.bitcoin_tx_id.parse::<Txid>() else {
            continue;
        };
        match api.tx_status(txid).await {
            Ok(status) => {
                confirmations.insert(tx.bitcoin_tx_id.clone(), status.confirmations(tip));
            }
            Err(err) => debug!(%err, %txid, "mempool lookup failed"),
        }
    }
    confirmations
}

fn render(
    view: &TrackerView,
    config: &BitcoinConfig,
    mempool: &HashMap<String, u32>,
) -> String {
    let mut out = String::new();
    if view.transactions.is_empty() {
        out.push_str("no mints\n");
    }
    for tx in &view.transactions {
        out.push_str(&render_tx(tx, config, mempool.get(&tx.bitcoin_tx_id).copied()));
        out.push('\n');
    }
    if let Some(err) = &view.last_error {
        out.push_str(&format!("warning: last refresh failed: {err}\n"));
    }
    out
}

fn render_tx(tx: &MintTransaction, config: &BitcoinConfig, mempool: Option<u32>) -> String {
    let mut line = format!(
        "{}  {} BTC  {}",
        tx.bitcoin_tx_id,
        Denomination::Btc.format(i128::from(tx.amount_sats)),
        tx.status
    );
    match mempool {
        Some(0) => line.push_str("  unconfirmed in mempool"),
        Some(n) => line.push_str(&format!("  {n}/{} confirmations", config.confirmation_depth)),
        None => {}
    }
    if !tx.status.is_terminal() && !tx.is_optimistic() {
        line.push_str(&format!(
            "  {}/{} confirmations",
            tx.confirmations, config.confirmation_depth
        ));
        let remaining = config.remaining_confirmation_secs(tx.confirmations);
        if remaining > 0 {
            line.push_str(&format!("  ~{}m left", remaining.div_ceil(60)));
        }
    }
    if let Some(err) = &tx.error_message {
        line.push_str(&format!("  error: {err}"));
    }
    if let Some(url) = tx.sui_explorer_url.as_ref().or(tx.bitcoin_explorer_url.as_ref()) {
        line.push_str(&format!("  {url}"));
    }
    line
}

async fn report(
    view: &TrackerView,
    config: &BitcoinConfig,
    mempool: Option<&MempoolClient>,
) -> String {
    let confirmations = match mempool {
        Some(api) => mempool_confirmations(api, view).await,
        None => HashMap::new(),
    };
    render(view, config, &confirmations)
}

/// Waits for the first finished fetch. Fails if the network cannot be tracked.
async fn first_view(rx: &mut watch::Receiver<TrackerView>) -> anyhow::Result<TrackerView> {
    loop {
        {
            let view = rx.borrow_and_update();
            match &view.phase {
                TrackerPhase::Ready if !view.refreshing => return Ok(view.clone()),
                TrackerPhase::Unconfigured(err) => bail!("{err}"),
                _ => {}
            }
        }
        rx.changed().await.context("tracker stopped")?;
    }
}

pub(crate) async fn status(args: StatusArgs, ctx: &Context) -> anyhow::Result<()> {
    let pending = args
        .pending
        .iter()
        .map(|p| parse_pending(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let indexer = Arc::new(HttpIndexerClient::new(ctx.config.request_timeout())?);
    let (handle, task) = MintTrackerBuilder::new(indexer)
        .with_network_configs(ctx.networks.clone())
        .with_poll_interval(ctx.config.poll_interval())
        .build();
    let task = tokio::spawn(task);
    let mut view_rx = handle.subscribe();

    handle
        .start(TrackTarget {
            network: ctx.network,
            sui_address: args.sui_address,
        })
        .await?;
    let now = now_ms();
    for (txid, sats) in pending {
        let tx = MintTransaction::broadcasting(txid, sats, args.sui_address.to_string(), now);
        handle.add_pending(tx).await?;
    }

    let config = ctx.bitcoin();
    let mempool = ctx
        .mempool()
        .inspect_err(|err| debug!(%err, "no mempool api; skipping confirmation lookups"))
        .ok();

    let view = first_view(&mut view_rx).await?;
    print!("{}", report(&view, config, mempool.as_ref()).await);

    if args.watch {
        loop {
            select! {
                changed = view_rx.changed() => {
                    changed.context("tracker stopped")?;
                    let view = view_rx.borrow_and_update().clone();
                    if view.phase == TrackerPhase::Ready && !view.refreshing {
                        println!("---");
                        print!("{}", report(&view, config, mempool.as_ref()).await);
                    }
                }
                _ = signal::ctrl_c() => {
                    debug!("interrupted");
                    break;
                }
            }
        }
    }

    handle.stop().await?;
    drop(handle);
    task.await?;
    Ok(())
}
