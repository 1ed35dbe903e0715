use std::{sync::Arc, time::Duration};

use argh::FromArgs;
use byield_btcio::{fee_job, BitcoinApi, RecommendedFees, DEFAULT_FEE_REFRESH_INTERVAL};
use tokio::{select, signal};
use tracing::debug;

use super::Context;

/// Show recommended bitcoin fee rates.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "fees")]
pub(crate) struct FeesArgs {
    #[argh(switch, short = 'w')]
    /// keep refreshing until interrupted
    pub watch: bool,

    #[argh(option)]
    /// refresh interval in seconds when watching
    pub interval: Option<u64>,
}

fn render(fees: &RecommendedFees) -> String {
    format!(
        "fastest: {} sat/vB  half hour: {} sat/vB  hour: {} sat/vB  economy: {} sat/vB  minimum: {} sat/vB",
        fees.fastest_fee, fees.half_hour_fee, fees.hour_fee, fees.economy_fee, fees.minimum_fee
    )
}

pub(crate) async fn fees(args: FeesArgs, ctx: &Context) -> anyhow::Result<()> {
    let api = Arc::new(ctx.mempool()?);
    if !args.watch {
        println!("{}", render(&api.recommended_fees().await?));
        return Ok(());
    }

    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_FEE_REFRESH_INTERVAL);
    let (mut fees_rx, job) = fee_job(api, interval);
    let job = tokio::spawn(job);

    loop {
        select! {
            changed = fees_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(fees) = *fees_rx.borrow_and_update() {
                    println!("{}", render(&fees));
                }
            }
            _ = signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }
    }

    drop(fees_rx);
    job.await?;
    Ok(())
}
