use anyhow::Context as _;
use argh::FromArgs;
use bitcoin::Amount;
use byield_btc_tx::{build_mint_transaction, estimate_mint_fee, nbtc_mint_payload, parse_address};
use byield_btcio::BitcoinApi;
use byield_primitives::{Denomination, SuiAddress};
use tracing::info;

use super::Context;

/// Build an unsigned nBTC mint deposit as a PSBT.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "mint")]
pub(crate) struct MintArgs {
    #[argh(option)]
    /// bitcoin address funding the deposit and receiving the change
    pub sender: String,

    #[argh(option)]
    /// sui address receiving the minted nBTC
    pub sui_address: SuiAddress,

    #[argh(option)]
    /// amount to deposit in BTC, e.g. 0.001
    pub amount: String,

    #[argh(option)]
    /// flat fee in satoshis, overrides the network default
    pub fee: Option<u64>,

    #[argh(option)]
    /// fee rate in sat/vB to estimate the fee from
    pub fee_rate: Option<u64>,
}

pub(crate) async fn mint(args: MintArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.bitcoin();
    let sender = parse_address(&args.sender, ctx.network)?;
    let deposit = parse_address(config.deposit_address()?, ctx.network)?;
    let amount = Amount::from_sat(Denomination::Btc.parse_spend(&args.amount)?);
    let payload = nbtc_mint_payload(&args.sui_address);

    let fee = match (args.fee, args.fee_rate) {
        (Some(fee), _) => Amount::from_sat(fee),
        (None, Some(rate)) => estimate_mint_fee(
            &deposit.script_pubkey(),
            &sender.script_pubkey(),
            &payload,
            rate,
        )?,
        (None, None) => Amount::from_sat(config.fee_sats),
    };

    let utxos = ctx
        .mempool()?
        .address_utxos(&args.sender)
        .await
        .context("fetching sender utxos")?;
    let template = build_mint_transaction(&utxos, &sender, &deposit, amount, &payload, fee)?;

    let txid = template.unsigned_tx().compute_txid();
    info!(%txid, amount = amount.to_sat(), fee = fee.to_sat(), "built mint transaction");

    println!("txid: {txid}");
    println!("fee: {} sats", fee.to_sat());
    if let Some(url) = config.bitcoin_tx_url(&txid.to_string()) {
        println!("explorer: {url}");
    }
    println!("psbt: {}", template.to_base64());
    Ok(())
}
