use argh::FromArgs;
use byield_btc_tx::parse_address;
use byield_primitives::{Denomination, SuiAddress};
use byield_sui_tx::build_redeem_tx;

use super::{print_transaction, Context};

/// Build a Sui transaction burning nBTC to release BTC.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "redeem")]
pub(crate) struct RedeemArgs {
    #[argh(option)]
    /// sui address holding the nBTC
    pub sui_address: SuiAddress,

    #[argh(option)]
    /// bitcoin address receiving the released BTC
    pub btc_address: String,

    #[argh(option)]
    /// amount of nBTC to redeem, e.g. 0.001
    pub amount: String,
}

pub(crate) async fn redeem(args: RedeemArgs, ctx: &Context) -> anyhow::Result<()> {
    let recipient = parse_address(&args.btc_address, ctx.network)?;
    let amount = Denomination::Btc.parse_spend(&args.amount)?;
    let source = ctx.coin_source()?;

    let tx = build_redeem_tx(
        &source,
        &ctx.config.contracts.nbtc,
        args.sui_address,
        amount,
        recipient.script_pubkey().as_bytes(),
    )
    .await?;
    print_transaction(&tx, Some(args.sui_address))
}
