use argh::FromArgs;
use byield_primitives::{Denomination, SuiAddress};
use byield_sui_tx::{build_buy_nbtc_tx, build_sell_nbtc_tx};

use super::{print_transaction, Context};

/// Build a purchase of nBTC paid in SUI.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "buy-nbtc")]
pub(crate) struct BuyNbtcArgs {
    #[argh(option)]
    /// amount of SUI to spend
    pub amount: String,

    #[argh(option)]
    /// sui address paying, left for the wallet to fill when omitted
    pub sender: Option<SuiAddress>,
}

/// Build a sale of nBTC to the swap vault.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "sell-nbtc")]
pub(crate) struct SellNbtcArgs {
    #[argh(option)]
    /// sui address holding the nBTC
    pub sui_address: SuiAddress,

    #[argh(option)]
    /// amount of nBTC to sell
    pub amount: String,
}

pub(crate) fn buy(args: BuyNbtcArgs, ctx: &Context) -> anyhow::Result<()> {
    let amount = Denomination::Sui.parse_spend(&args.amount)?;
    let tx = build_buy_nbtc_tx(&ctx.config.contracts.swap, amount)?;
    print_transaction(&tx, args.sender)
}

pub(crate) async fn sell(args: SellNbtcArgs, ctx: &Context) -> anyhow::Result<()> {
    let amount = Denomination::Btc.parse_spend(&args.amount)?;
    let source = ctx.coin_source()?;
    let contracts = &ctx.config.contracts;

    let tx = build_sell_nbtc_tx(
        &source,
        &contracts.swap,
        &contracts.nbtc,
        args.sui_address,
        amount,
    )
    .await?;
    print_transaction(&tx, Some(args.sui_address))
}
