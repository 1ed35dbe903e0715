use argh::FromArgs;
use byield_primitives::{Denomination, SuiAddress};
use byield_sui_tx::build_bid_tx;

use super::{print_transaction, Context};

/// Build a bid for the Beelievers auction, paid in SUI.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "bid")]
pub(crate) struct BidArgs {
    #[argh(option)]
    /// bid amount in SUI
    pub amount: String,

    #[argh(option)]
    /// sui address placing the bid, left for the wallet to fill when omitted
    pub sender: Option<SuiAddress>,
}

pub(crate) fn bid(args: BidArgs, ctx: &Context) -> anyhow::Result<()> {
    let amount = Denomination::Sui.parse_spend(&args.amount)?;
    let tx = build_bid_tx(&ctx.config.contracts.auction, amount)?;
    print_transaction(&tx, args.sender)
}
