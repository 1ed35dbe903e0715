use argh::FromArgs;
use byield_primitives::Denomination;

/// Convert between decimal amounts and base units.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "convert")]
pub(crate) struct ConvertArgs {
    #[argh(positional)]
    /// amount to convert
    pub amount: String,

    #[argh(option, short = 'd', default = "Denomination::Btc")]
    /// denomination: btc, sui or usdc (default btc)
    pub denom: Denomination,

    #[argh(switch)]
    /// treat the amount as base units and print the decimal form
    pub from_units: bool,
}

pub(crate) fn convert(args: &ConvertArgs) -> anyhow::Result<String> {
    if args.from_units {
        let units: i128 = args.amount.trim().parse()?;
        return Ok(format!("{} {}", args.denom.format(units), args.denom));
    }
    Ok(args.denom.parse(&args.amount)?.to_string())
}
