use anyhow::bail;
use argh::FromArgs;
use byield_primitives::{Denomination, SuiAddress};
use byield_sui_tx::{build_lockdrop_deposit_tx, ContractsConfig, SUI_COIN_TYPE};

use super::{print_transaction, Context};

/// Build a lockdrop deposit.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "lockdrop-deposit")]
pub(crate) struct LockdropDepositArgs {
    #[argh(option)]
    /// sui address making the deposit
    pub sui_address: SuiAddress,

    #[argh(option)]
    /// amount to deposit, in units of --coin
    pub amount: String,

    #[argh(option, default = "Denomination::Sui")]
    /// deposited coin: sui, nbtc or usdc (default sui)
    pub coin: Denomination,

    #[argh(option)]
    /// fully qualified coin type, required for usdc
    pub coin_type: Option<String>,
}

fn coin_type(args: &LockdropDepositArgs, contracts: &ContractsConfig) -> anyhow::Result<String> {
    if let Some(coin_type) = &args.coin_type {
        return Ok(coin_type.clone());
    }
    Ok(match args.coin {
        Denomination::Sui => SUI_COIN_TYPE.to_owned(),
        Denomination::Btc => contracts.nbtc.coin_type()?,
        Denomination::Usdc => bail!("--coin-type is required for usdc deposits"),
    })
}

pub(crate) async fn deposit(args: LockdropDepositArgs, ctx: &Context) -> anyhow::Result<()> {
    let coin_type = coin_type(&args, &ctx.config.contracts)?;
    let amount = args.coin.parse_spend(&args.amount)?;
    let source = ctx.coin_source()?;

    let tx = build_lockdrop_deposit_tx(
        &source,
        &ctx.config.contracts.lockdrop,
        args.sui_address,
        &coin_type,
        amount,
    )
    .await?;
    print_transaction(&tx, Some(args.sui_address))
}

#[cfg(test)]
mod tests {
    use byield_sui_tx::NbtcContract;

    use super::*;

    fn args(coin: Denomination, coin_type: Option<&str>) -> LockdropDepositArgs {
        LockdropDepositArgs {
            sui_address: SuiAddress::default(),
            amount: "1".to_owned(),
            coin,
            coin_type: coin_type.map(str::to_owned),
        }
    }

    #[test]
    fn resolves_coin_types() {
        let contracts = ContractsConfig {
            nbtc: NbtcContract {
                package_id: "0xaa".to_owned(),
                object_id: String::new(),
            },
            ..Default::default()
        };

        assert_eq!(
            coin_type(&args(Denomination::Sui, None), &contracts).unwrap(),
            SUI_COIN_TYPE
        );
        assert!(coin_type(&args(Denomination::Btc, None), &contracts)
            .unwrap()
            .ends_with("::nbtc::NBTC"));
        assert!(coin_type(&args(Denomination::Usdc, None), &contracts).is_err());
        assert_eq!(
            coin_type(&args(Denomination::Usdc, Some("0x5::usdc::USDC")), &contracts).unwrap(),
            "0x5::usdc::USDC"
        );
    }

    #[test]
    fn nbtc_deposit_needs_package() {
        assert!(coin_type(&args(Denomination::Btc, None), &ContractsConfig::default()).is_err());
    }
}
