use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use argh::FromArgs;
use byield_btcio::MempoolClient;
use byield_primitives::{BitcoinConfig, BitcoinNetwork, NetworkConfigs, SuiAddress};
use byield_sui_tx::{ProgrammableTransaction, SuiRpcCoinSource};

use crate::config::Config;

pub(crate) mod auction;
pub(crate) mod convert;
pub(crate) mod fees;
pub(crate) mod lockdrop;
pub(crate) mod mint;
pub(crate) mod redeem;
pub(crate) mod status;
pub(crate) mod swap;
pub(crate) mod validate_address;

use auction::BidArgs;
use convert::ConvertArgs;
use fees::FeesArgs;
use lockdrop::LockdropDepositArgs;
use mint::MintArgs;
use redeem::RedeemArgs;
use status::StatusArgs;
use swap::{BuyNbtcArgs, SellNbtcArgs};
use validate_address::ValidateAddressArgs;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Command {
    Mint(MintArgs),
    Redeem(RedeemArgs),
    Bid(BidArgs),
    LockdropDeposit(LockdropDepositArgs),
    BuyNbtc(BuyNbtcArgs),
    SellNbtc(SellNbtcArgs),
    Status(StatusArgs),
    Fees(FeesArgs),
    ValidateAddress(ValidateAddressArgs),
    Convert(ConvertArgs),
}

/// Services and settings shared by all commands.
#[derive(Debug)]
pub(crate) struct Context {
    pub config: Config,
    pub network: BitcoinNetwork,
    pub networks: NetworkConfigs,
}

impl Context {
    pub(crate) fn new(config: Config, network: BitcoinNetwork) -> Self {
        let networks = config.network_configs();
        Self {
            config,
            network,
            networks,
        }
    }

    pub(crate) fn bitcoin(&self) -> &BitcoinConfig {
        self.networks.get(self.network)
    }

    pub(crate) fn mempool(&self) -> anyhow::Result<MempoolClient> {
        Ok(MempoolClient::from_config(
            self.bitcoin(),
            self.config.request_timeout(),
        )?)
    }

    pub(crate) fn coin_source(&self) -> anyhow::Result<SuiRpcCoinSource> {
        let url = self.config.sui_rpc_url()?;
        SuiRpcCoinSource::try_new(url).with_context(|| format!("connecting to sui rpc at {url}"))
    }
}

pub(crate) async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Mint(args) => mint::mint(args, ctx).await,
        Command::Redeem(args) => redeem::redeem(args, ctx).await,
        Command::Bid(args) => auction::bid(args, ctx),
        Command::LockdropDeposit(args) => lockdrop::deposit(args, ctx).await,
        Command::BuyNbtc(args) => swap::buy(args, ctx),
        Command::SellNbtc(args) => swap::sell(args, ctx).await,
        Command::Status(args) => status::status(args, ctx).await,
        Command::Fees(args) => fees::fees(args, ctx).await,
        Command::ValidateAddress(args) => validate_address::validate(args, ctx).await,
        Command::Convert(args) => {
            println!("{}", convert::convert(&args)?);
            Ok(())
        }
    }
}

/// Prints a Sui transaction for the wallet to sign.
pub(crate) fn print_transaction(
    tx: &ProgrammableTransaction,
    sender: Option<SuiAddress>,
) -> anyhow::Result<()> {
    println!("{}", tx.to_json(sender)?);
    Ok(())
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
