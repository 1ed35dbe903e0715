//! Builders for the user facing operations.
//!
//! Contract ids are validated before any coin is fetched so a misconfigured deployment fails
//! without touching the network.

use byield_primitives::SuiAddress;
use tracing::debug;

use crate::{
    collect_coins_for_amount, Argument, AuctionContract, Coin, CoinSource, LockdropContract,
    NbtcContract, ObjectArg, ProgrammableTransaction, PureValue, SuiTxError, SwapContract,
    TransactionBuilder, SUI_COIN_TYPE,
};

fn ensure_nonzero(amount: u64) -> Result<(), SuiTxError> {
    if amount == 0 {
        return Err(SuiTxError::ZeroAmount);
    }
    Ok(())
}

/// Whether `coin_type` is SUI, in the short (`0x2::sui::SUI`) or zero padded package form.
fn is_sui_coin_type(coin_type: &str) -> bool {
    fn parse_package(ty: &str) -> Option<(SuiAddress, &str)> {
        ty.split_once("::")
            .and_then(|(package, rest)| Some((package.parse::<SuiAddress>().ok()?, rest)))
    }
    match (parse_package(coin_type), parse_package(SUI_COIN_TYPE)) {
        (Some(given), Some(sui)) => given == sui,
        _ => false,
    }
}

/// Collects `owner`'s coins of `coin_type` covering `amount`, split into the coin that absorbs
/// the others and the rest.
async fn coins_for(
    source: &impl CoinSource,
    owner: SuiAddress,
    coin_type: &str,
    amount: u64,
) -> Result<(Coin, Vec<Coin>), SuiTxError> {
    let collection = collect_coins_for_amount(source, owner, coin_type, amount).await?;
    let mut coins = collection.coins.into_iter();
    match (collection.fulfilled, coins.next()) {
        (true, Some(primary)) => Ok((primary, coins.collect())),
        _ => Err(SuiTxError::InsufficientBalance {
            coin_type: coin_type.to_owned(),
            requested: amount,
            available: collection.total,
        }),
    }
}

/// Merges `rest` into `primary` and splits exactly `amount` off it, so the Move call receives a
/// single coin object.
fn merge_and_split(
    tx: &mut TransactionBuilder,
    (primary, rest): &(Coin, Vec<Coin>),
    amount: u64,
) -> Argument {
    let primary = tx.object(ObjectArg::ImmOrOwned(primary.object_ref()));
    let sources: Vec<Argument> = rest
        .iter()
        .map(|c| tx.object(ObjectArg::ImmOrOwned(c.object_ref())))
        .collect();
    if !sources.is_empty() {
        tx.merge_coins(primary, sources);
    }
    tx.split_coin(primary, amount)
}

/// Burns `amount_sats` of nBTC, releasing BTC to the output script `recipient_script`.
///
/// Calls `nbtc::redeem(bridge, coin, recipient_script)`.
pub async fn build_redeem_tx(
    source: &impl CoinSource,
    contract: &NbtcContract,
    owner: SuiAddress,
    amount_sats: u64,
    recipient_script: &[u8],
) -> Result<ProgrammableTransaction, SuiTxError> {
    let target = contract.target("redeem")?;
    let bridge = contract.object()?;
    let coin_type = contract.coin_type()?;
    ensure_nonzero(amount_sats)?;

    let coins = coins_for(source, owner, &coin_type, amount_sats).await?;
    debug!(%owner, amount_sats, coins = coins.1.len() + 1, "building redeem");

    let mut tx = TransactionBuilder::new();
    let coin = merge_and_split(&mut tx, &coins, amount_sats);
    let bridge = tx.unresolved_object(bridge);
    let script = tx.pure(PureValue::Bytes(recipient_script.to_vec()));
    tx.move_call(target, vec![], vec![bridge, coin, script]);
    tx.finish()
}

/// Places a bid of `amount_mist`, paid from the gas coin.
///
/// Calls `auction::bid(auction, payment, clock)`.
pub fn build_bid_tx(
    contract: &AuctionContract,
    amount_mist: u64,
) -> Result<ProgrammableTransaction, SuiTxError> {
    let target = contract.target("bid")?;
    let auction = contract.auction()?;
    ensure_nonzero(amount_mist)?;

    let mut tx = TransactionBuilder::new();
    let payment = tx.split_coin(Argument::GasCoin, amount_mist);
    let auction = tx.unresolved_object(auction);
    let clock = tx.object(ObjectArg::clock());
    tx.move_call(target, vec![], vec![auction, payment, clock]);
    tx.finish()
}

/// Deposits `amount` of `coin_type` into the lockdrop.
///
/// SUI deposits are split from the gas coin; other types are collected from the owner's coins.
/// Calls `lockdrop::deposit<T>(lockdrop, coin, clock)`.
pub async fn build_lockdrop_deposit_tx(
    source: &impl CoinSource,
    contract: &LockdropContract,
    owner: SuiAddress,
    coin_type: &str,
    amount: u64,
) -> Result<ProgrammableTransaction, SuiTxError> {
    let target = contract.target("deposit")?;
    let lockdrop = contract.lockdrop()?;
    ensure_nonzero(amount)?;

    let mut tx = TransactionBuilder::new();
    let coin = if is_sui_coin_type(coin_type) {
        tx.split_coin(Argument::GasCoin, amount)
    } else {
        let coins = coins_for(source, owner, coin_type, amount).await?;
        merge_and_split(&mut tx, &coins, amount)
    };
    let lockdrop = tx.unresolved_object(lockdrop);
    let clock = tx.object(ObjectArg::clock());
    tx.move_call(
        target,
        vec![coin_type.to_owned()],
        vec![lockdrop, coin, clock],
    );
    tx.finish()
}

/// Buys nBTC for `amount_mist` SUI from the swap vault.
///
/// Calls `nbtc_swap::buy_nbtc(vault, payment)`.
pub fn build_buy_nbtc_tx(
    contract: &SwapContract,
    amount_mist: u64,
) -> Result<ProgrammableTransaction, SuiTxError> {
    let target = contract.target("buy_nbtc")?;
    let vault = contract.vault()?;
    ensure_nonzero(amount_mist)?;

    let mut tx = TransactionBuilder::new();
    let payment = tx.split_coin(Argument::GasCoin, amount_mist);
    let vault = tx.unresolved_object(vault);
    tx.move_call(target, vec![], vec![vault, payment]);
    tx.finish()
}

/// Sells `amount_sats` of nBTC to the swap vault.
///
/// Calls `nbtc_swap::sell_nbtc(vault, coin)`.
pub async fn build_sell_nbtc_tx(
    source: &impl CoinSource,
    swap: &SwapContract,
    nbtc: &NbtcContract,
    owner: SuiAddress,
    amount_sats: u64,
) -> Result<ProgrammableTransaction, SuiTxError> {
    let target = swap.target("sell_nbtc")?;
    let vault = swap.vault()?;
    let coin_type = nbtc.coin_type()?;
    ensure_nonzero(amount_sats)?;

    let coins = coins_for(source, owner, &coin_type, amount_sats).await?;

    let mut tx = TransactionBuilder::new();
    let coin = merge_and_split(&mut tx, &coins, amount_sats);
    let vault = tx.unresolved_object(vault);
    tx.move_call(target, vec![], vec![vault, coin]);
    tx.finish()
}
