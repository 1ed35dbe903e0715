//! Programmable transactions for the BYield Move contracts on Sui.
//!
//! Transactions are assembled here and serialized as JSON for an external wallet, which resolves
//! object versions, selects gas, signs and executes them.

mod bcs;
mod coins;
mod contracts;
mod error;
mod ops;
mod ptb;
mod rpc;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(any(test, feature = "test-utils"))]
pub use coins::MockCoinSource;
pub use coins::{collect_coins_for_amount, Coin, CoinCollection, CoinPage, CoinSource};
pub use contracts::{
    AuctionContract, ContractsConfig, LockdropContract, NbtcContract, SwapContract,
    SUI_COIN_TYPE,
};
pub use error::{SuiClientError, SuiTxError};
pub use ops::{build_bid_tx, build_buy_nbtc_tx, build_lockdrop_deposit_tx, build_redeem_tx, build_sell_nbtc_tx};
pub use ptb::{
    Argument, CallArg, Command, MoveCall, MoveTarget, ObjectArg, ObjectRef, ProgrammableTransaction,
    PureValue, TransactionBuilder, MAX_COMMANDS, MAX_INPUTS,
};
pub use rpc::{SuiCoinRpcClient, SuiRpcCoinSource};
