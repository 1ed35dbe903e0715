//! Domain types shared across the BYield bridge client: amounts, networks, Sui addresses and
//! the mint/redeem/auction records the tracker and transaction builders work with.

pub mod amount;
pub mod auction;
pub mod mint;
pub mod network;
pub mod redeem;
pub mod sui;

pub use auction::{Bidder, Leaderboard};
pub use amount::{format_units, parse_units, AmountError, Denomination};
pub use mint::{map_status, IndexerMintStatus, MintStatus, MintTransaction};
pub use network::{BitcoinConfig, BitcoinNetwork, NetworkConfigs, UnconfiguredNetwork};
pub use redeem::{RedeemStatus, RedeemTransaction, RedeemTransitionError};
pub use sui::{SuiAddress, SuiAddressError};
