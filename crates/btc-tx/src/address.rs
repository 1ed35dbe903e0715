use bitcoin::{address::NetworkUnchecked, Address, Network};
use byield_primitives::BitcoinNetwork;

use crate::MintTxError;

/// Bitcoin consensus network backing a bridge network.
pub fn to_bitcoin_network(network: BitcoinNetwork) -> Network {
    match network {
        BitcoinNetwork::Mainnet => Network::Bitcoin,
        BitcoinNetwork::Testnet => Network::Testnet,
        BitcoinNetwork::Regtest | BitcoinNetwork::Devnet => Network::Regtest,
    }
}

/// Parses `address` and checks that it belongs to `network`.
pub fn parse_address(address: &str, network: BitcoinNetwork) -> Result<Address, MintTxError> {
    let unchecked: Address<NetworkUnchecked> =
        address.trim().parse().map_err(|e| MintTxError::InvalidAddress {
            address: address.to_owned(),
            reason: format!("{e}"),
        })?;

    let network = to_bitcoin_network(network);
    if !unchecked.is_valid_for_network(network) {
        return Err(MintTxError::NetworkMismatch {
            address: address.to_owned(),
            network,
        });
    }

    Ok(unchecked.assume_checked())
}
