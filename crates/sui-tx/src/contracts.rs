//! On-chain ids of the BYield Move packages.

use byield_primitives::SuiAddress;
use serde::{Deserialize, Serialize};

use crate::{MoveTarget, SuiTxError};

/// Fully qualified type of the native SUI coin.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

fn require_id(value: &str, field: &'static str) -> Result<SuiAddress, SuiTxError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SuiTxError::MissingContractConfig(field));
    }
    value.parse().map_err(|_| SuiTxError::InvalidObjectId {
        field,
        value: value.to_owned(),
    })
}

/// The nBTC package and its shared bridge object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NbtcContract {
    pub package_id: String,
    pub object_id: String,
}

impl NbtcContract {
    pub const MODULE: &'static str = "nbtc";

    pub fn package(&self) -> Result<SuiAddress, SuiTxError> {
        require_id(&self.package_id, "nbtc package id")
    }

    pub fn object(&self) -> Result<SuiAddress, SuiTxError> {
        require_id(&self.object_id, "nbtc object id")
    }

    /// `{package}::nbtc::NBTC`
    pub fn coin_type(&self) -> Result<String, SuiTxError> {
        Ok(format!("{}::{}::NBTC", self.package()?, Self::MODULE))
    }

    pub fn target(&self, function: &str) -> Result<MoveTarget, SuiTxError> {
        Ok(MoveTarget::new(self.package()?, Self::MODULE, function))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionContract {
    pub package_id: String,
    pub auction_id: String,
}

impl AuctionContract {
    pub const MODULE: &'static str = "auction";

    pub fn target(&self, function: &str) -> Result<MoveTarget, SuiTxError> {
        let package = require_id(&self.package_id, "auction package id")?;
        Ok(MoveTarget::new(package, Self::MODULE, function))
    }

    pub fn auction(&self) -> Result<SuiAddress, SuiTxError> {
        require_id(&self.auction_id, "auction object id")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockdropContract {
    pub package_id: String,
    pub lockdrop_id: String,
}

impl LockdropContract {
    pub const MODULE: &'static str = "lockdrop";

    pub fn target(&self, function: &str) -> Result<MoveTarget, SuiTxError> {
        let package = require_id(&self.package_id, "lockdrop package id")?;
        Ok(MoveTarget::new(package, Self::MODULE, function))
    }

    pub fn lockdrop(&self) -> Result<SuiAddress, SuiTxError> {
        require_id(&self.lockdrop_id, "lockdrop object id")
    }
}

/// Vault swapping SUI for nBTC at a fixed rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapContract {
    pub package_id: String,
    pub vault_id: String,
}

impl SwapContract {
    pub const MODULE: &'static str = "nbtc_swap";

    pub fn target(&self, function: &str) -> Result<MoveTarget, SuiTxError> {
        let package = require_id(&self.package_id, "swap package id")?;
        Ok(MoveTarget::new(package, Self::MODULE, function))
    }

    pub fn vault(&self) -> Result<SuiAddress, SuiTxError> {
        require_id(&self.vault_id, "swap vault id")
    }
}

/// All contract ids of one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub nbtc: NbtcContract,
    pub auction: AuctionContract,
    pub lockdrop: LockdropContract,
    pub swap: SwapContract,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_are_missing_config() {
        let nbtc = NbtcContract {
            package_id: "  ".to_owned(),
            object_id: "0x5".to_owned(),
        };
        assert!(matches!(
            nbtc.package(),
            Err(SuiTxError::MissingContractConfig("nbtc package id"))
        ));
        assert!(nbtc.object().is_ok());
        assert!(matches!(
            ContractsConfig::default().swap.vault(),
            Err(SuiTxError::MissingContractConfig("swap vault id"))
        ));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let auction = AuctionContract {
            package_id: "not-hex".to_owned(),
            auction_id: String::new(),
        };
        assert!(matches!(
            auction.target("bid"),
            Err(SuiTxError::InvalidObjectId { field: "auction package id", .. })
        ));
    }

    #[test]
    fn nbtc_coin_type() {
        let nbtc = NbtcContract {
            package_id: "0xaa".to_owned(),
            object_id: String::new(),
        };
        let coin_type = nbtc.coin_type().unwrap();
        assert!(coin_type.ends_with("aa::nbtc::NBTC"));
        assert!(coin_type.starts_with("0x0000"));
    }
}
