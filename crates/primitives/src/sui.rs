use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of a Sui account or object address in bytes.
pub const SUI_ADDRESS_LEN: usize = 32;

/// A 32-byte Sui account address.
///
/// Parsed from `0x`-prefixed hex. Short forms such as `0x2` are left-padded with zeros, which
/// matches how Sui normalizes framework addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SuiAddress([u8; SUI_ADDRESS_LEN]);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuiAddressError {
    #[error("sui address must start with 0x: '{0}'")]
    MissingPrefix(String),

    #[error("sui address has {0} hex digits, at most 64 allowed")]
    TooLong(usize),

    #[error("sui address is empty")]
    Empty,

    #[error("invalid hex in sui address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl SuiAddress {
    pub const fn new(bytes: [u8; SUI_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SUI_ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = SuiAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| SuiAddressError::MissingPrefix(s.to_owned()))?;
        if digits.is_empty() {
            return Err(SuiAddressError::Empty);
        }
        if digits.len() > SUI_ADDRESS_LEN * 2 {
            return Err(SuiAddressError::TooLong(digits.len()));
        }

        let padded = format!("{digits:0>width$}", width = SUI_ADDRESS_LEN * 2);
        let mut bytes = [0u8; SUI_ADDRESS_LEN];
        hex::decode_to_slice(padded, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({self})")
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_addresses() {
        let addr: SuiAddress = "0x6".parse().unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 6;
        assert_eq!(addr.as_bytes(), &expected);
        assert_eq!(
            addr.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000006"
        );
    }

    #[test]
    fn parses_full_length_address() {
        let s = "0xa1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";
        let addr: SuiAddress = s.parse().unwrap();
        assert_eq!(addr.to_string(), s);
        assert_eq!(addr.as_bytes()[0], 0xa1);
    }

    #[test]
    fn rejects_bad_addresses() {
        assert!(matches!(
            "a1b2".parse::<SuiAddress>(),
            Err(SuiAddressError::MissingPrefix(_))
        ));
        assert_eq!("0x".parse::<SuiAddress>(), Err(SuiAddressError::Empty));
        assert!(matches!(
            format!("0x{}", "1".repeat(65)).parse::<SuiAddress>(),
            Err(SuiAddressError::TooLong(65))
        ));
        assert!(matches!(
            "0xzz".parse::<SuiAddress>(),
            Err(SuiAddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr: SuiAddress = "0x2".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json,
            "\"0x0000000000000000000000000000000000000000000000000000000000000002\""
        );
        let back: SuiAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
