//! Conversion between human readable decimal amounts and integer base units.
//!
//! Amounts are entered and displayed as decimal strings (`"0.5"`) but every transaction
//! builder works in integer base units (satoshis, mist, micro-USDC). Parsing is exact: an
//! input with more fractional digits than the denomination supports is rejected instead of
//! being rounded.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimals of BTC and nBTC (1 BTC = 10^8 satoshis).
pub const BTC_DECIMALS: u32 = 8;

/// Decimals of SUI (1 SUI = 10^9 mist).
pub const SUI_DECIMALS: u32 = 9;

/// Decimals of USDC.
pub const USDC_DECIMALS: u32 = 6;

/// `10^38` is the largest power of ten representable in an `i128`.
const MAX_DECIMALS: u32 = 38;

/// Errors produced while parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount: empty input")]
    Empty,

    #[error("invalid amount: '{0}' is not a decimal number")]
    Malformed(String),

    #[error("invalid amount: {found} fractional digits exceed the {decimals} supported")]
    TooManyDecimals { decimals: u32, found: usize },

    #[error("invalid amount: '{0}' does not fit in base units")]
    Overflow(String),

    #[error("invalid amount: '{0}' must not be negative")]
    Negative(String),

    #[error("invalid amount: precision of {0} decimals is not supported")]
    UnsupportedDecimals(u32),
}

/// Parses a signed decimal string into integer base units with `decimals` fractional digits.
///
/// Accepts an optional `+`/`-` sign, integer digits, an optional single `.` and fractional
/// digits. Either digit group may be empty but not both, so `".5"` and `"5."` parse while `"."`
/// does not.
pub fn parse_units(amount: &str, decimals: u32) -> Result<i128, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, body) = if let Some(rest) = amount.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = amount.strip_prefix('+') {
        (false, rest)
    } else {
        (false, amount)
    };

    let (int_digits, frac_digits) = body.split_once('.').unwrap_or((body, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_digits.is_empty() && frac_digits.is_empty())
        || !all_digits(int_digits)
        || !all_digits(frac_digits)
    {
        return Err(AmountError::Malformed(amount.to_owned()));
    }

    if frac_digits.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            decimals,
            found: frac_digits.len(),
        });
    }

    let overflow = || AmountError::Overflow(amount.to_owned());
    let int_value = accumulate_digits(int_digits).ok_or_else(overflow)?;
    // pad the fraction on the right up to `decimals` digits
    let frac_scale = 10i128.pow(decimals - frac_digits.len() as u32);
    let frac_value = accumulate_digits(frac_digits)
        .and_then(|v| v.checked_mul(frac_scale))
        .ok_or_else(overflow)?;

    let units = int_value
        .checked_mul(10i128.pow(decimals))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(overflow)?;

    Ok(if negative { -units } else { units })
}

fn accumulate_digits(digits: &str) -> Option<i128> {
    digits.bytes().try_fold(0i128, |acc, b| {
        acc.checked_mul(10)?.checked_add(i128::from(b - b'0'))
    })
}

/// Formats integer base units as a canonical decimal string.
///
/// The output has no leading zeros in the integer part, no trailing zeros in the fraction and
/// no decimal point when the fraction is zero, so it is the exact inverse of [`parse_units`]
/// for canonical inputs.
///
/// # Panics
///
/// Panics if `decimals` exceeds 38.
pub fn format_units(units: i128, decimals: u32) -> String {
    assert!(
        decimals <= MAX_DECIMALS,
        "format_units: unsupported precision {decimals}"
    );

    let scale = 10u128.pow(decimals);
    let magnitude = units.unsigned_abs();
    let int_part = magnitude / scale;
    let frac_part = magnitude % scale;

    let mut out = String::new();
    if units < 0 {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if frac_part != 0 {
        let padded = format!("{frac_part:0width$}", width = decimals as usize);
        out.push('.');
        out.push_str(padded.trim_end_matches('0'));
    }

    out
}

/// Tokens the bridge client moves around, with their base unit precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// BTC and nBTC, counted in satoshis.
    Btc,
    /// SUI, counted in mist.
    Sui,
    Usdc,
}

impl Denomination {
    pub fn decimals(&self) -> u32 {
        match self {
            Denomination::Btc => BTC_DECIMALS,
            Denomination::Sui => SUI_DECIMALS,
            Denomination::Usdc => USDC_DECIMALS,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Denomination::Btc => "BTC",
            Denomination::Sui => "SUI",
            Denomination::Usdc => "USDC",
        }
    }

    /// Parses a signed decimal amount of this denomination into base units.
    pub fn parse(&self, amount: &str) -> Result<i128, AmountError> {
        parse_units(amount, self.decimals())
    }

    /// Parses an amount that is about to be spent, rejecting negative values and values that do
    /// not fit in the `u64` on-chain representation.
    pub fn parse_spend(&self, amount: &str) -> Result<u64, AmountError> {
        let units = self.parse(amount)?;
        if units < 0 {
            return Err(AmountError::Negative(amount.to_owned()));
        }
        u64::try_from(units).map_err(|_| AmountError::Overflow(amount.to_owned()))
    }

    pub fn format(&self, units: i128) -> String {
        format_units(units, self.decimals())
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "btc" | "nbtc" => Ok(Denomination::Btc),
            "sui" => Ok(Denomination::Sui),
            "usdc" => Ok(Denomination::Usdc),
            other => Err(format!("unknown denomination '{other}'")),
        }
    }
}
