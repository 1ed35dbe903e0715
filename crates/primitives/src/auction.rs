//! Read-only projections of the auction leaderboard.

use serde::{Deserialize, Serialize};

use crate::sui::SuiAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidder {
    pub rank: u32,
    pub bidder: SuiAddress,
    /// Bid in mist.
    #[serde(with = "u64_string_or_number")]
    pub amount: u64,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    bidders: Vec<Bidder>,
}

impl Leaderboard {
    /// Builds a leaderboard ordered by rank.
    pub fn new(mut bidders: Vec<Bidder>) -> Self {
        bidders.sort_by_key(|b| b.rank);
        Self { bidders }
    }

    pub fn bidders(&self) -> &[Bidder] {
        &self.bidders
    }

    pub fn find(&self, bidder: &SuiAddress) -> Option<&Bidder> {
        self.bidders.iter().find(|b| &b.bidder == bidder)
    }

    /// Lowest bid that still ranks within the first `slots` positions.
    pub fn cutoff(&self, slots: usize) -> Option<u64> {
        self.bidders
            .iter()
            .filter(|b| (b.rank as usize) <= slots)
            .map(|b| b.amount)
            .min()
    }
}

/// Sui RPCs encode `u64` values as strings; the leaderboard service uses both forms.
mod u64_string_or_number {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub(super) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
