use bitcoin::{Amount, ScriptBuf, Txid};
use byield_btc_tx::Utxo;
use serde::{Deserialize, Serialize};

/// Confirmation status of a transaction as esplora reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_time: Option<u64>,
}

impl TxStatus {
    /// Number of confirmations given the current chain tip, zero while unconfirmed.
    pub fn confirmations(&self, tip_height: u64) -> u32 {
        match self.block_height {
            Some(height) if self.confirmed && tip_height >= height => {
                u32::try_from(tip_height - height + 1).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }
}

/// Entry of `/address/{address}/utxo`. The script is not part of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsploraUtxo {
    pub txid: Txid,
    pub vout: u32,
    pub value: u64,
    #[serde(default)]
    pub status: TxStatus,
}

impl EsploraUtxo {
    pub fn into_utxo(self, script_pubkey: ScriptBuf) -> Utxo {
        Utxo {
            txid: self.txid,
            vout: self.vout,
            value: Amount::from_sat(self.value),
            script_pubkey,
        }
    }
}

/// Fee rates in sat/vB from `/v1/fees/recommended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFees {
    pub fastest_fee: u64,
    pub half_hour_fee: u64,
    pub hour_fee: u64,
    pub economy_fee: u64,
    pub minimum_fee: u64,
}

/// Result of `/v1/validate-address/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValidation {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "scriptPubKey")]
    pub script_pubkey: Option<String>,
    #[serde(default, rename = "iswitness")]
    pub is_witness: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
