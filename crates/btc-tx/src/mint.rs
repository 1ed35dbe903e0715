use base64::{engine::general_purpose::STANDARD, Engine};
use bitcoin::{
    absolute::LockTime,
    opcodes::all::OP_RETURN,
    script::{Builder, PushBytesBuf},
    transaction::Version,
    Address, Amount, Psbt, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness,
};
use byield_primitives::SuiAddress;
use tracing::debug;

use crate::{MintTxError, Utxo};

/// Largest OP_RETURN payload relayed by standard nodes.
pub const MAX_OP_RETURN_PAYLOAD: usize = 80;

/// Leading byte of the nBTC mint payload.
pub const NBTC_PAYLOAD_VERSION: u8 = 0x00;

/// Unsigned mint transaction ready to be handed to a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct MintTxTemplate {
    pub psbt: Psbt,
    /// Value returned to the sender.
    pub change: Amount,
}

impl MintTxTemplate {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.psbt.serialize())
    }

    pub fn to_hex(&self) -> String {
        self.psbt.serialize_hex()
    }

    pub fn unsigned_tx(&self) -> &Transaction {
        &self.psbt.unsigned_tx
    }
}

/// Payload instructing the bridge to mint to `recipient`.
pub fn nbtc_mint_payload(recipient: &SuiAddress) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + recipient.as_bytes().len());
    payload.push(NBTC_PAYLOAD_VERSION);
    payload.extend_from_slice(recipient.as_bytes());
    payload
}

/// `OP_RETURN <payload>` script.
pub fn op_return_script(payload: &[u8]) -> Result<ScriptBuf, MintTxError> {
    if payload.len() > MAX_OP_RETURN_PAYLOAD {
        return Err(MintTxError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_OP_RETURN_PAYLOAD,
        });
    }
    let data = PushBytesBuf::try_from(payload.to_vec()).map_err(|_| {
        MintTxError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_OP_RETURN_PAYLOAD,
        }
    })?;

    Ok(Builder::new()
        .push_opcode(OP_RETURN)
        .push_slice(data)
        .into_script())
}

/// Builds the deposit transaction for an nBTC mint.
///
/// Only `utxos[0]` is spent. Outputs are, in order: `amount` to `deposit_address`, a zero value
/// `OP_RETURN` carrying `payload`, and the remainder minus `fee` back to `change_address`.
pub fn build_mint_transaction(
    utxos: &[Utxo],
    change_address: &Address,
    deposit_address: &Address,
    amount: Amount,
    payload: &[u8],
    fee: Amount,
) -> Result<MintTxTemplate, MintTxError> {
    let utxo = utxos.first().ok_or(MintTxError::NoUtxosAvailable)?;
    let op_return = op_return_script(payload)?;

    let insufficient = || MintTxError::InsufficientFunds {
        available: utxo.value.to_sat(),
        required: amount.to_sat().saturating_add(fee.to_sat()),
    };
    let required = amount.checked_add(fee).ok_or_else(insufficient)?;
    let change = utxo
        .value
        .checked_sub(required)
        .filter(|change| *change > Amount::ZERO)
        .ok_or_else(insufficient)?;

    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: utxo.outpoint(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::default(),
        }],
        output: vec![
            TxOut {
                value: amount,
                script_pubkey: deposit_address.script_pubkey(),
            },
            TxOut {
                value: Amount::ZERO,
                script_pubkey: op_return,
            },
            TxOut {
                value: change,
                script_pubkey: change_address.script_pubkey(),
            },
        ],
    };

    let mut psbt = Psbt::from_unsigned_tx(tx)?;
    if utxo.script_pubkey.is_witness_program() {
        psbt.inputs[0].witness_utxo = Some(utxo.to_txout());
    }

    debug!(
        outpoint = %utxo.outpoint(),
        %amount,
        %fee,
        %change,
        payload_len = payload.len(),
        "built mint transaction"
    );

    Ok(MintTxTemplate { psbt, change })
}
