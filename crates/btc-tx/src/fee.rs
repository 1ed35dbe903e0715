use bitcoin::{
    absolute::LockTime, hashes::Hash, transaction::Version, Amount, FeeRate, OutPoint, ScriptBuf,
    Sequence, Transaction, TxIn, TxOut, Txid, Witness,
};

use crate::{op_return_script, MintTxError};

/// Size of a DER signature with sighash byte, upper bound.
const P2WPKH_SIG_LEN: usize = 72;
const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Virtual size of a mint transaction spending one P2WPKH input.
///
/// Output scripts only contribute their length, so any script of the right type works as a
/// placeholder.
pub fn estimate_mint_vsize(
    deposit_script: &ScriptBuf,
    change_script: &ScriptBuf,
    payload: &[u8],
) -> Result<u64, MintTxError> {
    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::new(Txid::all_zeros(), 0),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::from_slice(&[
                vec![0u8; P2WPKH_SIG_LEN],
                vec![0u8; COMPRESSED_PUBKEY_LEN],
            ]),
        }],
        output: vec![
            TxOut {
                value: Amount::ZERO,
                script_pubkey: deposit_script.clone(),
            },
            TxOut {
                value: Amount::ZERO,
                script_pubkey: op_return_script(payload)?,
            },
            TxOut {
                value: Amount::ZERO,
                script_pubkey: change_script.clone(),
            },
        ],
    };

    Ok(tx.vsize() as u64)
}

/// Fee for a mint transaction at `sat_per_vb`.
pub fn estimate_mint_fee(
    deposit_script: &ScriptBuf,
    change_script: &ScriptBuf,
    payload: &[u8],
    sat_per_vb: u64,
) -> Result<Amount, MintTxError> {
    let vsize = estimate_mint_vsize(deposit_script, change_script, payload)?;
    let rate = FeeRate::from_sat_per_vb(sat_per_vb).unwrap_or(FeeRate::MAX);
    Ok(rate.fee_vb(vsize).unwrap_or(Amount::MAX_MONEY))
}

#[cfg(test)]
mod tests {
    use bitcoin::{WPubkeyHash, WScriptHash};

    use super::*;

    fn p2wpkh() -> ScriptBuf {
        ScriptBuf::new_p2wpkh(&WPubkeyHash::from_byte_array([3; 20]))
    }

    fn p2wsh() -> ScriptBuf {
        ScriptBuf::new_p2wsh(&WScriptHash::from_byte_array([4; 32]))
    }

    #[test]
    fn vsize_of_typical_mint() {
        // 10.5 vB overhead, 68 vB input, 43 + 44 + 31 vB outputs
        let vsize = estimate_mint_vsize(&p2wsh(), &p2wpkh(), &[0; 33]).unwrap();
        assert_eq!(vsize, 197);
    }

    #[test]
    fn larger_payload_costs_more() {
        let small = estimate_mint_vsize(&p2wpkh(), &p2wpkh(), &[0; 10]).unwrap();
        let large = estimate_mint_vsize(&p2wpkh(), &p2wpkh(), &[0; 80]).unwrap();
        assert!(large >= small + 70);
    }

    #[test]
    fn fee_scales_with_rate() {
        let vsize = estimate_mint_vsize(&p2wpkh(), &p2wpkh(), &[0; 33]).unwrap();
        let fee = estimate_mint_fee(&p2wpkh(), &p2wpkh(), &[0; 33], 3).unwrap();
        assert_eq!(fee.to_sat(), vsize * 3);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        assert!(estimate_mint_fee(&p2wpkh(), &p2wpkh(), &[0; 81], 1).is_err());
    }
}
