//! Partially-signed stake transaction assembly and wire codec.
//!
//! The service composes the transaction, signs with the keys it holds
//! (the freeze authority where the policy needs it, plus the auxiliary
//! account's own key), and ships the result to the wallet as
//! base64-wrapped bincode. The wallet fills its open fee-payer slot and
//! submits. A transaction is invalid on-chain until every slot is filled;
//! partial signatures are only a wire state.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use solana_sdk::{
    hash::Hash, message::Message, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

use crate::{
    error::StakeError,
    instructions::{stake_instruction_sequence, StakePolicy},
};

/// Compose the unsigned stake transaction: the fixed instruction sequence
/// with the wallet as fee payer and a signature slot for every required
/// signer (wallet, auxiliary account, and the freeze authority under the
/// freeze policy).
pub fn compose_stake_transaction(
    wallet: &Pubkey,
    aux_account: &Pubkey,
    amount: u64,
    policy: &StakePolicy,
    recent_blockhash: Hash,
) -> Result<Transaction, StakeError> {
    let sequence = stake_instruction_sequence(wallet, aux_account, amount, policy)?;
    let message = Message::new_with_blockhash(&sequence, Some(wallet), &recent_blockhash);
    Ok(Transaction {
        signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
        message,
    })
}

pub fn encode_transaction_base64(tx: &Transaction) -> Result<String, StakeError> {
    let bytes = bincode::serialize(tx).map_err(|e| StakeError::Serialize(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

pub fn decode_transaction_base64(encoded: &str) -> Result<Transaction, StakeError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| StakeError::Deserialize(e.to_string()))?;
    bincode::deserialize(&bytes).map_err(|e| StakeError::Deserialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    fn compose_frozen(
        wallet: &Pubkey,
        aux: &Keypair,
        freeze: &Keypair,
    ) -> (Transaction, Hash) {
        let policy = StakePolicy::FreezeAndDelegate {
            delegate: Keypair::new().pubkey(),
            freeze_authority: freeze.pubkey(),
        };
        let blockhash = Hash::new_unique();
        let tx = compose_stake_transaction(wallet, &aux.pubkey(), 5_000_000_000, &policy, blockhash)
            .unwrap();
        (tx, blockhash)
    }

    #[test]
    fn fee_payer_is_the_wallet() {
        let wallet = Keypair::new().pubkey();
        let (tx, _) = compose_frozen(&wallet, &Keypair::new(), &Keypair::new());
        assert_eq!(tx.message.account_keys[0], wallet);
    }

    #[test]
    fn freeze_policy_needs_three_signers_and_reassign_two() {
        let wallet = Keypair::new().pubkey();
        let (tx, _) = compose_frozen(&wallet, &Keypair::new(), &Keypair::new());
        assert_eq!(tx.message.header.num_required_signatures, 3);

        let policy = StakePolicy::ReassignOwnership {
            staking_authority: Keypair::new().pubkey(),
        };
        let tx = compose_stake_transaction(
            &wallet,
            &Keypair::new().pubkey(),
            1_000_000_000,
            &policy,
            Hash::new_unique(),
        )
        .unwrap();
        assert_eq!(tx.message.header.num_required_signatures, 2);
    }

    #[test]
    fn partial_signing_leaves_the_wallet_slot_open() {
        let wallet = Keypair::new().pubkey();
        let aux = Keypair::new();
        let freeze = Keypair::new();
        let (mut tx, blockhash) = compose_frozen(&wallet, &aux, &freeze);

        tx.partial_sign(&[&freeze, &aux], blockhash);

        // Slot 0 belongs to the fee payer (the wallet) and must stay empty.
        assert_eq!(tx.signatures[0], Signature::default());
        assert_ne!(tx.signatures[1], Signature::default());
        assert_ne!(tx.signatures[2], Signature::default());
    }

    #[test]
    fn wire_round_trip_preserves_message_and_signatures() {
        let wallet = Keypair::new().pubkey();
        let aux = Keypair::new();
        let freeze = Keypair::new();
        let (mut tx, blockhash) = compose_frozen(&wallet, &aux, &freeze);
        tx.partial_sign(&[&freeze, &aux], blockhash);

        let encoded = encode_transaction_base64(&tx).unwrap();
        let decoded = decode_transaction_base64(&encoded).unwrap();

        assert_eq!(decoded.message, tx.message);
        assert_eq!(decoded.signatures, tx.signatures);
        assert_eq!(decoded.message.recent_blockhash, blockhash);
    }

    #[test]
    fn decoding_garbage_fails() {
        assert!(decode_transaction_base64("not base64 at all!").is_err());
        // Valid base64, not a transaction.
        assert!(decode_transaction_base64("AAECAwQ=").is_err());
    }
}
