//! The stake instruction sequence.
//!
//! Five (or six) instructions in fixed order move the staked amount into a
//! fresh single-purpose token account and hand control to the configured
//! authority:
//!   1. system create-account — wallet funds the auxiliary account
//!   2. initialize-account    — BeNFT token account owned by the wallet
//!   3. transfer              — wallet's associated account → auxiliary account
//!   4. approve               — delegation per policy
//!   5. freeze-account, or set-authority twice (owner, then close)

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_associated_token_account::get_associated_token_address;
use spl_token::instruction::{
    approve, freeze_account, initialize_account, set_authority, transfer, AuthorityType,
};

use crate::{constants, error::StakeError};

/// End state applied to the auxiliary account after the transfer lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakePolicy {
    /// Approve `delegate` for the full staked amount, then freeze the
    /// account with the mint's freeze authority. The freeze authority must
    /// co-sign the transaction.
    FreezeAndDelegate {
        delegate: Pubkey,
        freeze_authority: Pubkey,
    },
    /// Approve the wallet itself for amount 0 — the delegation only records
    /// which wallet funded the account — then hand the owner authority and
    /// the close authority to `staking_authority`.
    ReassignOwnership { staking_authority: Pubkey },
}

/// Build the fixed instruction sequence for one stake.
///
/// `amount` is in base units (already scaled by the mint's decimals).
/// `aux_account` is the public key of a freshly generated keypair; the
/// caller keeps the keypair to sign the account's own creation.
#[allow(deprecated)]
pub fn stake_instruction_sequence(
    wallet: &Pubkey,
    aux_account: &Pubkey,
    amount: u64,
    policy: &StakePolicy,
) -> Result<Vec<Instruction>, StakeError> {
    let mint = constants::benft_mint();
    let token_program = spl_token::id();
    let source = get_associated_token_address(wallet, &mint);

    let mut sequence = vec![
        system_instruction::create_account(
            wallet,
            aux_account,
            constants::TOKEN_ACCOUNT_RENT_EXEMPT_LAMPORTS,
            constants::TOKEN_ACCOUNT_SIZE,
            &token_program,
        ),
        initialize_account(&token_program, aux_account, &mint, wallet)?,
        transfer(&token_program, &source, aux_account, wallet, &[], amount)?,
    ];

    match policy {
        StakePolicy::FreezeAndDelegate {
            delegate,
            freeze_authority,
        } => {
            sequence.push(approve(
                &token_program,
                aux_account,
                delegate,
                wallet,
                &[],
                amount,
            )?);
            sequence.push(freeze_account(
                &token_program,
                aux_account,
                &mint,
                freeze_authority,
                &[],
            )?);
        }
        StakePolicy::ReassignOwnership { staking_authority } => {
            sequence.push(approve(&token_program, aux_account, wallet, wallet, &[], 0)?);
            sequence.push(set_authority(
                &token_program,
                aux_account,
                Some(staking_authority),
                AuthorityType::AccountOwner,
                wallet,
                &[],
            )?);
            sequence.push(set_authority(
                &token_program,
                aux_account,
                Some(staking_authority),
                AuthorityType::CloseAccount,
                wallet,
                &[],
            )?);
        }
    }

    Ok(sequence)
}
