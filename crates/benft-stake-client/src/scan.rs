//! Read-only report of the wallet's staked BeNFT accounts.
//!
//! SPL token account layout (165 bytes, all little-endian):
//!   [0..32]    mint
//!   [32..64]   owner
//!   [64..72]   amount u64
//!   [72..108]  delegate COption<Pubkey>
//!   [108]      state u8 (1 = initialized, 2 = frozen)
//!   [109..121] is_native COption<u64>
//!   [121..129] delegated_amount u64
//!   [129..165] close_authority COption<Pubkey>
//!
//! The scan filters on the full account size plus the mint and owner
//! fields at their fixed offsets, then unpacks each match with the token
//! program's own layout code.

use anyhow::Context;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::{Account as TokenAccount, AccountState};

use benft_stake_tx::constants::{benft_mint, BENFT_TOKEN_DECIMALS, TOKEN_ACCOUNT_SIZE};

/// Byte offset of the mint field in a token account.
const MINT_OFFSET: usize = 0;
/// Byte offset of the owner field in a token account.
const OWNER_OFFSET: usize = 32;

/// One BeNFT token account whose owner field matches the wallet.
#[derive(Debug)]
pub struct StakedAccount {
    pub address: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub frozen: bool,
}

pub fn stake_account_filters(wallet: &Pubkey) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::DataSize(TOKEN_ACCOUNT_SIZE),
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            MINT_OFFSET,
            benft_mint().as_ref(),
        )),
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(OWNER_OFFSET, wallet.as_ref())),
    ]
}

/// Fetch every BeNFT token account owned by `wallet`.
pub async fn get_staked_accounts(
    rpc: &RpcClient,
    wallet: &Pubkey,
) -> anyhow::Result<Vec<StakedAccount>> {
    let config = RpcProgramAccountsConfig {
        filters: Some(stake_account_filters(wallet)),
        account_config: RpcAccountInfoConfig {
            // 165-byte accounts exceed the RPC default encoding's 128-byte cap.
            encoding: Some(UiAccountEncoding::Base64),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    };

    let accounts = rpc
        .get_program_accounts_with_config(&spl_token::id(), config)
        .await
        .context("program accounts scan failed")?;

    let mut staked = Vec::with_capacity(accounts.len());
    for (address, account) in accounts {
        let token_account = TokenAccount::unpack(&account.data)
            .with_context(|| format!("token account {address} failed to unpack"))?;
        staked.push(StakedAccount {
            address,
            amount: token_account.amount,
            delegate: token_account.delegate.into(),
            delegated_amount: token_account.delegated_amount,
            frozen: token_account.state == AccountState::Frozen,
        });
    }
    Ok(staked)
}

/// Render a base-unit amount as whole tokens with the full fractional part.
pub fn format_token_amount(base_units: u64) -> String {
    let scale = 10u64.pow(BENFT_TOKEN_DECIMALS as u32);
    format!("{}.{:09}", base_units / scale, base_units % scale)
}
