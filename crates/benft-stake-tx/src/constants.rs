//! Shared constants for BeNFT staking.

use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// BeNFT mint address.
pub const BENFT_MINT_STR: &str = "BeNFTTK1zwAnDHTPmzGEnvfZzdWEBKZ1wt4BKkmKtXTv";

/// Decimal places of the BeNFT mint. One whole token = 10^9 base units.
pub const BENFT_TOKEN_DECIMALS: u8 = 9;

/// Size of an SPL token account (fixed layout, 165 bytes).
pub const TOKEN_ACCOUNT_SIZE: u64 = spl_token::state::Account::LEN as u64;

/// Rent-exempt minimum for a token account, in lamports.
pub const TOKEN_ACCOUNT_RENT_EXEMPT_LAMPORTS: u64 = 2_039_280;

pub fn benft_mint() -> Pubkey {
    Pubkey::from_str(BENFT_MINT_STR).expect("valid BeNFT mint address")
}
