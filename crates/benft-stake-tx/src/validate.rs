//! Stake request input validation.

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::{constants::BENFT_TOKEN_DECIMALS, error::StakeError};

/// Parse a wallet address and require it to be an on-curve public key.
///
/// Program-derived addresses are off-curve and can never produce the
/// wallet signature the transaction needs, so they are rejected up front.
pub fn parse_wallet(address: &str) -> Result<Pubkey, StakeError> {
    let wallet = Pubkey::from_str(address)
        .map_err(|_| StakeError::InvalidWallet(address.to_owned()))?;
    if !wallet.is_on_curve() {
        return Err(StakeError::InvalidWallet(address.to_owned()));
    }
    Ok(wallet)
}

/// Scale a whole-token amount into the mint's base units.
pub fn scale_amount(amount: u64) -> Result<u64, StakeError> {
    if amount == 0 {
        return Err(StakeError::InvalidAmount(0));
    }
    amount
        .checked_mul(10u64.pow(BENFT_TOKEN_DECIMALS as u32))
        .ok_or(StakeError::AmountOverflow(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    #[test]
    fn accepts_an_on_curve_wallet() {
        let wallet = Keypair::new().pubkey();
        assert_eq!(parse_wallet(&wallet.to_string()).unwrap(), wallet);
    }

    #[test]
    fn rejects_an_off_curve_address() {
        // Program-derived addresses are off-curve by construction.
        let (pda, _) = Pubkey::find_program_address(&[b"stake"], &spl_token::id());
        assert!(matches!(
            parse_wallet(&pda.to_string()),
            Err(StakeError::InvalidWallet(_))
        ));
    }

    #[test]
    fn rejects_a_malformed_address() {
        assert!(matches!(
            parse_wallet("not-a-wallet"),
            Err(StakeError::InvalidWallet(_))
        ));
    }

    #[test]
    fn scales_by_the_mint_decimals() {
        assert_eq!(scale_amount(5).unwrap(), 5_000_000_000);
        assert_eq!(scale_amount(1).unwrap(), 1_000_000_000);
    }

    #[test]
    fn rejects_zero_and_overflowing_amounts() {
        assert!(matches!(scale_amount(0), Err(StakeError::InvalidAmount(0))));
        assert!(matches!(
            scale_amount(u64::MAX),
            Err(StakeError::AmountOverflow(_))
        ));
    }
}
