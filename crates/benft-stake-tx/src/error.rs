use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakeError {
    #[error("wallet must be an on-curve public key, got: {0}")]
    InvalidWallet(String),
    #[error("amount must be greater than 0, got: {0}")]
    InvalidAmount(u64),
    #[error("amount {0} overflows the mint's base units")]
    AmountOverflow(u64),
    #[error("instruction build: {0}")]
    Instruction(#[from] solana_sdk::program_error::ProgramError),
    #[error("transaction serialize: {0}")]
    Serialize(String),
    #[error("transaction deserialize: {0}")]
    Deserialize(String),
}
