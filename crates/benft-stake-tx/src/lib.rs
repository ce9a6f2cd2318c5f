// benft-stake-tx: construction of BeNFT stake-custody transactions.
// Builds the fixed instruction sequence and the partially-signed wire form
// shared by the stake service and the wallet client.

pub mod constants;
pub mod error;
pub mod instructions;
pub mod transaction;
pub mod validate;
