use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "benft-stake", about = "BeNFT staking wallet client")]
pub struct Config {
    /// Solana RPC endpoint.
    #[arg(
        long,
        default_value = "https://api.mainnet-beta.solana.com",
        env = "BENFT_RPC_URL"
    )]
    pub rpc_url: String,

    /// Path to the wallet keypair file (Solana CLI JSON format).
    #[arg(long, default_value = "wallet.json", env = "BENFT_WALLET_KEYPAIR")]
    pub keypair: PathBuf,

    /// Stake service URL, e.g. https://stake.example.com.
    /// When set, the transaction is requested from the service (which holds
    /// the authority keys); when absent, it is built locally with the
    /// reassign policy and --staking-authority is required.
    #[arg(long, env = "BENFT_STAKE_API_URL")]
    pub api_url: Option<String>,

    /// Staking authority that receives owner + close authority of locally
    /// built stakes.
    #[arg(long, env = "BENFT_STAKING_AUTHORITY")]
    pub staking_authority: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List this wallet's staked BeNFT accounts.
    List,
    /// Stake an amount of whole BeNFT tokens.
    Stake {
        #[arg(long)]
        amount: u64,
    },
}
