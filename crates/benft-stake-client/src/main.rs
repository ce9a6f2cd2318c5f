mod config;
mod scan;
mod service;
mod stake;
mod wallet;

use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Signer;

use stake::{AttemptPhase, StakeAttempt, TransactionSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benft_stake_client=info".parse().unwrap()),
        )
        .init();

    let config = config::Config::parse();
    let rpc = RpcClient::new(config.rpc_url.clone());
    let wallet = wallet::load_wallet_keypair(&config.keypair)?;

    tracing::info!(wallet = %wallet.pubkey(), "wallet loaded");

    match config.command {
        config::Command::List => {
            let staked = scan::get_staked_accounts(&rpc, &wallet.pubkey()).await?;
            if staked.is_empty() {
                println!("no staked BeNFT accounts");
                return Ok(());
            }
            for account in staked {
                println!(
                    "{}  balance={} frozen={} delegate={} delegated_amount={}",
                    account.address,
                    scan::format_token_amount(account.amount),
                    account.frozen,
                    account
                        .delegate
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "none".to_owned()),
                    scan::format_token_amount(account.delegated_amount),
                );
            }
        }
        config::Command::Stake { amount } => {
            let api_client = config.api_url.as_deref().map(service::StakeApiClient::new);
            let source = match &api_client {
                Some(client) => TransactionSource::Service(client),
                None => {
                    let address = config.staking_authority.as_deref().ok_or_else(|| {
                        anyhow::anyhow!("--staking-authority is required when no --api-url is set")
                    })?;
                    let staking_authority = address
                        .parse()
                        .map_err(|e| anyhow::anyhow!("invalid staking authority: {e}"))?;
                    TransactionSource::Local { staking_authority }
                }
            };

            let mut attempt = StakeAttempt::new();
            let phase = attempt.run(&rpc, &wallet, amount, source).await;
            if phase == AttemptPhase::Failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
