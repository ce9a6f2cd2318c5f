mod api;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::{str::FromStr, sync::Arc};

use api::{AppState, StakeAuthority};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PolicyKind {
    /// Delegate the staked amount and freeze the auxiliary account.
    Freeze,
    /// Hand owner + close authority of the auxiliary account to the
    /// staking authority.
    Reassign,
}

#[derive(Parser, Debug)]
#[command(name = "benft-stake-api", about = "BeNFT stake transaction service")]
struct Config {
    /// HTTP listen address.
    #[arg(long, default_value = "0.0.0.0:8080", env = "BENFT_API_LISTEN")]
    listen: std::net::SocketAddr,

    /// Solana RPC endpoint used to fetch recent blockhashes.
    #[arg(long, env = "BENFT_RPC_URL")]
    rpc_url: String,

    /// End-state policy this deployment co-signs.
    #[arg(long, value_enum, default_value = "freeze", env = "BENFT_STAKE_POLICY")]
    policy: PolicyKind,

    /// Delegate granted spending rights over each staked account
    /// (freeze policy only).
    #[arg(long, env = "BENFT_DELEGATE_AUTHORITY", required_if_eq("policy", "freeze"))]
    delegate_authority: Option<String>,

    /// JSON-encoded 64-byte secret key of the BeNFT freeze authority
    /// (freeze policy only).
    #[arg(
        long,
        env = "BENFT_FREEZE_AUTHORITY_KEYPAIR",
        required_if_eq("policy", "freeze"),
        hide_env_values = true
    )]
    freeze_authority_keypair: Option<String>,

    /// Address that receives owner + close authority of each staked
    /// account (reassign policy only).
    #[arg(long, env = "BENFT_STAKING_AUTHORITY", required_if_eq("policy", "reassign"))]
    staking_authority: Option<String>,
}

impl Config {
    /// Resolve the policy-specific authority material. Any malformed value
    /// is fatal at startup — the service never runs half-configured.
    fn stake_authority(&self) -> anyhow::Result<StakeAuthority> {
        match self.policy {
            PolicyKind::Freeze => {
                let delegate = self
                    .delegate_authority
                    .as_deref()
                    .expect("clap enforces --delegate-authority for the freeze policy");
                let delegate = Pubkey::from_str(delegate)
                    .map_err(|e| anyhow::anyhow!("invalid delegate authority: {e}"))?;
                let raw = self
                    .freeze_authority_keypair
                    .as_deref()
                    .expect("clap enforces --freeze-authority-keypair for the freeze policy");
                let freeze_keypair = parse_keypair_json(raw)
                    .map_err(|e| anyhow::anyhow!("invalid freeze authority keypair: {e}"))?;
                Ok(StakeAuthority::Freeze {
                    delegate,
                    freeze_keypair,
                })
            }
            PolicyKind::Reassign => {
                let staking_authority = self
                    .staking_authority
                    .as_deref()
                    .expect("clap enforces --staking-authority for the reassign policy");
                let staking_authority = Pubkey::from_str(staking_authority)
                    .map_err(|e| anyhow::anyhow!("invalid staking authority: {e}"))?;
                Ok(StakeAuthority::Reassign { staking_authority })
            }
        }
    }
}

/// Parse a Solana keypair from its JSON form: an array of 64 bytes
/// (32-byte secret followed by the 32-byte public key).
fn parse_keypair_json(raw: &str) -> anyhow::Result<Keypair> {
    let bytes: Vec<u8> = serde_json::from_str(raw)?;
    Keypair::try_from(bytes.as_slice()).map_err(|e| anyhow::anyhow!("{e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benft_stake_api=info".parse().unwrap()),
        )
        .init();

    let config = Config::parse();
    let authority = config.stake_authority()?;

    tracing::info!(
        policy = ?config.policy,
        rpc = %config.rpc_url,
        "stake service starting",
    );

    let state = AppState::new(RpcClient::new(config.rpc_url), authority);

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/api/stake", post(api::stake))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state);

    tracing::info!("benft-stake-api listening on {}", config.listen);
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn keypair_json_round_trips() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let parsed = parse_keypair_json(&json).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn keypair_json_rejects_wrong_lengths() {
        assert!(parse_keypair_json("[1,2,3]").is_err());
        assert!(parse_keypair_json("not json").is_err());
    }
}
