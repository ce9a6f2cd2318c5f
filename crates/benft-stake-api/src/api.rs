//! REST API handlers.
//!
//! `POST /api/stake` builds the stake-custody transaction for a wallet:
//! validates the request, generates a fresh auxiliary account keypair,
//! attaches a recent blockhash, co-signs with the keys this deployment
//! holds, and returns the partially-signed transaction as base64. The
//! wallet signature slot is always left open for the caller.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::sync::Arc;

use benft_stake_tx::{
    instructions::StakePolicy,
    transaction::{compose_stake_transaction, encode_transaction_base64},
    validate::{parse_wallet, scale_amount},
};

// ============================================================================
// App state
// ============================================================================

/// Authority material held by this deployment, fixed at startup.
pub enum StakeAuthority {
    Freeze {
        delegate: Pubkey,
        freeze_keypair: Keypair,
    },
    Reassign {
        staking_authority: Pubkey,
    },
}

impl StakeAuthority {
    fn policy(&self) -> StakePolicy {
        match self {
            StakeAuthority::Freeze {
                delegate,
                freeze_keypair,
            } => StakePolicy::FreezeAndDelegate {
                delegate: *delegate,
                freeze_authority: freeze_keypair.pubkey(),
            },
            StakeAuthority::Reassign { staking_authority } => StakePolicy::ReassignOwnership {
                staking_authority: *staking_authority,
            },
        }
    }
}

/// Cheaply cloneable shared state passed to all axum handlers.
#[derive(Clone)]
pub struct AppState(Arc<AppInner>);

struct AppInner {
    rpc: RpcClient,
    authority: StakeAuthority,
}

impl AppState {
    pub fn new(rpc: RpcClient, authority: StakeAuthority) -> Self {
        Self(Arc::new(AppInner { rpc, authority }))
    }
}

// ============================================================================
// Request/response types
// ============================================================================

#[derive(Deserialize)]
pub struct StakeRequest {
    pub wallet: String,
    /// Whole tokens. Accepted as a raw JSON number so that negative and
    /// fractional values get a 400 with a message instead of a framework
    /// rejection.
    pub amount: serde_json::Number,
}

/// Validate a stake request: on-curve wallet, positive integer amount.
/// Returns the parsed wallet and the amount scaled to base units.
fn validate_request(req: &StakeRequest) -> Result<(Pubkey, u64), String> {
    let wallet = parse_wallet(&req.wallet).map_err(|e| e.to_string())?;

    let tokens = match req.amount.as_i64() {
        Some(n) if n > 0 => n as u64,
        Some(n) => return Err(format!("amount must be greater than 0, got: {n}")),
        None => return Err(format!("amount must be a positive integer, got: {}", req.amount)),
    };
    let amount = scale_amount(tokens).map_err(|e| e.to_string())?;

    Ok((wallet, amount))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn stake(
    State(state): State<AppState>,
    Json(req): Json<StakeRequest>,
) -> impl IntoResponse {
    let (wallet, amount) = match validate_request(&req) {
        Ok(validated) => validated,
        Err(message) => {
            tracing::warn!(wallet = %req.wallet, "stake request rejected: {message}");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            );
        }
    };

    // One single-purpose account per stake; the keypair never outlives
    // this request.
    let aux_account = Keypair::new();

    let recent_blockhash = match state.0.rpc.get_latest_blockhash().await {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("blockhash fetch failed: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("failed to fetch a recent blockhash: {e}") })),
            );
        }
    };

    let policy = state.0.authority.policy();
    let mut tx = match compose_stake_transaction(
        &wallet,
        &aux_account.pubkey(),
        amount,
        &policy,
        recent_blockhash,
    ) {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("stake transaction compose failed: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    // The wallet slot stays open; the caller signs last.
    match &state.0.authority {
        StakeAuthority::Freeze { freeze_keypair, .. } => {
            tx.partial_sign(&[freeze_keypair, &aux_account], recent_blockhash);
        }
        StakeAuthority::Reassign { .. } => {
            tx.partial_sign(&[&aux_account], recent_blockhash);
        }
    }

    let transaction = match encode_transaction_base64(&tx) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::error!("stake transaction encode failed: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    tracing::info!(
        wallet = %wallet,
        aux = %aux_account.pubkey(),
        amount_base_units = amount,
        "stake transaction issued",
    );

    (StatusCode::OK, Json(json!({ "transaction": transaction })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(wallet: &str, amount: serde_json::Number) -> StakeRequest {
        StakeRequest {
            wallet: wallet.to_owned(),
            amount,
        }
    }

    #[test]
    fn valid_request_scales_to_base_units() {
        let wallet = Keypair::new().pubkey();
        let (parsed, amount) =
            validate_request(&request(&wallet.to_string(), 5.into())).unwrap();
        assert_eq!(parsed, wallet);
        assert_eq!(amount, 5_000_000_000);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let wallet = Keypair::new().pubkey().to_string();
        assert!(validate_request(&request(&wallet, 0.into())).is_err());
        assert!(validate_request(&request(&wallet, (-3).into())).is_err());
    }

    #[test]
    fn fractional_amounts_are_rejected() {
        let wallet = Keypair::new().pubkey().to_string();
        let fractional = serde_json::Number::from_f64(1.5).unwrap();
        let err = validate_request(&request(&wallet, fractional)).unwrap_err();
        assert!(err.contains("integer"));
    }

    #[test]
    fn bad_wallets_are_rejected_before_the_amount_is_looked_at() {
        let err = validate_request(&request("garbage", 5.into())).unwrap_err();
        assert!(err.contains("on-curve"));

        let (pda, _) =
            Pubkey::find_program_address(&[b"stake"], &solana_sdk::system_program::id());
        assert!(validate_request(&request(&pda.to_string(), 5.into())).is_err());
    }
}
