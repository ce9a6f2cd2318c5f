//! HTTP client for the stake service.
//!
//! The service builds the custody transaction, co-signs with the authority
//! keys it holds, and returns the bincode/base64 wire form; the wallet
//! fills its open signature slot and submits.

use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};

use benft_stake_tx::transaction::decode_transaction_base64;

#[derive(Serialize)]
struct StakeRequestBody<'a> {
    wallet: &'a str,
    amount: u64,
}

#[derive(Deserialize)]
struct StakeResponseBody {
    transaction: Option<String>,
    error: Option<String>,
}

pub struct StakeApiClient {
    url: String,
    http: reqwest::Client,
}

impl StakeApiClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    /// Request a partially-signed stake transaction for `amount` whole
    /// tokens. The returned transaction still needs the wallet signature.
    pub async fn request_stake_transaction(
        &self,
        wallet: &Pubkey,
        amount: u64,
    ) -> anyhow::Result<Transaction> {
        let wallet = wallet.to_string();
        let body = StakeRequestBody {
            wallet: &wallet,
            amount,
        };

        let resp: StakeResponseBody = self
            .http
            .post(format!("{}/api/stake", self.url))
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("stake service HTTP error: {e}"))?
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("stake service response parse error: {e}"))?;

        match resp.transaction {
            Some(encoded) => Ok(decode_transaction_base64(&encoded)?),
            None => {
                let msg = resp
                    .error
                    .unwrap_or_else(|| "no transaction and no error".into());
                Err(anyhow::anyhow!("stake service rejected the request: {msg}"))
            }
        }
    }
}
