//! One stake attempt: obtain the transaction, finish signing, submit.
//!
//! An attempt walks Idle → Requesting → Submitting → Succeeded | Failed.
//! Terminal states are final; there is no retry and no cancellation once a
//! transaction has been handed to the RPC node. Every attempt uses its own
//! freshly generated auxiliary account, so concurrent attempts never share
//! state beyond the append-only log.

use anyhow::Context;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use benft_stake_tx::{
    instructions::StakePolicy, transaction::compose_stake_transaction, validate::scale_amount,
};

use crate::service::StakeApiClient;

/// Phases of a single stake attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Idle,
    Requesting,
    Submitting,
    Succeeded,
    Failed,
}

/// Append-only log of attempt events. Lines are rendered as they are
/// appended and kept for the final report.
#[derive(Default)]
pub struct AttemptLog {
    lines: Vec<String>,
}

impl AttemptLog {
    pub fn append(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{line}");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// How an attempt obtains its partially-signed transaction.
pub enum TransactionSource<'a> {
    /// POST to the stake service; the service holds the authority keys and
    /// picks the end-state policy.
    Service(&'a StakeApiClient),
    /// Build locally with the reassign policy — the only policy that needs
    /// no authority secret on this side.
    Local { staking_authority: Pubkey },
}

pub struct StakeAttempt {
    pub phase: AttemptPhase,
    pub log: AttemptLog,
}

impl StakeAttempt {
    pub fn new() -> Self {
        Self {
            phase: AttemptPhase::Idle,
            log: AttemptLog::default(),
        }
    }

    /// Drive the attempt to a terminal phase. Failures are logged and
    /// reported, never retried; on-chain state is untouched unless the
    /// submission itself succeeded.
    pub async fn run(
        &mut self,
        rpc: &RpcClient,
        wallet: &Keypair,
        amount_tokens: u64,
        source: TransactionSource<'_>,
    ) -> AttemptPhase {
        self.phase = AttemptPhase::Requesting;
        self.log
            .append(format!("requesting stake for {amount_tokens} tokens"));

        let mut tx = match self
            .obtain_transaction(rpc, &wallet.pubkey(), amount_tokens, source)
            .await
        {
            Ok(tx) => tx,
            Err(e) => {
                self.log.append(format!("error: {e}"));
                self.phase = AttemptPhase::Failed;
                return self.phase;
            }
        };

        self.phase = AttemptPhase::Submitting;
        let recent_blockhash = tx.message.recent_blockhash;
        tx.partial_sign(&[wallet], recent_blockhash);

        match rpc.send_and_confirm_transaction(&tx).await {
            Ok(signature) => {
                self.log.append(format!(
                    "stake for {amount_tokens} tokens successful: transaction signature {signature}"
                ));
                self.phase = AttemptPhase::Succeeded;
            }
            Err(e) => {
                self.log.append(format!(
                    "stake for {amount_tokens} tokens unsuccessful: {e}"
                ));
                self.phase = AttemptPhase::Failed;
            }
        }
        self.phase
    }

    async fn obtain_transaction(
        &mut self,
        rpc: &RpcClient,
        wallet: &Pubkey,
        amount_tokens: u64,
        source: TransactionSource<'_>,
    ) -> anyhow::Result<Transaction> {
        match source {
            TransactionSource::Service(client) => {
                client.request_stake_transaction(wallet, amount_tokens).await
            }
            TransactionSource::Local { staking_authority } => {
                let amount = scale_amount(amount_tokens)?;
                let aux_account = Keypair::new();
                let policy = StakePolicy::ReassignOwnership { staking_authority };

                let recent_blockhash = rpc
                    .get_latest_blockhash()
                    .await
                    .context("failed to fetch a recent blockhash")?;

                let mut tx = compose_stake_transaction(
                    wallet,
                    &aux_account.pubkey(),
                    amount,
                    &policy,
                    recent_blockhash,
                )?;
                // The new account signs its own creation.
                tx.partial_sign(&[&aux_account], recent_blockhash);
                Ok(tx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_log_is_append_only() {
        let mut log = AttemptLog::default();
        log.append("first");
        log.append("second");
        assert_eq!(log.lines(), ["first", "second"]);

        log.append("third");
        assert_eq!(log.lines()[..2], ["first", "second"]);
    }

    #[tokio::test]
    async fn invalid_amount_fails_before_any_network_call() {
        // Unroutable endpoint: reaching it would hang or error differently,
        // so a fast InvalidAmount failure proves validation came first.
        let rpc = RpcClient::new("http://127.0.0.1:1".to_owned());
        let wallet = Keypair::new();

        let mut attempt = StakeAttempt::new();
        let phase = attempt
            .run(
                &rpc,
                &wallet,
                0,
                TransactionSource::Local {
                    staking_authority: Keypair::new().pubkey(),
                },
            )
            .await;

        assert_eq!(phase, AttemptPhase::Failed);
        assert_eq!(attempt.log.lines().len(), 2);
        assert!(attempt.log.lines()[1].starts_with("error:"));
    }
}
