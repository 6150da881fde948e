//! Transaction building, signing and broadcasting against a wallet node.
//!
//! A build walks one payload through
//! `unbuilt -> timestamped -> nonced -> feed -> hashed -> signed -> broadcast`,
//! one remote call per step. The first failing step ends the attempt; nothing
//! is retried.

use tracing::{debug, error};

use super::error::{at, BuildStage, TransactionError};
use super::payload::{PayloadState, TxOptions, TxPayload};
use crate::crypto::{PrivateKey, Signature};
use crate::wallet::{WalletClient, WalletConfig};

/// Builds and submits transactions through a wallet node.
#[derive(Debug, Clone)]
pub struct TransactionService {
    wallet: WalletClient,
}

impl TransactionService {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            wallet: WalletClient::new(config),
        }
    }

    /// Returns the underlying wallet node client.
    pub fn wallet(&self) -> &WalletClient {
        &self.wallet
    }

    /// Builds a hashed, unsigned payload, or `None` if any step fails.
    pub async fn build_transaction(&self, options: &TxOptions) -> Option<TxPayload> {
        self.try_build_transaction(options).await.map_err(report).ok()
    }

    /// Builds a hashed, unsigned payload.
    ///
    /// The fee is requested with timestamp and nonce in place, and the hash
    /// only once timestamp, nonce and fee are all set.
    pub async fn try_build_transaction(
        &self,
        options: &TxOptions,
    ) -> Result<TxPayload, TransactionError> {
        let mut payload = TxPayload::new(options);

        let timestamp = self.wallet.timestamp().await.map_err(at(BuildStage::Timestamp))?;
        payload.set_timestamp(timestamp);

        let nonce = self
            .wallet
            .nonce(&options.from_address)
            .await
            .map_err(at(BuildStage::Nonce))?;
        payload.set_nonce(nonce);
        debug!(timestamp, nonce, "payload nonced");

        let fee = self.wallet.fee(&payload).await.map_err(at(BuildStage::Fee))?;
        payload.set_fee(fee);

        let hash = self.wallet.hash(&payload).await.map_err(at(BuildStage::Hash))?;
        debug!(%hash, fee, "payload hashed");
        payload.set_hash(hash);

        Ok(payload)
    }

    /// Produces the signature envelope for a transaction hash.
    pub fn get_signature(&self, hash: &str, key: &PrivateKey) -> String {
        Signature::sign(hash, key).to_string()
    }

    /// Asks the node to check a signature. Any failure counts as invalid.
    pub async fn validate_transaction(&self, hash: &str, address: &str, signature: &str) -> bool {
        match self.wallet.validate_signature(hash, address, signature).await {
            Ok(valid) => valid,
            Err(e) => {
                report(TransactionError::Stage {
                    stage: BuildStage::Validate,
                    source: e,
                });
                false
            }
        }
    }

    /// Broadcasts a signed payload and returns its hash, or `None` on failure.
    pub async fn broadcast_transaction(&self, payload: &TxPayload, dry_run: bool) -> Option<String> {
        self.try_broadcast_transaction(payload, dry_run)
            .await
            .map_err(report)
            .ok()
    }

    /// Broadcasts a signed payload. With `dry_run` the node only verifies it.
    ///
    /// The attached signature must parse and verify against the payload hash.
    pub async fn try_broadcast_transaction(
        &self,
        payload: &TxPayload,
        dry_run: bool,
    ) -> Result<String, TransactionError> {
        let (Some(hash), Some(signature)) = (payload.hash(), payload.signature()) else {
            return Err(TransactionError::Unsigned);
        };
        debug_assert_eq!(payload.state(), PayloadState::Signed);

        let envelope: Signature = signature.parse()?;
        if !envelope.verify(hash) {
            return Err(TransactionError::InvalidSignature);
        }

        let tx_hash = self
            .wallet
            .broadcast(payload, dry_run)
            .await
            .map_err(at(BuildStage::Broadcast))?;
        debug!(%tx_hash, dry_run, "transaction broadcast");
        Ok(tx_hash)
    }

    /// Builds, signs, validates and broadcasts a transaction.
    ///
    /// Returns the transaction hash, or `None` if any step fails.
    pub async fn build_and_send_transaction(
        &self,
        options: &TxOptions,
        key: &PrivateKey,
        dry_run: bool,
    ) -> Option<String> {
        self.try_build_and_send_transaction(options, key, dry_run)
            .await
            .map_err(report)
            .ok()
    }

    pub async fn try_build_and_send_transaction(
        &self,
        options: &TxOptions,
        key: &PrivateKey,
        dry_run: bool,
    ) -> Result<String, TransactionError> {
        let mut payload = self.try_build_transaction(options).await?;
        let hash = payload
            .hash()
            .map(str::to_owned)
            .ok_or(TransactionError::Unsigned)?;

        let signature = self.get_signature(&hash, key);
        let valid = self
            .wallet
            .validate_signature(&hash, &options.from_address, &signature)
            .await
            .map_err(at(BuildStage::Validate))?;
        if !valid {
            return Err(TransactionError::InvalidSignature);
        }

        payload.set_signature(signature);
        self.try_broadcast_transaction(&payload, dry_run).await
    }
}

fn report(err: TransactionError) {
    match err.stage() {
        Some(stage) => error!(%stage, error = %err, "transaction pipeline aborted"),
        None => error!(error = %err, "transaction pipeline aborted"),
    }
}
