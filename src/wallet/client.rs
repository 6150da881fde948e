//! Wallet node HTTP client for transaction building and broadcasting.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::types::{
    Endpoint, FeeFields, HashFields, NoFields, NodeResponse, NonceFields, TimestampFields,
    WalletConfig,
};
use super::WalletError;
use crate::transaction::TxPayload;

/// HTTP client for the wallet node transaction API.
#[derive(Debug, Clone)]
pub struct WalletClient {
    /// Client configuration.
    config: WalletConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl WalletClient {
    /// Create a new wallet client with the given configuration.
    pub fn new(config: WalletConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Fetch the node's current timestamp.
    pub async fn timestamp(&self) -> Result<i64, WalletError> {
        let endpoint = Endpoint::GetTimeStamp;
        let fields: TimestampFields = self.get(endpoint, endpoint.name()).await?;
        fields
            .timestamp
            .filter(|t| *t != 0)
            .ok_or(WalletError::MissingField {
                endpoint,
                field: "Timestamp",
            })
    }

    /// Fetch the next nonce for `address`.
    pub async fn nonce(&self, address: &str) -> Result<u64, WalletError> {
        let endpoint = Endpoint::GetAddressNonce;
        let path = format!("{}/{}", endpoint.name(), address);
        let fields: NonceFields = self.get(endpoint, &path).await?;
        fields.nonce.ok_or(WalletError::MissingField {
            endpoint,
            field: "Nonce",
        })
    }

    /// Ask the node for the fee of `payload`.
    pub async fn fee(&self, payload: &TxPayload) -> Result<f64, WalletError> {
        let endpoint = Endpoint::GetRawTxFee;
        let fields: FeeFields = self.post(endpoint, payload).await?;
        fields.fee.ok_or(WalletError::MissingField {
            endpoint,
            field: "Fee",
        })
    }

    /// Ask the node to hash `payload`.
    pub async fn hash(&self, payload: &TxPayload) -> Result<String, WalletError> {
        let endpoint = Endpoint::GetTxHash;
        let fields: HashFields = self.post(endpoint, payload).await?;
        fields
            .hash
            .filter(|h| !h.is_empty())
            .ok_or(WalletError::MissingField {
                endpoint,
                field: "Hash",
            })
    }

    /// Ask the node whether `signature` is valid for `message` from `address`.
    ///
    /// A non-success `Result` means the signature is invalid and is not an error.
    pub async fn validate_signature(
        &self,
        message: &str,
        address: &str,
        signature: &str,
    ) -> Result<bool, WalletError> {
        let endpoint = Endpoint::ValidateSignature;
        let path = format!("{}/{}/{}/{}", endpoint.name(), message, address, signature);
        let response: NodeResponse<NoFields> = self.request_get(&path).await?;
        Ok(response.is_success())
    }

    /// Submit a signed payload. With `dry_run` the node only verifies it.
    ///
    /// Returns the transaction hash reported by the node.
    pub async fn broadcast(&self, payload: &TxPayload, dry_run: bool) -> Result<String, WalletError> {
        let endpoint = Endpoint::broadcast(dry_run);
        let fields: HashFields = self.post(endpoint, payload).await?;
        fields
            .hash
            .filter(|h| !h.is_empty())
            .ok_or(WalletError::MissingField {
                endpoint,
                field: "Hash",
            })
    }

    async fn get<F: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
    ) -> Result<F, WalletError> {
        let response: NodeResponse<F> = self.request_get(path).await?;
        response.into_success(endpoint)
    }

    async fn post<F: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<F, WalletError> {
        let url = self.url(endpoint.name());
        debug!(%url, "POST wallet node");

        let resp = self.client.post(&url).json(body).send().await?;
        let text = resp.text().await?;
        let response: NodeResponse<F> = serde_json::from_str(&text)?;
        response.into_success(endpoint)
    }

    /// Perform a GET request and parse the response envelope.
    async fn request_get<F: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<NodeResponse<F>, WalletError> {
        let url = self.url(path);
        debug!(%url, "GET wallet node");

        let resp = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }
}
