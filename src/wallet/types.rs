//! Wallet node data types: configuration, endpoints and response envelopes.

use std::fmt;

use serde::Deserialize;

use super::WalletError;

/// `Result` value the node uses to mark a trusted response.
pub const SUCCESS: &str = "Success";

/// Path appended to the wallet address to reach the transaction API.
pub const TX_API_PATH: &str = "txapi/TXV1";

/// Configuration for a [`WalletClient`](crate::wallet::WalletClient).
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Base URL of the wallet node (e.g. `http://localhost:7292`).
    pub wallet_address: String,
}

impl WalletConfig {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
        }
    }

    /// Returns `{wallet_address}/txapi/TXV1`.
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.wallet_address.trim_end_matches('/'), TX_API_PATH)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::new("http://localhost:7292")
    }
}

/// Wallet node endpoints used by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    GetTimeStamp,
    GetAddressNonce,
    GetRawTxFee,
    GetTxHash,
    ValidateSignature,
    SendRawTransaction,
    VerifyRawTransaction,
}

impl Endpoint {
    pub const fn name(self) -> &'static str {
        match self {
            Endpoint::GetTimeStamp => "GetTimeStamp",
            Endpoint::GetAddressNonce => "GetAddressNonce",
            Endpoint::GetRawTxFee => "GetRawTxFee",
            Endpoint::GetTxHash => "GetTxHash",
            Endpoint::ValidateSignature => "ValidateSignature",
            Endpoint::SendRawTransaction => "SendRawTransaction",
            Endpoint::VerifyRawTransaction => "VerifyRawTransaction",
        }
    }

    /// Broadcast endpoint for a real send or a dry run.
    pub const fn broadcast(dry_run: bool) -> Self {
        if dry_run {
            Endpoint::VerifyRawTransaction
        } else {
            Endpoint::SendRawTransaction
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Envelope shared by every node response.
///
/// `fields` holds the endpoint-specific payload and is only trusted when
/// `result` equals [`SUCCESS`].
#[derive(Debug, Clone, Deserialize)]
pub struct NodeResponse<F> {
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> NodeResponse<F> {
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS
    }

    /// Unwraps the endpoint fields, or reports the rejection.
    pub fn into_success(self, endpoint: Endpoint) -> Result<F, WalletError> {
        if self.is_success() {
            Ok(self.fields)
        } else {
            Err(WalletError::Rejected {
                endpoint,
                result: self.result,
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimestampFields {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NonceFields {
    #[serde(rename = "Nonce", default)]
    pub nonce: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeFields {
    #[serde(rename = "Fee", default)]
    pub fee: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashFields {
    #[serde(rename = "Hash", default)]
    pub hash: Option<String>,
}

/// Responses whose only meaningful part is `Result`.
#[derive(Debug, Clone, Deserialize)]
pub struct NoFields {}
