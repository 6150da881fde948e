//! Block explorer HTTP client.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ExplorerError;
use super::types::{AddressRecord, Block, ExplorerConfig, Paginated};

/// Default page size for [`ExplorerClient::latest_blocks`].
pub const DEFAULT_LIMIT: u32 = 10;

/// HTTP client for the explorer REST API.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    config: ExplorerConfig,
    client: reqwest::Client,
}

impl ExplorerClient {
    pub fn new(config: ExplorerConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// List blocks, newest first.
    pub async fn blocks(&self, limit: u32, page: u32) -> Result<Paginated<Block>, ExplorerError> {
        let path = format!("blocks?limit={}&page={}", limit, page);
        self.do_request(&path).await
    }

    /// First page of blocks at the default page size.
    pub async fn latest_blocks(&self) -> Result<Paginated<Block>, ExplorerError> {
        self.blocks(DEFAULT_LIMIT, 1).await
    }

    /// The most recent block.
    pub async fn latest_block(&self) -> Result<Block, ExplorerError> {
        self.blocks(1, 1)
            .await?
            .results
            .into_iter()
            .next()
            .ok_or(ExplorerError::NoBlocks)
    }

    pub async fn address(&self, address: &str) -> Result<AddressRecord, ExplorerError> {
        let path = format!("addresses/{}", address);
        self.do_request(&path).await
    }

    /// Balance of `address`. Lookup failures are logged and read as zero.
    pub async fn balance(&self, address: &str) -> f64 {
        match self.address(address).await {
            Ok(record) => record.balance,
            Err(e) => {
                warn!(%address, error = %e, "balance lookup failed, reporting zero");
                0.0
            }
        }
    }

    /// Perform a GET request against the explorer and deserialize the response.
    async fn do_request<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExplorerError> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!(%url, "GET explorer");

        let resp = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
