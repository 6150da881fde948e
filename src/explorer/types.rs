//! Explorer data types: configuration, pagination envelope, blocks and addresses.

use serde::{Deserialize, Deserializer, Serialize};

/// Configuration for an [`ExplorerClient`](crate::explorer::ExplorerClient).
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base URL of the explorer API, without a trailing slash.
    pub base_url: String,
}

impl ExplorerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new("https://data.rbx.network/api")
    }
}

/// Page of results as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of records across all pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Current page, starting at 1.
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_pages: u64,
    pub results: Vec<T>,
}

/// A block as reported by the explorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(deserialize_with = "null_as_default")]
    pub height: u64,
    /// Validator node record; shape is owned by the explorer.
    pub master_node: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub previous_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub validator_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub validator_signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain_ref_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub merkle_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_reward: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_validators: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub version: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    /// Crafting time in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub craft_time: u64,
    /// ISO-8601 timestamp, passed through as text.
    #[serde(deserialize_with = "null_as_default")]
    pub date_crafted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_transactions: u64,
}

/// An address record with its balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: f64,
    /// Any other fields the explorer reports.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads an explicit JSON `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_tolerates_missing_fields() {
        let block: Block = serde_json::from_value(json!({
            "height": 12,
            "hash": "abc",
            "master_node": {"address": "RValidator"}
        }))
        .unwrap();
        assert_eq!(block.height, 12);
        assert_eq!(block.hash, "abc");
        assert_eq!(block.master_node["address"], "RValidator");
        assert!(block.transactions.is_empty());
        assert_eq!(block.number_of_transactions, 0);
    }

    #[test]
    fn test_block_tolerates_null_fields() {
        let block: Block = serde_json::from_value(json!({
            "height": 40,
            "hash": "def",
            "validator_signature": null,
            "total_reward": null,
            "size": null,
            "transactions": null,
            "master_node": null
        }))
        .unwrap();
        assert_eq!(block.height, 40);
        assert_eq!(block.validator_signature, "");
        assert_eq!(block.total_reward, 0.0);
        assert_eq!(block.size, 0);
        assert!(block.transactions.is_empty());
        assert!(block.master_node.is_null());
    }

    #[test]
    fn test_address_record_null_balance() {
        let record: AddressRecord = serde_json::from_value(json!({
            "address": "RNZZecHLuoqUzNc9oE8ErkPFV1zJdvDBAH",
            "balance": null
        }))
        .unwrap();
        assert_eq!(record.balance, 0.0);
    }

    #[test]
    fn test_address_record_keeps_extra_fields() {
        let record: AddressRecord = serde_json::from_value(json!({
            "address": "RNZZecHLuoqUzNc9oE8ErkPFV1zJdvDBAH",
            "balance": 42.5,
            "adnr": "alice.rbx"
        }))
        .unwrap();
        assert_eq!(record.balance, 42.5);
        assert_eq!(record.extra["adnr"], "alice.rbx");
        assert!(!record.extra.contains_key("balance"));
    }
}
