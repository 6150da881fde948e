//! Command-line configuration for the `rbx` tool.

use clap::{Parser, Subcommand};

use crate::crypto::{is_valid_address, Network, WordCount};
use crate::explorer::ExplorerConfig;
use crate::transaction::{TxOptions, TxType};
use crate::wallet::WalletConfig;

const DEFAULT_WALLET_ADDRESS: &str = "http://localhost:7292";
const DEFAULT_EXPLORER_URL: &str = "https://data.rbx.network/api";

/// RBX keys, addresses, explorer queries and transactions
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Use the testnet address prefix
    #[arg(long, global = true, default_value = "false")]
    pub testnet: bool,

    /// Wallet node base URL
    #[arg(long, global = true, env = "RBX_WALLET_ADDRESS", default_value = DEFAULT_WALLET_ADDRESS)]
    pub wallet_address: String,

    /// Explorer API base URL
    #[arg(long, global = true, env = "RBX_EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    pub explorer_url: String,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "rbx_sdk=trace")
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a new private key with its public key and address
    Keygen,

    /// Generate a new BIP39 mnemonic phrase
    Mnemonic {
        /// Number of words: 12 or 24
        #[arg(short, long, default_value = "12")]
        words: usize,
    },

    /// Derive the account key at m/0'/0'/{account}' from a mnemonic
    FromMnemonic {
        /// Space separated mnemonic phrase
        phrase: String,

        /// Account index
        #[arg(short, long, default_value = "0")]
        account: u32,
    },

    /// Print the address of a private key
    Address {
        /// Hex private key
        #[arg(env = "RBX_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },

    /// Print the uncompressed public key of a private key
    Public {
        #[arg(env = "RBX_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },

    /// Sign a transaction hash
    Sign {
        hash: String,

        #[arg(env = "RBX_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },

    /// Check a signature envelope against a transaction hash
    Verify { hash: String, signature: String },

    /// List blocks from the explorer
    Blocks {
        #[arg(short, long, default_value = "10")]
        limit: u32,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show the most recent block
    LatestBlock,

    /// Show the balance of an address
    Balance { address: String },

    /// Build, sign and submit a transaction through the wallet node
    Send {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        amount: f64,

        /// Transaction type: transfer, node, nftMint, nftTx, nftBurn, nftSale, adnr, dstShop, voteTopic, vote
        #[arg(short = 't', long = "type", default_value = "transfer")]
        tx_type: TxType,

        /// Private key of the sending address
        #[arg(long, env = "RBX_PRIVATE_KEY", hide_env_values = true)]
        key: String,

        /// Ask the node to verify the transaction without broadcasting it
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("wallet address", &self.wallet_address),
            ("explorer URL", &self.explorer_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(format!(
                    "{} must start with http:// or https://, got {:?}",
                    name, url
                )));
            }
        }

        match &self.command {
            Command::Mnemonic { words } => {
                WordCount::try_from(*words).map_err(|_| ConfigError::InvalidWordCount(*words))?;
            }
            Command::Blocks { limit, page } => {
                if *limit == 0 || *page == 0 {
                    return Err(ConfigError::InvalidPagination);
                }
            }
            Command::Send {
                from, to, amount, ..
            } => {
                if !amount.is_finite() || *amount <= 0.0 {
                    return Err(ConfigError::InvalidAmount(*amount));
                }
                for address in [from, to] {
                    if !is_valid_address(address) {
                        return Err(ConfigError::InvalidAddress(address.clone()));
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    pub fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig::new(self.wallet_address.clone())
    }

    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig::new(self.explorer_url.clone())
    }

    /// Returns the transaction options of a `send` command.
    pub fn tx_options(&self) -> Option<TxOptions> {
        match &self.command {
            Command::Send {
                from,
                to,
                amount,
                tx_type,
                ..
            } => Some(TxOptions {
                from_address: from.clone(),
                to_address: to.clone(),
                amount: *amount,
                tx_type: *tx_type,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid word count {0}: expected 12 or 24")]
    InvalidWordCount(usize),

    #[error("Invalid pagination: limit and page must be at least 1")]
    InvalidPagination,

    #[error("Invalid amount {0}: must be a positive number")]
    InvalidAmount(f64),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
