//! # rbx_sdk
//!
//! Client SDK for the RBX proof-of-stake network.
//!
//! ## Architecture
//!
//! - `crypto`: Keys, mnemonics, hardened derivation, addresses and signatures
//! - `wallet`: Wallet node transaction API client
//! - `transaction`: Payload building, signing and broadcasting
//! - `explorer`: Block explorer client
//! - `config`: Command-line configuration

pub mod config;
pub mod crypto;
pub mod explorer;
pub mod transaction;
pub mod wallet;

pub use config::Config;
pub use crypto::{Address, CryptoError, Network, PrivateKey, PublicKey, Signature};
pub use explorer::{ExplorerClient, ExplorerConfig};
pub use transaction::{TransactionService, TxOptions, TxPayload, TxType};
pub use wallet::{WalletClient, WalletConfig};
