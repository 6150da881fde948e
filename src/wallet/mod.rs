//! Client for the wallet node transaction API (`{wallet}/txapi/TXV1`).
//!
//! Every response carries a `Result` field; the endpoint-specific field is
//! only trusted when it reads `Success`.

pub mod client;
pub mod error;
pub mod types;


pub use client::WalletClient;
pub use error::WalletError;
pub use types::{Endpoint, NodeResponse, WalletConfig};
