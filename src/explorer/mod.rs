//! Read-only client for the block explorer API.

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::ExplorerClient;
pub use error::ExplorerError;
pub use types::{AddressRecord, Block, ExplorerConfig, Paginated};
