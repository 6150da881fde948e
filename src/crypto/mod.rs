//! Key generation, address derivation and transaction signing.
//!
//! - `keypair`: private/public keys on secp256k1
//! - `mnemonic`: BIP39 phrases and hardened account derivation
//! - `address`: network-prefixed, checksummed base-58 addresses
//! - `signature`: the composite signature envelope

mod address;
mod error;
pub mod hash;
mod keypair;
mod mnemonic;
mod signature;

pub use address::{address_from_private, is_valid_address, Address, Network};
pub use error::CryptoError;
pub use keypair::{
    generate_private_key, is_valid_private_key, public_from_private, PrivateKey, PublicKey,
};
pub use mnemonic::{
    account_path, generate_mnemonic, generate_mnemonic_with, mnemonic_to_seed,
    private_key_from_mnemonic, private_key_from_seed, WordCount,
};
pub use signature::{get_signature, Signature};
