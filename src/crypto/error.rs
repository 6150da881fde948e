//! Errors raised by key, address and signature operations.

/// Errors from the cryptographic layer.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("unsupported mnemonic length: {0} words (expected 12 or 24)")]
    InvalidWordCount(usize),

    #[error("account index {0} cannot be hardened")]
    InvalidDerivationIndex(u32),

    #[error("key derivation failed: {0}")]
    Derivation(#[from] bip32::Error),

    #[error("invalid base58: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("entropy source produced no valid key after {0} draws")]
    DegenerateEntropy(usize),
}
