//! Private and public key handling on secp256k1.

use std::fmt;

use rand::RngCore;
use secp256k1::{Secp256k1, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{Address, CryptoError, Network};

/// Upper bound on rejection-sampling draws before the RNG is deemed broken.
///
/// A uniformly random 32-byte value falls outside `[1, n-1]` with
/// probability below 2^-127, so reaching this bound means the source is stuck.
const MAX_KEY_DRAWS: usize = 64;

/// A secp256k1 private key.
///
/// The scalar is always in `[1, n-1]`. Its bytes are wiped when the value is
/// dropped and never appear in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Generates a new random private key from the thread-local CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a private key by drawing 32-byte candidates from `rng`
    /// until one is a valid scalar.
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, CryptoError> {
        let mut candidate = [0u8; 32];
        for _ in 0..MAX_KEY_DRAWS {
            rng.fill_bytes(&mut candidate);
            if is_valid_private_key(&candidate) {
                let key = Self(candidate);
                candidate.zeroize();
                return Ok(key);
            }
        }
        candidate.zeroize();
        Err(CryptoError::DegenerateEntropy(MAX_KEY_DRAWS))
    }

    /// Creates a private key from raw bytes.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Result<Self, CryptoError> {
        if !is_valid_private_key(&bytes) {
            bytes.zeroize();
            return Err(CryptoError::InvalidPrivateKey(
                "scalar must be in [1, n-1]".into(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Parses a private key from hex (case-insensitive, no `0x` prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str.trim(), &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidStringLength => CryptoError::InvalidPrivateKey(format!(
                "expected 64 hex characters, got {}",
                hex_str.trim().len()
            )),
            other => CryptoError::InvalidHex(other),
        })?;
        Self::from_bytes(bytes)
    }

    /// Returns the private key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the raw scalar bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Runs `f` with a secp256k1 copy of the scalar, erased once `f` returns.
    pub(crate) fn with_secret_key<T>(&self, f: impl FnOnce(&SecretKey) -> T) -> T {
        // The constructor already checked the range.
        let mut secret =
            SecretKey::from_slice(&self.0).expect("private key range checked at construction");
        let out = f(&secret);
        secret.non_secure_erase();
        out
    }

    /// Derives the public key (generator point times the scalar).
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::signing_only();
        PublicKey(self.with_secret_key(|sk| secp256k1::PublicKey::from_secret_key(&secp, sk)))
    }

    /// Derives the address of this key on `network`.
    pub fn address(&self, network: Network) -> Address {
        Address::from_public_key(&self.public_key(), network)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Parses a public key from its 64 raw coordinate bytes (no `04` prefix).
    pub fn from_raw_bytes(raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != 64 {
            return Err(CryptoError::InvalidPublicKey(format!(
                "expected 64 bytes, got {}",
                raw.len()
            )));
        }
        let mut uncompressed = [0u8; 65];
        uncompressed[0] = 0x04;
        uncompressed[1..].copy_from_slice(raw);
        secp256k1::PublicKey::from_slice(&uncompressed)
            .map(Self)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// Returns the 65-byte uncompressed encoding (`04 || X || Y`).
    pub fn to_uncompressed(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }

    /// Returns the 64 coordinate bytes with the `04` prefix stripped.
    pub fn raw_bytes(&self) -> [u8; 64] {
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&self.to_uncompressed()[1..]);
        raw
    }

    /// Returns the uncompressed encoding as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_uncompressed())
    }

    pub(crate) fn inner(&self) -> &secp256k1::PublicKey {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Returns true if `candidate` is a 32-byte scalar in `[1, n-1]`.
pub fn is_valid_private_key(candidate: &[u8]) -> bool {
    SecretKey::from_slice(candidate).is_ok()
}

/// Generates a random private key and returns it as lowercase hex.
pub fn generate_private_key() -> Result<String, CryptoError> {
    PrivateKey::generate().map(|key| key.to_hex())
}

/// Derives the uncompressed public key hex for a hex-encoded private key.
pub fn public_from_private(private_key_hex: &str) -> Result<String, CryptoError> {
    PrivateKey::from_hex(private_key_hex).map(|key| key.public_key().to_hex())
}
