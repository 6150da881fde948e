//! Composite transaction signatures.
//!
//! The envelope sent to the wallet node is
//! `base64(DER(ECDSA(SHA256(hash text)))) + "." + base58(pubkey without 04)`.
//! The signed digest is taken over the characters of the message hash string,
//! not over its hex-decoded bytes.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use secp256k1::{ecdsa, Message, Secp256k1};

use super::hash::sha256;
use super::{CryptoError, PrivateKey, PublicKey};

/// Separator between the signature and public key parts of the envelope.
const ENVELOPE_SEPARATOR: char = '.';

/// An ECDSA signature bundled with the signer's public key.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    der: Vec<u8>,
    public_key: PublicKey,
}

impl Signature {
    /// Signs `message_hash` (the transaction hash string) with `key`.
    ///
    /// Nonces are derived deterministically (RFC 6979) and `s` is normalized
    /// to the lower half of the curve order.
    pub fn sign(message_hash: &str, key: &PrivateKey) -> Self {
        let secp = Secp256k1::signing_only();
        let digest = signing_digest(message_hash);
        let signature = key.with_secret_key(|sk| secp.sign_ecdsa(&digest, sk));

        Self {
            der: signature.serialize_der().to_vec(),
            public_key: key.public_key(),
        }
    }

    /// Returns the DER-encoded ECDSA signature.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Returns the signer's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Checks the signature against `message_hash` under the embedded key.
    pub fn verify(&self, message_hash: &str) -> bool {
        let Ok(signature) = ecdsa::Signature::from_der(&self.der) else {
            return false;
        };
        Secp256k1::verification_only()
            .verify_ecdsa(&signing_digest(message_hash), &signature, self.public_key.inner())
            .is_ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            BASE64.encode(&self.der),
            ENVELOPE_SEPARATOR,
            bs58::encode(self.public_key.raw_bytes()).into_string()
        )
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sig_part, key_part) = s.split_once(ENVELOPE_SEPARATOR).ok_or_else(|| {
            CryptoError::InvalidSignature("missing '.' between signature and public key".into())
        })?;

        let der = BASE64
            .decode(sig_part)
            .map_err(|e| CryptoError::InvalidSignature(format!("base64: {}", e)))?;
        ecdsa::Signature::from_der(&der)
            .map_err(|e| CryptoError::InvalidSignature(format!("DER: {}", e)))?;

        let raw_key = bs58::decode(key_part).into_vec()?;
        let public_key = PublicKey::from_raw_bytes(&raw_key)?;

        Ok(Self { der, public_key })
    }
}

/// Digest actually signed: SHA-256 over the UTF-8 bytes of the hash string.
fn signing_digest(message_hash: &str) -> Message {
    Message::from_digest(sha256(message_hash.as_bytes()))
}

/// Produces the composite signature envelope for `message_hash`.
pub fn get_signature(message_hash: &str, private_key_hex: &str) -> Result<String, CryptoError> {
    let key = PrivateKey::from_hex(private_key_hex)?;
    Ok(Signature::sign(message_hash, &key).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_KEY: &str = "2de45504622ea03f740f681f2908cce0d83b988eda6acebeeb23d2c7bc59251e";
    const FIXTURE_HASH: &str = "3c7a8fd1b1f5d35a0c8e4f93a0b6fa5c2c1f7e2a9d6e4b8f1a2c3d4e5f607182";
    const FIXTURE_SIGNATURE: &str = "MEUCIQC1KJmoUUEVN+2jow6BKHRV7S3bIMHsaawBC0wKaun9jQIgFkruyLXOBaV0bYwcYcoYw90Nv6y7ko1ZaoDCCIzUoMo=.\
                                     MZd8vNDXLAUVQ13cVtSc3sYYESWVQQrXx8xKCuSExQr5T6F32EVZkY6J9JupkeM5kz9xgS8YmYoMMxUXTmfM5hy";

    #[test]
    fn test_fixture_signature() {
        assert_eq!(get_signature(FIXTURE_HASH, FIXTURE_KEY).unwrap(), FIXTURE_SIGNATURE);
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = PrivateKey::generate().unwrap();
        let first = Signature::sign(FIXTURE_HASH, &key).to_string();
        let second = Signature::sign(FIXTURE_HASH, &key).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_envelope_parts() {
        let key = PrivateKey::generate().unwrap();
        let envelope = get_signature(FIXTURE_HASH, &key.to_hex()).unwrap();

        let (sig_part, key_part) = envelope.split_once('.').unwrap();
        let der = BASE64.decode(sig_part).unwrap();
        assert!(ecdsa::Signature::from_der(&der).is_ok());

        let raw_key = bs58::decode(key_part).into_vec().unwrap();
        assert_eq!(raw_key.len(), 64);
        assert_eq!(hex::encode(&raw_key), &key.public_key().to_hex()[2..]);
    }

    #[test]
    fn test_parse_and_verify() {
        let signature: Signature = FIXTURE_SIGNATURE.parse().unwrap();
        assert!(signature.verify(FIXTURE_HASH));
        assert!(!signature.verify("00"));
        assert_eq!(signature.to_string(), FIXTURE_SIGNATURE);

        let key = PrivateKey::from_hex(FIXTURE_KEY).unwrap();
        assert_eq!(signature.public_key(), &key.public_key());
    }

    #[test]
    fn test_digest_covers_hash_text() {
        // Signing the decoded bytes instead of the text gives a different digest.
        let text_digest = sha256(FIXTURE_HASH.as_bytes());
        let byte_digest = sha256(&hex::decode(FIXTURE_HASH).unwrap());
        assert_ne!(text_digest, byte_digest);
        assert_eq!(signing_digest(FIXTURE_HASH), Message::from_digest(text_digest));
    }

    #[test]
    fn test_malformed_envelopes() {
        assert!("no-separator".parse::<Signature>().is_err());
        assert!("@@@.MZd8".parse::<Signature>().is_err());
        let (sig_part, _) = FIXTURE_SIGNATURE.split_once('.').unwrap();
        // Public key part too short.
        let short_key = format!("{}.{}", sig_part, bs58::encode([1u8; 33]).into_string());
        assert!(short_key.parse::<Signature>().is_err());
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(get_signature(FIXTURE_HASH, "not-hex").is_err());
    }
}
