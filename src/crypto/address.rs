//! RBX address representation and encoding.
//!
//! An address is the base-58 encoding of
//! `prefix (1) || RIPEMD160(SHA256(pubkey)) (20) || checksum (4)` where the
//! checksum is the first four bytes of the double SHA-256 of the first 21.
//! The public key is hashed in its 65-byte uncompressed form.

use std::fmt;
use std::str::FromStr;

use super::hash::{hash160, sha256d};
use super::{CryptoError, PrivateKey, PublicKey};

/// Length of a decoded address: prefix, hash160 and checksum.
const ADDRESS_LEN: usize = 25;

/// The network an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Returns the version byte prepended to the key hash.
    #[inline]
    pub const fn prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x3c,
            Network::Testnet => 0x89,
        }
    }

    /// Looks up the network for a version byte.
    pub const fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0x3c => Some(Network::Mainnet),
            0x89 => Some(Network::Testnet),
            _ => None,
        }
    }

    pub const fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// An RBX address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    hash: [u8; 20],
}

impl Address {
    /// Derives the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: Network) -> Self {
        Self {
            network,
            hash: hash160(&public_key.to_uncompressed()),
        }
    }

    /// Returns the network this address belongs to.
    #[inline]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Returns the 20-byte key hash.
    #[inline]
    pub const fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    /// Returns the 25 bytes that are base-58 encoded.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = self.network.prefix();
        bytes[1..21].copy_from_slice(&self.hash);
        let checksum = sha256d(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..4]);
        bytes
    }

    /// Returns the base-58 encoded address string.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec()?;
        if bytes.len() != ADDRESS_LEN {
            return Err(CryptoError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            )));
        }

        let network = Network::from_prefix(bytes[0]).ok_or_else(|| {
            CryptoError::InvalidAddress(format!("unknown network prefix 0x{:02x}", bytes[0]))
        })?;

        let checksum = sha256d(&bytes[..21]);
        if bytes[21..] != checksum[..4] {
            return Err(CryptoError::InvalidAddress("checksum mismatch".into()));
        }

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&bytes[1..21]);
        Ok(Self { network, hash })
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// Derives the base-58 address for a hex-encoded private key.
pub fn address_from_private(private_key_hex: &str, is_testnet: bool) -> Result<String, CryptoError> {
    let network = if is_testnet {
        Network::Testnet
    } else {
        Network::Mainnet
    };
    PrivateKey::from_hex(private_key_hex).map(|key| key.address(network).to_base58())
}

/// Returns true if `address` decodes to a well-formed address on either network.
pub fn is_valid_address(address: &str) -> bool {
    address.parse::<Address>().is_ok()
}
