//! BIP39 mnemonic generation and account key derivation.

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroize;

use super::{CryptoError, PrivateKey};

/// Account indices must stay below the hardened offset.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Supported mnemonic lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCount {
    #[default]
    Twelve,
    TwentyFour,
}

impl WordCount {
    /// Bits of entropy encoded by a phrase of this length.
    pub const fn entropy_bits(self) -> usize {
        match self {
            WordCount::Twelve => 128,
            WordCount::TwentyFour => 256,
        }
    }

    pub const fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::TwentyFour => 24,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = CryptoError;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        match words {
            12 => Ok(WordCount::Twelve),
            24 => Ok(WordCount::TwentyFour),
            other => Err(CryptoError::InvalidWordCount(other)),
        }
    }
}

/// Generates a new English mnemonic phrase of the requested length.
pub fn generate_mnemonic(words: WordCount) -> Result<String, CryptoError> {
    generate_mnemonic_with(&mut rand::thread_rng(), words)
}

/// Generates a mnemonic phrase using entropy drawn from `rng`.
pub fn generate_mnemonic_with<R: RngCore + ?Sized>(
    rng: &mut R,
    words: WordCount,
) -> Result<String, CryptoError> {
    let mut entropy = [0u8; 32];
    let entropy_len = words.entropy_bits() / 8;
    rng.fill_bytes(&mut entropy[..entropy_len]);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..entropy_len]);
    entropy.zeroize();

    mnemonic
        .map(|m| m.to_string())
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))
}

/// Derives the 64-byte BIP39 seed of `phrase` with an empty passphrase.
///
/// Words must come from the English list. The checksum is not enforced, so
/// phrases recovered by older wallets keep deriving the same seed.
pub fn mnemonic_to_seed(phrase: &str) -> Result<[u8; 64], CryptoError> {
    let mnemonic =
        Mnemonic::parse_in_normalized_without_checksum_check(Language::English, phrase.trim())
            .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed_normalized(""))
}

/// Returns the account derivation path `m/0'/0'/{account_index}'`.
pub fn account_path(account_index: u32) -> Result<DerivationPath, CryptoError> {
    if account_index >= HARDENED_OFFSET {
        return Err(CryptoError::InvalidDerivationIndex(account_index));
    }
    Ok(format!("m/0'/0'/{}'", account_index).parse()?)
}

/// Derives the BIP32 private key at `path` from a seed.
pub fn private_key_from_seed(seed: &[u8], path: &DerivationPath) -> Result<PrivateKey, CryptoError> {
    let xprv = XPrv::derive_from_path(seed, path)?;
    let mut bytes = xprv.to_bytes();
    let key = PrivateKey::from_bytes(bytes);
    bytes.zeroize();
    key
}

/// Derives the private key of account `account_index` from a mnemonic phrase.
pub fn private_key_from_mnemonic(
    phrase: &str,
    account_index: u32,
) -> Result<PrivateKey, CryptoError> {
    let path = account_path(account_index)?;
    let mut seed = mnemonic_to_seed(phrase)?;
    let key = private_key_from_seed(&seed, &path);
    seed.zeroize();
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{is_valid_address, is_valid_private_key, Network};

    fn zero_phrase(words: WordCount) -> String {
        let entropy = vec![0u8; words.entropy_bits() / 8];
        Mnemonic::from_entropy(&entropy).unwrap().to_string()
    }

    #[test]
    fn test_word_counts() {
        for _ in 0..8 {
            let twelve = generate_mnemonic(WordCount::Twelve).unwrap();
            assert_eq!(twelve.split(' ').count(), 12);
            let twenty_four = generate_mnemonic(WordCount::TwentyFour).unwrap();
            assert_eq!(twenty_four.split(' ').count(), 24);
        }
    }

    #[test]
    fn test_word_count_conversion() {
        assert_eq!(WordCount::try_from(12).unwrap(), WordCount::Twelve);
        assert_eq!(WordCount::try_from(24).unwrap().entropy_bits(), 256);
        assert!(matches!(
            WordCount::try_from(18),
            Err(CryptoError::InvalidWordCount(18))
        ));
    }

    #[test]
    fn test_zero_entropy_phrase() {
        let phrase = zero_phrase(WordCount::Twelve);
        assert_eq!(
            phrase,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
        assert!(zero_phrase(WordCount::TwentyFour).ends_with("abandon art"));
    }

    #[test]
    fn test_seed_vector() {
        let seed = mnemonic_to_seed(&zero_phrase(WordCount::Twelve)).unwrap();
        assert_eq!(
            hex::encode(seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_account_key_vectors() {
        let phrase = zero_phrase(WordCount::Twelve);
        let cases = [
            (0, "5698780109efd1fbd31b352bf28a67924b254fa67e3693319a742a42a265e506", "REojDNJU54mt9kswLNPhm3QmwfPwqShRAb"),
            (1, "3178c3ea966519d01ea8e0dc3cef6a9f533a63a07320db90558ec36bae2d1c88", "RPXsKcwS4Paux68KsYU7Gx6iBuyeEd98jK"),
            (7, "2d2628f7e9de056ee88609ccc70a4f01d079f7d455d479ff33de88a56cb8f0fb", "RNVJKTKEVuw42Et5hPMxQRfBto1SdXYwfy"),
        ];
        for (index, key_hex, address) in cases {
            let key = private_key_from_mnemonic(&phrase, index).unwrap();
            assert_eq!(key.to_hex(), key_hex);
            assert_eq!(key.address(Network::Mainnet).to_string(), address);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let phrase = generate_mnemonic(WordCount::Twelve).unwrap();
        let first = private_key_from_mnemonic(&phrase, 3).unwrap();
        let second = private_key_from_mnemonic(&phrase, 3).unwrap();
        let other = private_key_from_mnemonic(&phrase, 4).unwrap();
        assert_eq!(first.to_hex(), second.to_hex());
        assert_ne!(first.to_hex(), other.to_hex());
    }

    #[test]
    fn test_generated_phrase_yields_valid_key_and_address() {
        let phrase = generate_mnemonic(WordCount::Twelve).unwrap();
        let key = private_key_from_mnemonic(&phrase, 0).unwrap();
        assert!(is_valid_private_key(key.as_bytes()));
        assert!(is_valid_address(&key.address(Network::Mainnet).to_string()));
    }

    #[test]
    fn test_invalid_phrases() {
        assert!(matches!(
            private_key_from_mnemonic("not a real mnemonic phrase", 0),
            Err(CryptoError::InvalidMnemonic(_))
        ));
        assert!(matches!(
            private_key_from_mnemonic("", 0),
            Err(CryptoError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_bad_checksum_still_derives() {
        let phrase = ["abandon"; 12].join(" ");
        let key = private_key_from_mnemonic(&phrase, 0).unwrap();
        assert_eq!(
            key.to_hex(),
            "04dbe03004d4cd83a890e494249ab07bf2f64c5c60ec5ac6c5b49c58c22be742"
        );
        assert_eq!(
            key.address(Network::Mainnet).to_string(),
            "RQN5TT41mhtavagS5zCGuTmmSC6kpLA3Uh"
        );
    }

    // BIP32 test vector 1.
    const VECTOR_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn test_bip32_master_vector() {
        let seed = hex::decode(VECTOR_SEED).unwrap();
        let master = private_key_from_seed(&seed, &"m".parse().unwrap()).unwrap();
        assert_eq!(
            master.to_hex(),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
    }

    #[test]
    fn test_bip32_hardened_child_vector() {
        let seed = hex::decode(VECTOR_SEED).unwrap();
        let path: DerivationPath = "m/0'".parse().unwrap();
        let child = private_key_from_seed(&seed, &path).unwrap();
        assert_eq!(
            child.to_hex(),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        let xprv = XPrv::derive_from_path(&seed, &path).unwrap();
        assert_eq!(
            hex::encode(xprv.attrs().chain_code),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
    }

    #[test]
    fn test_account_path() {
        assert_eq!(account_path(7).unwrap().to_string(), "m/0'/0'/7'");
        assert!(matches!(
            account_path(HARDENED_OFFSET),
            Err(CryptoError::InvalidDerivationIndex(_))
        ));
    }

    #[test]
    fn test_unhardenable_account_rejected() {
        let phrase = zero_phrase(WordCount::Twelve);
        assert!(matches!(
            private_key_from_mnemonic(&phrase, u32::MAX),
            Err(CryptoError::InvalidDerivationIndex(_))
        ));
    }
}
