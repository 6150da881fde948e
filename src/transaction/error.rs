//! Errors raised while building, signing and broadcasting a transaction.

use std::fmt;

use crate::crypto::CryptoError;
use crate::wallet::WalletError;

/// Pipeline step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Timestamp,
    Nonce,
    Fee,
    Hash,
    Validate,
    Broadcast,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Timestamp => "timestamp",
            BuildStage::Nonce => "nonce",
            BuildStage::Fee => "fee",
            BuildStage::Hash => "hash",
            BuildStage::Validate => "signature validation",
            BuildStage::Broadcast => "broadcast",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("error getting {stage}: {source}")]
    Stage {
        stage: BuildStage,
        #[source]
        source: WalletError,
    },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("payload must be hashed and signed before broadcast")]
    Unsigned,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl TransactionError {
    /// Returns the pipeline step this error came from, if any.
    pub fn stage(&self) -> Option<BuildStage> {
        match self {
            TransactionError::Stage { stage, .. } => Some(*stage),
            TransactionError::InvalidSignature => Some(BuildStage::Validate),
            TransactionError::Unsigned => Some(BuildStage::Broadcast),
            TransactionError::Crypto(_) => None,
        }
    }
}

/// Wraps a wallet error with the stage it interrupted.
pub(crate) fn at(stage: BuildStage) -> impl FnOnce(WalletError) -> TransactionError {
    move |source| TransactionError::Stage { stage, source }
}
