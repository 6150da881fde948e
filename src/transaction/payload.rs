//! Transaction options and the wire payload exchanged with the wallet node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kinds of transaction understood by the network.
///
/// Serialized as the ordinal integer the node expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TxType {
    #[default]
    Transfer = 0,
    Node = 1,
    NftMint = 2,
    NftTx = 3,
    NftBurn = 4,
    NftSale = 5,
    Adnr = 6,
    DstShop = 7,
    VoteTopic = 8,
    Vote = 9,
}

impl TxType {
    pub const ALL: [TxType; 10] = [
        TxType::Transfer,
        TxType::Node,
        TxType::NftMint,
        TxType::NftTx,
        TxType::NftBurn,
        TxType::NftSale,
        TxType::Adnr,
        TxType::DstShop,
        TxType::VoteTopic,
        TxType::Vote,
    ];

    /// Returns the wire code of this type.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    const fn name(self) -> &'static str {
        match self {
            TxType::Transfer => "transfer",
            TxType::Node => "node",
            TxType::NftMint => "nftMint",
            TxType::NftTx => "nftTx",
            TxType::NftBurn => "nftBurn",
            TxType::NftSale => "nftSale",
            TxType::Adnr => "adnr",
            TxType::DstShop => "dstShop",
            TxType::VoteTopic => "voteTopic",
            TxType::Vote => "vote",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name().to_ascii_lowercase() == lowered)
            .ok_or_else(|| format!("Unknown transaction type: {}", s))
    }
}

impl Serialize for TxType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TxType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown transaction type {}", code)))
    }
}

/// What the caller asks to send.
#[derive(Debug, Clone, PartialEq)]
pub struct TxOptions {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub tx_type: TxType,
}

impl TxOptions {
    /// Options for a plain transfer.
    pub fn transfer(from_address: impl Into<String>, to_address: impl Into<String>, amount: f64) -> Self {
        Self {
            from_address: from_address.into(),
            to_address: to_address.into(),
            amount,
            tx_type: TxType::Transfer,
        }
    }
}

/// How far a payload has progressed through the build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PayloadState {
    Unbuilt,
    Timestamped,
    Nonced,
    Feed,
    Hashed,
    Signed,
}

/// A transaction payload accumulated across wallet node round-trips.
///
/// Changing the timestamp, nonce, fee or data discards any hash and signature
/// already attached, so a hash always describes the fields it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct TxPayload {
    hash: Option<String>,
    to_address: String,
    from_address: String,
    tx_type: TxType,
    amount: f64,
    nonce: Option<u64>,
    fee: Option<f64>,
    timestamp: Option<i64>,
    signature: Option<String>,
    data: Option<serde_json::Value>,
}

impl TxPayload {
    /// Starts an unbuilt payload from caller options.
    pub fn new(options: &TxOptions) -> Self {
        Self {
            hash: None,
            to_address: options.to_address.clone(),
            from_address: options.from_address.clone(),
            tx_type: options.tx_type,
            amount: options.amount,
            nonce: None,
            fee: None,
            timestamp: None,
            signature: None,
            data: None,
        }
    }

    pub fn state(&self) -> PayloadState {
        if self.signature.is_some() {
            PayloadState::Signed
        } else if self.hash.is_some() {
            PayloadState::Hashed
        } else if self.fee.is_some() {
            PayloadState::Feed
        } else if self.nonce.is_some() && self.timestamp.is_some() {
            PayloadState::Nonced
        } else if self.timestamp.is_some() {
            PayloadState::Timestamped
        } else {
            PayloadState::Unbuilt
        }
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = Some(timestamp);
        self.invalidate_hash();
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = Some(nonce);
        self.invalidate_hash();
    }

    pub fn set_fee(&mut self, fee: f64) {
        self.fee = Some(fee);
        self.invalidate_hash();
    }

    pub fn set_data(&mut self, data: serde_json::Value) {
        self.data = Some(data);
        self.invalidate_hash();
    }

    /// Attaches the node-computed hash. Any previous signature is dropped.
    pub fn set_hash(&mut self, hash: impl Into<String>) {
        self.hash = Some(hash.into());
        self.signature = None;
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.signature = Some(signature.into());
    }

    fn invalidate_hash(&mut self) {
        self.hash = None;
        self.signature = None;
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn nonce(&self) -> Option<u64> {
        self.nonce
    }

    pub fn fee(&self) -> Option<f64> {
        self.fee
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }
}

/// Field names and casing are fixed by the wallet node.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WirePayload<'a> {
    hash: &'a str,
    to_address: &'a str,
    from_address: &'a str,
    transaction_type: TxType,
    amount: f64,
    nonce: u64,
    fee: f64,
    timestamp: i64,
    signature: &'a str,
    height: u64,
    data: Option<&'a serde_json::Value>,
}

impl Serialize for TxPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WirePayload {
            hash: self.hash.as_deref().unwrap_or_default(),
            to_address: &self.to_address,
            from_address: &self.from_address,
            transaction_type: self.tx_type,
            amount: self.amount,
            nonce: self.nonce.unwrap_or_default(),
            fee: self.fee.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_default(),
            signature: self.signature.as_deref().unwrap_or_default(),
            height: 0,
            data: self.data.as_ref(),
        }
        .serialize(serializer)
    }
}
