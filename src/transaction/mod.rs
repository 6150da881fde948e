//! Transaction payloads and the build/sign/broadcast pipeline.

mod error;
mod payload;
mod service;


pub use error::{BuildStage, TransactionError};
pub use payload::{PayloadState, TxOptions, TxPayload, TxType};
pub use service::TransactionService;
