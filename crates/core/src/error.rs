use alloy::{
    contract,
    primitives::B256,
    providers::PendingTransactionError,
    transports::TransportError,
};
use thiserror::Error;

use crate::types::primitives::TokenId;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    Proof(#[from] ProofError),
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to fetch state: {0}")]
    Transport(#[from] TransportError),

    #[error("contract call failed: {0}")]
    Contract(#[from] contract::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("transaction failed: {0}")]
    Contract(#[from] contract::Error),

    #[error("pending transaction error: {0}")]
    Pending(#[from] PendingTransactionError),

    #[error("transaction receipt missing body")]
    MissingReceipt,

    #[error("transaction reverted: {tx_hash:?}")]
    Reverted { tx_hash: B256 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("auction ended but winner info was not read")]
    MissingWinner,

    #[error("winner {0} present but settlement state was not read")]
    MissingSettlement(TokenId),
}

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("no proof available for token {0}")]
    Unavailable(TokenId),
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("notification stream error: {0}")]
    Transport(#[from] TransportError),
}
