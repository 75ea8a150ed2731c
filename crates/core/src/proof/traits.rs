use async_trait::async_trait;

use crate::{
    error::ProofError,
    types::primitives::{ProofHash, TokenId},
};

/// Supplies the proof hash submitted for a winning token.
#[async_trait]
pub trait ProofSource: Send + Sync {
    async fn proof_for(&self, token_id: TokenId) -> Result<ProofHash, ProofError>;
}
