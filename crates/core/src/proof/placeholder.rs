use async_trait::async_trait;
use tracing::warn;

use crate::{
    error::ProofError,
    proof::traits::ProofSource,
    types::primitives::{ProofHash, TokenId},
};

/// Submits the zero hash instead of a real proof.
///
/// The auction contract currently accepts any value here. Every use is logged
/// at warn level so deployments relying on it stay visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProof;

#[async_trait]
impl ProofSource for PlaceholderProof {
    async fn proof_for(&self, token_id: TokenId) -> Result<ProofHash, ProofError> {
        warn!(
            %token_id,
            "submitting placeholder zero proof; configure a proof hash for real settlements"
        );
        Ok(ProofHash::ZERO)
    }
}
