use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    error::ProofError,
    proof::traits::ProofSource,
    types::primitives::{ProofHash, TokenId},
};

/// Per-token proofs, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct ProofTable {
    proofs: BTreeMap<TokenId, ProofHash>,
}

impl ProofTable {
    pub fn new(proofs: BTreeMap<TokenId, ProofHash>) -> Self {
        Self { proofs }
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }
}

impl FromIterator<(TokenId, ProofHash)> for ProofTable {
    fn from_iter<I: IntoIterator<Item = (TokenId, ProofHash)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl ProofSource for ProofTable {
    async fn proof_for(&self, token_id: TokenId) -> Result<ProofHash, ProofError> {
        self.proofs
            .get(&token_id)
            .copied()
            .ok_or(ProofError::Unavailable(token_id))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;

    use super::*;

    #[tokio::test]
    async fn known_token_yields_its_proof() {
        let hash = ProofHash::new(B256::repeat_byte(0x11));
        let table: ProofTable = [(TokenId::from(7), hash)].into_iter().collect();

        assert_eq!(table.proof_for(TokenId::from(7)).await.unwrap(), hash);
    }

    #[tokio::test]
    async fn unknown_token_is_unavailable() {
        let table: ProofTable = [(TokenId::from(7), ProofHash::ZERO)].into_iter().collect();

        let err = table.proof_for(TokenId::from(8)).await.unwrap_err();
        assert!(matches!(err, ProofError::Unavailable(token) if token == TokenId::from(8)));
    }
}
