use async_trait::async_trait;

use crate::{
    error::DispatchError,
    types::{
        action::{ActionReceipt, PendingAction},
        primitives::{Price, ProofHash, TokenId},
    },
};

/// Write side of the auction contract. Each method returns only after the
/// command is confirmed. Resubmitting a committed command is not safe.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    async fn end_auction_no_bids(&self) -> Result<ActionReceipt, DispatchError>;

    async fn start_auction(
        &self,
        start_price: Price,
        end_price: Price,
    ) -> Result<ActionReceipt, DispatchError>;

    async fn submit_proof(
        &self,
        token_id: TokenId,
        proof_hash: ProofHash,
    ) -> Result<ActionReceipt, DispatchError>;

    async fn claim_payment(&self, token_id: TokenId) -> Result<ActionReceipt, DispatchError>;

    async fn dispatch(&self, action: PendingAction) -> Result<ActionReceipt, DispatchError> {
        match action {
            PendingAction::EndAuctionNoBids => self.end_auction_no_bids().await,
            PendingAction::StartAuction {
                start_price,
                end_price,
            } => self.start_auction(start_price, end_price).await,
            PendingAction::SubmitProof {
                token_id,
                proof_hash,
            } => self.submit_proof(token_id, proof_hash).await,
            PendingAction::ClaimPayment { token_id } => self.claim_payment(token_id).await,
        }
    }
}
