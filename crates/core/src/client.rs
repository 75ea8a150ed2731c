use std::time::Duration;

use alloy::{
    consensus::TxReceipt,
    network::Ethereum,
    primitives::Address,
    providers::{PendingTransactionBuilder, Provider},
};
use async_trait::async_trait;
use keeper_abi::IAuctionHouse;
use tracing::debug;

use crate::{
    dispatcher::ActionDispatcher,
    error::{DispatchError, StateError},
    reader::StateReader,
    types::{
        action::{ActionKind, ActionReceipt},
        primitives::{Price, ProofHash, TokenId},
        snapshot::{AuctionSnapshot, SettlementState, WinnerInfo},
    },
};

#[derive(Clone)]
pub struct AuctionClient<P>
where
    P: Provider + Clone,
{
    provider: P,
    auction: Address,
    confirmations: u64,
}

impl<P> AuctionClient<P>
where
    P: Provider + Clone,
{
    pub const DEFAULT_CONFIRMATIONS: u64 = 1;

    pub fn new(provider: P, auction: Address) -> Self {
        Self {
            provider,
            auction,
            confirmations: Self::DEFAULT_CONFIRMATIONS,
        }
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn address(&self) -> Address {
        self.auction
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn confirm(
        &self,
        kind: ActionKind,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<ActionReceipt, DispatchError> {
        debug!(%kind, tx_hash = %pending.tx_hash(), "awaiting confirmation");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;

        let receipt_body = receipt
            .inner
            .as_receipt()
            .ok_or(DispatchError::MissingReceipt)?;

        if !receipt_body.status() {
            return Err(DispatchError::Reverted {
                tx_hash: receipt.transaction_hash,
            });
        }

        Ok(ActionReceipt {
            kind,
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

#[async_trait]
impl<P> StateReader for AuctionClient<P>
where
    P: Provider + Clone,
{
    async fn read_snapshot(&self) -> Result<AuctionSnapshot, StateError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let status = house.getAuctionStatus().call().await?;

        let remaining = u64::try_from(status.timeRemaining).unwrap_or(u64::MAX);

        Ok(AuctionSnapshot {
            current_price: Price::new(status.currentPrice),
            is_active: status.isActive,
            time_remaining: Duration::from_secs(remaining),
        })
    }

    async fn read_winner(&self) -> Result<WinnerInfo, StateError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let info = house.getWinnerInfo().call().await?;

        Ok(WinnerInfo {
            winner: info.winner,
            winning_bid: Price::new(info.winningBid),
            winning_token_id: TokenId::new(info.winningTokenId),
        })
    }

    async fn read_settlement(&self) -> Result<SettlementState, StateError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let state = house.getSettlementState().call().await?;

        Ok(SettlementState {
            proof_submitted: state.proofSubmitted,
            claimed: state.claimed,
        })
    }
}

#[async_trait]
impl<P> ActionDispatcher for AuctionClient<P>
where
    P: Provider + Clone,
{
    async fn end_auction_no_bids(&self) -> Result<ActionReceipt, DispatchError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let pending = house.endAuctionNoBids().send().await?;
        self.confirm(ActionKind::EndAuctionNoBids, pending).await
    }

    async fn start_auction(
        &self,
        start_price: Price,
        end_price: Price,
    ) -> Result<ActionReceipt, DispatchError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let pending = house
            .startAuction(start_price.as_u256(), end_price.as_u256())
            .send()
            .await?;
        self.confirm(ActionKind::StartAuction, pending).await
    }

    async fn submit_proof(
        &self,
        token_id: TokenId,
        proof_hash: ProofHash,
    ) -> Result<ActionReceipt, DispatchError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let pending = house
            .submitProof(token_id.as_u256(), proof_hash.as_b256())
            .send()
            .await?;
        self.confirm(ActionKind::SubmitProof, pending).await
    }

    async fn claim_payment(&self, token_id: TokenId) -> Result<ActionReceipt, DispatchError> {
        let house = IAuctionHouse::new(self.auction, &self.provider);
        let pending = house.claimPayment(token_id.as_u256()).send().await?;
        self.confirm(ActionKind::ClaimPayment, pending).await
    }
}
