use async_trait::async_trait;

use crate::{
    error::StateError,
    types::snapshot::{AuctionSnapshot, SettlementState, WinnerInfo},
};

/// Read side of the auction contract. Every call hits current committed
/// state; nothing is cached.
#[async_trait]
pub trait StateReader: Send + Sync {
    async fn read_snapshot(&self) -> Result<AuctionSnapshot, StateError>;

    async fn read_winner(&self) -> Result<WinnerInfo, StateError>;

    /// Only meaningful once `read_winner` has returned a real winner.
    async fn read_settlement(&self) -> Result<SettlementState, StateError>;
}
