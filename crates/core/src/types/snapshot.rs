use std::time::Duration;

use alloy::primitives::Address;

use super::primitives::{Price, TokenId};

/// Live auction status, read fresh every cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionSnapshot {
    pub current_price: Price,
    pub is_active: bool,
    pub time_remaining: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerInfo {
    pub winner: Address,
    pub winning_bid: Price,
    pub winning_token_id: TokenId,
}

impl WinnerInfo {
    /// Address the contract reports when an auction closed without bids.
    pub const NO_WINNER: Address = Address::ZERO;

    pub fn none() -> Self {
        Self {
            winner: Self::NO_WINNER,
            winning_bid: Price::ZERO,
            winning_token_id: TokenId::default(),
        }
    }

    pub fn has_winner(&self) -> bool {
        self.winner != Self::NO_WINNER
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementState {
    pub proof_submitted: bool,
    pub claimed: bool,
}

/// Everything read during one cycle. Later reads are only present when the
/// earlier ones made them necessary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub snapshot: AuctionSnapshot,
    pub winner: Option<WinnerInfo>,
    pub settlement: Option<SettlementState>,
}

impl Observation {
    pub fn new(snapshot: AuctionSnapshot) -> Self {
        Self {
            snapshot,
            winner: None,
            settlement: None,
        }
    }
}
