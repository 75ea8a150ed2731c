use std::fmt;

use alloy::{
    primitives::{Address, B256, U256},
    rpc::types::Log,
    sol_types::SolEventInterface,
};
use keeper_abi::IAuctionHouse::IAuctionHouseEvents;

use crate::types::primitives::{Price, ProofHash, TokenId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionEvent {
    AuctionStarted {
        start_price: Price,
        end_price: Price,
        start_time: u64,
        end_time: u64,
    },
    AuctionEnded {
        winner: Address,
        winning_bid: Price,
        token_id: TokenId,
        timestamp: u64,
    },
    BidPlaced {
        bidder: Address,
        amount: Price,
        token_id: TokenId,
        timestamp: u64,
    },
    ProofSubmitted {
        token_id: TokenId,
        proof_hash: ProofHash,
        timestamp: u64,
    },
    PaymentClaimed {
        recipient: Address,
        amount: Price,
        token_id: TokenId,
        timestamp: u64,
    },
    WinnerSelected {
        winner: Address,
        winning_bid: Price,
        token_id: TokenId,
        timestamp: u64,
    },
}

fn seconds(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl From<IAuctionHouseEvents> for AuctionEvent {
    fn from(event: IAuctionHouseEvents) -> Self {
        match event {
            IAuctionHouseEvents::AuctionStarted(e) => AuctionEvent::AuctionStarted {
                start_price: Price::new(e.startPrice),
                end_price: Price::new(e.endPrice),
                start_time: seconds(e.startTime),
                end_time: seconds(e.endTime),
            },
            IAuctionHouseEvents::AuctionEnded(e) => AuctionEvent::AuctionEnded {
                winner: e.winner,
                winning_bid: Price::new(e.winningBid),
                token_id: TokenId::new(e.tokenId),
                timestamp: seconds(e.timestamp),
            },
            IAuctionHouseEvents::BidPlaced(e) => AuctionEvent::BidPlaced {
                bidder: e.bidder,
                amount: Price::new(e.amount),
                token_id: TokenId::new(e.tokenId),
                timestamp: seconds(e.timestamp),
            },
            IAuctionHouseEvents::ProofSubmitted(e) => AuctionEvent::ProofSubmitted {
                token_id: TokenId::new(e.tokenId),
                proof_hash: ProofHash::new(e.proofHash),
                timestamp: seconds(e.timestamp),
            },
            IAuctionHouseEvents::PaymentClaimed(e) => AuctionEvent::PaymentClaimed {
                recipient: e.recipient,
                amount: Price::new(e.amount),
                token_id: TokenId::new(e.tokenId),
                timestamp: seconds(e.timestamp),
            },
            IAuctionHouseEvents::WinnerSelected(e) => AuctionEvent::WinnerSelected {
                winner: e.winner,
                winning_bid: Price::new(e.winningBid),
                token_id: TokenId::new(e.tokenId),
                timestamp: seconds(e.timestamp),
            },
        }
    }
}

impl fmt::Display for AuctionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionEvent::AuctionStarted {
                start_price,
                end_price,
                start_time,
                end_time,
            } => write!(
                f,
                "auction started: {start_price} -> {end_price}, runs {start_time}..{end_time}"
            ),
            AuctionEvent::AuctionEnded {
                winner,
                winning_bid,
                token_id,
                timestamp,
            } => {
                if *winner == Address::ZERO {
                    write!(f, "auction ended without bids at {timestamp}")
                } else {
                    write!(
                        f,
                        "auction ended at {timestamp}: {winner} won token {token_id} for {winning_bid}"
                    )
                }
            }
            AuctionEvent::BidPlaced {
                bidder,
                amount,
                token_id,
                timestamp,
            } => write!(
                f,
                "bid placed at {timestamp}: {bidder} bid {amount} for token {token_id}"
            ),
            AuctionEvent::ProofSubmitted {
                token_id,
                proof_hash,
                timestamp,
            } => write!(
                f,
                "proof submitted at {timestamp} for token {token_id}: {proof_hash}"
            ),
            AuctionEvent::PaymentClaimed {
                recipient,
                amount,
                token_id,
                timestamp,
            } => write!(
                f,
                "payment claimed at {timestamp}: {amount} to {recipient} for token {token_id}"
            ),
            AuctionEvent::WinnerSelected {
                winner,
                winning_bid,
                token_id,
                timestamp,
            } => write!(
                f,
                "winner selected at {timestamp}: {winner} with {winning_bid} for token {token_id}"
            ),
        }
    }
}

/// A decoded contract event plus where it landed on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionNotification {
    pub event: AuctionEvent,
    pub tx_hash: Option<B256>,
    pub block_number: Option<u64>,
}

impl AuctionNotification {
    /// Returns `None` for logs that are not auction house events.
    pub fn from_log(log: &Log) -> Option<Self> {
        let decoded =
            IAuctionHouseEvents::decode_raw_log(log.topics(), log.data().data.as_ref()).ok()?;

        Some(Self {
            event: decoded.into(),
            tx_hash: log.transaction_hash,
            block_number: log.block_number,
        })
    }
}

impl fmt::Display for AuctionNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event)?;
        if let Some(tx_hash) = self.tx_hash {
            write!(f, " (tx {tx_hash}")?;
            if let Some(block) = self.block_number {
                write!(f, ", block {block}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
