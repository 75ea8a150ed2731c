use std::{fmt, time::Duration};

use crate::error::ClassificationError;

use super::{
    primitives::{Price, TokenId},
    snapshot::Observation,
};

/// Decision case derived from one cycle's reads. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionCase {
    Active {
        current_price: Price,
        time_remaining: Duration,
    },
    EndedNoBids,
    EndedWinnerProofPending {
        token_id: TokenId,
    },
    EndedWinnerPaymentPending {
        token_id: TokenId,
    },
    EndedWinnerSettled {
        token_id: TokenId,
    },
}

impl AuctionCase {
    pub fn classify(observation: &Observation) -> Result<Self, ClassificationError> {
        let snapshot = &observation.snapshot;
        if snapshot.is_active {
            return Ok(AuctionCase::Active {
                current_price: snapshot.current_price,
                time_remaining: snapshot.time_remaining,
            });
        }

        let winner = observation
            .winner
            .ok_or(ClassificationError::MissingWinner)?;

        if !winner.has_winner() {
            return Ok(AuctionCase::EndedNoBids);
        }

        let token_id = winner.winning_token_id;
        let settlement = observation
            .settlement
            .ok_or(ClassificationError::MissingSettlement(token_id))?;

        // Proof comes first regardless of the claim flag.
        match (settlement.proof_submitted, settlement.claimed) {
            (false, _) => Ok(AuctionCase::EndedWinnerProofPending { token_id }),
            (true, false) => Ok(AuctionCase::EndedWinnerPaymentPending { token_id }),
            (true, true) => Ok(AuctionCase::EndedWinnerSettled { token_id }),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AuctionCase::Active { .. })
    }
}

impl fmt::Display for AuctionCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionCase::Active {
                current_price,
                time_remaining,
            } => write!(
                f,
                "active (price {current_price}, {}s remaining)",
                time_remaining.as_secs()
            ),
            AuctionCase::EndedNoBids => f.write_str("ended without bids"),
            AuctionCase::EndedWinnerProofPending { token_id } => {
                write!(f, "ended, proof pending for token {token_id}")
            }
            AuctionCase::EndedWinnerPaymentPending { token_id } => {
                write!(f, "ended, payment pending for token {token_id}")
            }
            AuctionCase::EndedWinnerSettled { token_id } => {
                write!(f, "ended, token {token_id} settled")
            }
        }
    }
}
