use std::fmt;

use alloy::primitives::B256;

use super::primitives::{Price, ProofHash, TokenId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    EndAuctionNoBids,
    StartAuction,
    SubmitProof,
    ClaimPayment,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::EndAuctionNoBids => "endAuctionNoBids",
            ActionKind::StartAuction => "startAuction",
            ActionKind::SubmitProof => "submitProof",
            ActionKind::ClaimPayment => "claimPayment",
        };
        f.write_str(name)
    }
}

/// A state-transition command. Each one must be confirmed before the cycle
/// that issued it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    EndAuctionNoBids,
    StartAuction { start_price: Price, end_price: Price },
    SubmitProof { token_id: TokenId, proof_hash: ProofHash },
    ClaimPayment { token_id: TokenId },
}

impl PendingAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PendingAction::EndAuctionNoBids => ActionKind::EndAuctionNoBids,
            PendingAction::StartAuction { .. } => ActionKind::StartAuction,
            PendingAction::SubmitProof { .. } => ActionKind::SubmitProof,
            PendingAction::ClaimPayment { .. } => ActionKind::ClaimPayment,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionReceipt {
    pub kind: ActionKind,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}
