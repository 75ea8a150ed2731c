use std::fmt;

use thiserror::Error;

use crate::{
    error::Error,
    types::{
        action::{ActionKind, ActionReceipt},
        case::AuctionCase,
    },
};

/// Where in a cycle a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStep {
    ReadSnapshot,
    ReadWinner,
    ReadSettlement,
    Classify,
    PrepareProof,
    Dispatch(ActionKind),
}

impl fmt::Display for CycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStep::ReadSnapshot => f.write_str("getAuctionStatus"),
            CycleStep::ReadWinner => f.write_str("getWinnerInfo"),
            CycleStep::ReadSettlement => f.write_str("getSettlementState"),
            CycleStep::Classify => f.write_str("classify"),
            CycleStep::PrepareProof => f.write_str("prepare proof"),
            CycleStep::Dispatch(kind) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{step} failed: {source}")]
pub struct CycleError {
    pub step: CycleStep,
    pub source: Error,
}

impl CycleError {
    pub fn new(step: CycleStep, source: impl Into<Error>) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }

    pub(crate) fn at<E: Into<Error>>(step: CycleStep) -> impl FnOnce(E) -> Self {
        move |source| Self::new(step, source)
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Auction is live; nothing was dispatched.
    Idle(AuctionCase),
    Advanced {
        case: AuctionCase,
        receipts: Vec<ActionReceipt>,
    },
    Failed(CycleError),
}

impl CycleOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CycleOutcome::Failed(_))
    }

    pub fn case(&self) -> Option<&AuctionCase> {
        match self {
            CycleOutcome::Idle(case) | CycleOutcome::Advanced { case, .. } => Some(case),
            CycleOutcome::Failed(_) => None,
        }
    }

    pub fn receipts(&self) -> &[ActionReceipt] {
        match self {
            CycleOutcome::Advanced { receipts, .. } => receipts,
            CycleOutcome::Idle(_) | CycleOutcome::Failed(_) => &[],
        }
    }
}
