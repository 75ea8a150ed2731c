use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    dispatcher::ActionDispatcher,
    engine::outcome::{CycleError, CycleOutcome, CycleStep},
    proof::ProofSource,
    reader::StateReader,
    types::{
        action::PendingAction,
        case::AuctionCase,
        config::AuctionDefaults,
        snapshot::Observation,
    },
};

/// One reconciliation cycle per call. The trait is the seam the scheduler
/// drives.
#[async_trait]
pub trait Reconcile: Send + Sync {
    async fn reconcile(&self) -> CycleOutcome;
}

/// Re-derives the auction case from fresh reads on every cycle and issues
/// whatever transition that case calls for. Holds no record of earlier
/// cycles; a command that already took effect shows up in the next read.
pub struct ReconciliationEngine<R, D>
where
    R: StateReader,
    D: ActionDispatcher,
{
    reader: R,
    dispatcher: D,
    proof: Arc<dyn ProofSource>,
    defaults: AuctionDefaults,
}

impl<R, D> ReconciliationEngine<R, D>
where
    R: StateReader,
    D: ActionDispatcher,
{
    pub fn new(
        reader: R,
        dispatcher: D,
        proof: Arc<dyn ProofSource>,
        defaults: AuctionDefaults,
    ) -> Self {
        Self {
            reader,
            dispatcher,
            proof,
            defaults,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn defaults(&self) -> &AuctionDefaults {
        &self.defaults
    }

    /// Reads only what the decision needs: winner once the auction is over,
    /// settlement once a real winner exists.
    pub async fn observe(&self) -> Result<Observation, CycleError> {
        let snapshot = self
            .reader
            .read_snapshot()
            .await
            .map_err(CycleError::at(CycleStep::ReadSnapshot))?;

        let mut observation = Observation::new(snapshot);
        if snapshot.is_active {
            return Ok(observation);
        }

        let winner = self
            .reader
            .read_winner()
            .await
            .map_err(CycleError::at(CycleStep::ReadWinner))?;
        observation.winner = Some(winner);

        if winner.has_winner() {
            let settlement = self
                .reader
                .read_settlement()
                .await
                .map_err(CycleError::at(CycleStep::ReadSettlement))?;
            observation.settlement = Some(settlement);
        }

        Ok(observation)
    }

    pub async fn plan(&self, case: &AuctionCase) -> Result<Vec<PendingAction>, CycleError> {
        let restart = PendingAction::StartAuction {
            start_price: self.defaults.start_price,
            end_price: self.defaults.end_price,
        };

        let actions = match *case {
            AuctionCase::Active { .. } => Vec::new(),
            // Close and reopen form one transition.
            AuctionCase::EndedNoBids => vec![PendingAction::EndAuctionNoBids, restart],
            AuctionCase::EndedWinnerProofPending { token_id } => {
                let proof_hash = self
                    .proof
                    .proof_for(token_id)
                    .await
                    .map_err(CycleError::at(CycleStep::PrepareProof))?;
                vec![PendingAction::SubmitProof {
                    token_id,
                    proof_hash,
                }]
            }
            AuctionCase::EndedWinnerPaymentPending { token_id } => {
                vec![PendingAction::ClaimPayment { token_id }]
            }
            AuctionCase::EndedWinnerSettled { .. } => vec![restart],
        };

        Ok(actions)
    }

    pub async fn try_reconcile(&self) -> Result<CycleOutcome, CycleError> {
        let observation = self.observe().await?;
        let case = AuctionCase::classify(&observation)
            .map_err(CycleError::at(CycleStep::Classify))?;

        if let AuctionCase::Active {
            current_price,
            time_remaining,
        } = case
        {
            info!(
                price = %current_price,
                remaining_secs = time_remaining.as_secs(),
                "auction live"
            );
            return Ok(CycleOutcome::Idle(case));
        }

        let actions = self.plan(&case).await?;
        info!(%case, actions = actions.len(), "advancing auction");

        let mut receipts = Vec::with_capacity(actions.len());
        for action in actions {
            let kind = action.kind();
            let receipt = self
                .dispatcher
                .dispatch(action)
                .await
                .map_err(CycleError::at(CycleStep::Dispatch(kind)))?;

            info!(
                %kind,
                tx_hash = %receipt.tx_hash,
                block = ?receipt.block_number,
                "action confirmed"
            );
            receipts.push(receipt);
        }

        Ok(CycleOutcome::Advanced { case, receipts })
    }
}

#[async_trait]
impl<R, D> Reconcile for ReconciliationEngine<R, D>
where
    R: StateReader,
    D: ActionDispatcher,
{
    async fn reconcile(&self) -> CycleOutcome {
        match self.try_reconcile().await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(step = %err.step, error = %err.source, "reconciliation cycle failed");
                CycleOutcome::Failed(err)
            }
        }
    }
}
