//! In-memory auction house used by unit tests. It implements both sides of
//! the contract and applies each confirmed command to its own state.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use alloy::{
    primitives::{Address, B256, U256},
    transports::TransportErrorKind,
};
use async_trait::async_trait;

use crate::{
    dispatcher::ActionDispatcher,
    error::{DispatchError, StateError},
    reader::StateReader,
    types::{
        action::{ActionKind, ActionReceipt, PendingAction},
        config::AuctionDefaults,
        primitives::{Price, ProofHash, TokenId},
        snapshot::{AuctionSnapshot, SettlementState, WinnerInfo},
    },
};

pub fn price(value: u64) -> Price {
    Price::new(U256::from(value))
}

pub fn defaults() -> AuctionDefaults {
    AuctionDefaults::new(price(100), price(10))
}

#[derive(Debug)]
pub struct World {
    pub snapshot: AuctionSnapshot,
    pub winner: WinnerInfo,
    pub settlement: SettlementState,
    pub dispatched: Vec<PendingAction>,
    pub snapshot_reads: usize,
    pub winner_reads: usize,
    pub settlement_reads: usize,
    pub fail_dispatch: Option<ActionKind>,
    pub fail_reads: bool,
    pub read_delay: Option<Duration>,
    pub reads_in_flight: usize,
    pub max_reads_in_flight: usize,
    next_tx: u64,
}

impl World {
    fn ended(price_now: Price) -> Self {
        Self {
            snapshot: AuctionSnapshot {
                current_price: price_now,
                is_active: false,
                time_remaining: Duration::ZERO,
            },
            winner: WinnerInfo::none(),
            settlement: SettlementState::default(),
            dispatched: Vec::new(),
            snapshot_reads: 0,
            winner_reads: 0,
            settlement_reads: 0,
            fail_dispatch: None,
            fail_reads: false,
            read_delay: None,
            reads_in_flight: 0,
            max_reads_in_flight: 0,
            next_tx: 0,
        }
    }

    fn apply(&mut self, action: PendingAction) {
        match action {
            PendingAction::EndAuctionNoBids => {
                self.snapshot.is_active = false;
                self.snapshot.time_remaining = Duration::ZERO;
            }
            PendingAction::StartAuction { start_price, .. } => {
                self.snapshot = AuctionSnapshot {
                    current_price: start_price,
                    is_active: true,
                    time_remaining: Duration::from_secs(3_600),
                };
                self.winner = WinnerInfo::none();
                self.settlement = SettlementState::default();
            }
            PendingAction::SubmitProof { .. } => self.settlement.proof_submitted = true,
            PendingAction::ClaimPayment { .. } => self.settlement.claimed = true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FakeAuctionHouse {
    world: Arc<Mutex<World>>,
}

impl FakeAuctionHouse {
    pub fn active(price_now: Price, remaining: Duration) -> Self {
        let house = Self::ended_without_bids(price_now);
        {
            let mut world = house.world();
            world.snapshot.is_active = true;
            world.snapshot.time_remaining = remaining;
        }
        house
    }

    pub fn ended_without_bids(price_now: Price) -> Self {
        Self {
            world: Arc::new(Mutex::new(World::ended(price_now))),
        }
    }

    pub fn ended_with_winner(
        winner: Address,
        bid: Price,
        token_id: TokenId,
        settlement: SettlementState,
    ) -> Self {
        let house = Self::ended_without_bids(bid);
        {
            let mut world = house.world();
            world.winner = WinnerInfo {
                winner,
                winning_bid: bid,
                winning_token_id: token_id,
            };
            world.settlement = settlement;
        }
        house
    }

    pub fn world(&self) -> MutexGuard<'_, World> {
        self.world.lock().expect("world lock poisoned")
    }

    pub fn dispatched(&self) -> Vec<PendingAction> {
        self.world().dispatched.clone()
    }

    pub fn fail_next(&self, kind: ActionKind) {
        self.world().fail_dispatch = Some(kind);
    }

    async fn read<T>(&self, f: impl FnOnce(&mut World) -> T) -> Result<T, StateError> {
        let delay = {
            let mut world = self.world();
            world.reads_in_flight += 1;
            world.max_reads_in_flight = world.max_reads_in_flight.max(world.reads_in_flight);
            world.read_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut world = self.world();
        world.reads_in_flight -= 1;
        if world.fail_reads {
            return Err(TransportErrorKind::custom_str("connection refused").into());
        }
        Ok(f(&mut world))
    }

    fn record(&self, action: PendingAction) -> Result<ActionReceipt, DispatchError> {
        let mut world = self.world();
        world.dispatched.push(action);
        world.next_tx += 1;
        let tx_hash = B256::left_padding_from(&world.next_tx.to_be_bytes());

        if world.fail_dispatch == Some(action.kind()) {
            world.fail_dispatch = None;
            return Err(DispatchError::Reverted { tx_hash });
        }

        world.apply(action);
        Ok(ActionReceipt {
            kind: action.kind(),
            tx_hash,
            block_number: Some(world.next_tx),
        })
    }
}

#[async_trait]
impl StateReader for FakeAuctionHouse {
    async fn read_snapshot(&self) -> Result<AuctionSnapshot, StateError> {
        self.read(|world| {
            world.snapshot_reads += 1;
            world.snapshot
        })
        .await
    }

    async fn read_winner(&self) -> Result<WinnerInfo, StateError> {
        self.read(|world| {
            world.winner_reads += 1;
            world.winner
        })
        .await
    }

    async fn read_settlement(&self) -> Result<SettlementState, StateError> {
        self.read(|world| {
            world.settlement_reads += 1;
            world.settlement
        })
        .await
    }
}

#[async_trait]
impl ActionDispatcher for FakeAuctionHouse {
    async fn end_auction_no_bids(&self) -> Result<ActionReceipt, DispatchError> {
        self.record(PendingAction::EndAuctionNoBids)
    }

    async fn start_auction(
        &self,
        start_price: Price,
        end_price: Price,
    ) -> Result<ActionReceipt, DispatchError> {
        self.record(PendingAction::StartAuction {
            start_price,
            end_price,
        })
    }

    async fn submit_proof(
        &self,
        token_id: TokenId,
        proof_hash: ProofHash,
    ) -> Result<ActionReceipt, DispatchError> {
        self.record(PendingAction::SubmitProof {
            token_id,
            proof_hash,
        })
    }

    async fn claim_payment(&self, token_id: TokenId) -> Result<ActionReceipt, DispatchError> {
        self.record(PendingAction::ClaimPayment { token_id })
    }
}
