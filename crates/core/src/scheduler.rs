use std::{future::Future, time::Duration};

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::engine::{CycleOutcome, Reconcile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub cycles: u64,
    pub idle: u64,
    pub advanced: u64,
    pub failed: u64,
}

impl SchedulerStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Idle(_) => self.idle += 1,
            CycleOutcome::Advanced { .. } => self.advanced += 1,
            CycleOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives a [`Reconcile`] implementation on a fixed period.
///
/// The first cycle runs immediately. Cycles never overlap: each one is
/// awaited before the next tick is taken, and ticks missed while a cycle was
/// still running are dropped rather than queued.
pub struct Scheduler<E>
where
    E: Reconcile,
{
    engine: E,
    period: Duration,
}

impl<E> Scheduler<E>
where
    E: Reconcile,
{
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(15);

    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(engine: E, period: Duration) -> Self {
        assert!(!period.is_zero(), "scheduler period must be non-zero");
        Self { engine, period }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs until `shutdown` resolves. A cycle still in flight at that point
    /// is dropped; whatever it had already committed is picked up by the next
    /// process from fresh reads.
    pub async fn run<F>(&self, shutdown: F) -> SchedulerStats
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut stats = SchedulerStats::default();
        tokio::pin!(shutdown);

        info!(period_secs = self.period.as_secs_f64(), "scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            let started = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!("shutdown during reconciliation cycle; abandoning it");
                    break;
                }
                outcome = self.engine.reconcile() => outcome,
            };
            stats.record(&outcome);

            let elapsed = started.elapsed();
            if elapsed > self.period {
                warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    period_ms = self.period.as_millis() as u64,
                    "cycle overran polling period; skipping missed ticks"
                );
            }
        }

        info!(
            cycles = stats.cycles,
            idle = stats.idle,
            advanced = stats.advanced,
            failed = stats.failed,
            "scheduler stopped"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use alloy::transports::TransportErrorKind;
    use async_trait::async_trait;

    use std::sync::Arc;

    use alloy::primitives::address;

    use super::*;
    use crate::{
        engine::{CycleError, CycleStep, ReconciliationEngine},
        error::StateError,
        proof::PlaceholderProof,
        testing::{FakeAuctionHouse, defaults, price},
        types::{
            action::PendingAction,
            case::AuctionCase,
            primitives::TokenId,
            snapshot::SettlementState,
        },
    };

    const PERIOD: Duration = Duration::from_secs(15);

    #[derive(Default)]
    struct ScriptedEngine {
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl Reconcile for ScriptedEngine {
        async fn reconcile(&self) -> CycleOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                time::sleep(self.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                let err = StateError::from(TransportErrorKind::custom_str("node unreachable"));
                CycleOutcome::Failed(CycleError::new(CycleStep::ReadSnapshot, err))
            } else {
                CycleOutcome::Idle(AuctionCase::EndedNoBids)
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_once_eagerly() {
        let scheduler = Scheduler::new(ScriptedEngine::default(), PERIOD);

        let stats = scheduler.run(time::sleep(PERIOD / 2)).await;

        assert_eq!(stats.cycles, 1);
        assert_eq!(scheduler.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycles_never_overlap() {
        let engine = ScriptedEngine {
            delay: PERIOD * 5 / 2,
            ..Default::default()
        };
        let scheduler = Scheduler::new(engine, PERIOD);

        scheduler.run(time::sleep(PERIOD * 10)).await;

        let engine = scheduler.engine();
        let calls = engine.calls.load(Ordering::SeqCst);
        assert_eq!(engine.max_in_flight.load(Ordering::SeqCst), 1);
        assert!((3..=4).contains(&calls), "unexpected cycle count {calls}");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycles_do_not_stop_the_loop() {
        let engine = ScriptedEngine {
            fail: true,
            ..Default::default()
        };
        let scheduler = Scheduler::new(engine, PERIOD);

        let stats = scheduler.run(time::sleep(PERIOD * 7 / 2)).await;

        assert_eq!(stats.cycles, 4);
        assert_eq!(stats.failed, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_abandons_in_flight_cycle() {
        let engine = ScriptedEngine {
            delay: PERIOD * 4,
            ..Default::default()
        };
        let scheduler = Scheduler::new(engine, PERIOD);

        let stats = scheduler.run(time::sleep(PERIOD)).await;

        assert_eq!(stats.cycles, 0);
        assert_eq!(scheduler.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_reads_never_overlap_real_cycles() {
        let house = FakeAuctionHouse::ended_with_winner(
            address!("0x0000000000000000000000000000000000000abc"),
            price(42),
            TokenId::from(7),
            SettlementState {
                proof_submitted: true,
                claimed: false,
            },
        );
        house.world().read_delay = Some(PERIOD * 2);
        let engine = ReconciliationEngine::new(
            house.clone(),
            house.clone(),
            Arc::new(PlaceholderProof),
            defaults(),
        );
        let scheduler = Scheduler::new(engine, PERIOD);

        let stats = scheduler.run(time::sleep(PERIOD * 20)).await;

        assert!(stats.cycles >= 2, "unexpected stats {stats:?}");
        assert_eq!(stats.failed, 0);
        assert_eq!(house.world().max_reads_in_flight, 1);
        assert_eq!(
            house.dispatched(),
            vec![
                PendingAction::ClaimPayment {
                    token_id: TokenId::from(7)
                },
                PendingAction::StartAuction {
                    start_price: price(100),
                    end_price: price(10),
                },
            ]
        );
    }
}
