use std::{future::Future, time::Duration};

use alloy::{
    primitives::Address,
    providers::Provider,
    rpc::types::{Filter, Log},
    transports::{TransportError, TransportErrorKind},
};
use futures::{StreamExt, stream::{self, BoxStream}};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{error::ListenerError, notifications::event::AuctionNotification};

pub type BoxLogStream = BoxStream<'static, Log>;

/// Pause between a dropped notification session and the next subscription.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Renders auction house events as they arrive. Purely observational: it
/// holds its own provider handle and shares nothing with the engine.
#[derive(Clone)]
pub struct NotificationListener<P>
where
    P: Provider + Clone,
{
    provider: P,
    auction: Address,
}

impl<P> NotificationListener<P>
where
    P: Provider + Clone + 'static,
{
    pub fn new(provider: P, auction: Address) -> Self {
        Self { provider, auction }
    }

    fn filter(&self) -> Filter {
        Filter::new().address(self.auction)
    }

    pub async fn into_stream(self) -> Result<BoxLogStream, ListenerError> {
        match self.try_subscribe().await {
            Ok(stream) => Ok(stream),
            Err(ListenerError::Transport(err)) => match err {
                TransportError::Transport(TransportErrorKind::PubsubUnavailable) => {
                    debug!("pubsub unavailable; polling for auction logs");
                    self.watch().await
                }
                other => Err(ListenerError::Transport(other)),
            },
        }
    }

    async fn try_subscribe(&self) -> Result<BoxLogStream, ListenerError> {
        let subscription = self.provider.subscribe_logs(&self.filter()).await?;
        Ok(subscription.into_stream().boxed())
    }

    async fn watch(&self) -> Result<BoxLogStream, ListenerError> {
        let poller = self.provider.watch_logs(&self.filter()).await?;
        let stream = poller
            .into_stream()
            .flat_map(stream::iter)
            .boxed();
        Ok(stream)
    }

    pub async fn run(self) -> Result<(), ListenerError> {
        let auction = self.auction;
        let mut logs = self.into_stream().await?;
        info!(%auction, "listening for auction notifications");

        while let Some(log) = logs.next().await {
            match AuctionNotification::from_log(&log) {
                Some(notification) => info!(target: "notifications", "{notification}"),
                None => debug!(
                    target: "notifications",
                    topic0 = ?log.topic0(),
                    "ignoring unrecognised log"
                ),
            }
        }

        warn!(%auction, "notification stream ended");
        Ok(())
    }

    /// Runs the listener on its own task, resubscribing after
    /// [`RECONNECT_DELAY`] whenever a session ends. Failures are logged there
    /// and never reach the reconciliation loop.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(keep_alive(RECONNECT_DELAY, move || self.clone().run()))
    }
}

async fn keep_alive<F, Fut>(retry: Duration, mut session: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), ListenerError>>,
{
    loop {
        match session().await {
            Ok(()) => warn!(retry_secs = retry.as_secs(), "notification session ended; resubscribing"),
            Err(err) => error!(
                error = %err,
                retry_secs = retry.as_secs(),
                "notification listener failed; resubscribing"
            ),
        }
        tokio::time::sleep(retry).await;
    }
}
