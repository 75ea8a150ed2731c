use std::{path::PathBuf, sync::Arc};

use alloy::{providers::Provider, signers::local::PrivateKeySigner};
use clap::Parser;
use eyre::WrapErr;
use keeper_cli::{
    config::{Overrides, load_config_or_default, resolve_config},
    provider,
};
use keeper_core::{
    AuctionClient, FixedProof, NotificationListener, PlaceholderProof, ProofSource, ProofTable,
    ReconciliationEngine, Scheduler,
};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "auction-keeper", about = "Drives an on-chain auction through its lifecycle", version)]
struct Cli {
    /// Path to the keeper configuration file [default: keeper.toml, optional]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RPC endpoint (ws:// enables event subscriptions)
    #[arg(long, env = "KEEPER_RPC_URL", value_name = "URL")]
    rpc_url: String,

    /// Operator signing key
    #[arg(long, env = "PRIVATE_KEY", value_name = "KEY", hide_env_values = true)]
    private_key: String,

    /// Auction contract address
    #[arg(long, env = "AUCTION_ADDRESS", value_name = "ADDRESS")]
    auction: Option<String>,

    /// Start price for new auctions, in ether
    #[arg(long, env = "START_PRICE", value_name = "AMOUNT")]
    start_price: Option<String>,

    /// End price for new auctions, in ether
    #[arg(long, env = "END_PRICE", value_name = "AMOUNT")]
    end_price: Option<String>,

    /// Seconds between reconciliation cycles
    #[arg(long, env = "POLL_INTERVAL_SECS", value_name = "SECS")]
    poll_interval_secs: Option<u64>,

    /// Confirmations to wait for on every transaction
    #[arg(long, env = "CONFIRMATIONS", value_name = "N")]
    confirmations: Option<u64>,

    /// Proof hash submitted for winning tokens (zero placeholder if unset)
    #[arg(long, env = "PROOF_HASH", value_name = "HASH")]
    proof_hash: Option<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file = load_config_or_default(cli.config.as_deref())?;
    let config = resolve_config(
        &file,
        Overrides {
            auction: cli.auction,
            start_price: cli.start_price,
            end_price: cli.end_price,
            poll_interval_secs: cli.poll_interval_secs,
            confirmations: cli.confirmations,
            proof_hash: cli.proof_hash,
        },
    )?;

    let signer: PrivateKeySigner = cli
        .private_key
        .trim()
        .parse()
        .wrap_err("PRIVATE_KEY is not a valid secp256k1 key")?;
    let operator = signer.address();

    let provider = provider::connect(&cli.rpc_url, signer).await?;
    let chain_id = provider
        .get_chain_id()
        .await
        .wrap_err("endpoint did not answer eth_chainId")?;

    info!(
        chain_id,
        %operator,
        auction = %config.auction,
        start_price = %config.defaults.start_price,
        end_price = %config.defaults.end_price,
        poll_secs = config.poll_interval.as_secs(),
        confirmations = config.confirmations,
        "keeper starting"
    );

    let listener = NotificationListener::new(provider.clone(), config.auction).spawn();

    let proof: Arc<dyn ProofSource> = match config.proof_hash {
        Some(hash) => Arc::new(FixedProof::new(hash)),
        None if !config.proofs.is_empty() => {
            info!(tokens = config.proofs.len(), "using per-token proof table");
            Arc::new(ProofTable::new(config.proofs))
        }
        None => {
            warn!("no proof hash configured; winning tokens get the zero placeholder proof");
            Arc::new(PlaceholderProof)
        }
    };

    let client =
        AuctionClient::new(provider, config.auction).with_confirmations(config.confirmations);
    let engine = ReconciliationEngine::new(client.clone(), client, proof, config.defaults);
    let scheduler = Scheduler::new(engine, config.poll_interval);

    let stats = scheduler.run(shutdown_signal()).await;

    listener.abort();
    info!(
        cycles = stats.cycles,
        failed = stats.failed,
        "keeper stopped"
    );

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            error!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
