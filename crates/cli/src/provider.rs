use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use eyre::WrapErr;

/// Connects a signing provider. `ws://` endpoints get log subscriptions;
/// `http://` endpoints fall back to filter polling for notifications.
pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> eyre::Result<DynProvider> {
    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect(rpc_url)
        .await
        .wrap_err_with(|| format!("failed to connect to {rpc_url}"))?;

    Ok(provider.erased())
}
