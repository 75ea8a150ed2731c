use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use alloy::primitives::{Address, B256, U256};
use keeper_core::{AuctionDefaults, Price, ProofHash, TokenId};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "keeper.toml";
pub const DEFAULT_START_PRICE: &str = "100";
pub const DEFAULT_END_PRICE: &str = "10";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct KeeperFile {
    #[serde(default)]
    pub auction: AuctionSection,
    #[serde(default)]
    pub keeper: KeeperSection,
    /// Token id to proof hash, used when no single `proof_hash` is set.
    #[serde(default)]
    pub proofs: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct AuctionSection {
    pub address: Option<String>,
    pub start_price: Option<String>,
    pub end_price: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct KeeperSection {
    pub poll_interval_secs: Option<u64>,
    pub confirmations: Option<u64>,
    pub proof_hash: Option<String>,
}

/// Values from flags or the environment; each one wins over the file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub auction: Option<String>,
    pub start_price: Option<String>,
    pub end_price: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub confirmations: Option<u64>,
    pub proof_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeeperConfig {
    pub auction: Address,
    pub defaults: AuctionDefaults,
    pub poll_interval: Duration,
    pub confirmations: u64,
    /// Overrides `proofs` when set.
    pub proof_hash: Option<ProofHash>,
    /// Per-token proofs. Empty, with no `proof_hash`, selects the placeholder.
    pub proofs: BTreeMap<TokenId, ProofHash>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse toml at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("missing auction address: pass --auction, set AUCTION_ADDRESS or [auction] address")]
    MissingAuction,
    #[error("invalid auction address {value:?}: {reason}")]
    InvalidAddress { value: String, reason: String },
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidPrice {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid proof hash {value:?}: {reason}")]
    InvalidProofHash { value: String, reason: String },
    #[error("invalid token id {value:?} in [proofs]: {reason}")]
    InvalidTokenId { value: String, reason: String },
    #[error("poll interval must be at least one second")]
    ZeroPollInterval,
    #[error("confirmations must be at least one")]
    ZeroConfirmations,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<KeeperFile, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: KeeperFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

/// An explicitly named file must exist; the default one is optional.
pub fn load_config_or_default(path: Option<&Path>) -> Result<KeeperFile, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => match load_config(DEFAULT_CONFIG_PATH) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(KeeperFile::default())
            }
            other => other,
        },
    }
}

pub fn resolve_config(file: &KeeperFile, overrides: Overrides) -> Result<KeeperConfig, ResolveError> {
    let auction = pick(overrides.auction, file.auction.address.as_deref())
        .ok_or(ResolveError::MissingAuction)?;
    let auction = Address::from_str(&auction).map_err(|err| ResolveError::InvalidAddress {
        value: auction.clone(),
        reason: err.to_string(),
    })?;

    let start_price = pick(overrides.start_price, file.auction.start_price.as_deref())
        .unwrap_or_else(|| DEFAULT_START_PRICE.to_string());
    let end_price = pick(overrides.end_price, file.auction.end_price.as_deref())
        .unwrap_or_else(|| DEFAULT_END_PRICE.to_string());
    let defaults = AuctionDefaults::new(
        parse_price("start price", start_price)?,
        parse_price("end price", end_price)?,
    );

    let poll_interval_secs = overrides
        .poll_interval_secs
        .or(file.keeper.poll_interval_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
    if poll_interval_secs == 0 {
        return Err(ResolveError::ZeroPollInterval);
    }

    let confirmations = overrides
        .confirmations
        .or(file.keeper.confirmations)
        .unwrap_or(DEFAULT_CONFIRMATIONS);
    if confirmations == 0 {
        return Err(ResolveError::ZeroConfirmations);
    }

    let proof_hash = pick(overrides.proof_hash, file.keeper.proof_hash.as_deref())
        .map(parse_proof_hash)
        .transpose()?;

    let proofs = file
        .proofs
        .iter()
        .map(|(token_id, hash)| {
            let token_id = token_id.trim();
            let token_id = U256::from_str(token_id)
                .map(TokenId::new)
                .map_err(|err| ResolveError::InvalidTokenId {
                    value: token_id.to_string(),
                    reason: err.to_string(),
                })?;
            Ok((token_id, parse_proof_hash(hash.trim().to_string())?))
        })
        .collect::<Result<BTreeMap<_, _>, ResolveError>>()?;

    Ok(KeeperConfig {
        auction,
        defaults,
        poll_interval: Duration::from_secs(poll_interval_secs),
        confirmations,
        proof_hash,
        proofs,
    })
}

// Blank strings count as unset so an empty env var does not shadow the file.
fn pick(over: Option<String>, file: Option<&str>) -> Option<String> {
    over.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            file.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
}

fn parse_proof_hash(value: String) -> Result<ProofHash, ResolveError> {
    B256::from_str(&value)
        .map(ProofHash::new)
        .map_err(|err| ResolveError::InvalidProofHash {
            reason: err.to_string(),
            value,
        })
}

fn parse_price(field: &'static str, value: String) -> Result<Price, ResolveError> {
    Price::from_ether(&value).map_err(|err| ResolveError::InvalidPrice {
        field,
        reason: err.to_string(),
        value,
    })
}
