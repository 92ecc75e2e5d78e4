//! Reference data types and the collaborator trait that supplies them.

use crate::{errors::Result, network::Network};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Chain name for the exchange's own chain, always a valid transfer target.
pub const NATIVE_CHAIN_NAME: &str = "Carbon";
/// Chain name for the EVM side of the exchange's own chain.
pub const NATIVE_EVM_CHAIN_NAME: &str = "Carbon EVM";

/// Market as returned by the chain query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
	pub id: String,
	#[serde(default)]
	pub name: String,
}

/// Token as returned by the chain query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
	pub denom: String,
	pub symbol: String,
}

/// Bridging mechanism a connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeKind {
	Polynetwork,
	Ibc,
	Axelar,
}

impl fmt::Display for BridgeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BridgeKind::Polynetwork => f.write_str("Polynetwork"),
			BridgeKind::Ibc => f.write_str("IBC"),
			BridgeKind::Axelar => f.write_str("Axelar"),
		}
	}
}

/// A bridge connection to an external chain.
///
/// `identifiers` are IBC channel ids, Polynetwork bridge contract addresses
/// or Axelar connection ids depending on `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRecord {
	pub kind: BridgeKind,
	pub chain_name: String,
	#[serde(default)]
	pub bridge_name: String,
	#[serde(default)]
	pub identifiers: Vec<String>,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

fn default_enabled() -> bool {
	true
}

/// Enabled bridges grouped by mechanism, then by chain name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeDirectory {
	chains: BTreeMap<BridgeKind, BTreeMap<String, BTreeSet<String>>>,
}

impl BridgeDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a chain (and its identifiers) under a bridging mechanism.
	pub fn insert<I>(&mut self, kind: BridgeKind, chain_name: impl Into<String>, identifiers: I)
	where
		I: IntoIterator<Item = String>,
	{
		self.chains
			.entry(kind)
			.or_default()
			.entry(chain_name.into())
			.or_default()
			.extend(identifiers);
	}

	/// Chain names reachable through one mechanism.
	pub fn chain_names(&self, kind: BridgeKind) -> impl Iterator<Item = &str> {
		self.chains
			.get(&kind)
			.into_iter()
			.flat_map(|chains| chains.keys().map(String::as_str))
	}

	/// Every identifier of every enabled bridge.
	pub fn identifiers(&self) -> BTreeSet<String> {
		self.chains
			.values()
			.flat_map(|chains| chains.values())
			.flat_map(|ids| ids.iter().cloned())
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		self.chains.values().all(|chains| chains.is_empty())
	}
}

/// Immutable bundle of reference collections for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSnapshot {
	pub network: Network,
	pub market_ids: BTreeSet<String>,
	pub pool_ids: BTreeSet<String>,
	pub token_denoms: BTreeSet<String>,
	pub token_symbols: BTreeSet<String>,
	pub bridges: BridgeDirectory,
	pub gas_price_denoms: BTreeSet<String>,
	pub perp_pool_ids: BTreeSet<String>,
}

impl ReferenceSnapshot {
	pub fn empty(network: Network) -> Self {
		Self {
			network,
			market_ids: BTreeSet::new(),
			pool_ids: BTreeSet::new(),
			token_denoms: BTreeSet::new(),
			token_symbols: BTreeSet::new(),
			bridges: BridgeDirectory::new(),
			gas_price_denoms: BTreeSet::new(),
			perp_pool_ids: BTreeSet::new(),
		}
	}

	/// Chain names accepted as transfer options: every bridged chain plus
	/// the native chain and its EVM side.
	pub fn transfer_chain_names(&self) -> BTreeSet<String> {
		let mut names: BTreeSet<String> = [BridgeKind::Polynetwork, BridgeKind::Axelar, BridgeKind::Ibc]
			.into_iter()
			.flat_map(|kind| self.bridges.chain_names(kind).map(str::to_string).collect::<Vec<_>>())
			.collect();
		names.insert(NATIVE_CHAIN_NAME.to_string());
		names.insert(NATIVE_EVM_CHAIN_NAME.to_string());
		names
	}

	/// IBC chain names plus the native chain.
	pub fn ibc_chain_names(&self) -> BTreeSet<String> {
		let mut names: BTreeSet<String> = self
			.bridges
			.chain_names(BridgeKind::Ibc)
			.map(str::to_string)
			.collect();
		names.insert(NATIVE_CHAIN_NAME.to_string());
		names
	}

	pub fn bridge_identifiers(&self) -> BTreeSet<String> {
		self.bridges.identifiers()
	}
}

/// Health of a reference source as reported before any data is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceHealth {
	Healthy,
	Unhealthy(String),
}

impl SourceHealth {
	pub fn is_healthy(&self) -> bool {
		matches!(self, SourceHealth::Healthy)
	}
}

/// Read-only chain query service supplying reference data for one network.
///
/// Implementations return complete result sets: any pagination is drained
/// before a call returns.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
	/// Network this source answers for.
	fn network(&self) -> Network;

	/// Short name used in logs.
	fn name(&self) -> &str;

	async fn health_check(&self) -> Result<SourceHealth>;

	async fn markets(&self) -> Result<Vec<MarketRecord>>;

	async fn pool_ids(&self) -> Result<Vec<String>>;

	async fn tokens(&self) -> Result<Vec<TokenRecord>>;

	/// All bridge connections, enabled or not.
	async fn bridges(&self) -> Result<Vec<BridgeRecord>>;

	async fn min_gas_price_denoms(&self) -> Result<Vec<String>>;

	async fn perp_pool_ids(&self) -> Result<Vec<String>>;
}
